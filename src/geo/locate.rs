use std::time::Duration;

use serde_json::Value;

use crate::geo::table::match_city;
use crate::models::District;

/// Address fields checked for a city name, most specific first.
const CITY_FIELDS: &[&str] = &["city", "state_district", "town", "suburb", "district"];

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("reverse geocoding request failed: {0}")]
    Request(String),
    #[error("reverse geocoding response was not understood: {0}")]
    Response(String),
    #[error("no city in reverse geocoding response")]
    NoCity,
    #[error("no district matches '{0}'")]
    NoMatch(String),
}

/// Client for a Nominatim-compatible `/reverse` endpoint.
pub struct ReverseGeocoder {
    agent: ureq::Agent,
    url: String,
}

impl ReverseGeocoder {
    pub fn new(url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("roza/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            url: url.to_string(),
        }
    }

    /// City name (in Bengali where the geocoder has one) for a coordinate.
    pub fn city_for(&self, latitude: f64, longitude: f64) -> Result<String, LocateError> {
        let body = self
            .agent
            .get(&self.url)
            .query("format", "json")
            .query("lat", &latitude.to_string())
            .query("lon", &longitude.to_string())
            .query("zoom", "10")
            .query("addressdetails", "1")
            .query("accept-language", "bn")
            .call()
            .map_err(|e| LocateError::Request(e.to_string()))?
            .into_string()
            .map_err(|e| LocateError::Request(e.to_string()))?;

        let json: Value =
            serde_json::from_str(&body).map_err(|e| LocateError::Response(e.to_string()))?;
        city_from_response(&json).ok_or(LocateError::NoCity)
    }

    pub fn locate(&self, latitude: f64, longitude: f64) -> Result<District, LocateError> {
        let city = self.city_for(latitude, longitude)?;
        log::debug!("Reverse geocoded ({}, {}) to '{}'", latitude, longitude, city);
        match_city(&city).ok_or(LocateError::NoMatch(city))
    }
}

/// Pull the first non-empty city-like field out of a `/reverse` response.
pub fn city_from_response(json: &Value) -> Option<String> {
    let address = json.get("address")?;
    CITY_FIELDS
        .iter()
        .filter_map(|field| address.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_city_over_broader_fields() {
        let response = json!({
            "address": { "city": "রাজশাহী", "state_district": "রাজশাহী বিভাগ", "country": "বাংলাদেশ" }
        });
        assert_eq!(city_from_response(&response).as_deref(), Some("রাজশাহী"));
    }

    #[test]
    fn falls_through_empty_fields() {
        let response = json!({ "address": { "city": "", "town": "ফেনী" } });
        assert_eq!(city_from_response(&response).as_deref(), Some("ফেনী"));
    }

    #[test]
    fn missing_address_gives_nothing() {
        assert_eq!(city_from_response(&json!({ "error": "Unable to geocode" })), None);
        assert_eq!(city_from_response(&json!({ "address": {} })), None);
    }

    #[test]
    fn response_city_maps_to_district() {
        let response = json!({ "address": { "state_district": "যশোর জেলা" } });
        let city = city_from_response(&response).unwrap();
        assert_eq!(match_city(&city), Some(District::new("যশোর", 6)));
    }
}
