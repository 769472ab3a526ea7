use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use serde_json::json;

use crate::assistant::gateway::{Gateway, GenerateRequest};
use crate::db::repository::{quote_cache_key, StorageRepo};
use crate::models::IslamicQuote;

const QUOTE_PROMPT: &str = "Give a short, beautiful Islamic quote or Hadith for Ramadan preparation in Bengali. Format as JSON: { text: string, reference: string }";

const FALLBACK_QUOTES: &[(&str, &str)] = &[
    ("রমজান হলো নিজেকে পরিবর্তনের শ্রেষ্ঠ মাস।", "আল-হাদিস"),
    (
        "যে ব্যক্তি ঈমানের সাথে ও সওয়াবের আশায় রমজানের রোজা রাখে, তার অতীতের সব গুনাহ ক্ষমা করে দেওয়া হয়।",
        "সহীহ বুখারী",
    ),
    (
        "রোজা ঢাল স্বরূপ, সুতরাং রোজা রেখে কেউ যেন অশ্লীল কথা না বলে এবং জাহেলী আচরণ না করে।",
        "সহীহ মুসলিম",
    ),
    (
        "তোমাদের মধ্যে সেই ব্যক্তিই উত্তম যে কুরআন শিক্ষা করে এবং অন্যকে শিক্ষা দেয়।",
        "সহীহ বুখারী",
    ),
    ("নিশ্চয়ই কষ্টের সাথেই স্বস্তি রয়েছে।", "সূরা আশ-শারহ: ৬"),
];

/// Offline quote for `date`. The same date always gives the same quote.
pub fn fallback_quote(date: NaiveDate) -> IslamicQuote {
    let index = date.ordinal0() as usize % FALLBACK_QUOTES.len();
    let (text, reference) = FALLBACK_QUOTES[index];
    IslamicQuote::new(text, reference)
}

fn quote_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "text": { "type": "STRING" },
            "reference": { "type": "STRING" },
        },
        "required": ["text", "reference"],
    })
}

fn parse_quote(raw: &str) -> Option<IslamicQuote> {
    serde_json::from_str::<IslamicQuote>(raw.trim())
        .ok()
        .filter(|q| !q.text.trim().is_empty())
}

/// Today's quote: cached if present, generated otherwise, and a fallback
/// when the model is unavailable. Only storage errors are returned.
pub fn daily_quote(conn: &Connection, gateway: &Gateway, today: NaiveDate) -> Result<IslamicQuote> {
    let key = quote_cache_key(today);
    if let Some(cached) = StorageRepo::get_json::<IslamicQuote>(conn, &key)? {
        if !cached.text.trim().is_empty() {
            return Ok(cached);
        }
        StorageRepo::remove(conn, &key)?;
    }

    if !gateway.has_credential() {
        return Ok(fallback_quote(today));
    }

    let request = GenerateRequest {
        model: gateway.quote_model().to_string(),
        prompt: QUOTE_PROMPT.to_string(),
        system_instruction: None,
        response_schema: Some(quote_schema()),
    };

    match gateway.generate(&request) {
        Ok(raw) => match parse_quote(&raw) {
            Some(quote) => {
                StorageRepo::set_json(conn, &key, &quote)?;
                log::info!("Cached quote for {}", today);
                Ok(quote)
            }
            None => {
                log::warn!("Model returned an unusable quote");
                Ok(fallback_quote(today))
            }
        },
        Err(e) => {
            log::warn!("Quote request failed: {}", e);
            Ok(fallback_quote(today))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::gateway::tests::{instant_retry, ScriptedBackend};
    use crate::assistant::gateway::GatewayError;
    use crate::config::settings::AssistantConfig;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 20).unwrap()
    }

    fn gateway(results: Vec<Result<String, GatewayError>>) -> Gateway {
        let backend = ScriptedBackend::new(results);
        Gateway::with_backend(Some(Box::new(backend)), instant_retry(), &AssistantConfig::default())
    }

    #[test]
    fn no_credential_uses_fallback_without_caching() {
        let conn = conn();
        let gateway = Gateway::with_backend(None, instant_retry(), &AssistantConfig::default());
        let quote = daily_quote(&conn, &gateway, today()).unwrap();
        assert_eq!(quote, fallback_quote(today()));
        assert_eq!(StorageRepo::get(&conn, &quote_cache_key(today())).unwrap(), None);
    }

    #[test]
    fn generated_quote_is_cached() {
        let conn = conn();
        let gateway = gateway(vec![Ok(
            r#"{"text": "সবর করো", "reference": "সূরা বাকারা"}"#.to_string()
        )]);
        let quote = daily_quote(&conn, &gateway, today()).unwrap();
        assert_eq!(quote, IslamicQuote::new("সবর করো", "সূরা বাকারা"));

        // Second call is served from the cache; the backend has nothing left.
        let again = daily_quote(&conn, &gateway, today()).unwrap();
        assert_eq!(again, quote);
    }

    #[test]
    fn empty_text_falls_back_and_is_not_cached() {
        let conn = conn();
        let gateway = gateway(vec![Ok(r#"{"text": "", "reference": "x"}"#.to_string())]);
        let quote = daily_quote(&conn, &gateway, today()).unwrap();
        assert_eq!(quote, fallback_quote(today()));
        assert_eq!(StorageRepo::get(&conn, &quote_cache_key(today())).unwrap(), None);
    }

    #[test]
    fn malformed_cache_is_discarded() {
        let conn = conn();
        let key = quote_cache_key(today());
        StorageRepo::set(&conn, &key, "{not json").unwrap();
        let gateway = Gateway::with_backend(None, instant_retry(), &AssistantConfig::default());
        let quote = daily_quote(&conn, &gateway, today()).unwrap();
        assert_eq!(quote, fallback_quote(today()));
        assert_eq!(StorageRepo::get(&conn, &key).unwrap(), None);
    }

    #[test]
    fn failures_fall_back() {
        let conn = conn();
        let gateway = gateway(vec![Err(GatewayError::RateLimited), Err(GatewayError::RateLimited)]);
        assert_eq!(daily_quote(&conn, &gateway, today()).unwrap(), fallback_quote(today()));
    }

    #[test]
    fn fallback_is_stable_per_day() {
        assert_eq!(fallback_quote(today()), fallback_quote(today()));
        let next = today().succ_opt().unwrap();
        assert_ne!(fallback_quote(today()), fallback_quote(next));
    }
}
