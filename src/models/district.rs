use serde::{Deserialize, Serialize};

/// A district and its fixed minute offset from the base (Dhaka) timetable.
///
/// Serialized as `{"name": .., "offset": ..}`; this is the shape stored
/// under the `selected_district` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct District {
    pub name: String,
    #[serde(rename = "offset")]
    pub minute_offset: i32,
}

impl District {
    pub fn new(name: impl Into<String>, minute_offset: i32) -> Self {
        Self {
            name: name.into(),
            minute_offset,
        }
    }
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
