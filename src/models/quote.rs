use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslamicQuote {
    pub text: String,
    pub reference: String,
}

impl IslamicQuote {
    pub fn new(text: &str, reference: &str) -> Self {
        Self {
            text: text.to_string(),
            reference: reference.to_string(),
        }
    }
}
