use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    /// Local wall clock, `HH:MM`.
    pub time: String,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender, time: chrono::NaiveTime) -> Self {
        Self {
            text: text.into(),
            sender,
            time: time.format("%H:%M").to_string(),
        }
    }
}
