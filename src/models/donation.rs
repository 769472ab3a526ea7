use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub name: String,
    /// Positive whole taka amount as entered (ASCII or Bengali digits).
    pub amount: String,
    /// Donor photo as a `data:` URI or a remote URL.
    pub image: String,
    pub message: String,
}
