pub mod chat;
pub mod district;
pub mod donation;
pub mod prayer;
pub mod quote;
pub mod theme;

pub use chat::{ChatMessage, Sender};
pub use district::District;
pub use donation::DonationRecord;
pub use prayer::{NextPrayer, PrayerType};
pub use quote::IslamicQuote;
pub use theme::AppTheme;
