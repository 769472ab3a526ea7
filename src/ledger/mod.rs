pub mod donations;
pub mod form;

pub use donations::DonationLedger;
pub use form::{Cause, DonationForm, PaymentMethod};
