pub mod args;
pub mod district_picker;
pub mod handlers;
