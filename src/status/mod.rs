pub mod adhan;
pub mod engine;

pub use adhan::player_from_config;
pub use engine::{DisplayMode, LiveStatus, StatusEngine};
