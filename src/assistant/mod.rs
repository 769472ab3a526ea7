pub mod chat;
pub mod gateway;
pub mod quotes;
pub mod retry;

pub use chat::{ChatMode, ChatSession};
pub use gateway::Gateway;
pub use quotes::daily_quote;
