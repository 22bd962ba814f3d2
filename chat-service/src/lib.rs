pub mod cache;
pub mod messages;
pub mod quick_reply;
pub mod service;

pub use service::{ChatAnswer, ChatService, SessionContext};
