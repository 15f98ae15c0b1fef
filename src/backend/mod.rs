//! Backend module - Generator trait and the chat-completions client

pub mod http_backend;
pub mod traits;
