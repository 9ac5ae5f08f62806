// src/lib.rs

pub mod api;
pub mod app;
pub mod chat_message;
pub mod chat_state;
pub mod config;
pub mod constants;
pub mod controller;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod sanitize;
pub mod status_indicator;
pub mod ui;

pub use chat_state::ChatState;
pub use controller::{ChatController, Completion, Outcome};
pub use errors::{ChatError, ChatResult};
pub use models::{Author, Message};
