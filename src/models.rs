// src/models.rs

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Bot,
}

/// Represents a chat message shown in the message pane.
#[derive(Debug, Clone)]
pub struct Message {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Local>,
}

impl Message {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text)
    }
}

/// Body posted to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Body returned by the chat endpoint. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Logs details of each API call.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
}
