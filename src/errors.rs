use thiserror::Error;

pub type ChatResult<T> = Result<T, ChatError>;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed reply: {0}")]
    MalformedReply(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

impl ChatError {
    pub fn transport_error(msg: impl Into<String>) -> Self {
        ChatError::Transport(msg.into())
    }

    pub fn malformed_reply(msg: impl Into<String>) -> Self {
        ChatError::MalformedReply(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        ChatError::Config(msg.into())
    }

    /// True for failures that happen while exchanging a message with the server.
    pub fn is_send_failure(&self) -> bool {
        matches!(
            self,
            ChatError::Transport(_) | ChatError::Status { .. } | ChatError::MalformedReply(_)
        )
    }
}
