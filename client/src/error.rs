//! Unified error handling for the client.

use crate::config::ConfigError;

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search error: {0}")]
    Search(#[from] sysbol_engine::Error),

    #[error("unexpected status code: {status} - {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Credential discovery failed: {0}")]
    Credentials(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl ClientError {
    /// Whether the error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Search(e) if e.is_cancelled())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
