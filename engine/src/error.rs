//! Error types for the search engine.

use thiserror::Error;

/// All errors a search can surface.
///
/// The cursor never invents errors of its own: everything except
/// [`Error::Cancelled`] comes straight from the [`Transport`](crate::Transport).
#[derive(Debug, Error)]
pub enum Error {
    /// The caller's cancellation token fired before the search finished.
    #[error("search cancelled")]
    Cancelled,

    // Transport errors
    #[error("unexpected status code: {status} - {reason}")]
    UnexpectedStatus { status: u16, reason: String },

    #[error("failed to decode result page: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Wrap any transport-level failure (network, TLS, body read).
    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Transport(err.into())
    }

    /// Whether this error is a cancellation rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
