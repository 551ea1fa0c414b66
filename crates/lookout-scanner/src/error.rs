//! Error types for the scan transport.

use thiserror::Error;

/// Failures below the HTTP status layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// The request could not be sent or the body could not be read
    #[error("network error: {0}")]
    Network(String),

    /// The request timed out
    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;
