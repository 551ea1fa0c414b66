//! Error types for command decoding and dispatch.

use lookout_analyzer::ScanError;
use lookout_core::{IndicatorType, LookoutError};
use thiserror::Error;

/// Failures encoding or decoding a menu id.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Menu id is not a valid command encoding
    #[error("malformed menu id: {0}")]
    Decode(#[source] serde_json::Error),

    /// Command could not be serialized
    #[error("failed to encode command: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Failures of a dispatched command.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Target analyzer missing or lacking the requested capability
    #[error("unknown analyzer: {name}")]
    UnknownAnalyzer {
        /// Analyzer name from the command
        name: String,
    },

    /// Query is not a valid instance of its declared type
    #[error("'{query}' is not a valid {ty}")]
    ValidationMismatch {
        /// Declared type
        ty: IndicatorType,
        /// Offending query
        query: String,
    },

    /// Scanner cannot handle this indicator type
    #[error("{analyzer} does not scan {ty} indicators")]
    UnsupportedType {
        /// Analyzer name
        analyzer: String,
        /// Requested type
        ty: IndicatorType,
    },

    /// No credential configured for the scanner
    #[error("API key for {scanner} is not set")]
    ApiKeyMissing {
        /// Scanner name
        scanner: String,
    },

    /// Scan call failed in transport or at the remote end
    #[error("{scanner} request failed: {message}")]
    RequestFailed {
        /// Scanner name
        scanner: String,
        /// Transport or HTTP error text
        message: String,
    },

    /// Command shape is not dispatchable
    #[error("malformed command: {reason}")]
    MalformedCommand {
        /// What is wrong with it
        reason: String,
    },

    /// Menu id could not be decoded
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<ScanError> for DispatchError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::ApiKeyMissing { scanner } => Self::ApiKeyMissing { scanner },
            ScanError::RequestFailed { scanner, message } => {
                Self::RequestFailed { scanner, message }
            }
            ScanError::UnsupportedType { scanner, ty } => Self::UnsupportedType {
                analyzer: scanner,
                ty,
            },
        }
    }
}

impl From<DispatchError> for LookoutError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::ValidationMismatch { .. } => Self::Validation(err.to_string()),
            DispatchError::ApiKeyMissing { .. } | DispatchError::RequestFailed { .. } => {
                Self::Scanner(err.to_string())
            }
            other => Self::Analyzer(other.to_string()),
        }
    }
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;
