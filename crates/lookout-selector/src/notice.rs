//! User-facing notices for failed commands.

use crate::error::DispatchError;
use serde::{Deserialize, Serialize};

/// A notification to show instead of navigating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Short heading
    pub title: String,
    /// Detail, including the underlying error text
    pub message: String,
}

impl Notice {
    /// Create a notice.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&DispatchError> for Notice {
    fn from(err: &DispatchError) -> Self {
        let title = match err {
            DispatchError::ApiKeyMissing { .. } => "API key missing",
            DispatchError::RequestFailed { .. } => "Scan failed",
            DispatchError::ValidationMismatch { .. } => "Invalid indicator",
            DispatchError::UnknownAnalyzer { .. } => "Unknown analyzer",
            DispatchError::UnsupportedType { .. } => "Unsupported indicator",
            DispatchError::MalformedCommand { .. } | DispatchError::Command(_) => {
                "Invalid command"
            }
        };
        Self::new(title, err.to_string())
    }
}

impl From<DispatchError> for Notice {
    fn from(err: DispatchError) -> Self {
        Self::from(&err)
    }
}
