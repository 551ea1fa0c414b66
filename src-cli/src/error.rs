//! Error types for the command-line shell.

use lookout_analyzer::AnalyzerError;
use lookout_core::ConfigError;
use lookout_scanner::TransportError;
use lookout_selector::CommandError;
use serde::Serialize;
use thiserror::Error;

/// Bad command-line invocation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// No subcommand given
    #[error("missing command")]
    MissingCommand,

    /// Subcommand not recognized
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Subcommand given without its argument
    #[error("{command} requires {argument}")]
    MissingArgument {
        /// Subcommand name
        command: &'static str,
        /// What was expected
        argument: &'static str,
    },
}

/// Serializable error printed instead of a result.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Error code for scripted handling (e.g., "CONFIG_ERROR")
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Optional context
    pub details: Option<serde_json::Value>,
}

impl ErrorReport {
    /// Create a new report.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create a report with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Map a failure to a stable code, looking through anyhow context.
impl From<&anyhow::Error> for ErrorReport {
    fn from(err: &anyhow::Error) -> Self {
        let message = format!("{err:#}");
        if let Some(usage) = err.downcast_ref::<UsageError>() {
            return Self::with_details(
                "USAGE",
                message,
                serde_json::json!({ "usage": crate::commands::USAGE, "error": usage.to_string() }),
            );
        }
        let code = if err.downcast_ref::<ConfigError>().is_some() {
            "CONFIG_ERROR"
        } else if err.downcast_ref::<AnalyzerError>().is_some() {
            "DEFINITIONS_ERROR"
        } else if err.downcast_ref::<TransportError>().is_some() {
            "TRANSPORT_ERROR"
        } else if err.downcast_ref::<CommandError>().is_some() {
            "COMMAND_ERROR"
        } else {
            "INTERNAL_ERROR"
        };
        Self::new(code, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_report() {
        let err = anyhow::Error::new(UsageError::UnknownCommand("frob".to_string()));
        let report = ErrorReport::from(&err);
        assert_eq!(report.code, "USAGE");
        assert_eq!(report.message, "unknown command: frob");
        assert!(report.details.is_some());
    }

    #[test]
    fn test_context_is_kept() {
        let err = anyhow::Error::new(TransportError::Timeout).context("building HTTP transport");
        let report = ErrorReport::from(&err);
        assert_eq!(report.code, "TRANSPORT_ERROR");
        assert_eq!(report.message, "building HTTP transport: request timed out");
    }

    #[test]
    fn test_report_serialization() {
        let json = serde_json::to_string(&ErrorReport::new("INTERNAL_ERROR", "boom"))
            .expect("serialize report");
        assert!(json.contains("INTERNAL_ERROR"));
        assert!(json.contains("boom"));
    }
}
