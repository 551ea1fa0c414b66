//! Error types for the analyzer subsystem.

use lookout_core::{IndicatorType, LookoutError};
use thiserror::Error;

/// Errors raised while loading definitions or building the registry.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Analyzer not registered
    #[error("analyzer not found: {name}")]
    NotFound {
        /// The analyzer name that was not found
        name: String,
    },

    /// Failed to read a definition file
    #[error("failed to load searcher definitions from {path}: {source}")]
    LoadError {
        /// Path to the definition file
        path: String,
        /// Underlying error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to parse definition TOML
    #[error("failed to parse searcher definitions TOML in {path}: {source}")]
    ParseError {
        /// Path to the definition file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Invalid searcher definition (validation failed)
    #[error("invalid searcher definition for {name}: {reason}")]
    ValidationError {
        /// Analyzer name being validated
        name: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Definition directory not found
    #[error("searcher definitions directory not found at {path}")]
    DirectoryNotFound {
        /// Expected directory path
        path: String,
    },

    /// Same capability registered twice under one name
    #[error("duplicate {capability} registration for analyzer {name}")]
    DuplicateAnalyzer {
        /// Analyzer name
        name: String,
        /// `search` or `scan`
        capability: &'static str,
    },

    /// I/O error while accessing definitions
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single scan call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No credential configured for this scanner
    #[error("API key for {scanner} is not set")]
    ApiKeyMissing {
        /// Scanner name
        scanner: String,
    },

    /// Transport failure or unexpected response
    #[error("{scanner} request failed: {message}")]
    RequestFailed {
        /// Scanner name
        scanner: String,
        /// Transport or HTTP error text
        message: String,
    },

    /// Scanner cannot handle this indicator type
    #[error("{scanner} does not scan {ty} indicators")]
    UnsupportedType {
        /// Scanner name
        scanner: String,
        /// Requested type
        ty: IndicatorType,
    },
}

impl From<AnalyzerError> for LookoutError {
    fn from(err: AnalyzerError) -> Self {
        Self::Analyzer(err.to_string())
    }
}

impl From<ScanError> for LookoutError {
    fn from(err: ScanError) -> Self {
        Self::Scanner(err.to_string())
    }
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;
