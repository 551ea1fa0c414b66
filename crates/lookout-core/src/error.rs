//! Core error types for Lookout.
//!
//! Each subsystem error is represented as a variant so failures keep their
//! origin when they cross crate boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Central error type for Lookout operations.
#[derive(Error, Debug)]
pub enum LookoutError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Analyzer registry errors (definitions, duplicate names)
    #[error("analyzer error: {0}")]
    Analyzer(String),

    /// Scanner errors (missing credentials, failed requests)
    #[error("scanner error: {0}")]
    Scanner(String),

    /// Validation errors (unknown indicator type, malformed value)
    #[error("validation error: {0}")]
    Validation(String),
}

/// Errors from reading, validating or writing the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No XDG config directory on this platform
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// An explicitly requested config file does not exist
    #[error("config file {} does not exist", path.display())]
    NotFound {
        /// Requested path
        path: PathBuf,
    },

    /// The file could not be read or written
    #[error("cannot access {}: {source}", path.display())]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying failure
        source: std::io::Error,
    },

    /// The file is not valid config TOML
    #[error("{} is not a valid config file: {source}", path.display())]
    Parse {
        /// File being parsed
        path: PathBuf,
        /// TOML error, with line and column
        source: toml::de::Error,
    },

    /// The in-memory config could not be rendered as TOML
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value parsed but is out of range
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field name
        field: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Result type alias using `LookoutError`.
pub type Result<T> = std::result::Result<T, LookoutError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
