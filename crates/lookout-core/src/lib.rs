//! Lookout Core - Foundation crate for the Lookout indicator engine.
//!
//! This crate provides the shared vocabulary every other Lookout crate speaks:
//! the closed set of indicator types, the central error types, and the
//! TOML-based configuration snapshot (general options, per-analyzer
//! enable/disable state and scanner API keys).
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared enums and newtypes (`IndicatorType`, `HashKind`, `Indicator`)
//!
//! # Example
//!
//! ```rust
//! use lookout_core::{AppConfig, IndicatorType};
//!
//! let config = AppConfig::default();
//! assert!(config.searchers.is_enabled("VirusTotal"));
//! assert_eq!(IndicatorType::Ip.label(), "IP");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{ApiKeys, AppConfig, GeneralConfig, ScanningConfig, SearcherStates};
pub use error::{ConfigError, ConfigResult, LookoutError, Result};
pub use types::{HashKind, Indicator, IndicatorType};
