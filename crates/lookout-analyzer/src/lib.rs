//! Lookout Analyzer - the catalogue of services an indicator can be sent to.
//!
//! An analyzer has a search capability (a data-driven URL template table), a
//! scan capability (a [`Scanner`] trait object that performs an authenticated
//! request), or both. The registry is built once at start-up and is immutable
//! afterwards.
//!
//! # Architecture
//!
//! - **Definitions** ([`definition`]): `[[searcher]]` TOML tables and URL templates
//! - **Loader** ([`loader`]): embedded catalogue plus user definition directories
//! - **Scanner** ([`scanner`]): the async scan trait
//! - **Registry** ([`registry`]): name-merged analyzers with per-type lookups
//! - **Errors** ([`error`]): analyzer and scan error types
//!
//! # Example
//!
//! ```rust
//! use lookout_analyzer::RegistryBuilder;
//! use lookout_core::IndicatorType;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = RegistryBuilder::new().with_builtin_searchers()?.build();
//!
//! let shodan = registry.get("Shodan").expect("built-in searcher");
//! assert_eq!(
//!     shodan.search(IndicatorType::Ip, "8.8.8.8").as_deref(),
//!     Some("https://www.shodan.io/host/8.8.8.8")
//! );
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;
pub mod scanner;

// Re-export commonly used types
pub use definition::{Placeholder, SearchTemplate, Searcher, SearcherFile, RESERVED_NAME};
pub use error::{AnalyzerError, Result, ScanError};
pub use loader::{builtin_searchers, AnalyzerLoader};
pub use registry::{Analyzer, AnalyzerRegistry, RegistryBuilder};
pub use scanner::Scanner;
