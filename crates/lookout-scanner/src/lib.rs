//! Lookout Scanner - analyzers that actively submit an indicator for scanning.
//!
//! Each provider implements [`lookout_analyzer::Scanner`]. All network
//! traffic goes through an injectable [`HttpTransport`]; production code uses
//! [`ReqwestTransport`], tests substitute a stub that records requests.
//!
//! # Example
//!
//! ```rust,no_run
//! use lookout_analyzer::RegistryBuilder;
//! use lookout_core::ScanningConfig;
//! use lookout_scanner::{default_scanners, ReqwestTransport};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(ReqwestTransport::new(&ScanningConfig::default())?);
//!
//! let mut builder = RegistryBuilder::new().with_builtin_searchers()?;
//! for scanner in default_scanners(transport) {
//!     builder.add_scanner(scanner)?;
//! }
//! let registry = builder.build();
//! assert!(registry.get("urlscan.io").and_then(|a| a.scanner()).is_some());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod providers;
pub mod transport;

use lookout_analyzer::Scanner;
use std::sync::Arc;

// Re-export commonly used types
pub use error::{Result, TransportError};
pub use providers::{HybridAnalysisScanner, UrlscanScanner, VirusTotalScanner};
pub use transport::{
    build_http_client, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestBody,
};

/// The built-in scanners, sharing one transport.
#[must_use]
pub fn default_scanners(transport: Arc<dyn HttpTransport>) -> Vec<Arc<dyn Scanner>> {
    vec![
        Arc::new(UrlscanScanner::new(Arc::clone(&transport))),
        Arc::new(VirusTotalScanner::new(Arc::clone(&transport))),
        Arc::new(HybridAnalysisScanner::new(transport)),
    ]
}
