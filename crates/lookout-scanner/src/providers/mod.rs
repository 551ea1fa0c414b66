//! Scan provider implementations.

mod common;
pub mod hybrid_analysis;
pub mod urlscan;
pub mod virustotal;

pub use hybrid_analysis::HybridAnalysisScanner;
pub use urlscan::UrlscanScanner;
pub use virustotal::VirusTotalScanner;
