//! Lookout Indicator - recognizing indicators in selected text.
//!
//! Everything in this crate is a pure function of its input: no I/O, no shared
//! mutable state, safe to call from any thread.
//!
//! # Architecture
//!
//! - **Patterns** ([`patterns`]): precompiled anchored and unanchored regexes
//! - **Validators** ([`validate`]): `is_x(s)` predicates over a whole string
//! - **Extractors** ([`extract`]): `extract_x(text)` scans over longer text
//! - **Normalizer** ([`normalize`]): refang, defang and IDN conversion
//!
//! # Example
//!
//! ```rust
//! use lookout_core::IndicatorType;
//! use lookout_indicator::{extract, normalize, validate};
//!
//! let text = normalize::normalize("hxxps://evil[.]example/login", false);
//! assert_eq!(text, "https://evil.example/login");
//! assert!(validate::is_url(&text));
//!
//! let ips = extract::extract(IndicatorType::Ip, "from 1.2.3.4 to 5.6.7.8");
//! assert_eq!(ips, ["1.2.3.4", "5.6.7.8"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

mod checksum;
pub mod extract;
pub mod normalize;
#[allow(missing_docs)]
pub mod patterns;
pub mod validate;

// Re-export commonly used items
pub use extract::{extract, extract_all};
pub use normalize::{defang, normalize, normalize_with, refang, NormalizeOptions};
pub use validate::{matching_types, validate};
