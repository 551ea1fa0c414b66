//! Lookout Selector - from selected text to a menu, and from a click to a URL.
//!
//! # Architecture
//!
//! - **Selector** ([`selector`]): normalizes a selection, resolves it to
//!   indicators and pairs them with enabled analyzers
//! - **Menu** ([`menu`]): titled menu items whose ids encode a [`Command`]
//! - **Command** ([`command`]): the `(action, target, type, query)` record and
//!   its JSON menu-id encoding
//! - **Dispatch** ([`dispatch`]): builds search URLs or awaits a scan call
//! - **Notice** ([`notice`]): what the user sees when a command fails
//!
//! # Example
//!
//! ```rust
//! use lookout_analyzer::RegistryBuilder;
//! use lookout_core::SearcherStates;
//! use lookout_indicator::NormalizeOptions;
//! use lookout_selector::{Menu, Selector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = RegistryBuilder::new().with_builtin_searchers()?.build();
//! let selector = Selector::new(&registry, "8.8.8[.]8", &NormalizeOptions::default());
//!
//! let menu = Menu::build(&selector, &SearcherStates::new())?;
//! assert!(menu.items.iter().any(|i| i.title == "Search this IP on Shodan"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod command;
pub mod dispatch;
pub mod error;
pub mod menu;
pub mod notice;
pub mod selector;

// Re-export commonly used types
pub use command::{Action, Command, Target};
pub use dispatch::{Dispatcher, Navigation, Outcome};
pub use error::{CommandError, DispatchError, Result};
pub use menu::{Menu, MenuItem};
pub use notice::Notice;
pub use selector::{AnalyzerEntry, Selector};
