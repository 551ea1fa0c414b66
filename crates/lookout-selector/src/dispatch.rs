//! Turning a clicked command into navigation.
//!
//! [`Dispatcher::dispatch`] re-derives the chosen analyzer from the registry
//! and either builds search URLs or awaits a single scan call.
//! [`Dispatcher::run`] is the outer boundary: it decodes the menu id and
//! converts every failure into a [`Notice`].

use crate::command::{Action, Command, Target};
use crate::error::{DispatchError, Result};
use crate::notice::Notice;
use lookout_analyzer::AnalyzerRegistry;
use lookout_core::{ApiKeys, HashKind, IndicatorType, SearcherStates};
use lookout_indicator::validate;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where to go after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Open these URLs, in order
    Open(Vec<String>),
    /// Do nothing
    Stay,
}

impl Navigation {
    fn from_urls(urls: Vec<String>) -> Self {
        if urls.is_empty() {
            Self::Stay
        } else {
            Self::Open(urls)
        }
    }

    /// URLs to open; empty for [`Navigation::Stay`].
    #[must_use]
    pub fn urls(&self) -> &[String] {
        match self {
            Self::Open(urls) => urls,
            Self::Stay => &[],
        }
    }

    /// First URL, or `""` for [`Navigation::Stay`].
    #[must_use]
    pub fn url(&self) -> &str {
        self.urls().first().map_or("", String::as_str)
    }

    /// Whether nothing should be opened.
    #[must_use]
    pub fn is_stay(&self) -> bool {
        matches!(self, Self::Stay)
    }
}

/// Final result of [`Dispatcher::run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Open these URLs
    Open {
        /// Destination URLs, in order
        urls: Vec<String>,
    },
    /// Nothing to open
    Stay,
    /// Show a notice instead
    Notice(Notice),
}

impl From<Navigation> for Outcome {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::Open(urls) => Self::Open { urls },
            Navigation::Stay => Self::Stay,
        }
    }
}

/// Resolves commands against a shared registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<AnalyzerRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher over `registry`.
    #[must_use]
    pub fn new(registry: Arc<AnalyzerRegistry>) -> Self {
        Self { registry }
    }

    /// The registry commands resolve against.
    #[must_use]
    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    /// Execute `command` with the given configuration snapshot.
    pub async fn dispatch(
        &self,
        command: &Command,
        states: &SearcherStates,
        api_keys: &ApiKeys,
    ) -> Result<Navigation> {
        let navigation = match (&command.action, &command.target) {
            (Action::Search, Target::All) => self.search_all(command.ty, &command.query, states),
            (Action::Search, Target::Named(name)) => {
                self.search_one(name, command.ty, &command.query)
            }
            (Action::Scan, Target::All) => {
                return Err(DispatchError::MalformedCommand {
                    reason: "scan requires a single analyzer".to_string(),
                })
            }
            (Action::Scan, Target::Named(name)) => {
                self.scan(name, command.ty, &command.query, api_keys).await?
            }
        };

        info!(
            action = %command.action,
            target = %command.target,
            ty = %command.ty,
            urls = navigation.urls().len(),
            "dispatched command"
        );
        Ok(navigation)
    }

    /// Decode `menu_id`, dispatch it, and fold any failure into a notice.
    pub async fn run(&self, menu_id: &str, states: &SearcherStates, api_keys: &ApiKeys) -> Outcome {
        let result = match Command::from_menu_id(menu_id) {
            Ok(command) => self.dispatch(&command, states, api_keys).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(navigation) => navigation.into(),
            Err(err) => {
                warn!(error = %err, "command failed");
                Outcome::Notice(Notice::from(&err))
            }
        }
    }

    fn search_all(&self, ty: IndicatorType, query: &str, states: &SearcherStates) -> Navigation {
        if !validate(ty, query) {
            warn!(ty = %ty, "query failed validation, nothing to search");
            return Navigation::Stay;
        }
        let hash_kind = if ty == IndicatorType::Hash {
            HashKind::from_hex_len(query.len())
        } else {
            None
        };

        let urls = self
            .registry
            .iter()
            .filter(|a| a.searches(ty, hash_kind) && states.is_enabled(a.name()))
            .filter_map(|a| a.search(ty, query))
            .collect();
        Navigation::from_urls(urls)
    }

    fn search_one(&self, name: &str, ty: IndicatorType, query: &str) -> Navigation {
        let Some(analyzer) = self.registry.get(name) else {
            warn!(analyzer = %name, "unknown analyzer");
            return Navigation::Stay;
        };
        if !validate(ty, query) {
            warn!(analyzer = %name, ty = %ty, "query failed validation");
            return Navigation::Stay;
        }
        match analyzer.search(ty, query) {
            Some(url) => {
                debug!(analyzer = %name, ty = %ty, "built search url");
                Navigation::Open(vec![url])
            }
            None => {
                debug!(analyzer = %name, ty = %ty, "analyzer does not search this type");
                Navigation::Stay
            }
        }
    }

    async fn scan(
        &self,
        name: &str,
        ty: IndicatorType,
        query: &str,
        api_keys: &ApiKeys,
    ) -> Result<Navigation> {
        let analyzer = self.registry.get(name);
        let Some(scanner) = analyzer.and_then(|a| a.scanner()) else {
            return Err(DispatchError::UnknownAnalyzer {
                name: name.to_string(),
            });
        };
        if !scanner.supports(ty) {
            return Err(DispatchError::UnsupportedType {
                analyzer: name.to_string(),
                ty,
            });
        }
        if !validate(ty, query) {
            return Err(DispatchError::ValidationMismatch {
                ty,
                query: query.to_string(),
            });
        }
        if api_keys.get(name).is_none() {
            return Err(DispatchError::ApiKeyMissing {
                scanner: name.to_string(),
            });
        }

        debug!(analyzer = %name, ty = %ty, "awaiting scan");
        let report = scanner.scan(ty, query, api_keys).await?;
        Ok(Navigation::Open(vec![report]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_sentinel() {
        assert_eq!(Navigation::Stay.url(), "");
        assert!(Navigation::from_urls(Vec::new()).is_stay());

        let open = Navigation::Open(vec!["https://a.example/".to_string()]);
        assert_eq!(open.url(), "https://a.example/");
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_value(Outcome::from(Navigation::Stay)).expect("serialize");
        assert_eq!(json, serde_json::json!({ "outcome": "stay" }));

        let json = serde_json::to_value(Outcome::Notice(Notice::new("t", "m"))).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({ "outcome": "notice", "title": "t", "message": "m" })
        );
    }

    #[tokio::test]
    async fn test_scan_all_is_malformed() {
        let dispatcher = Dispatcher::new(Arc::new(lookout_analyzer::RegistryBuilder::new().build()));
        let command = Command {
            action: Action::Scan,
            target: Target::All,
            ty: IndicatorType::Url,
            query: "http://a.example/".to_string(),
        };
        let err = dispatcher
            .dispatch(&command, &SearcherStates::new(), &ApiKeys::new())
            .await
            .expect_err("scan on all");
        assert!(matches!(err, DispatchError::MalformedCommand { .. }));
    }

    #[tokio::test]
    async fn test_run_bad_menu_id() {
        let dispatcher = Dispatcher::new(Arc::new(lookout_analyzer::RegistryBuilder::new().build()));
        let outcome = dispatcher
            .run("not json", &SearcherStates::new(), &ApiKeys::new())
            .await;
        match outcome {
            Outcome::Notice(notice) => {
                assert_eq!(notice.title, "Invalid command");
                assert!(notice.message.starts_with("malformed menu id"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
