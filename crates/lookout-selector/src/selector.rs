//! Resolving a selection into indicators and analyzer entries.

use crate::command::{Action, Command, Target};
use lookout_analyzer::{Analyzer, AnalyzerRegistry};
use lookout_core::{Indicator, IndicatorType, SearcherStates};
use lookout_indicator::{extract_all, matching_types, normalize_with, validate, NormalizeOptions};
use tracing::{debug, warn};

/// One (analyzer, type, query) triple offered for a selection.
#[derive(Debug, Clone)]
pub struct AnalyzerEntry<'r> {
    /// The analyzer that handles this entry
    pub analyzer: &'r Analyzer,
    /// Recognized type
    pub ty: IndicatorType,
    /// Validated query text
    pub query: String,
}

impl AnalyzerEntry<'_> {
    /// Search URL for this entry, if the analyzer searches its type.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.analyzer.search(self.ty, &self.query)
    }

    /// The command that re-derives this entry on click.
    #[must_use]
    pub fn command(&self, action: Action) -> Command {
        Command {
            action,
            target: Target::named(self.analyzer.name()),
            ty: self.ty,
            query: self.query.clone(),
        }
    }
}

/// A normalized selection and the indicators it resolved to.
pub struct Selector<'r> {
    registry: &'r AnalyzerRegistry,
    text: String,
    indicators: Vec<Indicator>,
}

impl<'r> Selector<'r> {
    /// Normalize `text` and resolve it once.
    #[must_use]
    pub fn new(registry: &'r AnalyzerRegistry, text: &str, options: &NormalizeOptions) -> Self {
        let text = normalize_with(text, options);
        let indicators = resolve(&text);
        debug!(
            count = indicators.len(),
            types = ?indicators.iter().map(|i| i.ty.as_str()).collect::<Vec<_>>(),
            "resolved selection"
        );
        Self {
            registry,
            text,
            indicators,
        }
    }

    /// The normalized selection.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Resolved indicators, best match first.
    #[must_use]
    pub fn indicators(&self) -> &[Indicator] {
        &self.indicators
    }

    /// The best-match indicator.
    #[must_use]
    pub fn primary(&self) -> Option<&Indicator> {
        self.indicators.first()
    }

    /// The registry this selector resolves against.
    #[must_use]
    pub fn registry(&self) -> &'r AnalyzerRegistry {
        self.registry
    }

    /// Enabled searchers for every indicator, in resolver then registry order.
    #[must_use]
    pub fn searcher_entries(&self, states: &SearcherStates) -> Vec<AnalyzerEntry<'r>> {
        let mut entries = Vec::new();
        for indicator in &self.indicators {
            entries.extend(self.searcher_entries_for(indicator, states));
        }
        entries
    }

    /// Enabled searchers for one indicator, in registry order.
    #[must_use]
    pub fn searcher_entries_for(
        &self,
        indicator: &Indicator,
        states: &SearcherStates,
    ) -> Vec<AnalyzerEntry<'r>> {
        let hash_kind = indicator.hash_kind();
        let candidates = self
            .registry
            .iter()
            .filter(|a| a.searches(indicator.ty, hash_kind));
        self.entries(indicator, candidates, states)
    }

    /// Enabled scanners for the best-match indicator.
    #[must_use]
    pub fn scanner_entries(&self, states: &SearcherStates) -> Vec<AnalyzerEntry<'r>> {
        let Some(indicator) = self.primary() else {
            return Vec::new();
        };
        let candidates = self.registry.scanners_for(indicator.ty);
        self.entries(indicator, candidates, states)
    }

    fn entries(
        &self,
        indicator: &Indicator,
        candidates: impl IntoIterator<Item = &'r Analyzer>,
        states: &SearcherStates,
    ) -> Vec<AnalyzerEntry<'r>> {
        let mut entries = Vec::new();
        for analyzer in candidates {
            if !states.is_enabled(analyzer.name()) {
                debug!(analyzer = %analyzer.name(), ty = %indicator.ty, "analyzer disabled");
                continue;
            }
            if !validate(indicator.ty, &indicator.value) {
                warn!(
                    analyzer = %analyzer.name(),
                    ty = %indicator.ty,
                    "query failed validation, skipping entry"
                );
                continue;
            }
            entries.push(AnalyzerEntry {
                analyzer,
                ty: indicator.ty,
                query: indicator.value.clone(),
            });
        }
        entries
    }
}

/// Whole-string matches first, then extraction, then the `text` fallback.
fn resolve(text: &str) -> Vec<Indicator> {
    if text.is_empty() {
        return Vec::new();
    }

    let types = matching_types(text);
    if !types.is_empty() {
        return types
            .into_iter()
            .map(|ty| Indicator::new(ty, text))
            .collect();
    }

    let extracted = extract_all(text);
    if !extracted.is_empty() {
        return extracted;
    }

    vec![Indicator::new(IndicatorType::Text, text)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_analyzer::{RegistryBuilder, SearchTemplate, Searcher};

    fn searcher(name: &str, types: &[IndicatorType]) -> Searcher {
        Searcher {
            name: name.to_string(),
            endpoint: "https://search.example".to_string(),
            templates: vec![SearchTemplate {
                types: types.to_vec(),
                template: format!("https://search.example/{name}?q={{query}}"),
                hash_kinds: None,
            }],
        }
    }

    fn registry() -> AnalyzerRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .add_searchers([
                searcher("One", &[IndicatorType::Ip, IndicatorType::Domain]),
                searcher("Two", &[IndicatorType::Ip]),
                searcher("Words", &[IndicatorType::Text]),
            ])
            .expect("valid searchers");
        builder.build()
    }

    #[test]
    fn test_resolve_whole_string() {
        assert_eq!(
            resolve("8.8.8.8"),
            [Indicator::new(IndicatorType::Ip, "8.8.8.8")]
        );
        assert!(resolve("").is_empty());
    }

    #[test]
    fn test_resolve_extracts_from_longer_text() {
        let found = resolve("beacon to 10.0.0.1 and evil.example");
        assert_eq!(
            found,
            [
                Indicator::new(IndicatorType::Ip, "10.0.0.1"),
                Indicator::new(IndicatorType::Domain, "evil.example"),
            ]
        );
    }

    #[test]
    fn test_resolve_text_fallback() {
        assert_eq!(
            resolve("nothing to see"),
            [Indicator::new(IndicatorType::Text, "nothing to see")]
        );
    }

    #[test]
    fn test_entries_follow_registry_order() {
        let registry = registry();
        let selector = Selector::new(&registry, " 1.1.1.1 ", &NormalizeOptions::default());
        assert_eq!(selector.text(), "1.1.1.1");

        let names: Vec<&str> = selector
            .searcher_entries(&SearcherStates::new())
            .iter()
            .map(|e| e.analyzer.name())
            .collect();
        assert_eq!(names, ["One", "Two"]);
    }

    #[test]
    fn test_disabled_analyzer_skipped() {
        let registry = registry();
        let selector = Selector::new(&registry, "1.1.1.1", &NormalizeOptions::default());
        let states = SearcherStates::new().with("One", false);

        let entries = selector.searcher_entries(&states);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].analyzer.name(), "Two");
        assert_eq!(
            entries[0].url().as_deref(),
            Some("https://search.example/Two?q=1.1.1.1")
        );
    }

    #[test]
    fn test_text_entries_and_no_scanners() {
        let registry = registry();
        let selector = Selector::new(&registry, "hello world", &NormalizeOptions::default());
        let entries = selector.searcher_entries(&SearcherStates::new());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ty, IndicatorType::Text);
        assert!(selector.scanner_entries(&SearcherStates::new()).is_empty());
    }

    #[test]
    fn test_entry_command() {
        let registry = registry();
        let selector = Selector::new(&registry, "evil[.]example", &NormalizeOptions::default());
        let entries = selector.searcher_entries(&SearcherStates::new());
        assert_eq!(entries.len(), 1);

        let cmd = entries[0].command(Action::Search);
        assert_eq!(cmd.target, Target::named("One"));
        assert_eq!(cmd.ty, IndicatorType::Domain);
        assert_eq!(cmd.query, "evil.example");
    }
}
