//! The context-menu model for a selection.

use crate::command::{Action, Command, Target};
use crate::error::CommandError;
use crate::selector::Selector;
use lookout_core::{Indicator, SearcherStates};
use serde::Serialize;

/// One clickable menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    /// Encoded [`Command`], decoded again on click
    pub id: String,
    /// Human-readable title
    pub title: String,
}

impl MenuItem {
    fn new(command: &Command, title: String) -> Result<Self, CommandError> {
        Ok(Self {
            id: command.to_menu_id()?,
            title,
        })
    }

    /// Decode this item's command.
    pub fn command(&self) -> Result<Command, CommandError> {
        Command::from_menu_id(&self.id)
    }
}

/// Ordered menu entries for a selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Menu {
    /// Normalized selection text
    pub selection: String,
    /// Resolved indicators, best match first
    pub indicators: Vec<Indicator>,
    /// Entries in display order
    pub items: Vec<MenuItem>,
}

impl Menu {
    /// Build the menu for `selector`.
    ///
    /// Per indicator: one search item per enabled searcher, then a search on
    /// all of them. Scan items for the best-match indicator come last.
    pub fn build(selector: &Selector<'_>, states: &SearcherStates) -> Result<Self, CommandError> {
        let mut items = Vec::new();

        for indicator in selector.indicators() {
            let label = indicator.ty.label();
            let entries = selector.searcher_entries_for(indicator, states);
            for entry in &entries {
                items.push(MenuItem::new(
                    &entry.command(Action::Search),
                    format!("Search this {label} on {}", entry.analyzer.name()),
                )?);
            }
            if !entries.is_empty() {
                items.push(MenuItem::new(
                    &Command::search(Target::All, indicator),
                    format!("Search this {label} on all"),
                )?);
            }
        }

        for entry in selector.scanner_entries(states) {
            items.push(MenuItem::new(
                &entry.command(Action::Scan),
                format!("Scan this {} on {}", entry.ty.label(), entry.analyzer.name()),
            )?);
        }

        Ok(Self {
            selection: selector.text().to_string(),
            indicators: selector.indicators().to_vec(),
            items,
        })
    }

    /// Whether there is nothing to offer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_analyzer::{AnalyzerRegistry, RegistryBuilder, SearchTemplate, Searcher};
    use lookout_core::IndicatorType;
    use lookout_indicator::NormalizeOptions;

    fn registry() -> AnalyzerRegistry {
        let mut builder = RegistryBuilder::new();
        builder
            .add_searcher(Searcher {
                name: "Shodan".to_string(),
                endpoint: "https://www.shodan.io".to_string(),
                templates: vec![SearchTemplate {
                    types: vec![IndicatorType::Ip],
                    template: "https://www.shodan.io/host/{raw}".to_string(),
                    hash_kinds: None,
                }],
            })
            .expect("valid searcher");
        builder.build()
    }

    #[test]
    fn test_titles_and_order() {
        let registry = registry();
        let selector = Selector::new(&registry, "8.8.8.8", &NormalizeOptions::default());
        let menu = Menu::build(&selector, &SearcherStates::new()).expect("menu");

        let titles: Vec<&str> = menu.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Search this IP on Shodan", "Search this IP on all"]);

        let all = menu.items[1].command().expect("decode");
        assert_eq!(all.target, Target::All);
        assert_eq!(all.query, "8.8.8.8");
    }

    #[test]
    fn test_no_all_item_without_searchers() {
        let registry = registry();
        let selector = Selector::new(&registry, "8.8.8.8", &NormalizeOptions::default());
        let states = SearcherStates::new().with("Shodan", false);
        assert!(Menu::build(&selector, &states).expect("menu").is_empty());
    }

    #[test]
    fn test_empty_selection() {
        let registry = registry();
        let selector = Selector::new(&registry, "   ", &NormalizeOptions::default());
        let menu = Menu::build(&selector, &SearcherStates::new()).expect("menu");
        assert!(menu.is_empty());
        assert!(menu.indicators.is_empty());
    }
}
