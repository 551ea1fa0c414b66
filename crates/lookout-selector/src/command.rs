//! Menu commands and their reversible id encoding.
//!
//! A menu id is the compact JSON form of a [`Command`]. JSON string quoting
//! keeps the encoding unambiguous whatever the query contains.

use crate::error::CommandError;
use lookout_analyzer::RESERVED_NAME;
use lookout_core::{Indicator, IndicatorType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Open a search URL
    Search,
    /// Submit to an active scanner
    Scan,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Search => "search",
            Self::Scan => "scan",
        })
    }
}

/// Which analyzer(s) the command addresses.
///
/// Serialized as a bare string: the reserved name `all` or an analyzer name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Target {
    /// Every enabled analyzer supporting the type
    All,
    /// One analyzer by name
    Named(String),
}

impl Target {
    /// Address a single analyzer.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::from(name.into())
    }

    /// The analyzer name, `None` for [`Target::All`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Named(name) => Some(name),
        }
    }
}

impl From<String> for Target {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(RESERVED_NAME) {
            Self::All
        } else {
            Self::Named(value)
        }
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        match target {
            Target::All => RESERVED_NAME.to_string(),
            Target::Named(name) => name,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(RESERVED_NAME),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// A menu-selected `(action, target, type, query)` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Search or scan
    pub action: Action,
    /// `all` or an analyzer name
    pub target: Target,
    /// Declared indicator type
    #[serde(rename = "type")]
    pub ty: IndicatorType,
    /// Indicator text
    pub query: String,
}

impl Command {
    /// Search `indicator` on `target`.
    #[must_use]
    pub fn search(target: Target, indicator: &Indicator) -> Self {
        Self {
            action: Action::Search,
            target,
            ty: indicator.ty,
            query: indicator.value.clone(),
        }
    }

    /// Scan `indicator` on the analyzer named `analyzer`.
    #[must_use]
    pub fn scan(analyzer: impl Into<String>, indicator: &Indicator) -> Self {
        Self {
            action: Action::Scan,
            target: Target::named(analyzer),
            ty: indicator.ty,
            query: indicator.value.clone(),
        }
    }

    /// Encode as a menu id.
    pub fn to_menu_id(&self) -> Result<String, CommandError> {
        serde_json::to_string(self).map_err(CommandError::Encode)
    }

    /// Decode a menu id produced by [`Command::to_menu_id`].
    pub fn from_menu_id(id: &str) -> Result<Self, CommandError> {
        serde_json::from_str(id).map_err(CommandError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_id_shape() {
        let cmd = Command::search(
            Target::named("Shodan"),
            &Indicator::new(IndicatorType::Ip, "8.8.8.8"),
        );
        assert_eq!(
            cmd.to_menu_id().expect("encode"),
            r#"{"action":"search","target":"Shodan","type":"ip","query":"8.8.8.8"}"#
        );
    }

    #[test]
    fn test_all_target_encoding() {
        let cmd = Command::search(Target::All, &Indicator::new(IndicatorType::Domain, "a.example"));
        let id = cmd.to_menu_id().expect("encode");
        assert!(id.contains(r#""target":"all""#));
        assert_eq!(Command::from_menu_id(&id).expect("decode").target, Target::All);

        assert_eq!(Target::named("ALL"), Target::All);
    }

    #[test]
    fn test_query_with_delimiters_survives() {
        let query = r#"all,"scan"|search:{x}\n"#;
        let cmd = Command::scan("urlscan.io", &Indicator::new(IndicatorType::Text, query));
        let decoded = Command::from_menu_id(&cmd.to_menu_id().expect("encode")).expect("decode");
        assert_eq!(decoded, cmd);
        assert_eq!(decoded.query, query);
    }

    #[test]
    fn test_malformed_menu_id() {
        assert!(matches!(
            Command::from_menu_id("search:Shodan:ip:8.8.8.8"),
            Err(CommandError::Decode(_))
        ));
        assert!(Command::from_menu_id(r#"{"action":"delete","target":"all","type":"ip","query":"x"}"#).is_err());
        assert!(Command::from_menu_id(r#"{"action":"search","target":"all","type":"phone","query":"x"}"#).is_err());
    }
}
