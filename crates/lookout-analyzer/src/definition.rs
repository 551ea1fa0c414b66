//! Searcher definition types loaded from TOML.
//!
//! A searcher is pure data: a name, an endpoint and one URL template per
//! group of indicator types. Building a search URL never touches the network.
//!
//! ```toml
//! [[searcher]]
//! name = "Shodan"
//! endpoint = "https://www.shodan.io"
//!
//! [[searcher.templates]]
//! types = ["ip"]
//! template = "https://www.shodan.io/host/{raw}"
//! ```

use crate::error::{AnalyzerError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lookout_core::{HashKind, IndicatorType};
use serde::{Deserialize, Serialize};

/// Reserved target name meaning "every enabled analyzer".
pub const RESERVED_NAME: &str = "all";

/// Top-level layout of a definitions file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearcherFile {
    /// Searchers declared in this file, in file order
    #[serde(default, rename = "searcher")]
    pub searchers: Vec<Searcher>,
}

/// A search-engine link builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Searcher {
    /// Unique analyzer name, shown in menu titles
    pub name: String,
    /// Base URL of the service
    pub endpoint: String,
    /// URL templates, one per type group
    pub templates: Vec<SearchTemplate>,
}

/// One URL template and the types it serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTemplate {
    /// Indicator types this template accepts
    pub types: Vec<IndicatorType>,
    /// URL with exactly one kind of placeholder
    pub template: String,
    /// Restrict `hash` queries to these digest kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_kinds: Option<Vec<HashKind>>,
}

/// Placeholder kinds a template may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{query}`: percent-encoded
    Query,
    /// `{raw}`: inserted verbatim
    Raw,
    /// `{base64}`: standard base64
    Base64,
}

impl Placeholder {
    const ALL: [Placeholder; 3] = [Self::Query, Self::Raw, Self::Base64];

    /// Literal token as written in templates.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Query => "{query}",
            Self::Raw => "{raw}",
            Self::Base64 => "{base64}",
        }
    }

    fn encode(self, query: &str) -> String {
        match self {
            Self::Query => urlencoding::encode(query).into_owned(),
            Self::Raw => query.to_string(),
            Self::Base64 => STANDARD.encode(query),
        }
    }
}

impl SearchTemplate {
    /// Placeholder kinds present in the template.
    #[must_use]
    pub fn placeholders(&self) -> Vec<Placeholder> {
        Placeholder::ALL
            .into_iter()
            .filter(|p| self.template.contains(p.token()))
            .collect()
    }

    /// Whether this template serves `ty`, honouring the hash-kind restriction.
    #[must_use]
    pub fn covers(&self, ty: IndicatorType, hash_kind: Option<HashKind>) -> bool {
        if !self.types.contains(&ty) {
            return false;
        }
        if ty != IndicatorType::Hash {
            return true;
        }
        match &self.hash_kinds {
            None => true,
            Some(kinds) => hash_kind.is_some_and(|kind| kinds.contains(&kind)),
        }
    }

    /// Substitute `query` into the template's placeholder.
    ///
    /// A validated template has exactly one placeholder kind; substitution is
    /// a single pass, so placeholder tokens inside `query` stay literal.
    #[must_use]
    pub fn expand(&self, query: &str) -> String {
        match self.placeholders().first() {
            Some(p) => self.template.replace(p.token(), &p.encode(query)),
            None => self.template.clone(),
        }
    }

    /// Hash kinds this template accepts, `None` meaning all of them.
    fn accepted_kinds(&self) -> Option<&[HashKind]> {
        self.hash_kinds.as_deref()
    }
}

impl Searcher {
    /// Union of the types served by all templates, in declaration order.
    #[must_use]
    pub fn supported_types(&self) -> Vec<IndicatorType> {
        let mut types = Vec::new();
        for ty in self.templates.iter().flat_map(|t| t.types.iter().copied()) {
            if !types.contains(&ty) {
                types.push(ty);
            }
        }
        types
    }

    /// Whether any template serves `ty`.
    #[must_use]
    pub fn supports(&self, ty: IndicatorType) -> bool {
        self.templates.iter().any(|t| t.types.contains(&ty))
    }

    /// The template serving `ty` (and `hash_kind`, for hashes).
    #[must_use]
    pub fn template_for(
        &self,
        ty: IndicatorType,
        hash_kind: Option<HashKind>,
    ) -> Option<&SearchTemplate> {
        self.templates.iter().find(|t| t.covers(ty, hash_kind))
    }

    /// Build the search URL for `query`.
    ///
    /// Returns `None` when no template serves the type or, for hashes, the
    /// digest kind implied by the query length.
    #[must_use]
    pub fn search(&self, ty: IndicatorType, query: &str) -> Option<String> {
        let hash_kind = if ty == IndicatorType::Hash {
            HashKind::from_hex_len(query.len())
        } else {
            None
        };
        self.template_for(ty, hash_kind).map(|t| t.expand(query))
    }

    /// Validate the definition for completeness and consistency.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;

        let endpoint_ok = url::Url::parse(&self.endpoint)
            .is_ok_and(|u| matches!(u.scheme(), "http" | "https"));
        if !endpoint_ok {
            return Err(self.invalid(format!("endpoint is not an http(s) URL: {}", self.endpoint)));
        }

        if self.templates.is_empty() {
            return Err(self.invalid("at least one template is required".to_string()));
        }

        for (i, template) in self.templates.iter().enumerate() {
            self.validate_template(i, template)?;
        }

        for (i, a) in self.templates.iter().enumerate() {
            for b in &self.templates[i + 1..] {
                for ty in a.types.iter().filter(|ty| b.types.contains(ty)) {
                    if !(*ty == IndicatorType::Hash && kinds_disjoint(a, b)) {
                        return Err(self.invalid(format!(
                            "type '{ty}' is served by more than one template"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_template(&self, index: usize, template: &SearchTemplate) -> Result<()> {
        if template.types.is_empty() {
            return Err(self.invalid(format!("template {index} lists no types")));
        }

        let placeholders = template.placeholders();
        if placeholders.len() != 1 {
            return Err(self.invalid(format!(
                "template {index} must use exactly one of {{query}}, {{raw}}, {{base64}}, found {}",
                placeholders.len()
            )));
        }

        let sample = template.expand("sample");
        if !url::Url::parse(&sample).is_ok_and(|u| matches!(u.scheme(), "http" | "https")) {
            return Err(self.invalid(format!(
                "template {index} does not expand to an http(s) URL: {}",
                template.template
            )));
        }

        if let Some(kinds) = &template.hash_kinds {
            if !template.types.contains(&IndicatorType::Hash) {
                return Err(self.invalid(format!(
                    "template {index} sets hash_kinds without serving hash"
                )));
            }
            if kinds.is_empty() {
                return Err(self.invalid(format!("template {index} has empty hash_kinds")));
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> AnalyzerError {
        AnalyzerError::ValidationError {
            name: self.name.clone(),
            reason,
        }
    }
}

/// Two templates both serving `hash` may coexist only if they split the kinds.
fn kinds_disjoint(a: &SearchTemplate, b: &SearchTemplate) -> bool {
    match (a.accepted_kinds(), b.accepted_kinds()) {
        (Some(ka), Some(kb)) => !ka.iter().any(|k| kb.contains(k)),
        _ => false,
    }
}

/// Check an analyzer name: non-empty, not reserved, no control characters.
pub fn validate_name(name: &str) -> Result<()> {
    let reason = if name.trim().is_empty() {
        "name cannot be empty"
    } else if name.eq_ignore_ascii_case(RESERVED_NAME) {
        "name 'all' is reserved"
    } else if name.chars().any(char::is_control) {
        "name cannot contain control characters"
    } else {
        return Ok(());
    };
    Err(AnalyzerError::ValidationError {
        name: name.to_string(),
        reason: reason.to_string(),
    })
}
