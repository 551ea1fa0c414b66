//! The analyzer registry: built once, read-only afterwards.
//!
//! [`RegistryBuilder`] merges searcher definitions and scanner trait objects
//! by name into [`Analyzer`] values; [`AnalyzerRegistry`] answers lookups in
//! insertion order. Share the built registry with `Arc`; it has no interior
//! mutability and needs no locks.

use crate::{
    definition::{validate_name, Searcher},
    error::{AnalyzerError, Result},
    loader,
    scanner::Scanner,
};
use lookout_core::{HashKind, IndicatorType};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// A named analyzer with a search capability, a scan capability, or both.
pub struct Analyzer {
    name: String,
    endpoint: String,
    searcher: Option<Searcher>,
    scanner: Option<Arc<dyn Scanner>>,
}

impl Analyzer {
    /// Unique analyzer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base URL of the service.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Search capability, if any.
    #[must_use]
    pub fn searcher(&self) -> Option<&Searcher> {
        self.searcher.as_ref()
    }

    /// Scan capability, if any.
    #[must_use]
    pub fn scanner(&self) -> Option<&dyn Scanner> {
        self.scanner.as_deref()
    }

    /// Union of types supported by either capability.
    #[must_use]
    pub fn supported_types(&self) -> Vec<IndicatorType> {
        let mut types = self
            .searcher
            .as_ref()
            .map(Searcher::supported_types)
            .unwrap_or_default();
        if let Some(scanner) = &self.scanner {
            for ty in scanner.supported_types() {
                if !types.contains(ty) {
                    types.push(*ty);
                }
            }
        }
        types
    }

    /// Whether either capability supports `ty`.
    #[must_use]
    pub fn supports(&self, ty: IndicatorType) -> bool {
        self.searches(ty, None) || self.scans(ty)
    }

    /// Whether the search capability serves `ty`.
    ///
    /// For hashes with a known `hash_kind`, per-template kind restrictions
    /// apply; without one, any hash template counts.
    #[must_use]
    pub fn searches(&self, ty: IndicatorType, hash_kind: Option<HashKind>) -> bool {
        self.searcher.as_ref().is_some_and(|s| match hash_kind {
            Some(kind) => s.template_for(ty, Some(kind)).is_some(),
            None => s.supports(ty),
        })
    }

    /// Whether the scan capability accepts `ty`.
    #[must_use]
    pub fn scans(&self, ty: IndicatorType) -> bool {
        self.scanner.as_ref().is_some_and(|s| s.supports(ty))
    }

    /// Build the search URL, `None` if this analyzer cannot search `ty`.
    #[must_use]
    pub fn search(&self, ty: IndicatorType, query: &str) -> Option<String> {
        self.searcher.as_ref()?.search(ty, query)
    }
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("search", &self.searcher.is_some())
            .field("scan", &self.scanner.is_some())
            .finish()
    }
}

/// Collects analyzers before freezing them into an [`AnalyzerRegistry`].
#[derive(Default)]
pub struct RegistryBuilder {
    analyzers: Vec<Analyzer>,
}

impl RegistryBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the embedded searcher catalogue.
    pub fn with_builtin_searchers(mut self) -> Result<Self> {
        self.add_searchers(loader::builtin_searchers()?)?;
        Ok(self)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.analyzers.iter().position(|a| a.name == name)
    }

    /// Register a searcher. Merges with an existing scan-only analyzer of the
    /// same name; the first registration keeps its position.
    pub fn add_searcher(&mut self, searcher: Searcher) -> Result<()> {
        searcher.validate()?;
        match self.position(&searcher.name) {
            Some(i) => {
                let existing = &mut self.analyzers[i];
                if existing.searcher.is_some() {
                    return Err(AnalyzerError::DuplicateAnalyzer {
                        name: searcher.name,
                        capability: "search",
                    });
                }
                debug!(analyzer = %searcher.name, "merged searcher into scanner");
                existing.endpoint.clone_from(&searcher.endpoint);
                existing.searcher = Some(searcher);
            }
            None => self.analyzers.push(Analyzer {
                name: searcher.name.clone(),
                endpoint: searcher.endpoint.clone(),
                searcher: Some(searcher),
                scanner: None,
            }),
        }
        Ok(())
    }

    /// Register several searchers in order, stopping at the first error.
    pub fn add_searchers(&mut self, searchers: impl IntoIterator<Item = Searcher>) -> Result<()> {
        for searcher in searchers {
            self.add_searcher(searcher)?;
        }
        Ok(())
    }

    /// Register a scanner, merging with a searcher of the same name.
    pub fn add_scanner(&mut self, scanner: Arc<dyn Scanner>) -> Result<()> {
        validate_name(scanner.name())?;
        match self.position(scanner.name()) {
            Some(i) => {
                let existing = &mut self.analyzers[i];
                if existing.scanner.is_some() {
                    return Err(AnalyzerError::DuplicateAnalyzer {
                        name: scanner.name().to_string(),
                        capability: "scan",
                    });
                }
                debug!(analyzer = %scanner.name(), "merged scanner into searcher");
                existing.scanner = Some(scanner);
            }
            None => self.analyzers.push(Analyzer {
                name: scanner.name().to_string(),
                endpoint: scanner.endpoint().to_string(),
                searcher: None,
                scanner: Some(scanner),
            }),
        }
        Ok(())
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> AnalyzerRegistry {
        let index = self
            .analyzers
            .iter()
            .enumerate()
            .map(|(i, a)| (a.name.clone(), i))
            .collect();

        info!(
            count = self.analyzers.len(),
            searchers = self.analyzers.iter().filter(|a| a.searcher.is_some()).count(),
            scanners = self.analyzers.iter().filter(|a| a.scanner.is_some()).count(),
            "built analyzer registry"
        );

        AnalyzerRegistry {
            analyzers: self.analyzers,
            index,
        }
    }
}

/// Immutable catalogue of analyzers, in insertion order.
pub struct AnalyzerRegistry {
    analyzers: Vec<Analyzer>,
    index: HashMap<String, usize>,
}

impl AnalyzerRegistry {
    /// Look up an analyzer by exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Analyzer> {
        self.index.get(name).map(|&i| &self.analyzers[i])
    }

    /// Look up an analyzer, failing with [`AnalyzerError::NotFound`].
    pub fn require(&self, name: &str) -> Result<&Analyzer> {
        self.get(name).ok_or_else(|| AnalyzerError::NotFound {
            name: name.to_string(),
        })
    }

    /// All analyzer names, in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.analyzers.iter().map(Analyzer::name)
    }

    /// All analyzers, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Analyzer> {
        self.analyzers.iter()
    }

    /// Number of analyzers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Analyzers supporting `ty` through either capability.
    #[must_use]
    pub fn analyzers_for(&self, ty: IndicatorType) -> Vec<&Analyzer> {
        self.analyzers.iter().filter(|a| a.supports(ty)).collect()
    }

    /// Analyzers that can search `ty`.
    #[must_use]
    pub fn searchers_for(&self, ty: IndicatorType) -> Vec<&Analyzer> {
        self.analyzers.iter().filter(|a| a.searches(ty, None)).collect()
    }

    /// Analyzers that can scan `ty`.
    #[must_use]
    pub fn scanners_for(&self, ty: IndicatorType) -> Vec<&Analyzer> {
        self.analyzers.iter().filter(|a| a.scans(ty)).collect()
    }
}

impl fmt::Debug for AnalyzerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.analyzers).finish()
    }
}
