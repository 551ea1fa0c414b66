//! Per-invocation application state.

use anyhow::{Context, Result};
use lookout_analyzer::{AnalyzerError, AnalyzerLoader, AnalyzerRegistry, RegistryBuilder};
use lookout_core::AppConfig;
use lookout_scanner::{default_scanners, HttpTransport, ReqwestTransport};
use lookout_selector::Dispatcher;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration snapshot plus the registry built from it.
pub struct AppState {
    /// Configuration read for this invocation
    pub config: AppConfig,

    /// Built-in and user-defined analyzers
    pub registry: Arc<AnalyzerRegistry>,
}

impl AppState {
    /// Load configuration (with env overrides) and build the registry.
    ///
    /// `config_path` overrides the XDG config file location.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => AppConfig::load_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => AppConfig::load().context("loading config")?,
        };
        config.apply_env(|name| std::env::var(name).ok());

        let transport = ReqwestTransport::new(&config.scanning)
            .context("building HTTP transport")?;
        let definitions_dir = AppConfig::definitions_dir().ok();

        Self::with_transport(config, definitions_dir.as_deref(), Arc::new(transport))
    }

    /// Build state from an explicit config, definitions directory and transport.
    pub fn with_transport(
        config: AppConfig,
        definitions_dir: Option<&Path>,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let registry = build_registry(definitions_dir, transport)?;
        Ok(Self {
            config,
            registry: Arc::new(registry),
        })
    }

    /// A dispatcher sharing this state's registry.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(Arc::clone(&self.registry))
    }
}

/// Built-in searchers, then user definitions, then the built-in scanners.
///
/// User definitions whose name is already taken are skipped with a warning.
pub fn build_registry(
    definitions_dir: Option<&Path>,
    transport: Arc<dyn HttpTransport>,
) -> Result<AnalyzerRegistry> {
    let mut builder = RegistryBuilder::new()
        .with_builtin_searchers()
        .context("loading built-in searcher definitions")?;

    if let Some(dir) = definitions_dir.filter(|d| d.is_dir()) {
        let loader = AnalyzerLoader::new(dir)?;
        let searchers = loader
            .load_all()
            .with_context(|| format!("reading searcher definitions in {}", dir.display()))?;
        let mut added = 0usize;
        for searcher in searchers {
            match builder.add_searcher(searcher) {
                Ok(()) => added += 1,
                Err(err @ AnalyzerError::DuplicateAnalyzer { .. }) => {
                    warn!(error = %err, "skipping user searcher definition");
                }
                Err(err) => return Err(err.into()),
            }
        }
        info!(dir = %dir.display(), count = added, "loaded user searcher definitions");
    }

    for scanner in default_scanners(transport) {
        builder.add_scanner(scanner)?;
    }

    Ok(builder.build())
}
