//! Configuration management for Lookout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. The engine itself never reads this file;
//! callers load a snapshot and pass [`SearcherStates`] and [`ApiKeys`] into
//! each operation.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override scanner API keys, keyed by scanner name.
const API_KEY_ENV_VARS: [(&str, &str); 3] = [
    ("LOOKOUT_URLSCAN_API_KEY", "urlscan.io"),
    ("LOOKOUT_VIRUSTOTAL_API_KEY", "VirusTotal"),
    ("LOOKOUT_HYBRID_ANALYSIS_API_KEY", "HybridAnalysis"),
];

/// Main application configuration.
///
/// This is loaded from `~/.config/lookout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General classification settings
    pub general: GeneralConfig,
    /// Per-analyzer enable/disable switches
    pub searchers: SearcherStates,
    /// Scanner credentials
    pub api_keys: ApiKeys,
    /// Scanner transport settings
    pub scanning: ScanningConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LOOKOUT_ENABLE_IDN`: Override IDN conversion (true/false)
    /// - `LOOKOUT_ENABLE_REFANG`: Override refanging (true/false)
    /// - `LOOKOUT_URLSCAN_API_KEY`, `LOOKOUT_VIRUSTOTAL_API_KEY`,
    ///   `LOOKOUT_HYBRID_ANALYSIS_API_KEY`: Override scanner API keys
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply overrides from an environment lookup function.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("LOOKOUT_ENABLE_IDN") {
            if let Ok(enabled) = val.parse() {
                self.general.enable_idn = enabled;
                tracing::debug!("Override general.enable_idn from env: {}", enabled);
            }
        }

        if let Some(val) = lookup("LOOKOUT_ENABLE_REFANG") {
            if let Ok(enabled) = val.parse() {
                self.general.enable_refang = enabled;
                tracing::debug!("Override general.enable_refang from env: {}", enabled);
            }
        }

        for (var, scanner) in API_KEY_ENV_VARS {
            if let Some(key) = lookup(var).filter(|k| !k.trim().is_empty()) {
                self.api_keys.set(scanner, key);
                tracing::debug!(scanner, "Override API key from env");
            }
        }
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit file, creating missing parent directories.
    pub fn save_to(&self, config_path: &Path) -> ConfigResult<()> {
        if let Some(config_dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(config_dir).map_err(|source| ConfigError::Io {
                path: config_dir.to_path_buf(),
                source,
            })?;
        }
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents).map_err(|source| ConfigError::Io {
            path: config_path.to_path_buf(),
            source,
        })
    }

    /// Check value ranges that TOML typing alone cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.scanning.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scanning.timeout_secs",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/lookout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "lookout", "lookout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the directory for user-supplied searcher definitions.
    ///
    /// Uses XDG base directories: `~/.config/lookout/searchers`
    pub fn definitions_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "lookout", "lookout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("searchers"))
    }
}

/// General classification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Convert Unicode domain labels to punycode before validation
    pub enable_idn: bool,
    /// Reverse defanging (`hxxp`, `[.]`, ...) before validation
    pub enable_refang: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            enable_idn: true,
            enable_refang: true,
        }
    }
}

/// Scanner transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanningConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Lookout/0.1.0 (+https://github.com/lookout-ioc/lookout)".to_string(),
        }
    }
}

/// Enabled/disabled state per analyzer name.
///
/// Analyzers are on by default: a name missing from the map is enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearcherStates(BTreeMap<String, bool>);

impl SearcherStates {
    /// Create an empty state map (everything enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the named analyzer is enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.0.get(name).copied().unwrap_or(true)
    }

    /// Enable or disable an analyzer by name.
    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    /// Builder-style variant of [`SearcherStates::set`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.set(name, enabled);
        self
    }

    /// Names explicitly disabled.
    pub fn disabled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, enabled)| !**enabled)
            .map(|(name, _)| name.as_str())
    }
}

/// Scanner credentials, keyed by scanner name.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKeys(BTreeMap<String, String>);

impl ApiKeys {
    /// Create an empty key set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the key for a scanner. Empty or whitespace-only keys count as absent.
    #[must_use]
    pub fn get(&self, scanner: &str) -> Option<&str> {
        self.0
            .get(scanner)
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
    }

    /// Set the key for a scanner.
    pub fn set(&mut self, scanner: impl Into<String>, key: impl Into<String>) {
        self.0.insert(scanner.into(), key.into());
    }

    /// Builder-style variant of [`ApiKeys::set`].
    #[must_use]
    pub fn with(mut self, scanner: impl Into<String>, key: impl Into<String>) -> Self {
        self.set(scanner, key);
        self
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|name| (name, "<redacted>")))
            .finish()
    }
}
