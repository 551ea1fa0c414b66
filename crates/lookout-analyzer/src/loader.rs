//! Searcher definition loading from TOML.
//!
//! The built-in catalogue is embedded at compile time. Extra definitions can
//! be dropped into a directory as `*.toml` files using the same layout.

use crate::{
    definition::{Searcher, SearcherFile},
    error::{AnalyzerError, Result},
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The embedded searcher catalogue.
pub const BUILTIN_DEFINITIONS: &str = include_str!("../definitions/searchers.toml");

/// Parse and validate the embedded catalogue.
///
/// # Errors
/// Fails if any built-in definition is invalid.
pub fn builtin_searchers() -> Result<Vec<Searcher>> {
    let searchers = parse_definitions(BUILTIN_DEFINITIONS, "<builtin>")?;
    debug!(count = searchers.len(), "parsed built-in searcher definitions");
    Ok(searchers)
}

/// Parse a definitions document and validate every searcher in it.
///
/// `origin` names the source in error messages.
pub fn parse_definitions(contents: &str, origin: &str) -> Result<Vec<Searcher>> {
    let file: SearcherFile = toml::from_str(contents).map_err(|e| AnalyzerError::ParseError {
        path: origin.to_string(),
        source: e,
    })?;
    for searcher in &file.searchers {
        searcher.validate()?;
    }
    Ok(file.searchers)
}

/// Loader for user-supplied searcher definitions.
pub struct AnalyzerLoader {
    /// Directory containing `*.toml` definition files
    definitions_dir: PathBuf,
}

impl AnalyzerLoader {
    /// Create a loader for the given directory.
    ///
    /// # Errors
    /// Returns error if the directory doesn't exist or isn't a directory.
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Result<Self> {
        let definitions_dir = definitions_dir.into();

        if !definitions_dir.is_dir() {
            return Err(AnalyzerError::DirectoryNotFound {
                path: definitions_dir.display().to_string(),
            });
        }

        Ok(Self { definitions_dir })
    }

    /// Directory this loader reads from.
    #[must_use]
    pub fn definitions_dir(&self) -> &Path {
        &self.definitions_dir
    }

    /// Load every definition file, in sorted path order.
    ///
    /// Files that fail to read, parse or validate are logged and skipped as a
    /// whole.
    ///
    /// # Errors
    /// Returns error if the directory can't be read.
    pub fn load_all(&self) -> Result<Vec<Searcher>> {
        let mut paths = Vec::new();
        Self::collect_toml_files(&self.definitions_dir, &mut paths)?;
        paths.sort();

        let mut searchers = Vec::new();
        for path in &paths {
            match Self::load_from_path(path) {
                Ok(mut loaded) => {
                    debug!(path = %path.display(), count = loaded.len(), "loaded searcher definitions");
                    searchers.append(&mut loaded);
                }
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping invalid searcher definitions"
                    );
                }
            }
        }

        info!(
            count = searchers.len(),
            files = paths.len(),
            dir = %self.definitions_dir.display(),
            "loaded searcher definitions"
        );

        Ok(searchers)
    }

    /// Recursively collect `*.toml` files.
    fn collect_toml_files(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                Self::collect_toml_files(&path, paths)?;
            } else if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<Vec<Searcher>> {
        let contents = std::fs::read_to_string(path).map_err(|e| AnalyzerError::LoadError {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
        parse_definitions(&contents, &path.display().to_string())
    }
}
