//! Scan configuration.
//!
//! A [`SearchConfig`] is built once from CLI input, validated at
//! construction, and passed by reference into each pipeline stage.
//! No component mutates it or keeps ambient global state.

use std::path::{Path, PathBuf};

/// Errors raised while constructing a [`SearchConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// No root directories were supplied.
    #[error("at least one root directory is required")]
    NoRoots,
}

/// Immutable configuration for a single scan run.
///
/// Roots keep the order the caller supplied them in; that order drives
/// the discovery order of the whole pipeline.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    roots: Vec<PathBuf>,
    recursive: bool,
    include_hidden: bool,
}

impl SearchConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoRoots`] if `roots` is empty. Whether each
    /// root actually exists is checked during traversal, where a bad root
    /// becomes a diagnostic instead of a hard failure.
    pub fn new(
        roots: Vec<PathBuf>,
        recursive: bool,
        include_hidden: bool,
    ) -> Result<Self, ConfigError> {
        if roots.is_empty() {
            return Err(ConfigError::NoRoots);
        }
        Ok(Self {
            roots,
            recursive,
            include_hidden,
        })
    }

    /// Root directories, in the order the caller supplied them.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Whether traversal descends into subdirectories.
    #[must_use]
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Whether dot-prefixed files and directories are scanned.
    #[must_use]
    pub fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Convenience constructor for a single-root recursive scan.
    #[must_use]
    pub fn for_root(root: &Path) -> Self {
        Self {
            roots: vec![root.to_path_buf()],
            recursive: true,
            include_hidden: false,
        }
    }
}
