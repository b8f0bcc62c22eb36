//! Scanner module for directory traversal and file hashing.
//!
//! This module provides functionality for:
//! - Work-list directory traversal with symlink cycle pruning
//! - Content hashing with BLAKE3 (streaming)
//! - Structured diagnostics for skipped roots and unreadable files
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`hasher`]: BLAKE3 file hashing (streaming)
//!
//! # Example
//!
//! ```no_run
//! use dupescan::config::SearchConfig;
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let config = SearchConfig::for_root(Path::new("."));
//! let walker = Walker::new(&config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

use serde::Serialize;

// Re-export main types
pub use hasher::{hash_to_hex, hex_to_hash, Hash, Hasher};
pub use walker::Walker;

/// A discovered regular file.
///
/// Identified by its path and size; created by the [`Walker`] and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Path to the file, as discovered under the configured root
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Errors that can occur during directory traversal.
///
/// Every variant is recoverable: the walker yields the error and keeps
/// going, and the caller records it as a [`Diagnostic`].
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// A configured root does not exist.
    #[error("Root not found: {0}")]
    RootNotFound(PathBuf),

    /// A configured root exists but is not a directory.
    #[error("Root is not a directory: {0}")]
    RootNotADirectory(PathBuf),

    /// Permission was denied when listing a directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was reached again through a symlink (or an
    /// overlapping root); the branch is pruned.
    #[error("Symlink cycle pruned: {0}")]
    SymlinkCycle(PathBuf),

    /// An I/O error occurred while listing a directory.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::RootNotFound(p)
            | Self::RootNotADirectory(p)
            | Self::PermissionDenied(p)
            | Self::SymlinkCycle(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

/// Errors that can occur while hashing a single file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file vanished between discovery and read.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound(p) | Self::PermissionDenied(p) => p,
            Self::Io { path, .. } => path,
        }
    }
}

/// A structured record of a skipped root, pruned branch, or failed read.
///
/// Diagnostics are collected alongside the scan result rather than thrown
/// away; the presentation layer decides how much of them to show.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    /// Path the problem was observed at
    pub path: PathBuf,
    /// Human-readable reason the path was skipped
    pub reason: String,
}

impl Diagnostic {
    /// Create a diagnostic record.
    #[must_use]
    pub fn new(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            reason: reason.into(),
        }
    }
}

impl From<&ScanError> for Diagnostic {
    fn from(err: &ScanError) -> Self {
        Self::new(err.path().clone(), err.to_string())
    }
}

impl From<&HashError> for Diagnostic {
    fn from(err: &HashError) -> Self {
        Self::new(err.path().clone(), err.to_string())
    }
}
