//! Directory walker built on an explicit work-list.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing the configured
//! root directories and yielding [`FileEntry`] values for every regular
//! file found. Traversal is iterative: pending directories live in a
//! queue rather than on the call stack, so arbitrarily deep trees cannot
//! overflow the stack, and the symlink-cycle guard (a set of visited
//! canonical directory identities) threads through naturally.
//!
//! # Behavior
//!
//! - A root that does not exist or is not a directory yields an error for
//!   that root; the remaining roots are still scanned.
//! - Hidden entries (leading `.`) are skipped unless the configuration
//!   includes them.
//! - With `recursive` off, subdirectories are skipped entirely.
//! - Directory symlinks are followed, but a directory reached twice in one
//!   walk (cycle or overlapping root) is pruned with a diagnostic error.
//! - Children of each directory are visited in name order, so discovery
//!   order is stable across runs on an unchanged filesystem.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::config::SearchConfig;
//! use dupescan::scanner::Walker;
//! use std::path::Path;
//!
//! let config = SearchConfig::for_root(Path::new("/home/user/Downloads"));
//! let walker = Walker::new(&config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{FileEntry, ScanError};
use crate::config::SearchConfig;

/// Directory walker for file discovery.
#[derive(Debug)]
pub struct Walker<'a> {
    /// Scan configuration (roots, recursion, hidden filtering)
    config: &'a SearchConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl<'a> Walker<'a> {
    /// Create a new walker over the configured roots.
    #[must_use]
    pub fn new(config: &'a SearchConfig) -> Self {
        Self {
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag is set to `true`, the walker stops at the next
    /// directory boundary. This allows clean Ctrl+C handling.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Walk the configured roots, yielding file entries.
    ///
    /// Returns a lazy iterator over [`FileEntry`] results. Errors are
    /// yielded as [`ScanError`] values rather than stopping iteration.
    /// The sequence is finite and not restartable; calling `walk` again
    /// re-reads the filesystem from scratch.
    #[must_use]
    pub fn walk(&self) -> WalkIter<'a> {
        let mut iter = WalkIter {
            config: self.config,
            shutdown_flag: self.shutdown_flag.clone(),
            dirs: VecDeque::new(),
            ready: VecDeque::new(),
            visited: HashSet::new(),
        };
        iter.enqueue_roots();
        iter
    }
}

/// Iterator state for one traversal.
///
/// `dirs` is the work-list of directories still to be listed; `ready`
/// buffers the results produced by the most recent directory listing;
/// `visited` holds the canonical identity of every directory already
/// descended into, across all roots of this walk.
#[derive(Debug)]
pub struct WalkIter<'a> {
    config: &'a SearchConfig,
    shutdown_flag: Option<Arc<AtomicBool>>,
    dirs: VecDeque<PathBuf>,
    ready: VecDeque<Result<FileEntry, ScanError>>,
    visited: HashSet<PathBuf>,
}

impl WalkIter<'_> {
    /// Validate each root and queue the usable ones, in caller order.
    fn enqueue_roots(&mut self) {
        for root in self.config.roots() {
            match fs::metadata(root) {
                Ok(meta) if meta.is_dir() => {
                    if self.mark_visited(root) {
                        self.dirs.push_back(root.clone());
                    } else {
                        log::warn!("Root already covered by a previous root: {}", root.display());
                        self.ready
                            .push_back(Err(ScanError::SymlinkCycle(root.clone())));
                    }
                }
                Ok(_) => {
                    log::warn!("Root is not a directory: {}", root.display());
                    self.ready
                        .push_back(Err(ScanError::RootNotADirectory(root.clone())));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::warn!("Root not found: {}", root.display());
                    self.ready
                        .push_back(Err(ScanError::RootNotFound(root.clone())));
                }
                Err(e) => {
                    self.ready.push_back(Err(map_io_error(root, e)));
                }
            }
        }
    }

    /// Record a directory's canonical identity. Returns `false` if the
    /// directory was already visited in this walk.
    fn mark_visited(&mut self, dir: &Path) -> bool {
        // Fall back to the raw path if canonicalization fails; the walk
        // still terminates because the filesystem is finite.
        let identity = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
        self.visited.insert(identity)
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    fn is_hidden(name: &std::ffi::OsStr) -> bool {
        name.to_string_lossy().starts_with('.')
    }

    /// List one directory, buffering its files and queueing its
    /// subdirectories.
    fn process_dir(&mut self, dir: &Path) {
        let read_dir = match fs::read_dir(dir) {
            Ok(rd) => rd,
            Err(e) => {
                self.ready.push_back(Err(map_io_error(dir, e)));
                return;
            }
        };

        // Sort children for deterministic output
        let mut children: Vec<fs::DirEntry> = Vec::new();
        for entry in read_dir {
            match entry {
                Ok(entry) => children.push(entry),
                Err(e) => self.ready.push_back(Err(map_io_error(dir, e))),
            }
        }
        children.sort_by_key(fs::DirEntry::file_name);

        for child in children {
            let path = child.path();

            if !self.config.include_hidden() && Self::is_hidden(&child.file_name()) {
                log::trace!("Skipping hidden entry: {}", path.display());
                continue;
            }

            let file_type = match child.file_type() {
                Ok(ft) => ft,
                Err(e) => {
                    self.ready.push_back(Err(map_io_error(&path, e)));
                    continue;
                }
            };

            // Resolve symlinks to their target type
            let metadata = if file_type.is_symlink() {
                match fs::metadata(&path) {
                    Ok(meta) => meta,
                    Err(e) => {
                        self.ready.push_back(Err(map_io_error(&path, e)));
                        continue;
                    }
                }
            } else {
                match child.metadata() {
                    Ok(meta) => meta,
                    Err(e) => {
                        self.ready.push_back(Err(map_io_error(&path, e)));
                        continue;
                    }
                }
            };

            if metadata.is_dir() {
                if !self.config.recursive() {
                    log::trace!("Skipping subdirectory (non-recursive): {}", path.display());
                    continue;
                }
                if self.mark_visited(&path) {
                    self.dirs.push_back(path);
                } else {
                    log::warn!("Pruning revisited directory: {}", path.display());
                    self.ready.push_back(Err(ScanError::SymlinkCycle(path)));
                }
            } else if metadata.is_file() {
                self.ready
                    .push_back(Ok(FileEntry::new(path, metadata.len())));
            } else {
                // Sockets, FIFOs, devices: nothing to hash
                log::trace!("Skipping special file: {}", path.display());
            }
        }
    }
}

impl Iterator for WalkIter<'_> {
    type Item = Result<FileEntry, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(item);
            }
            if self.is_shutdown_requested() {
                log::debug!("Walker: shutdown requested, stopping iteration");
                return None;
            }
            let dir = self.dirs.pop_front()?;
            self.process_dir(&dir);
        }
    }
}

/// Map an I/O error during traversal to a [`ScanError`].
fn map_io_error(path: &Path, error: std::io::Error) -> ScanError {
    use std::io::ErrorKind;

    match error.kind() {
        ErrorKind::PermissionDenied => {
            log::warn!("Permission denied: {}", path.display());
            ScanError::PermissionDenied(path.to_path_buf())
        }
        _ => {
            log::warn!("I/O error for {}: {}", path.display(), error);
            ScanError::Io {
                path: path.to_path_buf(),
                source: error,
            }
        }
    }
}
