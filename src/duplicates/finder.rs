//! Duplicate finder orchestrating the scan pipeline.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the three pipeline stages in order:
//! 1. **Walk**: discover files under every configured root
//! 2. **Hash**: fingerprint file content on a bounded worker pool
//! 3. **Group**: partition by fingerprint and compute statistics
//!
//! Hashing is parallel but the output is not: results carry their
//! discovery index and are re-assembled in order before grouping, so
//! the deterministic first-seen ordering is a property of the output
//! rather than of scheduling. A failure on one file never cancels work
//! on another; every skipped root, pruned branch, and failed read ends
//! up in the returned diagnostics list.
//!
//! # Example
//!
//! ```no_run
//! use dupescan::config::SearchConfig;
//! use dupescan::duplicates::DuplicateFinder;
//! use std::path::Path;
//!
//! let config = SearchConfig::for_root(Path::new("."));
//! let outcome = DuplicateFinder::with_defaults().scan(&config);
//!
//! println!(
//!     "{} files, {} duplicate groups, {} diagnostics",
//!     outcome.summary.total_files,
//!     outcome.groups.len(),
//!     outcome.diagnostics.len()
//! );
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use super::groups::{DuplicateGroup, HashAccumulator, ScanSummary};
use crate::config::SearchConfig;
use crate::progress::ProgressCallback;
use crate::scanner::{Diagnostic, FileEntry, Hash, HashError, Hasher, Walker};

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Number of worker threads for hashing. Zero means the default of 4;
    /// low values reduce disk thrashing on spinning disks.
    pub io_threads: usize,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl FinderConfig {
    /// Set the worker thread count for hashing.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn effective_io_threads(&self) -> usize {
        if self.io_threads == 0 {
            4
        } else {
            self.io_threads
        }
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Everything one scan run produces.
#[derive(Debug)]
pub struct ScanOutcome {
    /// Duplicate groups, in first-seen fingerprint order
    pub groups: Vec<DuplicateGroup>,
    /// Aggregate statistics
    pub summary: ScanSummary,
    /// Every skipped root, pruned branch, and failed read
    pub diagnostics: Vec<Diagnostic>,
    /// Every discovered file path, in discovery order; the presentation
    /// layer shows these under high verbosity
    pub files: Vec<PathBuf>,
}

/// Per-file result of the parallel hashing stage.
enum HashOutcome {
    Hashed(Hash),
    Failed(HashError),
    Cancelled,
}

/// Orchestrates walking, hashing, and grouping.
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self {
            config,
            hasher: Hasher::new(),
        }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Run a full scan over the configured roots.
    ///
    /// Input problems never abort the run: an invalid root, an unreadable
    /// file, or a pruned cycle becomes a diagnostic and the scan carries
    /// on. A run cut short by the shutdown flag reports statistics over
    /// the files processed so far with `summary.interrupted` set.
    #[must_use]
    pub fn scan(&self, search: &SearchConfig) -> ScanOutcome {
        let started = Instant::now();
        let mut diagnostics = Vec::new();

        // Stage 1: discover files, collecting traversal diagnostics
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("walking", 0);
        }

        let mut walker = Walker::new(search);
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        let mut files: Vec<FileEntry> = Vec::new();
        for item in walker.walk() {
            match item {
                Ok(file) => {
                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(files.len() + 1, &file.path.to_string_lossy());
                    }
                    files.push(file);
                }
                Err(e) => diagnostics.push(Diagnostic::from(&e)),
            }
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("walking");
        }
        log::info!(
            "Discovered {} files ({} traversal diagnostics)",
            files.len(),
            diagnostics.len()
        );

        let file_paths: Vec<PathBuf> = files.iter().map(|f| f.path.clone()).collect();

        // Stage 2: hash in parallel, keyed by discovery index
        let results = self.hash_files(&files);

        // Stage 3: re-assemble in discovery order and group
        let mut interrupted = false;
        let mut acc = HashAccumulator::new();
        for (file, outcome) in files.into_iter().zip(results) {
            match outcome {
                HashOutcome::Hashed(hash) => acc.insert(hash, file),
                HashOutcome::Failed(e) => diagnostics.push(Diagnostic::from(&e)),
                HashOutcome::Cancelled => interrupted = true,
            }
        }

        let (groups, mut summary) = acc.finish();
        summary.scan_duration = started.elapsed();
        summary.interrupted = interrupted || self.config.is_shutdown_requested();

        log::info!(
            "Scan complete: {} files, {} duplicate groups, {} reclaimable bytes",
            summary.total_files,
            summary.duplicate_groups,
            summary.reclaimable_space
        );

        ScanOutcome {
            groups,
            summary,
            diagnostics,
            files: file_paths,
        }
    }

    /// Hash every file on a bounded rayon pool.
    ///
    /// The returned vector is index-aligned with `files`, which restores
    /// discovery order no matter how the pool scheduled the work.
    fn hash_files(&self, files: &[FileEntry]) -> Vec<HashOutcome> {
        if files.is_empty() {
            return Vec::new();
        }

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_start("hashing", files.len());
        }
        log::info!(
            "Hashing {} files on {} threads",
            files.len(),
            self.config.effective_io_threads()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.effective_io_threads())
            .build()
            .unwrap_or_else(|e| {
                log::warn!(
                    "Failed to create hashing thread pool ({}), using global pool",
                    e
                );
                rayon::ThreadPoolBuilder::new().build().unwrap()
            });

        let results: Vec<HashOutcome> = pool.install(|| {
            files
                .par_iter()
                .enumerate()
                .map(|(idx, file)| {
                    // Cancellation is checked at file boundaries only;
                    // a file already being hashed runs to completion.
                    if self.config.is_shutdown_requested() {
                        return HashOutcome::Cancelled;
                    }

                    if let Some(ref callback) = self.config.progress_callback {
                        callback.on_progress(idx + 1, &file.path.to_string_lossy());
                    }

                    match self.hasher.hash_file(&file.path) {
                        Ok(hash) => HashOutcome::Hashed(hash),
                        Err(e) => {
                            log::warn!("Failed to hash {}: {}", file.path.display(), e);
                            HashOutcome::Failed(e)
                        }
                    }
                })
                .collect()
        });

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_phase_end("hashing");
        }

        results
    }
}
