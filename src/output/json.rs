//! JSON output formatter for scan results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "hash": "abc123...",
//!       "size": 1024,
//!       "files": ["/path/to/file1.txt", "/path/to/file2.txt"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "total_size": 1048576,
//!     "unique_files": 90,
//!     "duplicate_files": 10,
//!     "duplicate_groups": 5,
//!     "reclaimable_space": 51200,
//!     "scan_duration_ms": 1234,
//!     "interrupted": false,
//!     "exit_code": 0,
//!     "exit_code_name": "DS000"
//!   },
//!   "diagnostics": [
//!     { "path": "/root/locked", "reason": "Permission denied: /root/locked" }
//!   ]
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanOutcome, ScanSummary};
use crate::error::ExitCode;
use crate::scanner::Diagnostic;

/// A single duplicate group in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// BLAKE3 hash as hexadecimal string (64 characters)
    pub hash: String,
    /// File size in bytes
    pub size: u64,
    /// Paths of all members, in discovery order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Create a JSON duplicate group from a [`DuplicateGroup`].
    #[must_use]
    pub fn from_duplicate_group(group: &DuplicateGroup) -> Self {
        Self {
            hash: group.hash_hex(),
            size: group.size,
            files: group
                .files
                .iter()
                .map(|f| f.path.to_string_lossy().into_owned())
                .collect(),
        }
    }
}

/// Summary statistics in JSON format.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Total number of files fingerprinted
    pub total_files: usize,
    /// Total size of all fingerprinted files in bytes
    pub total_size: u64,
    /// Files whose content appears exactly once
    pub unique_files: usize,
    /// Files in duplicate groups, retained original included
    pub duplicate_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Bytes reclaimable by keeping one copy per group
    pub reclaimable_space: u64,
    /// Duration of the scan in milliseconds
    pub scan_duration_ms: u64,
    /// Whether the scan was interrupted
    pub interrupted: bool,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "DS000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Create a JSON summary from a [`ScanSummary`] and an exit code.
    #[must_use]
    pub fn from_scan_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            total_files: summary.total_files,
            total_size: summary.total_size,
            unique_files: summary.unique_files,
            duplicate_files: summary.duplicate_files,
            duplicate_groups: summary.duplicate_groups,
            reclaimable_space: summary.reclaimable_space,
            scan_duration_ms: summary.scan_duration.as_millis() as u64,
            interrupted: summary.interrupted,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON report for one scan run.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Duplicate groups, in first-seen fingerprint order
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Aggregate statistics
    pub summary: JsonSummary,
    /// Every skipped root, pruned branch, and failed read
    pub diagnostics: Vec<Diagnostic>,
}

impl JsonReport {
    /// Build a report from a scan outcome and the chosen exit code.
    #[must_use]
    pub fn new(outcome: &ScanOutcome, exit_code: ExitCode) -> Self {
        Self {
            duplicates: outcome
                .groups
                .iter()
                .map(JsonDuplicateGroup::from_duplicate_group)
                .collect(),
            summary: JsonSummary::from_scan_summary(&outcome.summary, exit_code),
            diagnostics: outcome.diagnostics.clone(),
        }
    }

    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if encoding fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty-printed JSON to the given writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn write_to(&self, w: &mut impl Write) -> anyhow::Result<()> {
        let json = self.to_json_pretty()?;
        writeln!(w, "{json}")?;
        Ok(())
    }
}
