//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Insertion-ordered grouping of files by content hash
//! - Scan statistics (unique/duplicate counts, reclaimable space)
//! - Pipeline orchestration (walk, hash in parallel, group)

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, ScanOutcome};
pub use groups::{group_by_hash, DuplicateGroup, HashAccumulator, ScanSummary};
