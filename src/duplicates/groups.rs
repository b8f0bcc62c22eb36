//! Duplicate grouping and scan statistics.
//!
//! # Overview
//!
//! This module accumulates `(hash, file)` pairs into groups of identical
//! content and computes the run's summary statistics. Ordering matters
//! here: groups keep the first-seen order of their hashes, and paths
//! within a group keep discovery order, so output is reproducible across
//! runs on an unchanged filesystem. A plain `HashMap` does not guarantee
//! iteration order, so the accumulator pairs the map with an explicit
//! first-seen key list.
//!
//! # Example
//!
//! ```
//! use dupescan::duplicates::group_by_hash;
//! use dupescan::scanner::FileEntry;
//! use std::path::PathBuf;
//!
//! let h1 = *blake3::hash(b"hello").as_bytes();
//! let h2 = *blake3::hash(b"world").as_bytes();
//! let entries = vec![
//!     (h1, FileEntry::new(PathBuf::from("/a.txt"), 5)),
//!     (h2, FileEntry::new(PathBuf::from("/c.txt"), 5)),
//!     (h1, FileEntry::new(PathBuf::from("/sub/b.txt"), 5)),
//! ];
//!
//! let (groups, summary) = group_by_hash(entries);
//!
//! assert_eq!(groups.len(), 1);
//! assert_eq!(summary.total_files, 3);
//! assert_eq!(summary.unique_files, 1);
//! assert_eq!(summary.duplicate_files, 2);
//! assert_eq!(summary.reclaimable_space, 5);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use serde::Serialize;

use crate::scanner::{hash_to_hex, FileEntry, Hash};

/// A confirmed group of files with byte-identical content.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    /// BLAKE3 hash of the shared content (32 bytes)
    pub hash: Hash,
    /// File size in bytes, shared by every member
    pub size: u64,
    /// Member files, in discovery order
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Bytes freed by deleting all members but one.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * (self.files.len() as u64).saturating_sub(1)
    }

    /// Hash as a hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<std::path::PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Aggregate statistics for one scan run.
///
/// Invariant: `unique_files + duplicate_files == total_files`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    /// Files successfully fingerprinted
    pub total_files: usize,
    /// Total size of all fingerprinted files in bytes
    pub total_size: u64,
    /// Files whose content appears exactly once
    pub unique_files: usize,
    /// Files belonging to duplicate groups, retained original included
    pub duplicate_files: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Bytes reclaimable by keeping one copy per group
    pub reclaimable_space: u64,
    /// Wall-clock duration of the scan
    #[serde(with = "duration_millis")]
    pub scan_duration: Duration,
    /// Whether the run was cut short; statistics then cover only the
    /// files processed before interruption
    pub interrupted: bool,
}

impl ScanSummary {
    /// Check the internal consistency equation.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.unique_files + self.duplicate_files == self.total_files
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

/// Insertion-ordered accumulator from fingerprint to file entries.
///
/// Feed it `(hash, entry)` pairs in discovery order, then call
/// [`HashAccumulator::finish`] to partition into duplicate groups and a
/// [`ScanSummary`].
#[derive(Debug, Default)]
pub struct HashAccumulator {
    groups: HashMap<Hash, Vec<FileEntry>>,
    /// First-seen order of hashes; HashMap iteration order is arbitrary
    order: Vec<Hash>,
}

impl HashAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fingerprinted file.
    pub fn insert(&mut self, hash: Hash, entry: FileEntry) {
        use std::collections::hash_map::Entry;

        match self.groups.entry(hash) {
            Entry::Occupied(mut bucket) => bucket.get_mut().push(entry),
            Entry::Vacant(slot) => {
                self.order.push(hash);
                slot.insert(vec![entry]);
            }
        }
    }

    /// Number of distinct fingerprints seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if nothing has been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Partition into duplicate groups and compute statistics.
    ///
    /// Groups with a single member contribute only to the unique count;
    /// groups of two or more are returned in first-seen hash order.
    #[must_use]
    pub fn finish(mut self) -> (Vec<DuplicateGroup>, ScanSummary) {
        let mut summary = ScanSummary::default();
        let mut duplicates = Vec::new();

        for hash in self.order {
            let files = self
                .groups
                .remove(&hash)
                .unwrap_or_default();
            summary.total_files += files.len();
            summary.total_size += files.iter().map(|f| f.size).sum::<u64>();

            if files.len() == 1 {
                summary.unique_files += 1;
                continue;
            }

            let size = files[0].size;
            summary.duplicate_files += files.len();
            summary.duplicate_groups += 1;
            // One copy is always retained
            summary.reclaimable_space += size * (files.len() as u64 - 1);
            log::debug!(
                "Duplicate group {}: {} files, {} bytes each",
                hash_to_hex(&hash),
                files.len(),
                size
            );
            duplicates.push(DuplicateGroup { hash, size, files });
        }

        debug_assert!(summary.is_consistent());
        (duplicates, summary)
    }
}

/// Group fingerprinted files by hash.
///
/// This is the convenience form of [`HashAccumulator`] for callers that
/// already hold the full `(hash, entry)` sequence in discovery order.
#[must_use]
pub fn group_by_hash(
    entries: impl IntoIterator<Item = (Hash, FileEntry)>,
) -> (Vec<DuplicateGroup>, ScanSummary) {
    let mut acc = HashAccumulator::new();
    for (hash, entry) in entries {
        acc.insert(hash, entry);
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn make_file(path: &str, size: u64) -> FileEntry {
        FileEntry::new(PathBuf::from(path), size)
    }

    fn hash_of(byte: u8) -> Hash {
        let mut h = [0u8; 32];
        h[0] = byte;
        h
    }

    #[test]
    fn test_group_empty_input() {
        let (groups, summary) = group_by_hash(Vec::new());

        assert!(groups.is_empty());
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.unique_files, 0);
        assert_eq!(summary.duplicate_files, 0);
        assert_eq!(summary.reclaimable_space, 0);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_group_all_unique() {
        let entries = vec![
            (hash_of(1), make_file("/a.txt", 100)),
            (hash_of(2), make_file("/b.txt", 200)),
            (hash_of(3), make_file("/c.txt", 300)),
        ];
        let (groups, summary) = group_by_hash(entries);

        assert!(groups.is_empty());
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.unique_files, 3);
        assert_eq!(summary.duplicate_files, 0);
        assert_eq!(summary.total_size, 600);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_group_with_duplicates() {
        let entries = vec![
            (hash_of(1), make_file("/a.txt", 100)),
            (hash_of(2), make_file("/c.txt", 50)),
            (hash_of(1), make_file("/b.txt", 100)),
        ];
        let (groups, summary) = group_by_hash(entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[0].size, 100);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.unique_files, 1);
        assert_eq!(summary.duplicate_files, 2);
        assert_eq!(summary.duplicate_groups, 1);
        assert_eq!(summary.reclaimable_space, 100);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_group_preserves_first_seen_order() {
        // Second hash discovered first must come out first
        let entries = vec![
            (hash_of(9), make_file("/z1.txt", 10)),
            (hash_of(1), make_file("/a1.txt", 20)),
            (hash_of(9), make_file("/z2.txt", 10)),
            (hash_of(1), make_file("/a2.txt", 20)),
            (hash_of(1), make_file("/a3.txt", 20)),
        ];
        let (groups, _) = group_by_hash(entries);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].hash, hash_of(9));
        assert_eq!(groups[1].hash, hash_of(1));
        assert_eq!(
            groups[1].paths(),
            vec![
                PathBuf::from("/a1.txt"),
                PathBuf::from("/a2.txt"),
                PathBuf::from("/a3.txt")
            ]
        );
    }

    #[test]
    fn test_reclaimable_space_formula() {
        // 3 copies of 1000 bytes + 2 copies of 10 bytes
        let entries = vec![
            (hash_of(1), make_file("/a.txt", 1000)),
            (hash_of(1), make_file("/b.txt", 1000)),
            (hash_of(1), make_file("/c.txt", 1000)),
            (hash_of(2), make_file("/d.txt", 10)),
            (hash_of(2), make_file("/e.txt", 10)),
        ];
        let (groups, summary) = group_by_hash(entries);

        assert_eq!(summary.reclaimable_space, 2 * 1000 + 10);
        assert_eq!(
            summary.reclaimable_space,
            groups.iter().map(DuplicateGroup::wasted_space).sum::<u64>()
        );
    }

    #[test]
    fn test_zero_byte_files_group_together() {
        let empty_hash = *blake3::hash(b"").as_bytes();
        let entries = vec![
            (empty_hash, make_file("/empty1", 0)),
            (empty_hash, make_file("/sub/empty2", 0)),
        ];
        let (groups, summary) = group_by_hash(entries);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(summary.reclaimable_space, 0);
        assert!(summary.is_consistent());
    }

    #[test]
    fn test_duplicate_group_helpers() {
        let group = DuplicateGroup {
            hash: hash_of(0xAB),
            size: 1000,
            files: vec![
                make_file("/a.txt", 1000),
                make_file("/b.txt", 1000),
                make_file("/c.txt", 1000),
            ],
        };

        assert_eq!(group.wasted_space(), 2000);
        assert!(group.hash_hex().starts_with("ab"));
        assert_eq!(group.hash_hex().len(), 64);
    }

    #[test]
    fn test_accumulator_len() {
        let mut acc = HashAccumulator::new();
        assert!(acc.is_empty());

        acc.insert(hash_of(1), make_file("/a", 1));
        acc.insert(hash_of(1), make_file("/b", 1));
        acc.insert(hash_of(2), make_file("/c", 2));

        assert_eq!(acc.len(), 2);
    }
}
