//! Human-readable text report with terminal coloring.
//!
//! Mirrors the layout of the classic console report: the effective flags,
//! the aggregate counts, then one block per duplicate group listing every
//! member path in discovery order. Diagnostics appear under increased
//! verbosity.

use std::io::{self, Write};

use bytesize::ByteSize;
use yansi::Paint;

use crate::config::SearchConfig;
use crate::duplicates::ScanOutcome;

/// Text renderer for one scan outcome.
pub struct TextReport<'a> {
    outcome: &'a ScanOutcome,
    config: &'a SearchConfig,
    /// 0 = counts and groups, 1 = also diagnostics, 2+ = also every
    /// discovered file path
    verbose: u8,
}

impl<'a> TextReport<'a> {
    /// Create a text report.
    #[must_use]
    pub fn new(outcome: &'a ScanOutcome, config: &'a SearchConfig, verbose: u8) -> Self {
        Self {
            outcome,
            config,
            verbose,
        }
    }

    /// Write the report.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn write_to(&self, w: &mut impl Write) -> io::Result<()> {
        let summary = &self.outcome.summary;

        writeln!(
            w,
            "{} {}",
            "Search subdirectories recursively:".yellow(),
            self.config.recursive()
        )?;
        writeln!(
            w,
            "{} {}",
            "Include hidden files and directories:".yellow(),
            self.config.include_hidden()
        )?;
        writeln!(w, "{}", "Selected directories:".yellow())?;
        for root in self.config.roots() {
            writeln!(w, "  {}", root.display())?;
        }
        writeln!(w)?;

        if summary.interrupted {
            writeln!(
                w,
                "{}",
                "Scan interrupted - results cover files processed so far".red()
            )?;
            writeln!(w)?;
        }

        writeln!(
            w,
            "{} {}",
            "Total number of files:".green(),
            summary.total_files
        )?;
        writeln!(
            w,
            "{} {}",
            "Number of unique files:".green(),
            summary.unique_files
        )?;
        writeln!(
            w,
            "{} {}",
            "Number of duplicate files:".green(),
            summary.duplicate_files
        )?;
        writeln!(
            w,
            "{} {}",
            "Duplicate groups:".green(),
            summary.duplicate_groups
        )?;
        writeln!(
            w,
            "{} {}",
            "Reclaimable space:".green(),
            ByteSize(summary.reclaimable_space)
        )?;
        writeln!(w)?;

        if self.outcome.groups.is_empty() {
            writeln!(w, "No duplicate files found.")?;
        } else {
            writeln!(w, "{}", "Duplicate files by hash:".green())?;
            for group in &self.outcome.groups {
                writeln!(
                    w,
                    "{}  ({} files, {} each)",
                    group.hash_hex().cyan(),
                    group.len(),
                    ByteSize(group.size)
                )?;
                for file in &group.files {
                    writeln!(w, "  {}", file.path.display())?;
                }
            }
        }

        if self.verbose >= 2 && !self.outcome.files.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{} {}",
                "File paths:".yellow(),
                self.outcome.files.len()
            )?;
            for path in &self.outcome.files {
                writeln!(w, "  {}", path.display())?;
            }
        }

        if self.verbose >= 1 && !self.outcome.diagnostics.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{} {}",
                "Skipped paths:".yellow(),
                self.outcome.diagnostics.len()
            )?;
            for diag in &self.outcome.diagnostics {
                writeln!(w, "  {}: {}", diag.path.display(), diag.reason)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::{group_by_hash, ScanOutcome};
    use crate::scanner::{Diagnostic, FileEntry};
    use std::path::{Path, PathBuf};

    fn sample_outcome() -> ScanOutcome {
        let h = *blake3::hash(b"dup").as_bytes();
        let u = *blake3::hash(b"unique").as_bytes();
        let (groups, summary) = group_by_hash(vec![
            (h, FileEntry::new(PathBuf::from("/r/a.txt"), 3)),
            (u, FileEntry::new(PathBuf::from("/r/c.txt"), 6)),
            (h, FileEntry::new(PathBuf::from("/r/b.txt"), 3)),
        ]);
        ScanOutcome {
            groups,
            summary,
            diagnostics: vec![Diagnostic::new(
                PathBuf::from("/r/locked"),
                "Permission denied: /r/locked",
            )],
            files: vec![
                PathBuf::from("/r/a.txt"),
                PathBuf::from("/r/c.txt"),
                PathBuf::from("/r/b.txt"),
            ],
        }
    }

    fn render(outcome: &ScanOutcome, verbose: u8) -> String {
        yansi::disable();
        let config = SearchConfig::for_root(Path::new("/r"));
        let mut buf = Vec::new();
        TextReport::new(outcome, &config, verbose)
            .write_to(&mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_report_counts_and_groups() {
        let outcome = sample_outcome();
        let text = render(&outcome, 0);

        assert!(text.contains("Total number of files: 3"));
        assert!(text.contains("Number of unique files: 1"));
        assert!(text.contains("Number of duplicate files: 2"));
        assert!(text.contains("/r/a.txt"));
        assert!(text.contains("/r/b.txt"));
        assert!(!text.contains("Skipped paths"));
        assert!(!text.contains("File paths:"));
    }

    #[test]
    fn test_text_report_diagnostics_under_verbose() {
        let outcome = sample_outcome();
        let text = render(&outcome, 1);

        assert!(text.contains("Skipped paths: 1"));
        assert!(text.contains("/r/locked"));
        assert!(!text.contains("File paths:"));
    }

    #[test]
    fn test_text_report_file_list_under_double_verbose() {
        let outcome = sample_outcome();
        let text = render(&outcome, 2);

        assert!(text.contains("File paths: 3"));
        // The unique file shows up here even though no group lists it
        assert!(text.contains("/r/c.txt"));
        assert!(text.contains("Skipped paths: 1"));
    }

    #[test]
    fn test_text_report_no_duplicates() {
        let u = *blake3::hash(b"only").as_bytes();
        let (groups, summary) =
            group_by_hash(vec![(u, FileEntry::new(PathBuf::from("/r/only.txt"), 4))]);
        let outcome = ScanOutcome {
            groups,
            summary,
            diagnostics: Vec::new(),
            files: vec![PathBuf::from("/r/only.txt")],
        };
        let text = render(&outcome, 0);

        assert!(text.contains("No duplicate files found."));
    }
}
