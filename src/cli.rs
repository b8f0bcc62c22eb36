//! Command-line interface definitions.
//!
//! All CLI arguments and options are defined with the clap derive API.
//!
//! # Example
//!
//! ```bash
//! # Report duplicates among the direct children of two directories
//! dupescan ~/Downloads ~/Documents
//!
//! # Recurse into subdirectories and include hidden files
//! dupescan -r -i ~/Downloads
//!
//! # JSON output for scripting
//! dupescan -r ~/Downloads --output json
//!
//! # Verbose mode prints per-file diagnostics
//! dupescan -rv ~/Downloads
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Find duplicate files by content hash.
///
/// dupescan walks the given directories, fingerprints every file with
/// BLAKE3, and reports groups of files with identical content. It never
/// deletes or modifies anything.
#[derive(Debug, Parser)]
#[command(name = "dupescan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// One or more directories to search for duplicate files
    #[arg(value_name = "DIR", required = true)]
    pub directories: Vec<PathBuf>,

    /// Search subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Include hidden files and directories (names starting with .)
    #[arg(short, long)]
    pub include_hidden: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Number of worker threads for hashing (default: 4)
    ///
    /// Lower values reduce disk thrashing on HDDs.
    #[arg(long, value_name = "N", default_value = "4")]
    pub io_threads: usize,

    /// Emit fatal errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored report
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
