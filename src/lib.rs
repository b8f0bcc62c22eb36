//! dupescan - content-hash duplicate file finder.
//!
//! Walks one or more directory trees, fingerprints every file with BLAKE3,
//! and reports groups of files with byte-identical content along with
//! aggregate statistics. Reporting only: nothing on disk is ever modified.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::config::SearchConfig;
use crate::duplicates::{DuplicateFinder, FinderConfig, ScanOutcome};
use crate::error::ExitCode;
use crate::output::{csv, JsonReport, TextReport};
use crate::progress::Progress;

/// Run the application: scan, render, and pick the exit code.
///
/// # Errors
///
/// Returns an error for unrecoverable failures only (invalid
/// configuration, output I/O). Input problems during the scan become
/// diagnostics inside the result, never errors.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    if cli.no_color {
        yansi::disable();
    }

    let config = SearchConfig::new(cli.directories.clone(), cli.recursive, cli.include_hidden)?;

    let mut finder_config = FinderConfig::default().with_io_threads(cli.io_threads);

    match signal::install_handler() {
        Ok(handler) => {
            finder_config = finder_config.with_shutdown_flag(handler.get_flag());
        }
        Err(e) => {
            // Scan still works, it just cannot be interrupted gracefully
            log::warn!("Failed to install Ctrl+C handler: {}", e);
        }
    }

    // Progress bars only make sense on the interactive text path
    if cli.output == OutputFormat::Text && !cli.quiet {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let outcome = DuplicateFinder::new(finder_config).scan(&config);
    let exit_code = pick_exit_code(&outcome);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.output {
        OutputFormat::Text => {
            TextReport::new(&outcome, &config, cli.verbose).write_to(&mut out)?;
        }
        OutputFormat::Json => {
            JsonReport::new(&outcome, exit_code).write_to(&mut out)?;
        }
        OutputFormat::Csv => {
            csv::write_csv(&outcome.groups, &mut out)?;
        }
    }
    out.flush()?;

    Ok(exit_code)
}

/// Map a scan outcome to the process exit code.
///
/// Precedence: interrupted > partial success > no duplicates > success.
fn pick_exit_code(outcome: &ScanOutcome) -> ExitCode {
    if outcome.summary.interrupted {
        ExitCode::Interrupted
    } else if !outcome.diagnostics.is_empty() {
        ExitCode::PartialSuccess
    } else if outcome.groups.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}
