//! Signal handling for graceful shutdown.
//!
//! Centralized Ctrl+C handling: an `AtomicBool` flag shared across threads
//! signals when shutdown has been requested. The walker checks it at
//! directory boundaries and the hashing pool at file boundaries, so an
//! interrupted run still reports statistics over the files processed so
//! far.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit code for SIGINT (Ctrl+C) interruption.
/// Unix convention: 128 + signal number (SIGINT = 2).
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Shutdown handler for graceful termination.
///
/// Wraps an `AtomicBool` flag that is set when a Ctrl+C signal is
/// received. Clone the flag with [`ShutdownHandler::get_flag`] to share
/// it with worker threads.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the shutdown flag for passing to worker threads.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }
}

/// Install a Ctrl+C handler that sets the shutdown flag.
///
/// # Errors
///
/// Returns an error if the process-wide handler cannot be installed
/// (for example, if one was already registered).
pub fn install_handler() -> Result<ShutdownHandler, ctrlc::Error> {
    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    ctrlc::set_handler(move || {
        if !flag.swap(true, Ordering::SeqCst) {
            eprintln!("Interrupted, finishing the current files...");
        }
    })?;

    Ok(handler)
}
