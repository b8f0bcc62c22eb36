//! Output formatters for scan results.
//!
//! The core pipeline hands its [`ScanOutcome`](crate::duplicates::ScanOutcome)
//! to one of these renderers; the verbosity level controls how much
//! per-file diagnostic detail accompanies the report but never alters the
//! computation itself.

pub mod csv;
pub mod json;
pub mod text;

pub use json::JsonReport;
pub use text::TextReport;
