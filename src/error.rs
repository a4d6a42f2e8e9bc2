//! Error types for bibcheck.
//!
//! Per-lookup failures (network, rate limiting, bad status codes) are not
//! errors: they are recorded as [`crate::LookupOutcome`] variants so a batch
//! run never aborts mid-way. This enum covers the failures that escape the
//! per-entry loop.

use std::path::PathBuf;

/// Errors that can occur while checking a bibliography.
#[derive(Debug, thiserror::Error)]
pub enum BibCheckError {
    /// The input .bib file could not be read or parsed. Fatal: no lookups run.
    #[error("Failed to load BibTeX file {path}: {reason}")]
    FileLoad { path: PathBuf, reason: String },

    /// Delay range where min exceeds max.
    #[error("Invalid delay range: min {min}s > max {max}s")]
    InvalidDelayRange { min: f64, max: f64 },

    /// Writing the persisted report failed. Recovered: results are unaffected.
    #[error("Failed to write report to {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for Results using [`BibCheckError`].
pub type Result<T> = std::result::Result<T, BibCheckError>;
