//! Error types for the capture pipeline.
//!
//! Two tiers of failure exist: per-URL errors (`SessionStart`, `Navigation`,
//! `Timeout`, `Render`) are contained inside the retry and fan-out layers and
//! only degrade a batch, while assembly errors (`Merge`, `Encoding`, `Io`)
//! abort the whole request. The HTTP layer surfaces Display strings only.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the capture pipeline.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The browser process could not be launched. Retried.
    #[error("failed to start browser session: {0}")]
    SessionStart(String),

    /// Page navigation failed. Retried.
    #[error("navigation failed for '{url}': {reason}")]
    Navigation { url: String, reason: String },

    /// A page operation exceeded its deadline. Retried.
    #[error("{operation} timed out after {secs}s")]
    Timeout { operation: String, secs: u64 },

    /// Print-to-PDF or text extraction failed. Retried.
    #[error("render failed for '{url}': {reason}")]
    Render { url: String, reason: String },

    /// A merge input was missing, unreadable, or not a valid PDF.
    /// Fatal to the whole merge step; no partial merge is produced.
    #[error("merge failed: {0}")]
    Merge(String),

    /// The merged document could not be opened or walked for link
    /// annotations. Fatal to the whole request.
    #[error("link extraction failed: {0}")]
    LinkExtraction(String),

    /// Writing the text-to-PDF document failed. Fatal to that task only.
    #[error("text encoding failed: {0}")]
    Encoding(String),

    /// Temp-file or archive write failure. Fatal to the whole request.
    #[error("I/O failure on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The batch entry was rejected or discarded by the cancel token.
    #[error("operation cancelled")]
    Cancelled,
}

impl CaptureError {
    /// Build an [`CaptureError::Io`] from a path and an underlying error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for Results in the capture pipeline.
pub type CaptureResult<T> = Result<T, CaptureError>;
