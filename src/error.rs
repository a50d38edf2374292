//! Error types for bulkmeta
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using BulkError
pub type Result<T> = std::result::Result<T, BulkError>;

/// Unified error type for bulk metadata operations
#[derive(Debug, Error)]
pub enum BulkError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// The document is not well-formed; I/O failures never land here
    #[error("JSON error: {0}")]
    Json(serde_json::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),

    // -------------------------------------------------------------------------
    // Consistency Errors
    // -------------------------------------------------------------------------
    /// A file in the load mapping has no entry in the rename table
    #[error("No rename entry for file {name:?}")]
    UnresolvableRename { name: String },

    // -------------------------------------------------------------------------
    // Iterator State Errors
    // -------------------------------------------------------------------------
    #[error("Load mapping iterator is closed")]
    IteratorClosed,

    #[error("Load mapping iterator failed on a previous element")]
    IteratorPoisoned,

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for BulkError {
    /// serde_json reports failures of the underlying reader or writer as its
    /// own errors; those stay I/O errors.
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            BulkError::Io(e.into())
        } else {
            BulkError::Json(e)
        }
    }
}
