//! Document load/save error types

use super::TableError;

/// Errors that can occur while reading or writing a specification document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// Reading or writing the file failed.
    #[error("document I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON for the expected shape.
    #[error("document JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document content violates a table invariant.
    #[error("invalid document: {0}")]
    Table(#[from] TableError),
}
