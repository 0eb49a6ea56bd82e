//! # Field Index Errors
//!
//! Errors raised by field index implementations. They are not recovered by
//! the document layer; they propagate to the caller.

use thiserror::Error;

/// Result type for field index operations
pub type FieldIndexResult<T> = Result<T, FieldIndexError>;

/// Failures a field index may report
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldIndexError {
    /// Content could not be indexed
    #[error("Content rejected for id {id}: {reason}")]
    Rejected { id: String, reason: String },

    /// The query could not be evaluated
    #[error("Search failed: {0}")]
    SearchFailed(String),

    /// The index is unusable
    #[error("Field index unavailable: {0}")]
    Unavailable(String),
}
