//! CLI error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::io;

use thiserror::Error;

use crate::document::DocumentError;

/// CLI failure, one variant per error code
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration missing, malformed or rejected
    #[error("DOCX_CLI_CONFIG_ERROR: {0}")]
    Config(String),

    /// Reading records or writing output failed
    #[error("DOCX_CLI_IO_ERROR: {0}")]
    Io(String),

    /// Indexing or search failed in the document store
    #[error("DOCX_CLI_SEARCH_FAILED: {0}")]
    SearchFailed(#[source] DocumentError),
}

impl CliError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        CliError::Io(msg.into())
    }

    pub fn search_failed(err: DocumentError) -> Self {
        CliError::SearchFailed(err)
    }

    /// Stable error code
    pub fn code_str(&self) -> &'static str {
        match self {
            CliError::Config(_) => "DOCX_CLI_CONFIG_ERROR",
            CliError::Io(_) => "DOCX_CLI_IO_ERROR",
            CliError::SearchFailed(_) => "DOCX_CLI_SEARCH_FAILED",
        }
    }

    /// Message without the code prefix
    pub fn message(&self) -> String {
        match self {
            CliError::Config(msg) | CliError::Io(msg) => msg.clone(),
            CliError::SearchFailed(err) => err.to_string(),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Io(format!("JSON error: {}", e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_display() {
        let err = CliError::config_error("missing doc");
        assert_eq!(err.code_str(), "DOCX_CLI_CONFIG_ERROR");
        assert_eq!(err.to_string(), "DOCX_CLI_CONFIG_ERROR: missing doc");
        assert_eq!(err.message(), "missing doc");

        let err: CliError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.code_str(), "DOCX_CLI_IO_ERROR");
    }

    #[test]
    fn test_search_failed_keeps_source() {
        use std::error::Error as _;

        let err = CliError::search_failed(DocumentError::unknown_field("x"));
        assert_eq!(err.code_str(), "DOCX_CLI_SEARCH_FAILED");
        assert!(err.source().is_some());
    }
}
