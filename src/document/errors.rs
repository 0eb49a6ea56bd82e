//! Document layer error types
//!
//! Error codes:
//! - DOCX_CONFIG_INVALID (ERROR)
//! - DOCX_CAPABILITY_MISSING (ERROR)
//! - DOCX_UNKNOWN_FIELD (ERROR)
//! - DOCX_FIELD_INDEX_FAILED (ERROR)
//!
//! Data-shape problems (missing paths, unusable ids, unknown ids on remove)
//! are not errors; they are silent no-ops.

use std::fmt;

use crate::field::FieldIndexError;
use crate::observability::Severity;

use super::config::Capability;

/// Document layer error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentErrorCode {
    /// Configuration cannot be turned into a store
    DocxConfigInvalid,
    /// Operation needs a capability that was not configured
    DocxCapabilityMissing,
    /// Query names a field that was not declared
    DocxUnknownField,
    /// A field index reported a failure
    DocxFieldIndexFailed,
}

impl DocumentErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            DocumentErrorCode::DocxConfigInvalid => "DOCX_CONFIG_INVALID",
            DocumentErrorCode::DocxCapabilityMissing => "DOCX_CAPABILITY_MISSING",
            DocumentErrorCode::DocxUnknownField => "DOCX_UNKNOWN_FIELD",
            DocumentErrorCode::DocxFieldIndexFailed => "DOCX_FIELD_INDEX_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}

impl fmt::Display for DocumentErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Document layer error with context
#[derive(Debug)]
pub struct DocumentError {
    code: DocumentErrorCode,
    message: String,
    source: Option<FieldIndexError>,
}

impl DocumentError {
    /// Create a configuration error
    pub fn config_invalid(reason: impl Into<String>) -> Self {
        Self {
            code: DocumentErrorCode::DocxConfigInvalid,
            message: reason.into(),
            source: None,
        }
    }

    /// Create a missing capability error
    pub fn capability_missing(capability: Capability, operation: &str) -> Self {
        Self {
            code: DocumentErrorCode::DocxCapabilityMissing,
            message: format!(
                "{} requires the {} capability, which is not configured",
                operation,
                capability.as_str()
            ),
            source: None,
        }
    }

    /// Create an unknown field error
    pub fn unknown_field(field: &str) -> Self {
        Self {
            code: DocumentErrorCode::DocxUnknownField,
            message: format!("Field '{}' is not declared", field),
            source: None,
        }
    }

    /// Wrap a field index failure
    pub fn field_index(field: &str, source: FieldIndexError) -> Self {
        Self {
            code: DocumentErrorCode::DocxFieldIndexFailed,
            message: format!("Field index '{}' failed", field),
            source: Some(source),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> DocumentErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped field index error, if any
    pub fn field_error(&self) -> Option<&FieldIndexError> {
        self.source.as_ref()
    }
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code.code(), self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for document layer operations
pub type DocumentResult<T> = Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_codes() {
        assert_eq!(DocumentErrorCode::DocxConfigInvalid.code(), "DOCX_CONFIG_INVALID");
        assert_eq!(DocumentErrorCode::DocxCapabilityMissing.code(), "DOCX_CAPABILITY_MISSING");
        assert_eq!(DocumentErrorCode::DocxUnknownField.code(), "DOCX_UNKNOWN_FIELD");
        assert_eq!(DocumentErrorCode::DocxFieldIndexFailed.code(), "DOCX_FIELD_INDEX_FAILED");
    }

    #[test]
    fn test_capability_message() {
        let err = DocumentError::capability_missing(Capability::Store, "get");
        assert_eq!(err.code(), DocumentErrorCode::DocxCapabilityMissing);
        assert!(err.message().contains("store"));
        assert!(err.to_string().starts_with("[ERROR] DOCX_CAPABILITY_MISSING"));
    }

    #[test]
    fn test_field_index_source() {
        let err = DocumentError::field_index("title", FieldIndexError::Unavailable("down".into()));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("caused by: Field index unavailable: down"));
        assert_eq!(
            err.field_error(),
            Some(&FieldIndexError::Unavailable("down".into()))
        );
    }
}
