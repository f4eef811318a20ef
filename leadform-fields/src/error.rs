//! Error types for the leadform schema and form layers

use std::path::PathBuf;
use thiserror::Error;

/// Result type for leadform field operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors raised by schema loading, registry construction and submission.
///
/// Validation of user input never produces one of these; it yields
/// [`ValidationFailure`](crate::validation::ValidationFailure) values instead.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field not found by key
    #[error("field not found: {key}")]
    FieldNotFound { key: String },

    /// List of values not found by code
    #[error("list of values not found: {code}")]
    LovNotFound { code: String },

    /// Two field definitions share a key
    #[error("duplicate field key: {key}")]
    DuplicateFieldName { key: String },

    /// A list of values repeats an option value
    #[error("duplicate value '{value}' in list of values {code}")]
    DuplicateLovValue { code: String, value: String },

    /// A field key or list-of-values code that cannot name a schema file
    #[error("invalid name '{name}': must be a plain file name")]
    InvalidName { name: String },

    /// The submit collaborator reported a failure
    #[error("submit failed: {message}")]
    SubmitFailed { message: String },

    /// Schema directory not found
    #[error("schema directory not found: {path}")]
    NotInitialized { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FieldsError::FieldNotFound {
            key: "company_name".into(),
        };
        assert_eq!(err.to_string(), "field not found: company_name");
    }

    #[test]
    fn test_duplicate_lov_value() {
        let err = FieldsError::DuplicateLovValue {
            code: "LEAD_STATUS_LOV".into(),
            value: "NEW".into(),
        };
        assert!(err.to_string().contains("LEAD_STATUS_LOV"));
        assert!(err.to_string().contains("'NEW'"));
    }

    #[test]
    fn test_invalid_name() {
        let err = FieldsError::InvalidName {
            name: "../escape".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid name '../escape': must be a plain file name"
        );
    }

    #[test]
    fn test_submit_failed() {
        let err = FieldsError::SubmitFailed {
            message: "backend unavailable".into(),
        };
        assert_eq!(err.to_string(), "submit failed: backend unavailable");
    }
}
