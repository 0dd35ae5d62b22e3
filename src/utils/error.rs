use crate::domain::model::ValueKind;
use thiserror::Error;

/// Failure of a single value conversion. Raised by converters, never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Malformed {kind} token: expected {expected}, found {found}")]
    MalformedToken {
        kind: ValueKind,
        expected: &'static str,
        found: String,
    },

    #[error("{kind} value out of range: {detail}")]
    OutOfRange { kind: ValueKind, detail: String },
}

impl ConvertError {
    pub fn malformed(kind: ValueKind, expected: &'static str, found: impl Into<String>) -> Self {
        ConvertError::MalformedToken {
            kind,
            expected,
            found: found.into(),
        }
    }

    pub fn out_of_range(kind: ValueKind, detail: impl Into<String>) -> Self {
        ConvertError::OutOfRange {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DocStoreError {
    #[error("Conversion error: {0}")]
    ConversionError(#[from] ConvertError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Index not found: {name}")]
    IndexNotFound { name: String },

    #[error("Query error: {message}")]
    QueryError { message: String },
}

pub type Result<T> = std::result::Result<T, DocStoreError>;
