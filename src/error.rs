//! Error types for records and for model generation.

use thiserror::Error;

/// Errors raised while mapping a document onto a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A present key holds a value that does not fit the declared field kind.
    #[error("malformed document at `{key}`: {reason}")]
    MalformedDocument { key: String, reason: String },
}

impl ModelError {
    pub(crate) fn malformed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::MalformedDocument {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading definitions or generating code.
#[derive(Debug, Error)]
pub enum BindgenError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid definitions document: {0}")]
    Json(#[from] serde_json::Error),

    /// A property type the record layer has no kind for.
    #[error("definition `{definition}`: property `{property}` has unsupported type {ty}")]
    UnsupportedType {
        definition: String,
        property: String,
        ty: String,
    },

    /// Two wire keys of one definition map onto the same Rust field.
    #[error("definition `{definition}`: more than one property maps to field `{field}`")]
    DuplicateField { definition: String, field: String },

    /// Only struct containers map onto records.
    #[error("container `{0}` is not a struct")]
    UnsupportedContainer(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
