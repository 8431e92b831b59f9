//! Validation outcomes
//!
//! `ValidationError` explains why a value was rejected. It stays inside the
//! validator boundary and surfaces only as `Validity::Invalid` text.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{path}: expected an object, found {found}")]
    NotAnObject { path: String, found: &'static str },

    #[error("{path}: expected a list, found {found}")]
    NotAList { path: String, found: &'static str },

    #[error("{path}: field required")]
    MissingField { path: String },

    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{path}: '{value}' is not one of [{}]", allowed.join(", "))]
    NotInEnum {
        path: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("{path}: expected '{expected}', found '{found}'")]
    LiteralMismatch {
        path: String,
        expected: String,
        found: String,
    },

    #[error("{path}: no union variant matched ({})", attempts.join("; "))]
    NoUnionVariant { path: String, attempts: Vec<String> },

    #[error("{path}: unknown model '{model}'")]
    UnknownModel { path: String, model: String },

    #[error("{path}: could not build {model}: {message}")]
    Deserialize {
        path: String,
        model: String,
        message: String,
    },
}

impl ValidationError {
    pub fn path(&self) -> &str {
        match self {
            ValidationError::NotAnObject { path, .. }
            | ValidationError::NotAList { path, .. }
            | ValidationError::MissingField { path }
            | ValidationError::WrongType { path, .. }
            | ValidationError::NotInEnum { path, .. }
            | ValidationError::LiteralMismatch { path, .. }
            | ValidationError::NoUnionVariant { path, .. }
            | ValidationError::UnknownModel { path, .. }
            | ValidationError::Deserialize { path, .. } => path,
        }
    }
}

/// Name of a JSON value's kind, for messages
pub(crate) fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "list",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result of structurally validating one field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid(ValidationError),
    /// No descriptor for this field; presence-only logic applies
    Unknown,
}

impl Validity {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validity::Valid)
    }

    /// Reason text for display, if validation ran and failed
    pub fn reason(&self) -> Option<String> {
        match self {
            Validity::Invalid(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

impl From<Result<(), ValidationError>> for Validity {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Validity::Valid,
            Err(err) => Validity::Invalid(err),
        }
    }
}
