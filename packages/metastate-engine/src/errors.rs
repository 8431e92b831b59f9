//! Error types for metastate-engine
//!
//! Classification itself never fails; these errors come from loading
//! configuration and from caller-facing lookups.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for metastate-engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON decoding error (record input)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Field name not known to the requested section
    #[error("Field '{field}' is not declared for section '{section}'")]
    UnknownField { section: String, field: String },
}

impl EngineError {
    /// Create an unknown field error
    pub fn unknown_field(section: impl Into<String>, field: impl Into<String>) -> Self {
        EngineError::UnknownField {
            section: section.into(),
            field: field.into(),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message() {
        let err = EngineError::unknown_field("subject", "tail_length");
        let msg = err.to_string();
        assert!(msg.contains("tail_length"));
        assert!(msg.contains("subject"));
    }

    #[test]
    fn test_config_error_conversion() {
        let err: EngineError = ConfigError::MissingVersion.into();
        assert!(matches!(err, EngineError::Config(ConfigError::MissingVersion)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json")
            .err()
            .unwrap();
        let err: EngineError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
    }
}
