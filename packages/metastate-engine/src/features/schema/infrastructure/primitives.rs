//! Primitive models
//!
//! Leaf types that object models refer to by name (`str`, `int`, ...).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::features::schema::application::SchemaRegistry;
use crate::features::schema::domain::{kind_of, ValidationError};
use crate::features::schema::ports::ModelValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveModel {
    Str,
    Int,
    Float,
    Bool,
    /// ISO calendar date, `YYYY-MM-DD`
    Date,
    /// RFC 3339, or naive ISO 8601 without offset
    Datetime,
    Any,
}

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl PrimitiveModel {
    pub const ALL: [PrimitiveModel; 7] = [
        PrimitiveModel::Str,
        PrimitiveModel::Int,
        PrimitiveModel::Float,
        PrimitiveModel::Bool,
        PrimitiveModel::Date,
        PrimitiveModel::Datetime,
        PrimitiveModel::Any,
    ];

    /// Registry name
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveModel::Str => "str",
            PrimitiveModel::Int => "int",
            PrimitiveModel::Float => "float",
            PrimitiveModel::Bool => "bool",
            PrimitiveModel::Date => "date",
            PrimitiveModel::Datetime => "datetime",
            PrimitiveModel::Any => "any",
        }
    }

    fn expected(&self) -> &'static str {
        match self {
            PrimitiveModel::Str => "string",
            PrimitiveModel::Int => "integer",
            PrimitiveModel::Float => "number",
            PrimitiveModel::Bool => "bool",
            PrimitiveModel::Date => "date (YYYY-MM-DD)",
            PrimitiveModel::Datetime => "datetime (ISO 8601)",
            PrimitiveModel::Any => "any",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            PrimitiveModel::Str => value.is_string(),
            PrimitiveModel::Int => value.is_i64() || value.is_u64(),
            PrimitiveModel::Float => value.is_number(),
            PrimitiveModel::Bool => value.is_boolean(),
            PrimitiveModel::Date => value
                .as_str()
                .map_or(false, |s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
            PrimitiveModel::Datetime => value.as_str().map_or(false, parses_as_datetime),
            PrimitiveModel::Any => true,
        }
    }
}

fn parses_as_datetime(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || NAIVE_DATETIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
}

impl ModelValidator for PrimitiveModel {
    fn validate(
        &self,
        value: &Value,
        path: &str,
        _registry: &SchemaRegistry,
    ) -> Result<(), ValidationError> {
        if self.accepts(value) {
            Ok(())
        } else {
            Err(ValidationError::WrongType {
                path: path.to_string(),
                expected: self.expected(),
                found: kind_of(value),
            })
        }
    }
}
