//! Schema Ports - Interface Layer
//!
//! A named model is anything that can say whether a JSON value conforms to
//! it. Primitive checks, declarative object schemas and serde-typed structs
//! all sit behind the same trait, so the registry never cares which one it
//! is dispatching to.
//!
//! ## Usage
//! ```rust,ignore
//! use metastate_engine::features::schema::{ModelValidator, SchemaRegistry};
//!
//! let registry = SchemaRegistry::builtin();
//! registry.validate_model("PIDName", &value, "subject.alleles[0]")?;
//! ```

use serde_json::Value;

use super::application::SchemaRegistry;
use super::domain::ValidationError;

/// Model Validator Port
///
/// # Implementors
/// - `PrimitiveModel` (str, int, float, bool, date, datetime, any)
/// - `ModelSchema` (declarative object / enum / literal)
/// - `TypedModel<T>` (serde-deserializable Rust types)
pub trait ModelValidator: Send + Sync {
    /// Check `value` against this model. `path` names the value's location
    /// for error messages; `registry` resolves models referenced by fields.
    fn validate(
        &self,
        value: &Value,
        path: &str,
        registry: &SchemaRegistry,
    ) -> Result<(), ValidationError>;

    /// Names of other models this one depends on
    fn references(&self) -> Vec<String> {
        Vec::new()
    }
}
