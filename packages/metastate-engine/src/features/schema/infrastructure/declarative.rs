//! Declarative models (object / enum / literal) as validators
//!
//! Object rules:
//! - required, non-Optional field absent or null → MissingField
//! - present field → matched against its descriptor (nested rules, so an
//!   `Optional[T]` field holding a non-null value must satisfy T)
//! - keys not declared are accepted unless `deny_unknown`

use serde_json::Value;

use crate::features::schema::application::SchemaRegistry;
use crate::features::schema::domain::{kind_of, ModelSchema, ValidationError};
use crate::features::schema::ports::ModelValidator;

impl ModelValidator for ModelSchema {
    fn validate(
        &self,
        value: &Value,
        path: &str,
        registry: &SchemaRegistry,
    ) -> Result<(), ValidationError> {
        match self {
            ModelSchema::Object {
                fields,
                deny_unknown,
            } => {
                let object = value.as_object().ok_or_else(|| ValidationError::NotAnObject {
                    path: path.to_string(),
                    found: kind_of(value),
                })?;

                for spec in fields {
                    let field_path = format!("{}.{}", path, spec.name);
                    match object.get(&spec.name) {
                        None | Some(Value::Null) if spec.must_be_set() => {
                            return Err(ValidationError::MissingField { path: field_path });
                        }
                        None | Some(Value::Null) => {}
                        Some(inner) => registry.check(&spec.descriptor, inner, &field_path)?,
                    }
                }

                if *deny_unknown {
                    if let Some(extra) = object
                        .keys()
                        .find(|key| !fields.iter().any(|spec| &spec.name == *key))
                    {
                        return Err(ValidationError::WrongType {
                            path: format!("{}.{}", path, extra),
                            expected: "no extra fields",
                            found: kind_of(&object[extra]),
                        });
                    }
                }
                Ok(())
            }

            ModelSchema::Enum { values } => {
                let text = value.as_str().ok_or_else(|| ValidationError::WrongType {
                    path: path.to_string(),
                    expected: "string",
                    found: kind_of(value),
                })?;
                if values.iter().any(|allowed| allowed == text) {
                    Ok(())
                } else {
                    Err(ValidationError::NotInEnum {
                        path: path.to_string(),
                        value: text.to_string(),
                        allowed: values.clone(),
                    })
                }
            }

            ModelSchema::Literal { value: expected } => match value.as_str() {
                Some(found) if found == expected => Ok(()),
                _ => Err(ValidationError::LiteralMismatch {
                    path: path.to_string(),
                    expected: expected.clone(),
                    found: match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    },
                }),
            },
        }
    }

    fn references(&self) -> Vec<String> {
        self.referenced_models()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
