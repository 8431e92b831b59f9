/*
 * Declarative Model Schemas
 *
 * # Schema (YAML)
 * ```yaml
 * Subject:
 *   kind: object
 *   fields:
 *     - name: subject_id
 *       type: str
 *     - name: alleles
 *       type: List[PIDName]
 *       required: false
 * DataLevel:
 *   kind: enum
 *   values: [raw, derived]
 * SubjectSchemaVersion:
 *   kind: literal
 *   value: "1.0.0"
 * ```
 */

use serde::{Deserialize, Serialize};

use super::TypeDescriptor;

/// One field of an object model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub descriptor: TypeDescriptor,

    /// Absent/null is an error only for required, non-Optional fields
    #[serde(default = "default_true")]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

impl FieldSpec {
    pub fn required(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, descriptor: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            required: false,
        }
    }

    /// Whether absence or null must be rejected
    pub fn must_be_set(&self) -> bool {
        self.required && !self.descriptor.is_optional()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum ModelSchema {
    Object {
        fields: Vec<FieldSpec>,
        /// Reject keys not listed in `fields`
        #[serde(default)]
        deny_unknown: bool,
    },
    Enum {
        values: Vec<String>,
    },
    Literal {
        value: String,
    },
}

impl ModelSchema {
    pub fn object(fields: Vec<FieldSpec>) -> Self {
        ModelSchema::Object {
            fields,
            deny_unknown: false,
        }
    }

    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModelSchema::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        ModelSchema::Literal {
            value: value.into(),
        }
    }

    /// Field names declared by an object model, in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            ModelSchema::Object { fields, .. } => fields.iter().map(|f| f.name.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Models referenced by this schema's field descriptors
    pub fn referenced_models(&self) -> Vec<&str> {
        match self {
            ModelSchema::Object { fields, .. } => fields
                .iter()
                .flat_map(|f| f.descriptor.model_names())
                .collect(),
            _ => Vec::new(),
        }
    }
}
