use serde::Serialize;
use serde_json::Value;

use crate::shared::models::FileRequirement;

/// A record projected down to one section
///
/// `value` is whatever the full record stored under the section (`null`
/// when absent); `requirement` is the section's requirement resolved from
/// the full record's modalities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionRecord {
    pub id: String,
    pub value: Value,
    pub requirement: FileRequirement,
}

impl SectionRecord {
    pub fn new(id: impl Into<String>, value: Value, requirement: FileRequirement) -> Self {
        Self {
            id: id.into(),
            value,
            requirement,
        }
    }
}
