//! Schema-version normalization
//!
//! Documents written against an older minor schema version are otherwise
//! identical in shape; overwriting `schema_version` with the current one
//! before validation lets them pass a literal-pinned model. The record
//! itself is never touched: a modified copy is returned instead.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::shared::models::CoreField;

pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Current schema version per core section
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionTable {
    versions: BTreeMap<CoreField, String>,
}

impl VersionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: CoreField, version: impl Into<String>) -> Self {
        self.insert(field, version);
        self
    }

    pub fn insert(&mut self, field: CoreField, version: impl Into<String>) {
        self.versions.insert(field, version.into());
    }

    pub fn get(&self, field: CoreField) -> Option<&str> {
        self.versions.get(&field).map(String::as_str)
    }

    /// Lookup by field name; non-core names have no version
    pub fn for_name(&self, field: &str) -> Option<&str> {
        self.get(field.parse().ok()?)
    }

    pub fn extend(&mut self, other: VersionTable) {
        self.versions.extend(other.versions);
    }

    pub fn iter(&self) -> impl Iterator<Item = (CoreField, &str)> {
        self.versions.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

/// Overwrite `schema_version` in `value` with the current version of `field`.
///
/// Borrows when there is nothing to change: no table entry, not an object,
/// no version marker, or the marker is already current.
pub fn normalize_version<'a>(field: &str, value: &'a Value, table: &VersionTable) -> Cow<'a, Value> {
    let Some(current) = table.for_name(field) else {
        return Cow::Borrowed(value);
    };
    let Some(object) = value.as_object() else {
        return Cow::Borrowed(value);
    };
    match object.get(SCHEMA_VERSION_KEY) {
        Some(Value::String(existing)) if existing == current => Cow::Borrowed(value),
        Some(_) => {
            let mut normalized = object.clone();
            normalized.insert(
                SCHEMA_VERSION_KEY.to_string(),
                Value::String(current.to_string()),
            );
            Cow::Owned(Value::Object(normalized))
        }
        None => Cow::Borrowed(value),
    }
}
