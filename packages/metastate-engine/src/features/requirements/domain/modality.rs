/*
 * Modality Tags
 *
 * A modality is an opaque abbreviation ("ecephys", "SPIM", ...) declared
 * under `data_description`. Tags compare case-insensitively.
 *
 * Record layouts accepted:
 *   data_description.modality:   [{"abbreviation": "ecephys", ...}, "behavior"]
 *   data_description.modalities: [...]   (same entry shapes)
 */

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Modality abbreviation with case-insensitive identity
#[derive(Debug, Clone)]
pub struct ModalityTag {
    abbreviation: String,
    key: String,
}

impl ModalityTag {
    pub fn new(abbreviation: impl Into<String>) -> Self {
        let abbreviation = abbreviation.into().trim().to_string();
        let key = abbreviation.to_lowercase();
        Self { abbreviation, key }
    }

    /// Abbreviation as written in the registry or record
    pub fn as_str(&self) -> &str {
        &self.abbreviation
    }

    /// Lowercased lookup key
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl PartialEq for ModalityTag {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ModalityTag {}

impl Hash for ModalityTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for ModalityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbreviation)
    }
}

impl From<&str> for ModalityTag {
    fn from(s: &str) -> Self {
        ModalityTag::new(s)
    }
}

impl Serialize for ModalityTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.abbreviation)
    }
}

impl<'de> Deserialize<'de> for ModalityTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ModalityTag::new)
    }
}

/// Legacy → canonical modality remapping
///
/// Owned by configuration; the resolver only consults it.
#[derive(Debug, Clone, Default)]
pub struct ModalityAliases {
    map: FxHashMap<String, ModalityTag>,
}

impl ModalityAliases {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, legacy: impl Into<ModalityTag>, canonical: impl Into<ModalityTag>) {
        let legacy = legacy.into();
        self.map.insert(legacy.key().to_string(), canonical.into());
    }

    /// Map a tag to its canonical form (identity when no alias applies)
    pub fn canonicalize(&self, tag: &ModalityTag) -> ModalityTag {
        self.map.get(tag.key()).cloned().unwrap_or_else(|| tag.clone())
    }

    /// Overlay another alias table; entries in `other` win
    pub fn extend(&mut self, other: &ModalityAliases) {
        for (key, canonical) in &other.map {
            self.map.insert(key.clone(), canonical.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModalityTag)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Read a record's declared modalities, canonicalized and de-duplicated.
///
/// Missing section, non-list values and unrecognised entries yield nothing.
pub fn extract_modalities(record: &Value, aliases: &ModalityAliases) -> Vec<ModalityTag> {
    let Some(description) = record.get("data_description").and_then(Value::as_object) else {
        return Vec::new();
    };

    let entries = ["modality", "modalities"]
        .iter()
        .find_map(|key| description.get(*key).and_then(Value::as_array));

    let mut tags: Vec<ModalityTag> = Vec::new();
    for entry in entries.into_iter().flatten() {
        let raw = match entry {
            Value::String(s) => Some(s.as_str()),
            Value::Object(obj) => obj.get("abbreviation").and_then(Value::as_str),
            _ => None,
        };
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            continue;
        };

        let tag = aliases.canonicalize(&ModalityTag::new(raw));
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
