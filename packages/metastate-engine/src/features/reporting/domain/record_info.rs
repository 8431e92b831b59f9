//! Record identity and filter flags

use serde::Serialize;
use serde_json::Value;

use crate::features::requirements::{extract_modalities, ModalityAliases, ModalityTag};
use crate::shared::models::record_id;

/// Raw asset names are `<modality>_<subject>_<date>_<time>`
const RAW_NAME_UNDERSCORES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordInfo {
    pub id: String,
    pub name: Option<String>,
    pub location: Option<String>,
    pub created: Option<String>,
    /// Canonical modality abbreviations joined by `,`
    pub modalities: String,
    pub derived: bool,
}

impl RecordInfo {
    pub fn from_record(record: &Value, index: usize, aliases: &ModalityAliases) -> Self {
        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);
        let name = text("name");
        let modalities = extract_modalities(record, aliases)
            .iter()
            .map(ModalityTag::as_str)
            .collect::<Vec<_>>()
            .join(",");

        Self {
            id: record_id(record, index),
            derived: name.as_deref().map_or(false, is_derived_name),
            name,
            location: text("location"),
            created: text("created"),
            modalities,
        }
    }

    pub fn has_modality(&self, modality: &ModalityTag) -> bool {
        self.modalities
            .split(',')
            .any(|tag| !tag.is_empty() && ModalityTag::new(tag) == *modality)
    }
}

/// Derived assets carry more than three underscores in their name
pub fn is_derived_name(name: &str) -> bool {
    name.matches('_').count() > RAW_NAME_UNDERSCORES
}

/// Row filter over record infos; `None` means "all"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub derived: Option<bool>,
    pub modality: Option<ModalityTag>,
}

impl RecordFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn derived(mut self, derived: bool) -> Self {
        self.derived = Some(derived);
        self
    }

    pub fn modality(mut self, modality: impl Into<ModalityTag>) -> Self {
        self.modality = Some(modality.into());
        self
    }

    pub fn matches(&self, info: &RecordInfo) -> bool {
        self.derived.map_or(true, |derived| info.derived == derived)
            && self
                .modality
                .as_ref()
                .map_or(true, |modality| info.has_modality(modality))
    }
}
