/*
 * Requirement Tables
 *
 * One table per modality: core field → required / optional / excluded.
 * The registry is total over the core fields for every known modality;
 * `RequirementTable::missing_fields` reports any gap at config time.
 */

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ModalityTag;
use crate::shared::models::{CoreField, FileRequirement};

/// Requirement of every core field for one modality
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementTable {
    entries: BTreeMap<CoreField, FileRequirement>,
}

impl RequirementTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table with the same requirement for every core field
    pub fn uniform(requirement: FileRequirement) -> Self {
        let mut table = Self::new();
        for field in CoreField::ALL {
            table.set(field, requirement);
        }
        table
    }

    pub fn with(mut self, field: CoreField, requirement: FileRequirement) -> Self {
        self.set(field, requirement);
        self
    }

    pub fn set(&mut self, field: CoreField, requirement: FileRequirement) {
        self.entries.insert(field, requirement);
    }

    pub fn get(&self, field: CoreField) -> Option<FileRequirement> {
        self.entries.get(&field).copied()
    }

    /// Core fields this table does not cover
    pub fn missing_fields(&self) -> Vec<CoreField> {
        CoreField::ALL
            .into_iter()
            .filter(|field| !self.entries.contains_key(field))
            .collect()
    }

    pub fn is_total(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Fields with the given requirement, in display order
    pub fn fields_with(&self, requirement: FileRequirement) -> Vec<CoreField> {
        self.entries
            .iter()
            .filter(|(_, r)| **r == requirement)
            .map(|(field, _)| *field)
            .collect()
    }
}

/// Static registry: modality → requirement table
#[derive(Debug, Clone, Default)]
pub struct RequirementRegistry {
    tables: FxHashMap<String, (ModalityTag, RequirementTable)>,
}

impl RequirementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, modality: impl Into<ModalityTag>, table: RequirementTable) -> Self {
        self.insert(modality, table);
        self
    }

    pub fn insert(&mut self, modality: impl Into<ModalityTag>, table: RequirementTable) {
        let modality = modality.into();
        self.tables
            .insert(modality.key().to_string(), (modality, table));
    }

    pub fn lookup(&self, modality: &ModalityTag) -> Option<&RequirementTable> {
        self.tables.get(modality.key()).map(|(_, table)| table)
    }

    pub fn contains(&self, modality: &ModalityTag) -> bool {
        self.tables.contains_key(modality.key())
    }

    /// Registered modalities, sorted by lookup key
    pub fn modalities(&self) -> Vec<ModalityTag> {
        let mut tags: Vec<ModalityTag> = self.tables.values().map(|(tag, _)| tag.clone()).collect();
        tags.sort_by(|a, b| a.key().cmp(b.key()));
        tags
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModalityTag, &RequirementTable)> {
        self.tables.values().map(|(tag, table)| (tag, table))
    }

    /// Overlay another registry; tables in `other` replace ours
    pub fn extend(&mut self, other: &RequirementRegistry) {
        for (key, entry) in &other.tables {
            self.tables.insert(key.clone(), entry.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
