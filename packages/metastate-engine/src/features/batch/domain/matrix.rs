//! Classification matrix
//!
//! `records × fields` states stored row-major: the states of record `r`
//! occupy `states[r * fields.len() .. (r + 1) * fields.len()]`.
//!
//! Record ids are unique within a matrix: a repeated id (two records
//! sharing a `name`, say) is stored as `<id>#<row>`.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::shared::models::{CoreField, MetaState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationMatrix {
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<CoreField>,
    record_ids: Vec<String>,
    fields: Vec<String>,
    states: Vec<MetaState>,
}

impl ClassificationMatrix {
    /// Build from rows; every row must have one state per field
    pub fn from_rows(
        section: Option<CoreField>,
        fields: Vec<String>,
        rows: Vec<(String, Vec<MetaState>)>,
    ) -> Self {
        let mut record_ids = Vec::with_capacity(rows.len());
        let mut states = Vec::with_capacity(rows.len() * fields.len());
        let mut seen = FxHashSet::default();
        for (index, (mut id, row)) in rows.into_iter().enumerate() {
            debug_assert_eq!(row.len(), fields.len(), "row width mismatch for {}", id);
            while seen.contains(&id) {
                id = format!("{}#{}", id, index);
            }
            seen.insert(id.clone());
            record_ids.push(id);
            states.extend(row);
        }
        Self {
            section,
            record_ids,
            fields,
            states,
        }
    }

    /// Section the rows were projected to, for nested matrices
    pub fn section(&self) -> Option<CoreField> {
        self.section
    }

    pub fn record_ids(&self) -> &[String] {
        &self.record_ids
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn num_records(&self) -> usize {
        self.record_ids.len()
    }

    /// Number of entries (`records × fields`)
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State by row and column position
    pub fn get(&self, record: usize, field: usize) -> Option<MetaState> {
        if record >= self.num_records() || field >= self.fields.len() {
            return None;
        }
        self.states.get(record * self.fields.len() + field).copied()
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }

    /// State by record id and field name
    pub fn lookup(&self, record_id: &str, field: &str) -> Option<MetaState> {
        let row = self.record_ids.iter().position(|id| id == record_id)?;
        self.get(row, self.field_index(field)?)
    }

    pub fn row(&self, record: usize) -> Option<&[MetaState]> {
        if record >= self.num_records() {
            return None;
        }
        let width = self.fields.len();
        Some(&self.states[record * width..(record + 1) * width])
    }

    /// One field's state for every record, in row order
    pub fn column(&self, field: &str) -> Option<Vec<MetaState>> {
        let col = self.field_index(field)?;
        Some(
            (0..self.num_records())
                .filter_map(|row| self.get(row, col))
                .collect(),
        )
    }

    /// `(record_id, field, state)` in row-major order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, MetaState)> + '_ {
        let width = self.fields.len();
        self.states.iter().enumerate().map(move |(i, state)| {
            (
                self.record_ids[i / width].as_str(),
                self.fields[i % width].as_str(),
                *state,
            )
        })
    }
}
