//! State aggregation
//!
//! Counts per (field, state) over a matrix, optionally restricted to the
//! rows a predicate keeps (derived / modality filters).

use serde::Serialize;

use crate::features::batch::ClassificationMatrix;
use crate::shared::models::MetaState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub valid: usize,
    pub present: usize,
    pub optional: usize,
    pub missing: usize,
    pub excluded: usize,
}

impl StateCounts {
    pub fn add(&mut self, state: MetaState) {
        *self.slot(state) += 1;
    }

    pub fn get(&self, state: MetaState) -> usize {
        match state {
            MetaState::Valid => self.valid,
            MetaState::Present => self.present,
            MetaState::Optional => self.optional,
            MetaState::Missing => self.missing,
            MetaState::Excluded => self.excluded,
        }
    }

    pub fn total(&self) -> usize {
        self.valid + self.present + self.optional + self.missing + self.excluded
    }

    /// Share of `state` in this tally; 0 when empty
    pub fn fraction(&self, state: MetaState) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(state) as f64 / total as f64,
        }
    }

    fn slot(&mut self, state: MetaState) -> &mut usize {
        match state {
            MetaState::Valid => &mut self.valid,
            MetaState::Present => &mut self.present,
            MetaState::Optional => &mut self.optional,
            MetaState::Missing => &mut self.missing,
            MetaState::Excluded => &mut self.excluded,
        }
    }

    fn merge(&mut self, other: &StateCounts) {
        for state in MetaState::ALL {
            *self.slot(state) += other.get(state);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSummary {
    records: usize,
    by_field: Vec<(String, StateCounts)>,
}

impl StateSummary {
    pub fn from_matrix(matrix: &ClassificationMatrix) -> Self {
        Self::from_matrix_filtered(matrix, |_| true)
    }

    /// Count only rows for which `keep(row_index)` holds
    pub fn from_matrix_filtered(matrix: &ClassificationMatrix, keep: impl Fn(usize) -> bool) -> Self {
        let mut by_field: Vec<(String, StateCounts)> = matrix
            .fields()
            .iter()
            .map(|field| (field.clone(), StateCounts::default()))
            .collect();

        let mut records = 0;
        for row in 0..matrix.num_records() {
            if !keep(row) {
                continue;
            }
            records += 1;
            if let Some(states) = matrix.row(row) {
                for (slot, state) in by_field.iter_mut().zip(states) {
                    slot.1.add(*state);
                }
            }
        }

        Self { records, by_field }
    }

    /// Rows counted
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn field(&self, field: &str) -> Option<&StateCounts> {
        self.by_field
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, counts)| counts)
    }

    pub fn count(&self, field: &str, state: MetaState) -> usize {
        self.field(field).map_or(0, |counts| counts.get(state))
    }

    /// Percentage (0..=100) of counted rows whose `field` is valid
    pub fn valid_percentage(&self, field: &str) -> f64 {
        self.field(field)
            .map_or(0.0, |counts| counts.fraction(MetaState::Valid) * 100.0)
    }

    /// All fields pooled together
    pub fn overall(&self) -> StateCounts {
        let mut total = StateCounts::default();
        for (_, counts) in &self.by_field {
            total.merge(counts);
        }
        total
    }

    /// `(field, state, count)` for every non-zero cell, fields in matrix order
    pub fn long_form(&self) -> Vec<(&str, MetaState, usize)> {
        self.by_field
            .iter()
            .flat_map(|(field, counts)| {
                MetaState::ALL
                    .into_iter()
                    .filter(|state| counts.get(*state) > 0)
                    .map(move |state| (field.as_str(), state, counts.get(state)))
            })
            .collect()
    }
}
