//! State-filtered export rows
//!
//! Selects the records whose field falls in one state group and emits
//! their identifying columns, ready for a CSV or JSON writer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::RecordInfo;
use crate::features::batch::ClassificationMatrix;
use crate::shared::models::MetaState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFilter {
    /// missing or optional
    Missing,
    /// present or valid
    Present,
}

impl ExportFilter {
    pub fn matches(&self, state: MetaState) -> bool {
        match self {
            ExportFilter::Missing => matches!(state, MetaState::Missing | MetaState::Optional),
            ExportFilter::Present => matches!(state, MetaState::Present | MetaState::Valid),
        }
    }
}

impl fmt::Display for ExportFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFilter::Missing => f.write_str("missing"),
            ExportFilter::Present => f.write_str("present"),
        }
    }
}

impl FromStr for ExportFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "missing" => Ok(ExportFilter::Missing),
            "present" => Ok(ExportFilter::Present),
            other => Err(format!("unknown export filter '{}'", other)),
        }
    }
}

/// Identifying columns of one exported record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub name: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    pub location: Option<String>,
    pub created: Option<String>,
}

impl From<&RecordInfo> for ExportRow {
    fn from(info: &RecordInfo) -> Self {
        Self {
            name: info.name.clone(),
            id: info.id.clone(),
            location: info.location.clone(),
            created: info.created.clone(),
        }
    }
}

/// Rows of records whose `field` state matches `filter`.
///
/// `infos` is aligned with the matrix rows; an unknown field yields nothing.
pub fn export_rows(
    matrix: &ClassificationMatrix,
    infos: &[RecordInfo],
    field: &str,
    filter: ExportFilter,
) -> Vec<ExportRow> {
    let Some(column) = matrix.column(field) else {
        return Vec::new();
    };
    column
        .into_iter()
        .zip(infos)
        .filter(|(state, _)| filter.matches(*state))
        .map(|(_, info)| ExportRow::from(info))
        .collect()
}
