/*
 * Reporting
 *
 * Consumers of a ClassificationMatrix:
 * - StateSummary: counts per (field, state), fractions, valid percentage
 * - export_rows: identifying rows of records whose field is in a state group
 * - RecordReport: one record's full classification with failure reasons
 * - expected_fields: which core sections a modality expects or excludes
 *
 * RecordInfo carries the identifying columns (name, _id, location,
 * created) plus modality and derived flags used for filtering.
 */

pub mod application;
pub mod domain;

pub use application::{explain_record, expected_fields};
pub use domain::{
    export_rows, ExportFilter, ExportRow, RecordFilter, RecordInfo, RecordReport, StateCounts,
    StateSummary,
};
