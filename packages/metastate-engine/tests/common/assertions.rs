//! Custom assertions for classification results

use metastate_engine::{ClassificationMatrix, CollectingSink, Diagnostic, MetaState};

/// Assert the state of one (record, field) cell
pub fn assert_state(matrix: &ClassificationMatrix, record_id: &str, field: &str, expected: MetaState) {
    assert_eq!(
        matrix.lookup(record_id, field),
        Some(expected),
        "record '{record_id}', field '{field}': expected {expected:?}, row = {:?}",
        matrix
            .record_ids()
            .iter()
            .position(|id| id == record_id)
            .and_then(|row| matrix.row(row))
    );
}

/// Assert the matrix has exactly `records × fields` cells
pub fn assert_shape(matrix: &ClassificationMatrix, records: usize, fields: usize) {
    assert_eq!(matrix.num_records(), records, "row count");
    assert_eq!(matrix.fields().len(), fields, "column count");
    assert_eq!(matrix.len(), records * fields, "cell count");
}

/// Assert two matrices agree cell by cell, in row order
pub fn assert_same_matrix(left: &ClassificationMatrix, right: &ClassificationMatrix) {
    assert_eq!(left.record_ids(), right.record_ids(), "row order differs");
    assert_eq!(left.fields(), right.fields(), "column order differs");
    let left_cells: Vec<_> = left.entries().collect();
    let right_cells: Vec<_> = right.entries().collect();
    pretty_assertions::assert_eq!(left_cells, right_cells);
}

/// Assert the sink saw a fallback warning for `record`
pub fn assert_warned_for(sink: &CollectingSink, record: &str) {
    let warnings = sink.warnings();
    assert!(
        warnings.iter().any(|d| match d {
            Diagnostic::NoModalities { record: r } => r == record,
            Diagnostic::UnknownModality { record: r, .. } => r == record,
            Diagnostic::ValidationFailed { .. } => false,
        }),
        "expected a requirement warning for '{record}', got {warnings:?}"
    );
}

/// Assert no warning-level diagnostic was emitted
pub fn assert_no_warnings(sink: &CollectingSink) {
    let warnings = sink.warnings();
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}
