//! Batch classification, projection and reporting over mixed batches

mod common;

use common::*;
use metastate_engine::features::reporting::RecordFilter;
use metastate_engine::{
    CoreField, Diagnostic, EngineError, ExportFilter, FileRequirement, MetaState, ParentSection,
};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn core_matrix_over_mixed_batch() {
    let (engine, sink) = engine_with_sink();
    let records = fixture_batch(10);
    let matrix = engine.classify_core(&records);

    assert_shape(&matrix, 10, 9);
    assert_eq!(matrix.section(), None);
    assert_eq!(
        matrix.record_ids(),
        &["rec-0", "rec-1", "rec-2", "#3", "#4", "rec-5", "rec-6", "rec-7", "#8", "#9"]
    );

    assert_state(&matrix, "rec-0", "subject", MetaState::Valid);
    assert_state(&matrix, "rec-0", "rig", MetaState::Valid);
    assert_state(&matrix, "rec-0", "instrument", MetaState::Excluded);
    assert_state(&matrix, "rec-0", "session", MetaState::Missing);
    assert_state(&matrix, "rec-0", "processing", MetaState::Optional);

    assert_state(&matrix, "rec-1", "instrument", MetaState::Valid);
    assert_state(&matrix, "rec-1", "rig", MetaState::Excluded);
    assert_state(&matrix, "rec-1", "session", MetaState::Excluded);

    assert_state(&matrix, "rec-2", "subject", MetaState::Present);
    assert_state(&matrix, "rec-2", "rig", MetaState::Missing);

    for id in ["#3", "#4", "#8", "#9"] {
        assert!(matrix
            .row(matrix.record_ids().iter().position(|r| r == id).unwrap())
            .unwrap()
            .iter()
            .all(|state| *state == MetaState::Missing));
    }

    // only the record without a modality warns; blank records are skipped
    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 2);
    assert_warned_for(&sink, "rec-2");
    assert_warned_for(&sink, "rec-7");
}

#[test]
fn parallel_matches_sequential() {
    let records = fixture_batch(57);
    let sequential = sequential_engine();
    let expected = sequential.classify_core(&records);

    for (workers, batch) in [(1, 1), (2, 3), (4, 8), (3, 100)] {
        let parallel = parallel_engine(workers, batch);
        assert_same_matrix(&expected, &parallel.classify_core(&records));
        assert_same_matrix(
            &sequential.classify_section(&records, CoreField::Subject),
            &parallel.classify_section(&records, CoreField::Subject),
        );
    }
}

#[test]
fn empty_inputs() {
    let (engine, _) = engine_with_sink();
    let matrix = engine.classify_core(&[]);
    assert!(matrix.is_empty());
    assert_eq!(matrix.fields().len(), 9);

    let matrix = engine.classify_top_level(&fixture_batch(3), &[]);
    assert_eq!(matrix.num_records(), 3);
    assert!(matrix.is_empty());
}

#[test]
fn section_matrix_follows_record_requirements() {
    let (engine, _) = engine_with_sink();
    let records = fixture_batch(5);
    let matrix = engine.classify_section(&records, CoreField::Subject);

    assert_eq!(matrix.section(), Some(CoreField::Subject));
    assert_eq!(matrix.num_records(), 5);
    assert!(matrix.field_index("species").is_some());
    assert!(matrix.field_index("subject_id").is_none());

    assert_state(&matrix, "rec-0", "species", MetaState::Valid);
    assert_state(&matrix, "rec-1", "species", MetaState::Valid);
    assert_state(&matrix, "rec-2", "species", MetaState::Missing);
    assert_state(&matrix, "#3", "species", MetaState::Missing);
    assert_state(&matrix, "rec-0", "housing", MetaState::Optional);

    let projected = engine.project_section(&records, CoreField::Rig);
    assert_eq!(projected[0].requirement, FileRequirement::Required);
    assert_eq!(projected[1].requirement, FileRequirement::Excluded);
    assert_eq!(projected[1].value, json!(null));
}

#[test]
fn classify_all_with_parent_shares_requirement() {
    let (engine, _) = engine_with_sink();
    let sections = vec![
        json!({"objectives": [{"name": "Mitutoyo", "numerical_aperture": 0.28, "magnification": 10.0}]}),
        json!({"objectives": []}),
        json!(null),
    ];
    let excluded = ParentSection::new(CoreField::Instrument, FileRequirement::Excluded);
    let matrix = engine.classify_all(&sections, &["objectives"], Some(excluded));
    // an absent section is missing before any requirement applies
    assert_eq!(
        matrix.column("objectives").unwrap(),
        vec![MetaState::Excluded, MetaState::Excluded, MetaState::Missing]
    );

    let optional = ParentSection::new(CoreField::Instrument, FileRequirement::Optional);
    let matrix = engine.classify_all(&sections, &["objectives"], Some(optional));
    assert_eq!(
        matrix.column("objectives").unwrap(),
        vec![MetaState::Valid, MetaState::Optional, MetaState::Missing]
    );
}

#[test]
fn summary_and_filters() {
    let (engine, _) = engine_with_sink();
    let records = fixture_batch(10);

    let all = engine.summarize(&records, &RecordFilter::all());
    assert_eq!(all.records(), 10);
    assert_eq!(all.count("subject", MetaState::Valid), 4);
    assert_eq!(all.count("subject", MetaState::Present), 2);
    assert_eq!(all.count("subject", MetaState::Missing), 4);
    assert!((all.valid_percentage("subject") - 40.0).abs() < 1e-9);

    let ephys = engine.summarize(&records, &RecordFilter::all().modality("ecephys"));
    assert_eq!(ephys.records(), 2);
    assert_eq!(ephys.count("instrument", MetaState::Excluded), 2);

    // ecephys fixture names carry a processing suffix
    let derived = engine.summarize(&records, &RecordFilter::all().derived(true));
    assert_eq!(derived.records(), 2);
    let raw = engine.summarize(&records, &RecordFilter::all().derived(false));
    assert_eq!(raw.records(), 8);
}

#[test]
fn export_by_state_group() {
    let (engine, _) = engine_with_sink();
    let records = fixture_batch(10);

    let missing = engine.export(&records, "subject", ExportFilter::Missing).unwrap();
    let ids: Vec<&str> = missing.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["#3", "#4", "#8", "#9"]);

    let present = engine
        .export(&records, "subject.species", ExportFilter::Present)
        .unwrap();
    let ids: Vec<&str> = present.iter().map(|row| row.id.as_str()).collect();
    assert_eq!(ids, vec!["rec-0", "rec-1", "rec-5", "rec-6"]);
    assert_eq!(present[0].location.as_deref(), Some("s3://bucket/rec-0"));

    assert!(matches!(
        engine.export(&records, "subjekt", ExportFilter::Missing),
        Err(EngineError::UnknownField { .. })
    ));
    assert!(matches!(
        engine.export(&records, "subject.tail", ExportFilter::Missing),
        Err(EngineError::UnknownField { .. })
    ));
}

#[test]
fn record_infos_and_explain() {
    let (engine, sink) = engine_with_sink();
    let records = fixture_batch(3);

    let infos = engine.record_infos(&records);
    assert_eq!(infos[0].modalities, "ecephys");
    assert!(infos[0].derived);
    assert_eq!(infos[1].modalities, "SPIM");
    assert!(!infos[1].derived);
    assert_eq!(infos[2].modalities, "");

    let report = engine.explain(&records[2], 2);
    assert_eq!(report.state(CoreField::Subject), Some(MetaState::Present));
    assert!(report.failures().any(|outcome| outcome.field == "subject"));
    assert!(sink
        .entries()
        .iter()
        .any(|d| matches!(d, Diagnostic::ValidationFailed { field, .. } if field == "subject")));
}
