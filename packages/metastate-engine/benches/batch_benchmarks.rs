//! Batch classification benchmarks
//!
//! - Single record, one field (resolver + validator path)
//! - Core matrix, sequential vs rayon, across batch sizes
//! - Section projection + nested matrix
//! - Descriptor shorthand and YAML overlay parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use metastate_engine::config::{EngineConfig, ParallelConfig};
use metastate_engine::{CoreField, MetadataEngine, TypeDescriptor};
use serde_json::{json, Value};

// ============================================================================
// Inputs
// ============================================================================

fn ephys_record(i: usize) -> Value {
    json!({
        "_id": format!("ephys-{}", i),
        "name": format!("ecephys_{}_2024-01-01_10-00-00", 600_000 + i),
        "data_description": {"modality": [{"name": "Extracellular electrophysiology", "abbreviation": "ecephys"}]},
        "subject": {
            "schema_version": "1.0.0",
            "subject_id": format!("{}", 600_000 + i),
            "sex": if i % 2 == 0 { "Male" } else { "Female" },
            "date_of_birth": "2023-01-15",
            "species": {"name": "Mus musculus"},
            "source": {"name": "Jackson Laboratory"},
            "alleles": []
        },
        "rig": {
            "rig_id": "323_EPHYS1_20231003",
            "modification_date": "2023-10-03",
            "mouse_platform": {"name": "Running wheel"},
            "calibrations": [],
            "modalities": [{"name": "Extracellular electrophysiology", "abbreviation": "ecephys"}]
        }
    })
}

fn spim_record(i: usize) -> Value {
    json!({
        "_id": format!("spim-{}", i),
        "data_description": {"modalities": ["exaSPIM"]},
        "subject": {"subject_id": format!("{}", i)},
        "instrument": {"instrument_id": "exaSPIM1"}
    })
}

/// Four in five records are full physiology records
fn mixed_batch(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| match i % 5 {
            4 => spim_record(i),
            _ => ephys_record(i),
        })
        .collect()
}

fn engine(parallel: ParallelConfig) -> MetadataEngine {
    EngineConfig::builtin().with_parallel(parallel).build().unwrap()
}

// ============================================================================
// Single Record
// ============================================================================

fn bench_single_classify(c: &mut Criterion) {
    let engine = engine(ParallelConfig::sequential());
    let record = ephys_record(0);

    let mut group = c.benchmark_group("single_classify");
    for field in ["subject", "rig", "instrument", "session"] {
        group.bench_with_input(BenchmarkId::from_parameter(field), &field, |b, field| {
            b.iter(|| black_box(engine.classify(black_box(field), &record, None)));
        });
    }
    group.finish();
}

// ============================================================================
// Core Matrix
// ============================================================================

fn bench_core_matrix(c: &mut Criterion) {
    let sequential = engine(ParallelConfig::sequential());
    let parallel = engine(ParallelConfig::default().batch_size(64));

    let mut group = c.benchmark_group("core_matrix");
    for size in [100usize, 1_000, 10_000] {
        let records = mixed_batch(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", size), &records, |b, records| {
            b.iter(|| black_box(sequential.classify_core(records)));
        });
        group.bench_with_input(BenchmarkId::new("rayon", size), &records, |b, records| {
            b.iter(|| black_box(parallel.classify_core(records)));
        });
    }
    group.finish();
}

fn bench_batch_size(c: &mut Criterion) {
    let records = mixed_batch(5_000);

    let mut group = c.benchmark_group("batch_size");
    group.throughput(Throughput::Elements(records.len() as u64));
    for batch in [1usize, 16, 100, 1_000] {
        let engine = engine(ParallelConfig::default().batch_size(batch));
        group.bench_with_input(BenchmarkId::from_parameter(batch), &records, |b, records| {
            b.iter(|| black_box(engine.classify_core(records)));
        });
    }
    group.finish();
}

// ============================================================================
// Sections
// ============================================================================

fn bench_section_matrix(c: &mut Criterion) {
    let engine = engine(ParallelConfig::default());
    let records = mixed_batch(1_000);

    let mut group = c.benchmark_group("section_matrix");
    group.throughput(Throughput::Elements(records.len() as u64));
    for section in [CoreField::Subject, CoreField::Rig] {
        group.bench_with_input(
            BenchmarkId::from_parameter(section.as_str()),
            &section,
            |b, &section| {
                b.iter(|| black_box(engine.classify_section(&records, section)));
            },
        );
    }
    group.finish();
}

// ============================================================================
// Parsing
// ============================================================================

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.bench_function("descriptor_shorthand", |b| {
        b.iter(|| {
            black_box("Optional[List[Union[Device, Calibration]]]")
                .parse::<TypeDescriptor>()
                .unwrap()
        });
    });

    let yaml = r#"
version: 1
modalities:
  holography:
    acquisition: required
    data_description: required
    instrument: required
    procedures: optional
    processing: optional
    quality_control: optional
    rig: excluded
    session: excluded
    subject: required
aliases:
  holo: holography
parallel:
  batch_size: 50
"#;
    group.throughput(Throughput::Bytes(yaml.len() as u64));
    group.bench_function("yaml_overlay", |b| {
        b.iter(|| black_box(EngineConfig::from_yaml_str(black_box(yaml)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_classify,
    bench_core_matrix,
    bench_batch_size,
    bench_section_matrix,
    bench_parsing,
);

criterion_main!(benches);
