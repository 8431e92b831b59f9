//! Record fixtures
//!
//! Section values that validate against the builtin models, and whole
//! records for the two requirement families.

use serde_json::{json, Value};

/// Subject that satisfies every required field of `Subject`
pub fn fixture_valid_subject() -> Value {
    json!({
        "schema_version": "1.0.3",
        "subject_id": "123",
        "sex": "Female",
        "date_of_birth": "2023-01-15",
        "species": {"name": "Mus musculus", "registry_identifier": "NCBI:txid10090"},
        "source": {"name": "Jackson Laboratory", "abbreviation": "JAX"},
        "alleles": [],
        "housing": null
    })
}

pub fn fixture_valid_procedures() -> Value {
    json!({
        "schema_version": "1.1.3",
        "subject_id": "123",
        "subject_procedures": [
            {
                "procedure_type": "Surgery",
                "start_date": "2023-03-01",
                "experimenter_full_name": "Jane Doe",
                "procedures": [{"procedure_type": "Headframe"}]
            }
        ]
    })
}

pub fn fixture_valid_rig() -> Value {
    json!({
        "schema_version": "1.0.4",
        "rig_id": "323_EPHYS1_20231003",
        "modification_date": "2023-10-03",
        "mouse_platform": {"name": "Running wheel", "device_type": "Disc"},
        "calibrations": [
            {
                "calibration_date": "2023-10-02T10:22:13Z",
                "device_name": "Laser A",
                "description": "Laser power calibration"
            }
        ],
        "modalities": [{"name": "Extracellular electrophysiology", "abbreviation": "ecephys"}]
    })
}

pub fn fixture_valid_instrument() -> Value {
    json!({
        "schema_version": "1.0.4",
        "instrument_id": "exaSPIM1",
        "modification_date": "2023-06-01",
        "instrument_type": "exaSPIM",
        "manufacturer": {"name": "LifeCanvas"},
        "objectives": [{"name": "Mitutoyo", "numerical_aperture": 0.28, "magnification": 10.0}]
    })
}

pub fn fixture_data_description(abbreviation: &str) -> Value {
    json!({
        "schema_version": "1.0.4",
        "creation_time": "2024-01-01T10:00:00Z",
        "name": format!("{}_123_2024-01-01_10-00-00", abbreviation),
        "institution": {"name": "Allen Institute for Neural Dynamics", "abbreviation": "AIND"},
        "funding_source": [{"funder": {"name": "Allen Institute"}}],
        "data_level": "raw",
        "investigators": [{"name": "Jane Doe"}],
        "modality": [{"name": abbreviation, "abbreviation": abbreviation}],
        "platform": {"name": "Electrophysiology platform", "abbreviation": "ecephys"},
        "subject_id": "123"
    })
}

/// Physiology record with every required section valid
pub fn fixture_ecephys_record(id: &str) -> Value {
    json!({
        "_id": id,
        "name": format!("ecephys_123_2024-01-01_10-00-00_{}", id),
        "location": format!("s3://bucket/{}", id),
        "created": "2024-01-02T00:00:00Z",
        "data_description": fixture_data_description("ecephys"),
        "subject": fixture_valid_subject(),
        "procedures": fixture_valid_procedures(),
        "rig": fixture_valid_rig(),
    })
}

/// Imaging record (SPIM family) with a valid instrument
pub fn fixture_spim_record(id: &str) -> Value {
    json!({
        "_id": id,
        "name": "SPIM_123_2024-01-01_10-00-00",
        "data_description": fixture_data_description("SPIM"),
        "subject": fixture_valid_subject(),
        "instrument": fixture_valid_instrument(),
    })
}

/// Mixed batch: valid, partial, malformed and empty records
pub fn fixture_batch(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| match i % 5 {
            0 => fixture_ecephys_record(&format!("rec-{}", i)),
            1 => fixture_spim_record(&format!("rec-{}", i)),
            2 => json!({"_id": format!("rec-{}", i), "subject": {"subject_id": "9"}}),
            3 => json!(["not", "a", "record"]),
            _ => json!({}),
        })
        .collect()
}
