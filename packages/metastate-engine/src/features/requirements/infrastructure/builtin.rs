/*
 * Builtin Requirement Tables
 *
 * Two families cover the common modalities:
 *
 * Physiology (session-based):
 *   session, rig            → required
 *   acquisition, instrument → excluded
 *
 * Imaging (acquisition-based):
 *   acquisition, instrument → required
 *   session, rig            → excluded
 *
 * Both families:
 *   data_description, subject, procedures → required
 *   processing, quality_control           → optional
 */

use crate::features::requirements::domain::{ModalityAliases, RequirementRegistry, RequirementTable};
use crate::shared::models::{CoreField, FileRequirement};

const PHYSIOLOGY: &[&str] = &[
    "behavior",
    "behavior-videos",
    "ecephys",
    "EMG",
    "fib",
    "icephys",
    "pophys",
    "slap",
];

const IMAGING: &[&str] = &["confocal", "fMOST", "ISI", "merfish", "MRI", "SPIM"];

const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("exaSPIM", "SPIM"),
    ("mesoSPIM", "SPIM"),
    ("diSPIM", "SPIM"),
    ("smartSPIM", "SPIM"),
    ("ophys", "pophys"),
    ("trained-behavior", "behavior"),
];

fn shared_table() -> RequirementTable {
    RequirementTable::new()
        .with(CoreField::DataDescription, FileRequirement::Required)
        .with(CoreField::Subject, FileRequirement::Required)
        .with(CoreField::Procedures, FileRequirement::Required)
        .with(CoreField::Processing, FileRequirement::Optional)
        .with(CoreField::QualityControl, FileRequirement::Optional)
}

fn physiology_table() -> RequirementTable {
    shared_table()
        .with(CoreField::Session, FileRequirement::Required)
        .with(CoreField::Rig, FileRequirement::Required)
        .with(CoreField::Acquisition, FileRequirement::Excluded)
        .with(CoreField::Instrument, FileRequirement::Excluded)
}

fn imaging_table() -> RequirementTable {
    shared_table()
        .with(CoreField::Acquisition, FileRequirement::Required)
        .with(CoreField::Instrument, FileRequirement::Required)
        .with(CoreField::Session, FileRequirement::Excluded)
        .with(CoreField::Rig, FileRequirement::Excluded)
}

/// Requirement tables shipped with the engine
pub fn builtin_registry() -> RequirementRegistry {
    let mut registry = RequirementRegistry::new();
    for modality in PHYSIOLOGY {
        registry.insert(*modality, physiology_table());
    }
    for modality in IMAGING {
        registry.insert(*modality, imaging_table());
    }
    registry
}

/// Legacy modality names and their canonical replacements
pub fn builtin_aliases() -> ModalityAliases {
    let mut aliases = ModalityAliases::new();
    for (legacy, canonical) in LEGACY_ALIASES {
        aliases.insert(*legacy, *canonical);
    }
    aliases
}
