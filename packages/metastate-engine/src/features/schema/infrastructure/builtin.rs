/*
 * Builtin Schemas
 *
 * Models for the nine core sections and the second-level models their
 * fields refer to. Each core model pins `schema_version` with a literal,
 * and the version table carries the same current versions, so stale
 * documents are normalized before they are matched.
 *
 * Device-like components share one loose `Device` shape under several
 * names; only the components whose fields matter for classification get
 * their own model.
 */

use serde::Deserialize;
use std::sync::Arc;

use crate::features::schema::application::VersionTable;
use crate::features::schema::domain::{FieldSpec, ModelSchema, SectionDescriptors, TypeDescriptor};
use crate::features::schema::infrastructure::{PrimitiveModel, TypedModel};
use crate::features::schema::ports::ModelValidator;
use crate::shared::models::CoreField;

/// Current schema version per core section
const CURRENT_VERSIONS: [(CoreField, &str, &str); 9] = [
    (CoreField::Acquisition, "Acquisition", "1.0.3"),
    (CoreField::DataDescription, "DataDescription", "1.0.4"),
    (CoreField::Instrument, "Instrument", "1.0.4"),
    (CoreField::Procedures, "Procedures", "1.1.3"),
    (CoreField::Processing, "Processing", "1.1.6"),
    (CoreField::QualityControl, "QualityControl", "1.1.4"),
    (CoreField::Rig, "Rig", "1.0.4"),
    (CoreField::Session, "Session", "1.0.3"),
    (CoreField::Subject, "Subject", "1.0.3"),
];

/// Names registered with the shared `Device` shape
const DEVICE_ALIASES: [&str; 20] = [
    "AdditionalImagingDevice",
    "DAQDevice",
    "DigitalMicromirrorDevice",
    "Enclosure",
    "FiberAssembly",
    "Filter",
    "LaserAssembly",
    "Lens",
    "LightSource",
    "MotorizedStage",
    "MousePlatform",
    "OpticalTable",
    "Patch",
    "PolygonalScanner",
    "RigDAQDevice",
    "ScanningStage",
    "StimulusDevice",
    "Detector",
    "CameraAssembly",
    "EphysAssembly",
];

fn m(name: &str) -> TypeDescriptor {
    TypeDescriptor::model(name)
}

fn list(name: &str) -> TypeDescriptor {
    TypeDescriptor::list_of(m(name))
}

fn maybe(inner: TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor::optional_of(inner)
}

fn req(name: &str, descriptor: TypeDescriptor) -> FieldSpec {
    FieldSpec::required(name, descriptor)
}

fn opt(name: &str, descriptor: TypeDescriptor) -> FieldSpec {
    FieldSpec::optional(name, descriptor)
}

fn object(fields: Vec<FieldSpec>) -> ModelSchema {
    ModelSchema::object(fields)
}

fn version_field(model: &str) -> FieldSpec {
    opt("schema_version", m(&format!("{}SchemaVersion", model)))
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct Calibration {
    calibration_date: chrono::DateTime<chrono::FixedOffset>,
    device_name: String,
    description: String,
    #[serde(default)]
    input: serde_json::Value,
    #[serde(default)]
    output: serde_json::Value,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct Maintenance {
    maintenance_date: chrono::DateTime<chrono::FixedOffset>,
    device_name: String,
    description: String,
}

/// Enumerations and literal-valued models
fn enum_models() -> Vec<(String, ModelSchema)> {
    let mut models = vec![
        ("Sex", ModelSchema::one_of(["Male", "Female"])),
        ("DataLevel", ModelSchema::one_of(["raw", "derived"])),
        (
            "Group",
            ModelSchema::one_of(["behavior", "ephys", "MSMA", "NBA", "ophys"]),
        ),
        ("MassUnit", ModelSchema::one_of(["kg", "g", "mg", "ug", "ng"])),
        ("VolumeUnit", ModelSchema::one_of(["L", "mL", "uL", "nL"])),
        (
            "ImagingInstrumentType",
            ModelSchema::one_of([
                "confocal",
                "diSPIM",
                "exaSPIM",
                "ECephys",
                "Intravital",
                "mesoSPIM",
                "Other",
                "smartSPIM",
                "Two photon",
            ]),
        ),
        ("Status", ModelSchema::one_of(["Fail", "Pass", "Pending"])),
        (
            "Stage",
            ModelSchema::one_of(["Raw data", "Processing", "Analysis", "Multi-asset"]),
        ),
        (
            "Origin",
            ModelSchema::one_of(["Bregma", "Lambda", "Opposite ear", "Tip of probe", "Other"]),
        ),
        ("SurgeryType", ModelSchema::literal("Surgery")),
        ("TrainingType", ModelSchema::literal("Training")),
        ("WaterRestrictionType", ModelSchema::literal("Water restriction")),
        ("OtherProcedureType", ModelSchema::literal("Other")),
    ]
    .into_iter()
    .map(|(name, schema)| (name.to_string(), schema))
    .collect::<Vec<_>>();

    for (_, model, version) in CURRENT_VERSIONS {
        models.push((format!("{}SchemaVersion", model), ModelSchema::literal(version)));
    }
    models
}

/// Second-level object models
fn component_models() -> Vec<(&'static str, ModelSchema)> {
    let device = object(vec![
        req("name", m("str")),
        opt("device_type", m("str")),
        opt("manufacturer", m("Organization")),
        opt("serial_number", maybe(m("str"))),
    ]);

    let mut models = vec![
        (
            "PIDName",
            object(vec![
                req("name", m("str")),
                opt("abbreviation", maybe(m("str"))),
                opt("registry_identifier", maybe(m("str"))),
            ]),
        ),
        ("Species", object(vec![req("name", m("str")), opt("registry_identifier", maybe(m("str")))])),
        ("Organization", object(vec![req("name", m("str")), opt("abbreviation", maybe(m("str")))])),
        ("Platform", object(vec![req("name", m("str")), req("abbreviation", m("str"))])),
        ("Modality", object(vec![req("name", m("str")), req("abbreviation", m("str"))])),
        (
            "Funding",
            object(vec![
                req("funder", m("Organization")),
                opt("grant_number", maybe(m("str"))),
                opt("fundee", maybe(m("str"))),
            ]),
        ),
        (
            "RelatedData",
            object(vec![req("related_data_path", m("str")), req("relation", m("str"))]),
        ),
        ("Software", object(vec![req("name", m("str")), req("version", m("str"))])),
        (
            "Immersion",
            object(vec![req("medium", m("str")), req("refractive_index", m("float"))]),
        ),
        (
            "AcquisitionTile",
            object(vec![
                req("coordinate_transformations", list("any")),
                opt("file_name", maybe(m("str"))),
            ]),
        ),
        (
            "ImageAxis",
            object(vec![
                req("name", m("str")),
                req("dimension", m("int")),
                req("direction", m("str")),
            ]),
        ),
        (
            "ProcessingSteps",
            object(vec![req("channel_name", m("str")), req("process_name", list("str"))]),
        ),
        (
            "Objective",
            object(vec![
                req("name", m("str")),
                req("numerical_aperture", m("float")),
                req("magnification", m("float")),
            ]),
        ),
        ("Com", object(vec![req("hardware_name", m("str")), req("com_port", m("str"))])),
        ("Axis", object(vec![req("name", m("str")), req("direction", m("str"))])),
        (
            "Surgery",
            object(vec![
                req("procedure_type", m("SurgeryType")),
                req("start_date", m("date")),
                req("experimenter_full_name", m("str")),
                req("procedures", list("any")),
            ]),
        ),
        (
            "TrainingProtocol",
            object(vec![
                req("procedure_type", m("TrainingType")),
                req("training_name", m("str")),
                req("protocol_id", m("str")),
                req("start_date", m("date")),
            ]),
        ),
        (
            "WaterRestriction",
            object(vec![
                req("procedure_type", m("WaterRestrictionType")),
                req("iacuc_protocol", m("str")),
                req("target_fraction_weight", m("int")),
                req("minimum_water_per_day", m("float")),
                req("baseline_soak_weight", m("float")),
                req("start_date", m("date")),
            ]),
        ),
        (
            "OtherSubjectProcedure",
            object(vec![
                req("procedure_type", m("OtherProcedureType")),
                req("protocol_id", m("str")),
                req("description", m("str")),
            ]),
        ),
        (
            "DataProcess",
            object(vec![
                req("name", m("str")),
                req("start_date_time", m("datetime")),
                req("end_date_time", m("datetime")),
                req("input_location", m("str")),
                req("output_location", m("str")),
                req("code_url", m("str")),
                opt("software_version", maybe(m("str"))),
                opt("parameters", m("any")),
            ]),
        ),
        (
            "PipelineProcess",
            object(vec![
                req("processor_full_name", m("str")),
                req("data_processes", list("DataProcess")),
            ]),
        ),
        (
            "AnalysisProcess",
            object(vec![
                req("analyst_full_name", m("str")),
                req("description", m("str")),
                req("name", m("str")),
                req("code_url", m("str")),
            ]),
        ),
        (
            "QCStatus",
            object(vec![
                req("evaluator", m("str")),
                req("status", m("Status")),
                req("timestamp", m("datetime")),
            ]),
        ),
        (
            "QCMetric",
            object(vec![
                req("name", m("str")),
                req("value", m("any")),
                opt("status_history", list("QCStatus")),
            ]),
        ),
        (
            "QCEvaluation",
            object(vec![
                req("modality", m("Modality")),
                req("stage", m("Stage")),
                req("name", m("str")),
                req("metrics", list("QCMetric")),
            ]),
        ),
        (
            "Anaesthetic",
            object(vec![
                req("type", m("str")),
                req("duration", m("float")),
                req("level", m("float")),
            ]),
        ),
        (
            "Stream",
            object(vec![
                req("stream_start_time", m("datetime")),
                req("stream_end_time", m("datetime")),
                req("stream_modalities", list("Modality")),
            ]),
        ),
        (
            "StimulusEpoch",
            object(vec![
                req("stimulus_start_time", m("datetime")),
                req("stimulus_end_time", m("datetime")),
                req("stimulus_name", m("str")),
                opt("stimulus_modalities", list("str")),
            ]),
        ),
        (
            "Affine3dTransform",
            object(vec![req("affine_transform", TypeDescriptor::list_of(list("float")))]),
        ),
        (
            "RewardDeliveryConfig",
            object(vec![req("reward_solution", m("str")), req("reward_spouts", list("any"))]),
        ),
        (
            "BackgroundStrain",
            object(vec![
                req("background_strain", m("str")),
                opt("stock_number", maybe(m("str"))),
            ]),
        ),
        (
            "BreedingInfo",
            object(vec![
                req("breeding_group", m("str")),
                req("maternal_id", m("str")),
                req("maternal_genotype", m("str")),
                req("paternal_id", m("str")),
                req("paternal_genotype", m("str")),
            ]),
        ),
        (
            "WellnessReport",
            object(vec![req("date", m("date")), req("report", m("str"))]),
        ),
        (
            "Housing",
            object(vec![
                opt("cage_id", maybe(m("str"))),
                opt("home_cage_enrichment", list("str")),
            ]),
        ),
        ("Device", device.clone()),
    ];
    models.extend(DEVICE_ALIASES.iter().map(|name| (*name, device.clone())));
    models
}

/// Core section models
fn section_models() -> Vec<(&'static str, ModelSchema)> {
    vec![
        (
            "Acquisition",
            object(vec![
                version_field("Acquisition"),
                req("experimenter_full_name", list("str")),
                req("specimen_id", m("str")),
                opt("subject_id", maybe(m("str"))),
                req("instrument_id", m("str")),
                opt("calibrations", list("Calibration")),
                opt("maintenance", list("Maintenance")),
                req("session_start_time", m("datetime")),
                req("session_end_time", m("datetime")),
                req("tiles", list("AcquisitionTile")),
                req("axes", list("ImageAxis")),
                req("chamber_immersion", m("Immersion")),
                opt("sample_immersion", maybe(m("Immersion"))),
                opt("processing_steps", list("ProcessingSteps")),
                opt("software", maybe(list("Software"))),
            ]),
        ),
        (
            "DataDescription",
            object(vec![
                version_field("DataDescription"),
                req("creation_time", m("datetime")),
                req("name", m("str")),
                req("institution", m("Organization")),
                req("funding_source", list("Funding")),
                req("data_level", m("DataLevel")),
                opt("group", maybe(m("Group"))),
                req("investigators", list("PIDName")),
                opt("project_name", maybe(m("str"))),
                req("modality", list("Modality")),
                req("platform", m("Platform")),
                req("subject_id", m("str")),
                opt("related_data", list("RelatedData")),
                opt("data_summary", maybe(m("str"))),
            ]),
        ),
        (
            "Instrument",
            object(vec![
                version_field("Instrument"),
                opt("instrument_id", maybe(m("str"))),
                req("modification_date", m("date")),
                req("instrument_type", m("ImagingInstrumentType")),
                req("manufacturer", m("Organization")),
                opt("optical_tables", list("OpticalTable")),
                opt("enclosure", maybe(m("Enclosure"))),
                req("objectives", list("Objective")),
                opt("detectors", list("Detector")),
                opt("light_sources", list("LightSource")),
                opt("lenses", list("Lens")),
                opt("fluorescence_filters", list("Filter")),
                opt("motorized_stages", list("MotorizedStage")),
                opt("scanning_stages", list("ScanningStage")),
                opt("additional_devices", list("AdditionalImagingDevice")),
                opt("calibration_date", maybe(m("date"))),
                opt("com_ports", list("Com")),
                opt("daqs", list("DAQDevice")),
            ]),
        ),
        (
            "Procedures",
            object(vec![
                version_field("Procedures"),
                req("subject_id", m("str")),
                opt("subject_procedures", subject_procedures()),
                opt("specimen_procedures", list("any")),
            ]),
        ),
        (
            "Processing",
            object(vec![
                version_field("Processing"),
                req("processing_pipeline", m("PipelineProcess")),
                opt("analyses", list("AnalysisProcess")),
            ]),
        ),
        (
            "QualityControl",
            object(vec![
                version_field("QualityControl"),
                req("evaluations", list("QCEvaluation")),
            ]),
        ),
        (
            "Rig",
            object(vec![
                version_field("Rig"),
                req("rig_id", m("str")),
                req("modification_date", m("date")),
                req("mouse_platform", m("MousePlatform")),
                opt("stimulus_devices", list("StimulusDevice")),
                opt("cameras", list("CameraAssembly")),
                opt("enclosure", maybe(m("Enclosure"))),
                opt("ephys_assemblies", list("EphysAssembly")),
                opt("fiber_assemblies", list("FiberAssembly")),
                opt("laser_assemblies", list("LaserAssembly")),
                opt("patch_cords", list("Patch")),
                opt("light_sources", list("LightSource")),
                opt("detectors", list("Detector")),
                opt("objectives", list("Objective")),
                opt("filters", list("Filter")),
                opt("lenses", list("Lens")),
                opt("digital_micromirror_devices", list("DigitalMicromirrorDevice")),
                opt("polygonal_scanners", list("PolygonalScanner")),
                opt("additional_devices", list("Device")),
                opt("daqs", list("RigDAQDevice")),
                req("calibrations", list("Calibration")),
                opt("origin", maybe(m("Origin"))),
                opt("rig_axes", maybe(list("Axis"))),
                req("modalities", list("Modality")),
            ]),
        ),
        (
            "Session",
            object(vec![
                version_field("Session"),
                req("experimenter_full_name", list("str")),
                req("session_start_time", m("datetime")),
                opt("session_end_time", maybe(m("datetime"))),
                req("session_type", m("str")),
                req("rig_id", m("str")),
                req("subject_id", m("str")),
                opt("calibrations", list("Calibration")),
                opt("maintenance", list("Maintenance")),
                opt("weight_unit", m("MassUnit")),
                opt("anaesthesia", maybe(m("Anaesthetic"))),
                req("data_streams", list("Stream")),
                opt("stimulus_epochs", list("StimulusEpoch")),
                opt("headframe_registration", maybe(m("Affine3dTransform"))),
                opt("reward_delivery", maybe(m("RewardDeliveryConfig"))),
                opt("reward_consumed_unit", m("VolumeUnit")),
            ]),
        ),
        (
            "Subject",
            object(vec![
                version_field("Subject"),
                req("subject_id", m("str")),
                req("sex", m("Sex")),
                req("date_of_birth", m("date")),
                opt("genotype", maybe(m("str"))),
                req("species", m("Species")),
                opt("alleles", list("PIDName")),
                opt("background_strain", maybe(m("BackgroundStrain"))),
                opt("breeding_info", maybe(m("BreedingInfo"))),
                req("source", m("Organization")),
                opt("rrid", maybe(m("PIDName"))),
                opt("wellness_reports", list("WellnessReport")),
                opt("housing", maybe(m("Housing"))),
            ]),
        ),
    ]
}

fn subject_procedures() -> TypeDescriptor {
    TypeDescriptor::list_of(TypeDescriptor::union_of(vec![
        m("Surgery"),
        m("TrainingProtocol"),
        m("WaterRestriction"),
        m("OtherSubjectProcedure"),
    ]))
}

/// Every builtin model, keyed by registry name
pub fn builtin_models() -> Vec<(String, Arc<dyn ModelValidator>)> {
    let mut models: Vec<(String, Arc<dyn ModelValidator>)> = PrimitiveModel::ALL
        .into_iter()
        .map(|p| (p.name().to_string(), Arc::new(p) as Arc<dyn ModelValidator>))
        .collect();

    models.push((
        "Calibration".to_string(),
        Arc::new(TypedModel::<Calibration>::new("Calibration")) as Arc<dyn ModelValidator>,
    ));
    models.push((
        "Maintenance".to_string(),
        Arc::new(TypedModel::<Maintenance>::new("Maintenance")) as Arc<dyn ModelValidator>,
    ));

    for (name, schema) in enum_models() {
        models.push((name, Arc::new(schema) as Arc<dyn ModelValidator>));
    }
    for (name, schema) in component_models().into_iter().chain(section_models()) {
        models.push((name.to_string(), Arc::new(schema) as Arc<dyn ModelValidator>));
    }
    models
}

/// Core section → model, and each section's second-level fields
pub fn builtin_sections() -> SectionDescriptors {
    use CoreField::*;

    let mut sections = SectionDescriptors::new();
    for (field, model, _) in CURRENT_VERSIONS {
        sections = sections.with_top_level(field, m(model));
    }

    let nested: Vec<(CoreField, &str, TypeDescriptor)> = vec![
        (Acquisition, "calibrations", list("Calibration")),
        (Acquisition, "maintenance", list("Maintenance")),
        (Acquisition, "tiles", list("AcquisitionTile")),
        (Acquisition, "axes", list("ImageAxis")),
        (Acquisition, "chamber_immersion", m("Immersion")),
        (Acquisition, "sample_immersion", maybe(m("Immersion"))),
        (Acquisition, "processing_steps", list("ProcessingSteps")),
        (Acquisition, "software", maybe(list("Software"))),
        (DataDescription, "data_level", m("DataLevel")),
        (DataDescription, "group", maybe(m("Group"))),
        (DataDescription, "investigators", list("PIDName")),
        (DataDescription, "modality", list("Modality")),
        (DataDescription, "related_data", list("RelatedData")),
        (DataDescription, "platform", m("Platform")),
        (DataDescription, "funding_source", list("Funding")),
        (DataDescription, "institution", m("Organization")),
        (Instrument, "instrument_type", m("ImagingInstrumentType")),
        (Instrument, "manufacturer", m("Organization")),
        (Instrument, "optical_tables", list("OpticalTable")),
        (Instrument, "enclosure", maybe(m("Enclosure"))),
        (Instrument, "objectives", list("Objective")),
        (Instrument, "detectors", list("Detector")),
        (Instrument, "light_sources", list("LightSource")),
        (Instrument, "lenses", list("Lens")),
        (Instrument, "fluorescence_filters", list("Filter")),
        (Instrument, "motorized_stages", list("MotorizedStage")),
        (Instrument, "scanning_stages", list("ScanningStage")),
        (Instrument, "additional_devices", list("AdditionalImagingDevice")),
        (Instrument, "calibration_date", maybe(m("date"))),
        (Instrument, "com_ports", list("Com")),
        (Instrument, "daqs", list("DAQDevice")),
        (Procedures, "subject_procedures", subject_procedures()),
        (Processing, "processing_pipeline", m("PipelineProcess")),
        (Processing, "analyses", list("AnalysisProcess")),
        (QualityControl, "overall_status", list("QCStatus")),
        (QualityControl, "evaluations", list("QCEvaluation")),
        (Rig, "modification_date", m("date")),
        (Rig, "mouse_platform", m("MousePlatform")),
        (Rig, "stimulus_devices", list("StimulusDevice")),
        (Rig, "cameras", list("CameraAssembly")),
        (Rig, "enclosure", maybe(m("Enclosure"))),
        (Rig, "ephys_assemblies", list("EphysAssembly")),
        (Rig, "fiber_assemblies", list("FiberAssembly")),
        (Rig, "stick_microscopes", list("CameraAssembly")),
        (Rig, "laser_assemblies", list("LaserAssembly")),
        (Rig, "patch_cords", list("Patch")),
        (Rig, "light_sources", list("LightSource")),
        (Rig, "detectors", list("Detector")),
        (Rig, "objectives", list("Objective")),
        (Rig, "filters", list("Filter")),
        (Rig, "lenses", list("Lens")),
        (Rig, "digital_micromirror_devices", list("DigitalMicromirrorDevice")),
        (Rig, "polygonal_scanners", list("PolygonalScanner")),
        (Rig, "additional_devices", list("Device")),
        (Rig, "daqs", list("RigDAQDevice")),
        (Rig, "calibrations", list("Calibration")),
        (Rig, "origin", maybe(m("Origin"))),
        (Rig, "rig_axes", maybe(list("Axis"))),
        (Rig, "modalities", list("Modality")),
        (Session, "calibrations", list("Calibration")),
        (Session, "maintenance", list("Maintenance")),
        (Session, "weight_unit", m("MassUnit")),
        (Session, "anaesthesia", maybe(m("Anaesthetic"))),
        (Session, "data_streams", list("Stream")),
        (Session, "stimulus_epochs", list("StimulusEpoch")),
        (Session, "headframe_registration", maybe(m("Affine3dTransform"))),
        (Session, "reward_delivery", maybe(m("RewardDeliveryConfig"))),
        (Session, "reward_consumed_unit", m("VolumeUnit")),
        (Subject, "date_of_birth", m("date")),
        (Subject, "species", m("Species")),
        (Subject, "alleles", list("PIDName")),
        (Subject, "background_strain", maybe(m("BackgroundStrain"))),
        (Subject, "breeding_info", maybe(m("BreedingInfo"))),
        (Subject, "source", m("Organization")),
        (Subject, "rrid", maybe(m("PIDName"))),
        (Subject, "wellness_reports", list("WellnessReport")),
        (Subject, "housing", maybe(m("Housing"))),
    ];
    for (section, field, descriptor) in nested {
        sections = sections.with_nested(section, field, descriptor);
    }
    sections
}

pub fn builtin_versions() -> VersionTable {
    let mut table = VersionTable::new();
    for (field, _, version) in CURRENT_VERSIONS {
        table.insert(field, version);
    }
    table
}
