/*
 * Metadata Engine
 *
 * Facade over the frozen registries. Cheap to clone (everything behind
 * Arc) and safe to share across threads; no method mutates state.
 *
 *   EngineConfig::build() → MetadataEngine
 *     ├─ resolver()    → RequirementResolver
 *     ├─ classifier()  → FieldClassifier
 *     └─ processor()   → BatchProcessor (parallel settings + pool)
 *
 * Diagnostics go to the injected sink (TracingSink unless replaced).
 */

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::parallel::ThreadPool;
use crate::config::{ConfigResult, EngineConfig, ParallelConfig};
use crate::errors::{EngineError, Result};
use crate::features::batch::{self, BatchProcessor, ClassificationMatrix, SectionRecord};
use crate::features::classification::{FieldClassifier, FieldOutcome, ParentSection};
use crate::features::reporting::{
    self, ExportFilter, ExportRow, RecordFilter, RecordInfo, RecordReport, StateSummary,
};
use crate::features::requirements::{
    ModalityAliases, ModalityTag, RequirementRegistry, RequirementResolver,
};
use crate::features::schema::{SchemaRegistry, SectionDescriptors, StructuralValidator, VersionTable};
use crate::shared::diagnostics::{DiagnosticSink, TracingSink};
use crate::shared::models::{as_record, record_id, CoreField, FileRequirement, MetaState};

const TOP_LEVEL: &str = "<top level>";

#[derive(Clone)]
pub struct MetadataEngine {
    requirements: Arc<RequirementRegistry>,
    aliases: Arc<ModalityAliases>,
    schemas: Arc<SchemaRegistry>,
    sections: Arc<SectionDescriptors>,
    versions: Arc<VersionTable>,
    parallel: ParallelConfig,
    pool: Option<Arc<ThreadPool>>,
    sink: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for MetadataEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataEngine")
            .field("modalities", &self.requirements.len())
            .field("models", &self.schemas.len())
            .field("parallel", &self.parallel)
            .field("dedicated_pool", &self.pool.is_some())
            .finish()
    }
}

impl MetadataEngine {
    pub(crate) fn from_config(config: EngineConfig, pool: Option<ThreadPool>) -> Self {
        Self {
            requirements: Arc::new(config.requirements),
            aliases: Arc::new(config.aliases),
            schemas: Arc::new(config.schemas),
            sections: Arc::new(config.sections),
            versions: Arc::new(config.versions),
            parallel: config.parallel,
            pool: pool.map(Arc::new),
            sink: Arc::new(TracingSink),
        }
    }

    /// Engine over the builtin configuration
    pub fn builtin() -> ConfigResult<Self> {
        EngineConfig::builtin().build()
    }

    /// Route diagnostics to `sink` instead of `tracing`
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn parallel(&self) -> &ParallelConfig {
        &self.parallel
    }

    pub fn requirements(&self) -> &RequirementRegistry {
        &self.requirements
    }

    pub fn aliases(&self) -> &ModalityAliases {
        &self.aliases
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    pub fn sections(&self) -> &SectionDescriptors {
        &self.sections
    }

    pub fn resolver(&self) -> RequirementResolver<'_> {
        RequirementResolver::new(&self.requirements, &self.aliases, self.sink.as_ref())
    }

    pub fn validator(&self) -> StructuralValidator<'_> {
        StructuralValidator::new(&self.schemas, &self.sections, &self.versions, self.sink.as_ref())
    }

    pub fn classifier(&self) -> FieldClassifier<'_> {
        FieldClassifier::new(self.resolver(), self.validator())
    }

    pub fn processor(&self) -> BatchProcessor<'_> {
        BatchProcessor::new(self.classifier(), &self.parallel).with_pool(self.pool.as_deref())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Single record
    // ═══════════════════════════════════════════════════════════════════

    /// Merged requirement per field name for a set of modalities
    pub fn resolve(
        &self,
        modalities: &[ModalityTag],
        field_names: &[&str],
    ) -> FxHashMap<String, FileRequirement> {
        self.resolver().resolve(modalities, field_names)
    }

    /// State of one field; `parent` marks `record` as an already projected section
    pub fn classify(&self, field: &str, record: &Value, parent: Option<ParentSection>) -> MetaState {
        self.classifier().classify(field, record, parent)
    }

    /// Classify `section` or `section.field` of a full record.
    ///
    /// A dotted path must name a core section and one of its declared
    /// second-level fields.
    pub fn classify_path(&self, path: &str, record: &Value) -> Result<FieldOutcome> {
        let classifier = self.classifier();
        let Some((section, field)) = path.split_once('.') else {
            return Ok(classifier.classify_outcome(path, record, None));
        };

        let section: CoreField = section
            .parse()
            .map_err(|_| EngineError::unknown_field(TOP_LEVEL, section))?;
        if self.sections.descriptor(field, Some(section)).is_none() {
            return Err(EngineError::unknown_field(section.as_str(), field));
        }

        let requirement = match as_record(record) {
            Some(map) if !map.is_empty() => self
                .resolver()
                .resolve_document(&record_id(record, 0), record)
                .get(section),
            _ => FileRequirement::Required,
        };
        let value = record.get(section.as_str()).unwrap_or(&Value::Null);
        Ok(classifier.classify_outcome(field, value, Some(ParentSection::new(section, requirement))))
    }

    /// Every core and second-level field of one record, with reasons
    pub fn explain(&self, record: &Value, index: usize) -> RecordReport {
        reporting::explain_record(&self.classifier(), &self.sections, record, index)
    }

    /// `(expected, excluded)` core fields for one modality
    pub fn expected_fields(&self, modality: Option<&ModalityTag>) -> (Vec<CoreField>, Vec<CoreField>) {
        reporting::expected_fields(&self.requirements, &self.aliases, modality)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Batches
    // ═══════════════════════════════════════════════════════════════════

    /// One row per record, one column per field
    pub fn classify_all(
        &self,
        records: &[Value],
        fields: &[&str],
        parent: Option<ParentSection>,
    ) -> ClassificationMatrix {
        self.processor().classify_all(records, fields, parent)
    }

    pub fn classify_top_level(&self, records: &[Value], fields: &[&str]) -> ClassificationMatrix {
        self.processor().classify_top_level(records, fields)
    }

    /// All nine core fields of every record
    pub fn classify_core(&self, records: &[Value]) -> ClassificationMatrix {
        self.classify_top_level(records, &CoreField::names())
    }

    pub fn project_section(&self, records: &[Value], section: CoreField) -> Vec<SectionRecord> {
        batch::project_section(records, section, &self.resolver())
    }

    /// Second-level fields of `section`, from full records
    pub fn classify_section(&self, records: &[Value], section: CoreField) -> ClassificationMatrix {
        let projected = self.project_section(records, section);
        self.processor()
            .classify_sections(&projected, section, &self.sections.nested_fields(section))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reporting
    // ═══════════════════════════════════════════════════════════════════

    pub fn record_infos(&self, records: &[Value]) -> Vec<RecordInfo> {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| RecordInfo::from_record(record, index, &self.aliases))
            .collect()
    }

    /// Core-field state counts over the records `filter` keeps
    pub fn summarize(&self, records: &[Value], filter: &RecordFilter) -> StateSummary {
        let matrix = self.classify_core(records);
        let infos = self.record_infos(records);
        StateSummary::from_matrix_filtered(&matrix, |row| {
            infos.get(row).map_or(false, |info| filter.matches(info))
        })
    }

    /// Identifying rows of records whose `field` (or `section.field`)
    /// falls in `filter`'s state group
    pub fn export(
        &self,
        records: &[Value],
        field: &str,
        filter: ExportFilter,
    ) -> Result<Vec<ExportRow>> {
        let (matrix, column) = match field.split_once('.') {
            None => {
                let core: CoreField = field
                    .parse()
                    .map_err(|_| EngineError::unknown_field(TOP_LEVEL, field))?;
                (self.classify_top_level(records, &[core.as_str()]), field)
            }
            Some((section, nested)) => {
                let section: CoreField = section
                    .parse()
                    .map_err(|_| EngineError::unknown_field(TOP_LEVEL, section))?;
                if self.sections.descriptor(nested, Some(section)).is_none() {
                    return Err(EngineError::unknown_field(section.as_str(), nested));
                }
                let projected = self.project_section(records, section);
                (
                    self.processor().classify_sections(&projected, section, &[nested]),
                    nested,
                )
            }
        };
        Ok(reporting::export_rows(
            &matrix,
            &self.record_infos(records),
            column,
            filter,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::diagnostics::{CollectingSink, Diagnostic};
    use serde_json::json;

    fn engine_with_sink() -> (MetadataEngine, Arc<CollectingSink>) {
        let sink = Arc::new(CollectingSink::new());
        let engine = MetadataEngine::builtin().unwrap().with_sink(sink.clone());
        (engine, sink)
    }

    #[test]
    fn test_classify_path() {
        let (engine, _) = engine_with_sink();
        let record = json!({
            "data_description": {"modality": [{"abbreviation": "SPIM"}]},
            "subject": {"subject_id": "1", "species": {"name": "Mus musculus"}}
        });

        let top = engine.classify_path("session", &record).unwrap();
        assert_eq!(top.state, MetaState::Excluded);

        let nested = engine.classify_path("subject.species", &record).unwrap();
        assert_eq!(nested.state, MetaState::Valid);

        let err = engine.classify_path("subject.tail_length", &record).unwrap_err();
        assert!(matches!(err, EngineError::UnknownField { ref section, .. } if section == "subject"));
        assert!(engine.classify_path("subjekt.species", &record).is_err());
    }

    #[test]
    fn test_diagnostics_reach_injected_sink() {
        let (engine, sink) = engine_with_sink();
        let record = json!({"subject": {"subject_id": "1"}});
        assert_eq!(engine.classify("rig", &record, None), MetaState::Missing);
        assert!(sink
            .warnings()
            .iter()
            .any(|d| matches!(d, Diagnostic::NoModalities { .. })));
    }

    #[test]
    fn test_summarize_with_filter() {
        let (engine, _) = engine_with_sink();
        let records = vec![
            json!({"_id": "a", "name": "ecephys_1_2024-01-01_10-00-00",
                   "data_description": {"modality": ["ecephys"]}, "subject": {"subject_id": "1"}}),
            json!({"_id": "b", "name": "ecephys_1_2024-01-01_10-00-00_sorted_2024-02-01",
                   "data_description": {"modality": ["ecephys"]}}),
        ];
        let all = engine.summarize(&records, &RecordFilter::all());
        assert_eq!(all.records(), 2);
        assert_eq!(all.count("subject", MetaState::Present), 1);
        assert_eq!(all.count("subject", MetaState::Missing), 1);

        let raw = engine.summarize(&records, &RecordFilter::all().derived(false));
        assert_eq!(raw.records(), 1);
        assert_eq!(raw.count("acquisition", MetaState::Excluded), 1);
    }

    #[test]
    fn test_export_missing_subjects() {
        let (engine, _) = engine_with_sink();
        let records = vec![
            json!({"_id": "a", "location": "s3://a", "data_description": {"modality": ["ecephys"]}}),
            json!({"_id": "b", "location": "s3://b", "data_description": {"modality": ["ecephys"]},
                   "subject": {"subject_id": "1", "date_of_birth": "2023-05-01"}}),
        ];
        let rows = engine.export(&records, "subject", ExportFilter::Missing).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "a");
        assert_eq!(rows[0].location.as_deref(), Some("s3://a"));

        let nested = engine
            .export(&records, "subject.date_of_birth", ExportFilter::Present)
            .unwrap();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].id, "b");

        assert!(engine.export(&records, "subjects", ExportFilter::Missing).is_err());
    }

    #[test]
    fn test_classify_section_uses_declared_fields() {
        let (engine, _) = engine_with_sink();
        let records = vec![json!({
            "_id": "a",
            "data_description": {"modality": ["ecephys"]},
            "subject": {"subject_id": "1", "date_of_birth": "2024-01-01"}
        })];
        let matrix = engine.classify_section(&records, CoreField::Subject);
        assert_eq!(matrix.section(), Some(CoreField::Subject));
        assert_eq!(
            matrix.fields().len(),
            engine.sections().nested_fields(CoreField::Subject).len()
        );
        assert_eq!(matrix.lookup("a", "date_of_birth"), Some(MetaState::Valid));
        assert_eq!(matrix.lookup("a", "species"), Some(MetaState::Missing));
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MetadataEngine>();
    }
}
