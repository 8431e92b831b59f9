//! Test data builders

use metastate_engine::config::{EngineConfig, ParallelConfig};
use metastate_engine::features::requirements::RequirementTable;
use metastate_engine::{CollectingSink, CoreField, FileRequirement, MetadataEngine};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Builder for a single metadata record
#[derive(Debug, Default, Clone)]
pub struct RecordBuilder {
    fields: Map<String, Value>,
    modalities: Vec<Value>,
    modality_key: Option<&'static str>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.fields.insert("_id".into(), json!(id));
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.fields.insert("name".into(), json!(name));
        self
    }

    /// Declare a modality as `{"abbreviation": tag}`
    pub fn modality(mut self, tag: &str) -> Self {
        self.modalities.push(json!({"name": tag, "abbreviation": tag}));
        self
    }

    /// Declare a modality as a bare string
    pub fn modality_str(mut self, tag: &str) -> Self {
        self.modalities.push(json!(tag));
        self
    }

    /// Use `data_description.modalities` instead of the legacy `modality`
    pub fn plural_modality_key(mut self) -> Self {
        self.modality_key = Some("modalities");
        self
    }

    pub fn section(mut self, field: CoreField, value: Value) -> Self {
        self.fields.insert(field.as_str().into(), value);
        self
    }

    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn build(mut self) -> Value {
        if !self.modalities.is_empty() {
            let key = self.modality_key.unwrap_or("modality");
            let description = self
                .fields
                .entry("data_description")
                .or_insert_with(|| json!({}));
            if let Some(map) = description.as_object_mut() {
                map.insert(key.into(), Value::Array(self.modalities));
            }
        }
        Value::Object(self.fields)
    }
}

/// Builtin engine reporting into a collecting sink
pub fn engine_with_sink() -> (MetadataEngine, Arc<CollectingSink>) {
    engine_from_config(EngineConfig::builtin())
}

pub fn engine_from_config(config: EngineConfig) -> (MetadataEngine, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let engine = config
        .build()
        .expect("test configuration must build")
        .with_sink(sink.clone());
    (engine, sink)
}

/// Builtin engine with rayon disabled
pub fn sequential_engine() -> MetadataEngine {
    EngineConfig::builtin()
        .with_parallel(ParallelConfig::sequential())
        .build()
        .expect("sequential configuration must build")
}

/// Builtin engine on a dedicated pool with small batches
pub fn parallel_engine(workers: usize, batch_size: usize) -> MetadataEngine {
    EngineConfig::builtin()
        .with_parallel(
            ParallelConfig::default()
                .num_workers(workers)
                .batch_size(batch_size),
        )
        .build()
        .expect("parallel configuration must build")
}

/// Total table with every core field set to `default`, then overrides
pub fn table(default: FileRequirement, overrides: &[(CoreField, FileRequirement)]) -> RequirementTable {
    overrides
        .iter()
        .fold(RequirementTable::uniform(default), |table, (field, requirement)| {
            table.with(*field, *requirement)
        })
}
