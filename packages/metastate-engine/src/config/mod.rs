//! Engine configuration
//!
//! Two tiers:
//! - Builtin: requirement tables, aliases, models, descriptors and schema
//!   versions shipped with the crate (`EngineConfig::builtin()`)
//! - YAML overlay: a versioned file whose entries replace or extend the
//!   builtin ones (`EngineConfig::from_yaml`)
//!
//! # Examples
//!
//! ```rust,ignore
//! use metastate_engine::config::EngineConfig;
//!
//! let engine = EngineConfig::builtin().build()?;
//! let engine = EngineConfig::from_yaml("lab-modalities.yaml")?.build()?;
//! ```
//!
//! Registries are validated in `build()` and are immutable afterwards.

pub mod error;
pub mod io;
pub mod parallel;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{EngineConfigV1, SectionsV1, SUPPORTED_VERSIONS};
pub use parallel::ParallelConfig;
pub use validation::{ReferenceValidator, Validatable, ValidatableCollection};

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

use crate::engine::MetadataEngine;
use crate::features::requirements::{
    builtin_aliases, builtin_registry, ModalityAliases, ModalityTag, RequirementRegistry,
    RequirementTable,
};
use crate::features::schema::{
    builtin_sections, builtin_versions, ModelSchema, SchemaRegistry, SectionDescriptors,
    TypeDescriptor, VersionTable,
};

static BUILTIN: Lazy<EngineConfig> = Lazy::new(|| EngineConfig {
    requirements: builtin_registry(),
    aliases: builtin_aliases(),
    schemas: SchemaRegistry::builtin(),
    sections: builtin_sections(),
    versions: builtin_versions(),
    parallel: ParallelConfig::default(),
    declared_models: BTreeMap::new(),
});

/// Everything the engine reads, before it is frozen
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub requirements: RequirementRegistry,
    pub aliases: ModalityAliases,
    pub schemas: SchemaRegistry,
    pub sections: SectionDescriptors,
    pub versions: VersionTable,
    pub parallel: ParallelConfig,
    /// Declarative models added on top of the builtin ones (exported by `to_yaml`)
    declared_models: BTreeMap<String, ModelSchema>,
}

impl EngineConfig {
    /// Builtin configuration (built once per process)
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Configuration with nothing registered
    pub fn empty() -> Self {
        Self {
            requirements: RequirementRegistry::new(),
            aliases: ModalityAliases::new(),
            schemas: SchemaRegistry::new(),
            sections: SectionDescriptors::new(),
            versions: VersionTable::new(),
            parallel: ParallelConfig::default(),
            declared_models: BTreeMap::new(),
        }
    }

    /// Load a YAML file and overlay it onto the builtin configuration
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading engine configuration");
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Err(ConfigError::MissingVersion);
        }
        let export: EngineConfigV1 = serde_yaml::from_str(yaml)?;
        let mut config = Self::builtin();
        config.apply(export)?;
        Ok(config)
    }

    /// Overlay a parsed document; its entries win over ours
    pub fn apply(&mut self, export: EngineConfigV1) -> ConfigResult<()> {
        export.check_version()?;

        let requirements = export.requirement_registry()?;
        let aliases = export.alias_table()?;
        let versions = export.version_table()?;
        let sections = export.section_descriptors()?;

        info!(
            modalities = requirements.len(),
            aliases = aliases.len(),
            models = export.models.len(),
            "applying configuration overlay"
        );

        self.requirements.extend(&requirements);
        self.aliases.extend(&aliases);
        self.versions.extend(versions);
        self.sections.extend(sections);
        for (name, schema) in export.models {
            self.register_model(name, schema);
        }
        if let Some(parallel) = export.parallel {
            self.parallel = parallel;
        }
        Ok(())
    }

    pub fn with_requirements(
        mut self,
        modality: impl Into<ModalityTag>,
        table: RequirementTable,
    ) -> Self {
        self.requirements.insert(modality, table);
        self
    }

    pub fn with_alias(mut self, legacy: impl Into<ModalityTag>, canonical: impl Into<ModalityTag>) -> Self {
        self.aliases.insert(legacy, canonical);
        self
    }

    pub fn with_model(mut self, name: impl Into<String>, schema: ModelSchema) -> Self {
        self.register_model(name.into(), schema);
        self
    }

    /// Declare a second-level field from shorthand (`List[Calibration]`)
    pub fn with_nested_field(
        mut self,
        section: &str,
        field: impl Into<String>,
        descriptor: &str,
    ) -> ConfigResult<Self> {
        let section = io::parse_core_field(section, "sections.nested")?;
        let descriptor: TypeDescriptor = descriptor.parse()?;
        self.sections = self.sections.with_nested(section, field, descriptor);
        Ok(self)
    }

    pub fn with_parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    fn register_model(&mut self, name: String, schema: ModelSchema) {
        self.schemas.register(name.clone(), schema.clone());
        self.declared_models.insert(name, schema);
    }

    /// Export the declarative part as a v1 document.
    ///
    /// Models implemented in Rust are not exported; loading the result
    /// overlays the builtin configuration, which already has them.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = EngineConfigV1 {
            version: Some(1),
            modalities: self
                .requirements
                .iter()
                .map(|(tag, table)| (tag.as_str().to_string(), io::table_to_yaml_map(table)))
                .collect(),
            aliases: self
                .aliases
                .iter()
                .map(|(legacy, canonical)| (legacy.to_string(), canonical.as_str().to_string()))
                .collect(),
            schema_versions: self
                .versions
                .iter()
                .map(|(field, version)| (field.as_str().to_string(), version.to_string()))
                .collect(),
            models: self.declared_models.clone(),
            sections: Some(SectionsV1::from(&self.sections)),
            parallel: Some(self.parallel.clone()),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }

    /// Validate, build the worker pool, and freeze into an engine
    pub fn build(self) -> ConfigResult<MetadataEngine> {
        self.validate()?;
        let pool = self.parallel.build_pool()?;
        info!(
            modalities = self.requirements.len(),
            models = self.schemas.len(),
            workers = self.parallel.effective_workers(),
            "metadata engine ready"
        );
        Ok(MetadataEngine::from_config(self, pool))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Validatable for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.parallel.validate()?;
        self.requirements.validate()?;
        for (name, schema) in &self.declared_models {
            schema.validate().map_err(|err| match err {
                ConfigError::Validation(reason) => {
                    ConfigError::Validation(format!("model '{}': {}", name, reason))
                }
                other => other,
            })?;
        }
        ReferenceValidator {
            registry: &self.schemas,
            sections: &self.sections,
        }
        .validate()
    }

    fn config_name(&self) -> &'static str {
        "engine"
    }
}
