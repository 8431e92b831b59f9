//! Configuration I/O (YAML loading)
//!
//! Defines the YAML schema types and their conversion into the typed
//! registries. Keys naming core sections are checked here so a typo comes
//! back with a "did you mean" hint instead of a bare serde message.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::{ConfigError, ConfigResult};
use super::ParallelConfig;
use crate::features::requirements::{ModalityAliases, RequirementRegistry, RequirementTable};
use crate::features::schema::{ModelSchema, SectionDescriptors, TypeDescriptor, VersionTable};
use crate::shared::models::{CoreField, FileRequirement};

/// Schema versions this loader understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// YAML Schema v1
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfigV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// modality → core field → required | optional | excluded
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub modalities: BTreeMap<String, BTreeMap<String, FileRequirement>>,

    /// legacy modality → canonical modality
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aliases: BTreeMap<String, String>,

    /// core field → current schema version
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schema_versions: BTreeMap<String, String>,

    /// Declarative models, by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub models: BTreeMap<String, ModelSchema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<SectionsV1>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}

/// Descriptor maps as written in YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionsV1 {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub top_level: BTreeMap<String, TypeDescriptor>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nested: BTreeMap<String, BTreeMap<String, TypeDescriptor>>,
}

/// Parse a core section name, suggesting the closest one on failure
pub fn parse_core_field(name: &str, section: &str) -> ConfigResult<CoreField> {
    name.parse().map_err(|_| {
        ConfigError::unknown_field_with_suggestion(
            name,
            section,
            CoreField::names().into_iter().map(String::from).collect(),
        )
    })
}

impl EngineConfigV1 {
    pub fn check_version(&self) -> ConfigResult<()> {
        match self.version {
            None => Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => Ok(()),
        }
    }

    pub fn requirement_registry(&self) -> ConfigResult<RequirementRegistry> {
        let mut registry = RequirementRegistry::new();
        for (modality, entries) in &self.modalities {
            if modality.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "modality names must not be empty".to_string(),
                ));
            }
            let scope = format!("modalities.{}", modality);
            let mut table = RequirementTable::new();
            for (field, requirement) in entries {
                table.set(parse_core_field(field, &scope)?, *requirement);
            }
            registry.insert(modality.as_str(), table);
        }
        Ok(registry)
    }

    pub fn alias_table(&self) -> ConfigResult<ModalityAliases> {
        let mut aliases = ModalityAliases::new();
        for (legacy, canonical) in &self.aliases {
            if legacy.trim().is_empty() || canonical.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "alias '{}' -> '{}' has an empty side",
                    legacy, canonical
                )));
            }
            aliases.insert(legacy.as_str(), canonical.as_str());
        }
        Ok(aliases)
    }

    pub fn version_table(&self) -> ConfigResult<VersionTable> {
        let mut table = VersionTable::new();
        for (field, version) in &self.schema_versions {
            table.insert(parse_core_field(field, "schema_versions")?, version.clone());
        }
        Ok(table)
    }

    pub fn section_descriptors(&self) -> ConfigResult<SectionDescriptors> {
        let mut descriptors = SectionDescriptors::new();
        let Some(sections) = &self.sections else {
            return Ok(descriptors);
        };

        for (field, descriptor) in &sections.top_level {
            let field = parse_core_field(field, "sections.top_level")?;
            descriptors.top_level.insert(field, descriptor.clone());
        }
        for (section, fields) in &sections.nested {
            let section = parse_core_field(section, "sections.nested")?;
            descriptors
                .nested
                .entry(section)
                .or_default()
                .extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Ok(descriptors)
    }
}

impl From<&SectionDescriptors> for SectionsV1 {
    fn from(descriptors: &SectionDescriptors) -> Self {
        Self {
            top_level: descriptors
                .top_level
                .iter()
                .map(|(field, desc)| (field.as_str().to_string(), desc.clone()))
                .collect(),
            nested: descriptors
                .nested
                .iter()
                .map(|(section, fields)| (section.as_str().to_string(), fields.clone()))
                .collect(),
        }
    }
}

/// YAML shape of one requirement table
pub fn table_to_yaml_map(table: &RequirementTable) -> BTreeMap<String, FileRequirement> {
    CoreField::ALL
        .into_iter()
        .filter_map(|field| Some((field.as_str().to_string(), table.get(field)?)))
        .collect()
}
