//! Configuration validation
//!
//! Every loadable section implements `Validatable`; `EngineConfig::build`
//! runs them all before anything is shared with workers.

use super::error::{ConfigError, ConfigResult};
use crate::features::requirements::RequirementRegistry;
use crate::features::schema::{ModelSchema, SchemaRegistry, SectionDescriptors};

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use metastate_engine::config::Validatable;
///
/// fn install<C: Validatable>(config: C) -> ConfigResult<C> {
///     config.validate()?;
///     Ok(config)
/// }
/// ```
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

/// Extension trait for validating collections of configs
pub trait ValidatableCollection {
    /// Validate all configs in collection
    fn validate_all(&self) -> ConfigResult<()>;
}

impl<T: Validatable> ValidatableCollection for Vec<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        for config in self {
            config.validate()?;
        }
        Ok(())
    }
}

impl<T: Validatable> ValidatableCollection for Option<T> {
    fn validate_all(&self) -> ConfigResult<()> {
        if let Some(config) = self {
            config.validate()?;
        }
        Ok(())
    }
}

impl Validatable for RequirementRegistry {
    /// Every table must cover all nine core fields
    fn validate(&self) -> ConfigResult<()> {
        for tag in self.modalities() {
            let Some(table) = self.lookup(&tag) else {
                continue;
            };
            let missing = table.missing_fields();
            if !missing.is_empty() {
                return Err(ConfigError::IncompleteRequirementTable {
                    modality: tag.as_str().to_string(),
                    missing: missing.iter().map(|f| f.as_str().to_string()).collect(),
                });
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "modalities"
    }
}

impl Validatable for ModelSchema {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            ModelSchema::Enum { values } if values.is_empty() => Err(ConfigError::Validation(
                "enum model declares no values".to_string(),
            )),
            ModelSchema::Object { fields, .. } => {
                let mut seen = Vec::with_capacity(fields.len());
                for spec in fields {
                    if seen.contains(&spec.name.as_str()) {
                        return Err(ConfigError::Validation(format!(
                            "object model declares field '{}' twice",
                            spec.name
                        )));
                    }
                    seen.push(spec.name.as_str());
                    spec.descriptor.check_shorthand()?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn config_name(&self) -> &'static str {
        "models"
    }
}

/// Cross-section check: descriptors are well formed and only name
/// registered models
pub struct ReferenceValidator<'a> {
    pub registry: &'a SchemaRegistry,
    pub sections: &'a SectionDescriptors,
}

impl Validatable for ReferenceValidator<'_> {
    fn validate(&self) -> ConfigResult<()> {
        for (_, descriptor) in self.sections.iter_all() {
            descriptor.check_shorthand()?;
        }
        match self.registry.unresolved_references(self.sections).into_iter().next() {
            Some((path, model)) => Err(ConfigError::UnknownModel { path, model }),
            None => Ok(()),
        }
    }

    fn config_name(&self) -> &'static str {
        "sections"
    }
}
