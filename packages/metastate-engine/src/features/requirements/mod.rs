/*
 * Requirement Resolution
 *
 * Decides, per record, whether each core section is required, optional
 * or excluded, given the modalities the record declares.
 *
 * Architecture:
 * - Domain: ModalityTag, ModalityAliases, RequirementTable, RequirementRegistry
 * - Application: RequirementResolver (merge across modalities)
 * - Infrastructure: Builtin requirement tables and legacy aliases
 *
 * Merge rule (highest wins): required > optional > excluded.
 * Unknown or absent modality: every field required, with a warning.
 */

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{RequirementResolver, ResolvedRequirements};
pub use domain::{
    extract_modalities, ModalityAliases, ModalityTag, RequirementRegistry, RequirementTable,
};
pub use infrastructure::{builtin_aliases, builtin_registry};
