use crate::features::requirements::{ModalityAliases, ModalityTag, RequirementRegistry};
use crate::shared::models::{CoreField, FileRequirement};

/// `(expected, excluded)` core sections for one modality.
///
/// No modality, or one without a table, expects every section.
pub fn expected_fields(
    registry: &RequirementRegistry,
    aliases: &ModalityAliases,
    modality: Option<&ModalityTag>,
) -> (Vec<CoreField>, Vec<CoreField>) {
    let table = modality.and_then(|tag| registry.lookup(&aliases.canonicalize(tag)));
    let Some(table) = table else {
        return (CoreField::ALL.to_vec(), Vec::new());
    };

    CoreField::ALL
        .into_iter()
        .partition(|field| table.get(*field) != Some(FileRequirement::Excluded))
}
