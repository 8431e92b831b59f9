/*
 * Requirement Domain Models
 */

mod modality;
mod table;

pub use modality::{extract_modalities, ModalityAliases, ModalityTag};
pub use table::{RequirementRegistry, RequirementTable};
