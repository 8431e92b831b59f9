/*
 * Schema Domain Models
 */

mod descriptor;
mod issue;
mod model_schema;
mod sections;

pub use descriptor::{DescriptorParseError, TypeDescriptor};
pub(crate) use issue::kind_of;
pub use issue::{ValidationError, Validity};
pub use model_schema::{FieldSpec, ModelSchema};
pub use sections::SectionDescriptors;
