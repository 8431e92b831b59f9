/*
 * Schema Infrastructure
 *
 * Concrete ModelValidator adapters and the builtin schema set.
 */

mod builtin;
mod declarative;
mod primitives;
mod typed;

pub use builtin::{builtin_models, builtin_sections, builtin_versions};
pub use primitives::PrimitiveModel;
pub use typed::TypedModel;
