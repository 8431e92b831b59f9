/*
 * Schema Application Layer
 */

mod registry;
mod validator;
mod version;

pub use registry::SchemaRegistry;
pub use validator::StructuralValidator;
pub use version::{normalize_version, VersionTable, SCHEMA_VERSION_KEY};
