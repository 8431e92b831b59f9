/*
 * Structural Validation
 *
 * Decides whether a field's value conforms to its expected shape.
 *
 * Architecture:
 * - Domain: TypeDescriptor (Model / ListOf / OptionalOf / UnionOf),
 *           ModelSchema (declarative object / enum / literal),
 *           SectionDescriptors (field → descriptor, per section),
 *           ValidationError + Validity
 * - Ports: ModelValidator (anything that can validate a named model)
 * - Application: SchemaRegistry, StructuralValidator, VersionTable
 * - Infrastructure: primitive models, typed serde models, builtin schemas
 *
 * Field-level rules:
 * - Model(name):   validate against the named model
 * - ListOf(T):     must be a list, every element satisfies T ([] is valid)
 * - OptionalOf(T): always valid (presence is decided by the classifier)
 * - UnionOf(Ts):   first variant that validates wins
 *
 * Validation errors never escape the validator; callers see a Validity.
 */

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{normalize_version, SchemaRegistry, StructuralValidator, VersionTable};
pub use domain::{
    DescriptorParseError, FieldSpec, ModelSchema, SectionDescriptors, TypeDescriptor,
    ValidationError, Validity,
};
pub use infrastructure::{
    builtin_models, builtin_sections, builtin_versions, PrimitiveModel, TypedModel,
};
pub use ports::ModelValidator;
