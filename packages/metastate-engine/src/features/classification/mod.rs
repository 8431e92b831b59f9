/*
 * Field Classification
 *
 * Assigns one MetaState to one (record, field) pair. Strict short-circuit
 * order:
 *
 *   1. record empty or not an object          → MISSING
 *   2. resolve requirement (top level: from the record's modalities;
 *      nested: threaded from the parent section)
 *   3. requirement == EXCLUDED                → EXCLUDED
 *   4. value absent or empty                  → OPTIONAL if optional, else MISSING
 *   5. value matches its descriptor           → VALID
 *   6. otherwise (non-empty, wrong shape, or no descriptor) → PRESENT
 *
 * Pure apart from diagnostics: same inputs, same state.
 */

pub mod application;
pub mod domain;

pub use application::FieldClassifier;
pub use domain::{FieldOutcome, ParentSection};
