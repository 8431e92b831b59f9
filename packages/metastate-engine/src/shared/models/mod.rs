//! Shared domain models
//!
//! - `state`: the five-value `MetaState` lattice and three-value `FileRequirement`
//! - `core_field`: the fixed set of top-level metadata sections
//! - `record`: read-only helpers over JSON records (emptiness, identity)

pub mod core_field;
pub mod record;
pub mod state;

pub use core_field::CoreField;
pub use record::{as_record, is_empty_value, is_present, record_id, Record};
pub use state::{FileRequirement, MetaState};
