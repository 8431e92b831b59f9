/*
 * Classification Domain Models
 */

mod outcome;

pub use outcome::{FieldOutcome, ParentSection};
