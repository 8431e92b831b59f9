/*
 * Batch Domain Models
 */

mod matrix;
mod section_record;

pub use matrix::ClassificationMatrix;
pub use section_record::SectionRecord;
