/*
 * Batch Application Layer
 */

mod processor;
mod projection;

pub use processor::BatchProcessor;
pub use projection::project_section;
