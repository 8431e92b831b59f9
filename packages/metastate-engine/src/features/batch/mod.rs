/*
 * Batch Processing
 *
 * Classifies every (record, field) pair of a collection into a
 * ClassificationMatrix. Pairs are independent, so records are split into
 * chunks and mapped in parallel with rayon; row order is preserved.
 *
 * Architecture:
 * - Domain: ClassificationMatrix, SectionRecord
 * - Application: BatchProcessor, project_section
 *
 * Nested sections: callers project each record down to one section first
 * (project_section). The processor never reaches across sections.
 */

pub mod application;
pub mod domain;

pub use application::{project_section, BatchProcessor};
pub use domain::{ClassificationMatrix, SectionRecord};
