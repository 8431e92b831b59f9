/*
 * Reporting Application Layer
 */

mod expected;
mod explainer;

pub use expected::expected_fields;
pub use explainer::explain_record;
