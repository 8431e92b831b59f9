/*
 * Requirement Application Layer
 */

mod resolver;

pub use resolver::{RequirementResolver, ResolvedRequirements};
