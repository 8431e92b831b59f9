/*
 * Requirement Infrastructure
 *
 * Builtin requirement tables and legacy aliases, usable without configuration.
 */

mod builtin;

pub use builtin::{builtin_aliases, builtin_registry};
