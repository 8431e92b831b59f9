//! Common test utilities for metastate-engine
//!
//! Shared record fixtures, builders and matrix assertions for the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;
mod fixtures;

// Re-export all utilities
pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
