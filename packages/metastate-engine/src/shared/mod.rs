//! Shared models and utilities used by every feature slice

pub mod diagnostics;
pub mod models;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticLevel, DiagnosticSink, TracingSink};
pub use models::{CoreField, FileRequirement, MetaState};
