/*
 * Metastate Engine - Metadata Field-State Classification
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : State lattice, record helpers, diagnostics sink
 * - features/    : Vertical slices (requirements → schema → classification → batch → reporting)
 * - config/      : YAML-loadable registries and parallel settings
 * - engine       : Facade wiring registries, sink and thread pool
 *
 * Every (record, field) pair is classified independently into one of
 * five states: excluded, missing, optional, present, valid.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Shared models and utilities
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Engine facade
pub mod engine;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, ConfigResult, EngineConfig, ParallelConfig};
pub use engine::MetadataEngine;
pub use errors::{EngineError, Result};
pub use features::batch::{project_section, ClassificationMatrix, SectionRecord};
pub use features::classification::{FieldClassifier, FieldOutcome, ParentSection};
pub use features::reporting::{ExportFilter, ExportRow, RecordInfo, RecordReport, StateSummary};
pub use features::requirements::{ModalityTag, RequirementRegistry, RequirementResolver};
pub use features::schema::{
    ModelValidator, SchemaRegistry, StructuralValidator, TypeDescriptor, ValidationError, Validity,
};
pub use shared::diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use shared::models::{CoreField, FileRequirement, MetaState};
