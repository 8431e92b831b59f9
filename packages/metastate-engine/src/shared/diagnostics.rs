//! Diagnostics sink
//!
//! The engine reports non-fatal conditions (unknown modality, swallowed
//! validation failures) through an injected sink instead of printing.

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Debug,
    Warning,
}

/// A non-fatal condition observed during classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Modality absent from the requirement registry; every field defaults to required
    UnknownModality { record: String, modality: String },

    /// Record declares no modality; every field defaults to required
    NoModalities { record: String },

    /// Structural validation failed; the reason is kept for display only
    ValidationFailed { field: String, reason: String },
}

impl Diagnostic {
    pub fn level(&self) -> DiagnosticLevel {
        match self {
            Diagnostic::UnknownModality { .. } | Diagnostic::NoModalities { .. } => {
                DiagnosticLevel::Warning
            }
            Diagnostic::ValidationFailed { .. } => DiagnosticLevel::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownModality { record, modality } => write!(
                f,
                "record {}: modality '{}' has no requirement table, treating all fields as required",
                record, modality
            ),
            Diagnostic::NoModalities { record } => write!(
                f,
                "record {}: no modality declared, treating all fields as required",
                record
            ),
            Diagnostic::ValidationFailed { field, reason } => {
                write!(f, "{} failed validation: {}", field, reason)
            }
        }
    }
}

/// Receiver for engine diagnostics
///
/// Must be cheap and non-blocking; it is called from rayon workers.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.level() {
            DiagnosticLevel::Warning => tracing::warn!("{}", diagnostic),
            DiagnosticLevel::Debug => tracing::debug!("{}", diagnostic),
        }
    }
}

/// Buffers diagnostics in memory (tests, explainer)
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.lock().clone()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .iter()
            .filter(|d| d.level() == DiagnosticLevel::Warning)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.entries.lock().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let unknown = Diagnostic::UnknownModality {
            record: "r".into(),
            modality: "xyz".into(),
        };
        let failed = Diagnostic::ValidationFailed {
            field: "subject".into(),
            reason: "missing field".into(),
        };
        assert_eq!(unknown.level(), DiagnosticLevel::Warning);
        assert_eq!(failed.level(), DiagnosticLevel::Debug);
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        sink.emit(Diagnostic::NoModalities { record: "a".into() });
        sink.emit(Diagnostic::ValidationFailed {
            field: "rig".into(),
            reason: "bad".into(),
        });

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.warnings().len(), 1);

        let drained = sink.take();
        assert_eq!(drained.len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_display_mentions_modality() {
        let d = Diagnostic::UnknownModality {
            record: "asset_1".into(),
            modality: "holography".into(),
        };
        let msg = d.to_string();
        assert!(msg.contains("holography"));
        assert!(msg.contains("required"));
    }
}
