/*
 * Structural Validator
 *
 * validate(field, value, parent):
 *   1. Look up the descriptor (top-level map, or parent's nested map).
 *      None → Validity::Unknown; the caller falls back to presence only.
 *   2. Normalize schema_version on a copy (top-level fields only).
 *   3. Match the descriptor; failures are reported to the sink at debug
 *      level and returned as Validity::Invalid, never as an Err.
 */

use crate::features::schema::application::{normalize_version, SchemaRegistry, VersionTable};
use crate::features::schema::domain::{SectionDescriptors, TypeDescriptor, Validity};
use crate::shared::diagnostics::{Diagnostic, DiagnosticSink};
use crate::shared::models::CoreField;
use serde_json::Value;

pub struct StructuralValidator<'a> {
    registry: &'a SchemaRegistry,
    sections: &'a SectionDescriptors,
    versions: &'a VersionTable,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> StructuralValidator<'a> {
    pub fn new(
        registry: &'a SchemaRegistry,
        sections: &'a SectionDescriptors,
        versions: &'a VersionTable,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            registry,
            sections,
            versions,
            sink,
        }
    }

    pub fn descriptor(&self, field: &str, parent: Option<CoreField>) -> Option<&'a TypeDescriptor> {
        self.sections.descriptor(field, parent)
    }

    pub fn validate(&self, field: &str, value: &Value, parent: Option<CoreField>) -> Validity {
        let Some(descriptor) = self.descriptor(field, parent) else {
            return Validity::Unknown;
        };
        self.validate_with(field, value, descriptor, parent)
    }

    /// Validate against an explicit descriptor
    pub fn validate_with(
        &self,
        field: &str,
        value: &Value,
        descriptor: &TypeDescriptor,
        parent: Option<CoreField>,
    ) -> Validity {
        let path = match parent {
            Some(section) => format!("{}.{}", section, field),
            None => field.to_string(),
        };
        let value = if parent.is_none() {
            normalize_version(field, value, self.versions)
        } else {
            std::borrow::Cow::Borrowed(value)
        };

        let validity = Validity::from(self.registry.check_field(descriptor, &value, &path));
        if let Some(reason) = validity.reason() {
            self.sink.emit(Diagnostic::ValidationFailed {
                field: path,
                reason,
            });
        }
        validity
    }

    /// True only when `value` matches `descriptor`
    pub fn is_structurally_valid(
        &self,
        field: &str,
        value: &Value,
        descriptor: &TypeDescriptor,
    ) -> bool {
        self.validate_with(field, value, descriptor, None).is_valid()
    }
}
