use serde_json::Value;

use crate::features::classification::domain::{FieldOutcome, ParentSection};
use crate::features::requirements::{RequirementResolver, ResolvedRequirements};
use crate::features::schema::{StructuralValidator, Validity};
use crate::shared::models::{as_record, is_empty_value, record_id, FileRequirement, MetaState};

/// Field Classifier
///
/// Borrowed view over the resolver and validator; building one is free,
/// so callers construct it per batch or per call.
pub struct FieldClassifier<'a> {
    resolver: RequirementResolver<'a>,
    validator: StructuralValidator<'a>,
}

impl<'a> FieldClassifier<'a> {
    pub fn new(resolver: RequirementResolver<'a>, validator: StructuralValidator<'a>) -> Self {
        Self {
            resolver,
            validator,
        }
    }

    pub fn resolver(&self) -> &RequirementResolver<'a> {
        &self.resolver
    }

    pub fn classify(&self, field: &str, record: &Value, parent: Option<ParentSection>) -> MetaState {
        self.classify_outcome(field, record, parent).state
    }

    /// Classify with the deciding requirement and any validation reason
    pub fn classify_outcome(
        &self,
        field: &str,
        record: &Value,
        parent: Option<ParentSection>,
    ) -> FieldOutcome {
        if is_blank_record(record) {
            return FieldOutcome::new(field, MetaState::Missing, self.default_requirement(field, parent));
        }

        let requirement = match parent {
            Some(parent) => self.nested_requirement(field, parent),
            None => self
                .resolver
                .resolve_document(&record_id(record, 0), record)
                .for_name(field),
        };
        self.decide(field, record, requirement, parent)
    }

    /// Top-level classification with requirements resolved once per record
    pub fn classify_resolved(
        &self,
        field: &str,
        record: &Value,
        resolved: &ResolvedRequirements,
    ) -> FieldOutcome {
        if is_blank_record(record) {
            return FieldOutcome::new(field, MetaState::Missing, resolved.for_name(field));
        }
        self.decide(field, record, resolved.for_name(field), None)
    }

    /// Requirement of a nested field: the parent's, except that an
    /// `Optional[..]` field inside a required section is only optional
    pub fn nested_requirement(&self, field: &str, parent: ParentSection) -> FileRequirement {
        let optional_typed = self
            .validator
            .descriptor(field, Some(parent.section))
            .map_or(false, |descriptor| descriptor.is_optional());

        match parent.requirement {
            FileRequirement::Required if optional_typed => FileRequirement::Optional,
            other => other,
        }
    }

    /// Exclusion, then presence, then validity; `record` is a non-empty object
    fn decide(
        &self,
        field: &str,
        record: &Value,
        requirement: FileRequirement,
        parent: Option<ParentSection>,
    ) -> FieldOutcome {
        if requirement == FileRequirement::Excluded {
            return FieldOutcome::new(field, MetaState::Excluded, requirement);
        }

        let value = match record.get(field) {
            Some(value) if !is_empty_value(value) => value,
            _ => return FieldOutcome::new(field, MetaState::for_absent(requirement), requirement),
        };

        match self.validator.validate(field, value, parent.map(|p| p.section)) {
            Validity::Valid => FieldOutcome::new(field, MetaState::Valid, requirement),
            Validity::Invalid(err) => FieldOutcome::new(field, MetaState::Present, requirement)
                .with_reason(Some(err.to_string())),
            Validity::Unknown => FieldOutcome::new(field, MetaState::Present, requirement),
        }
    }

    fn default_requirement(&self, field: &str, parent: Option<ParentSection>) -> FileRequirement {
        match parent {
            Some(parent) => self.nested_requirement(field, parent),
            None => FileRequirement::Required,
        }
    }
}

/// Absent, non-object, or `{}`
fn is_blank_record(record: &Value) -> bool {
    as_record(record).map_or(true, |map| map.is_empty())
}
