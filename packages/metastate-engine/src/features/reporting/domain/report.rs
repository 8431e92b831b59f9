use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::features::classification::FieldOutcome;
use crate::shared::models::{CoreField, MetaState};

/// One record's full classification, for human review
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport {
    pub id: String,
    pub modalities: Vec<String>,
    /// Requirements fell back to "all required" (no or unknown modality)
    pub fallback_requirements: bool,
    pub fields: Vec<FieldOutcome>,
    /// Second-level outcomes of every section that was present
    pub sections: BTreeMap<CoreField, Vec<FieldOutcome>>,
}

impl RecordReport {
    pub fn state(&self, field: CoreField) -> Option<MetaState> {
        self.fields
            .iter()
            .find(|outcome| outcome.field == field.as_str())
            .map(|outcome| outcome.state)
    }

    pub fn nested(&self, section: CoreField) -> Option<&[FieldOutcome]> {
        self.sections.get(&section).map(Vec::as_slice)
    }

    pub fn nested_state(&self, section: CoreField, field: &str) -> Option<MetaState> {
        self.nested(section)?
            .iter()
            .find(|outcome| outcome.field == field)
            .map(|outcome| outcome.state)
    }

    /// Outcomes that carry a validation failure, top level first
    pub fn failures(&self) -> impl Iterator<Item = &FieldOutcome> {
        self.fields
            .iter()
            .chain(self.sections.values().flatten())
            .filter(|outcome| outcome.reason.is_some())
    }
}

impl fmt::Display for RecordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Record {}", self.id)?;
        if self.modalities.is_empty() {
            writeln!(f, "Modalities: (none)")?;
        } else {
            writeln!(f, "Modalities: {}", self.modalities.join(", "))?;
        }
        if self.fallback_requirements {
            writeln!(f, "Requirements: defaulted to required")?;
        }

        for outcome in &self.fields {
            writeln!(f, "{}", outcome)?;
            let Ok(section) = outcome.field.parse::<CoreField>() else {
                continue;
            };
            for nested in self.nested(section).unwrap_or_default() {
                let text = nested.to_string().replace('\n', "\n  ");
                writeln!(f, "  {}", text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::FileRequirement;

    fn report() -> RecordReport {
        let mut sections = BTreeMap::new();
        sections.insert(
            CoreField::Subject,
            vec![
                FieldOutcome::new("alleles", MetaState::Optional, FileRequirement::Optional),
                FieldOutcome::new("species", MetaState::Present, FileRequirement::Required)
                    .with_reason(Some("subject.species.name: field required".into())),
            ],
        );
        RecordReport {
            id: "abc".into(),
            modalities: vec!["ecephys".into()],
            fallback_requirements: false,
            fields: vec![
                FieldOutcome::new("rig", MetaState::Excluded, FileRequirement::Excluded),
                FieldOutcome::new("subject", MetaState::Present, FileRequirement::Required)
                    .with_reason(Some("subject.sex: field required".into())),
            ],
            sections,
        }
    }

    #[test]
    fn test_lookup() {
        let report = report();
        assert_eq!(report.state(CoreField::Rig), Some(MetaState::Excluded));
        assert_eq!(report.state(CoreField::Session), None);
        assert_eq!(
            report.nested_state(CoreField::Subject, "species"),
            Some(MetaState::Present)
        );
        assert_eq!(report.failures().count(), 2);
    }

    #[test]
    fn test_display() {
        let text = report().to_string();
        assert!(text.starts_with("Record abc\nModalities: ecephys\n"));
        assert!(text.contains("subject.sex: field required"));
        assert!(text.contains("  alleles"));
        assert!(!text.contains("defaulted"));
    }
}
