/*
 * Record Explainer
 *
 * Classifies every core field of one record, then every second-level
 * field of each section that came out present or valid, keeping the
 * validation failure text alongside each state.
 */

use serde_json::Value;
use std::collections::BTreeMap;

use crate::features::classification::{FieldClassifier, ParentSection};
use crate::features::reporting::domain::RecordReport;
use crate::features::requirements::ResolvedRequirements;
use crate::features::schema::SectionDescriptors;
use crate::shared::models::{as_record, record_id, CoreField, MetaState};

pub fn explain_record(
    classifier: &FieldClassifier<'_>,
    sections: &SectionDescriptors,
    record: &Value,
    index: usize,
) -> RecordReport {
    let id = record_id(record, index);
    let blank = as_record(record).map_or(true, |map| map.is_empty());

    let modalities = classifier.resolver().modalities_of(record);
    let resolved = if blank {
        ResolvedRequirements::all_required()
    } else {
        classifier.resolver().resolve_document(&id, record)
    };

    let mut fields = Vec::with_capacity(CoreField::ALL.len());
    let mut nested = BTreeMap::new();
    for section in CoreField::ALL {
        let outcome = classifier.classify_resolved(section.as_str(), record, &resolved);

        if matches!(outcome.state, MetaState::Present | MetaState::Valid) {
            let parent = ParentSection::new(section, outcome.requirement);
            let value = record.get(section.as_str()).unwrap_or(&Value::Null);
            let outcomes = sections
                .nested_fields(section)
                .into_iter()
                .map(|field| classifier.classify_outcome(field, value, Some(parent)))
                .collect::<Vec<_>>();
            if !outcomes.is_empty() {
                nested.insert(section, outcomes);
            }
        }
        fields.push(outcome);
    }

    RecordReport {
        id,
        modalities: modalities.iter().map(|m| m.as_str().to_string()).collect(),
        fallback_requirements: resolved.used_fallback(),
        fields,
        sections: nested,
    }
}
