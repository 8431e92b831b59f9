use serde_json::Value;

use crate::features::batch::domain::SectionRecord;
use crate::features::requirements::RequirementResolver;
use crate::shared::models::{as_record, record_id, CoreField, FileRequirement};

/// Project each record down to `section`, keeping the requirement the
/// section resolves to under the full record's modalities.
///
/// Non-object records project to `null` with the fail-safe `Required`.
pub fn project_section(
    records: &[Value],
    section: CoreField,
    resolver: &RequirementResolver<'_>,
) -> Vec<SectionRecord> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let id = record_id(record, index);
            match as_record(record) {
                Some(map) if !map.is_empty() => {
                    let requirement = resolver.resolve_document(&id, record).get(section);
                    let value = map.get(section.as_str()).cloned().unwrap_or(Value::Null);
                    SectionRecord::new(id, value, requirement)
                }
                _ => SectionRecord::new(id, Value::Null, FileRequirement::Required),
            }
        })
        .collect()
}
