/*
 * Requirement Resolver
 *
 * For each core field, merge the requirement of every declared modality:
 *   result = REQUIRED if any modality requires it
 *          else OPTIONAL if any modality marks it optional
 *          else EXCLUDED
 *
 * Fail-safe: an unknown modality contributes REQUIRED for every field,
 * and a record with no modality at all resolves to REQUIRED everywhere.
 * Both cases emit a warning through the diagnostics sink. Never fails.
 */

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::Value;

use crate::features::requirements::domain::{
    extract_modalities, ModalityAliases, ModalityTag, RequirementRegistry,
};
use crate::shared::diagnostics::{Diagnostic, DiagnosticSink};
use crate::shared::models::{CoreField, FileRequirement};

/// Merged requirement of every core field for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRequirements {
    by_field: FxHashMap<CoreField, FileRequirement>,
    fallback: bool,
}

impl ResolvedRequirements {
    /// Every core field required (fail-safe default)
    pub fn all_required() -> Self {
        Self {
            by_field: CoreField::ALL
                .into_iter()
                .map(|field| (field, FileRequirement::Required))
                .collect(),
            fallback: true,
        }
    }

    pub fn get(&self, field: CoreField) -> FileRequirement {
        self.by_field
            .get(&field)
            .copied()
            .unwrap_or(FileRequirement::Required)
    }

    /// Requirement by field name; names outside the core set are required
    pub fn for_name(&self, field: &str) -> FileRequirement {
        field
            .parse::<CoreField>()
            .map(|core| self.get(core))
            .unwrap_or(FileRequirement::Required)
    }

    /// True when at least one modality could not be looked up
    pub fn used_fallback(&self) -> bool {
        self.fallback
    }
}

pub struct RequirementResolver<'a> {
    registry: &'a RequirementRegistry,
    aliases: &'a ModalityAliases,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> RequirementResolver<'a> {
    pub fn new(
        registry: &'a RequirementRegistry,
        aliases: &'a ModalityAliases,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            registry,
            aliases,
            sink,
        }
    }

    /// Resolve every core field for one record's modalities.
    ///
    /// `record` only labels diagnostics.
    pub fn resolve_record(&self, record: &str, modalities: &[ModalityTag]) -> ResolvedRequirements {
        if modalities.is_empty() {
            self.sink.emit(Diagnostic::NoModalities {
                record: record.to_string(),
            });
            return ResolvedRequirements::all_required();
        }

        let mut tables = Vec::with_capacity(modalities.len());
        let mut fallback = false;
        for modality in modalities {
            let canonical = self.aliases.canonicalize(modality);
            match self.registry.lookup(&canonical) {
                Some(table) => tables.push(table),
                None => {
                    self.sink.emit(Diagnostic::UnknownModality {
                        record: record.to_string(),
                        modality: canonical.as_str().to_string(),
                    });
                    fallback = true;
                }
            }
        }

        let by_field = CoreField::ALL
            .into_iter()
            .map(|field| {
                let merged = if fallback {
                    FileRequirement::Required
                } else {
                    FileRequirement::merge_all(
                        tables
                            .iter()
                            .map(|t| t.get(field).unwrap_or(FileRequirement::Required)),
                    )
                    .unwrap_or(FileRequirement::Required)
                };
                (field, merged)
            })
            .collect();

        ResolvedRequirements { by_field, fallback }
    }

    /// Canonical modalities declared by a full record
    pub fn modalities_of(&self, record: &Value) -> Vec<ModalityTag> {
        extract_modalities(record, self.aliases)
    }

    /// Resolve a full record: read its modalities, then merge
    pub fn resolve_document(&self, record_id: &str, record: &Value) -> ResolvedRequirements {
        self.resolve_record(record_id, &self.modalities_of(record))
    }

    /// Merged requirement for each of `fields`
    pub fn resolve(
        &self,
        modalities: &[ModalityTag],
        field_names: &[&str],
    ) -> FxHashMap<String, FileRequirement> {
        let resolved = self.resolve_record("-", modalities);
        field_names
            .iter()
            .map(|name| (name.to_string(), resolved.for_name(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::requirements::domain::RequirementTable;
    use crate::shared::diagnostics::CollectingSink;

    fn registry() -> RequirementRegistry {
        RequirementRegistry::new()
            .with(
                "m1",
                RequirementTable::uniform(FileRequirement::Excluded)
                    .with(CoreField::Subject, FileRequirement::Optional)
                    .with(CoreField::Session, FileRequirement::Optional),
            )
            .with(
                "m2",
                RequirementTable::uniform(FileRequirement::Excluded)
                    .with(CoreField::Subject, FileRequirement::Required),
            )
            .with("m3", RequirementTable::uniform(FileRequirement::Excluded))
    }

    fn tags(names: &[&str]) -> Vec<ModalityTag> {
        names.iter().map(|n| ModalityTag::new(*n)).collect()
    }

    #[test]
    fn test_required_beats_optional() {
        let (registry, aliases, sink) = (registry(), ModalityAliases::new(), CollectingSink::new());
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let out = resolver.resolve(&tags(&["m1", "m2"]), &["subject"]);
        assert_eq!(out["subject"], FileRequirement::Required);
    }

    #[test]
    fn test_optional_beats_excluded() {
        let (registry, aliases, sink) = (registry(), ModalityAliases::new(), CollectingSink::new());
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let out = resolver.resolve(&tags(&["m3", "m1"]), &["session"]);
        assert_eq!(out["session"], FileRequirement::Optional);
    }

    #[test]
    fn test_excluded_only_when_all_excluded() {
        let (registry, aliases, sink) = (registry(), ModalityAliases::new(), CollectingSink::new());
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let out = resolver.resolve(&tags(&["m3", "m2"]), &["rig"]);
        assert_eq!(out["rig"], FileRequirement::Excluded);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_no_modalities_warns_and_requires() {
        let (registry, aliases, sink) = (registry(), ModalityAliases::new(), CollectingSink::new());
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let resolved = resolver.resolve_record("asset", &[]);
        assert!(resolved.used_fallback());
        assert_eq!(resolved.get(CoreField::Instrument), FileRequirement::Required);
        assert_eq!(
            sink.warnings(),
            vec![Diagnostic::NoModalities {
                record: "asset".into()
            }]
        );
    }

    #[test]
    fn test_unknown_modality_forces_required() {
        let (registry, aliases, sink) = (registry(), ModalityAliases::new(), CollectingSink::new());
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let resolved = resolver.resolve_record("asset", &tags(&["m3", "holography"]));
        assert_eq!(resolved.get(CoreField::Rig), FileRequirement::Required);
        assert_eq!(sink.warnings().len(), 1);
    }

    #[test]
    fn test_aliases_consulted() {
        let registry = registry();
        let mut aliases = ModalityAliases::new();
        aliases.insert("legacy-m3", "m3");
        let sink = CollectingSink::new();
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let resolved = resolver.resolve_record("asset", &tags(&["legacy-m3"]));
        assert_eq!(resolved.get(CoreField::Rig), FileRequirement::Excluded);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_core_names_are_required() {
        let (registry, aliases, sink) = (registry(), ModalityAliases::new(), CollectingSink::new());
        let resolver = RequirementResolver::new(&registry, &aliases, &sink);
        let out = resolver.resolve(&tags(&["m3"]), &["name", "rig"]);
        assert_eq!(out["name"], FileRequirement::Required);
        assert_eq!(out["rig"], FileRequirement::Excluded);
    }
}
