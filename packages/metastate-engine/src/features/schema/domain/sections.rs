//! Field → descriptor maps
//!
//! One map for the core sections themselves and one per section for the
//! second-level fields inside it. Keys are `CoreField`, so a typo in a
//! section name fails at load time instead of silently missing a lookup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TypeDescriptor;
use crate::shared::models::CoreField;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionDescriptors {
    #[serde(default)]
    pub top_level: BTreeMap<CoreField, TypeDescriptor>,

    #[serde(default)]
    pub nested: BTreeMap<CoreField, BTreeMap<String, TypeDescriptor>>,
}

impl SectionDescriptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_level(mut self, field: CoreField, descriptor: TypeDescriptor) -> Self {
        self.top_level.insert(field, descriptor);
        self
    }

    pub fn with_nested(
        mut self,
        section: CoreField,
        field: impl Into<String>,
        descriptor: TypeDescriptor,
    ) -> Self {
        self.nested
            .entry(section)
            .or_default()
            .insert(field.into(), descriptor);
        self
    }

    /// Descriptor for `field`, looked up in the top-level map or in the
    /// nested map of `parent`
    pub fn descriptor(&self, field: &str, parent: Option<CoreField>) -> Option<&TypeDescriptor> {
        match parent {
            None => {
                let core: CoreField = field.parse().ok()?;
                self.top_level.get(&core)
            }
            Some(section) => self.nested.get(&section)?.get(field),
        }
    }

    /// Second-level field names of a section, sorted
    pub fn nested_fields(&self, section: CoreField) -> Vec<&str> {
        self.nested
            .get(&section)
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Overlay `other` onto this map; entries from `other` win
    pub fn extend(&mut self, other: SectionDescriptors) {
        self.top_level.extend(other.top_level);
        for (section, fields) in other.nested {
            self.nested.entry(section).or_default().extend(fields);
        }
    }

    /// Every descriptor with the path it is declared at
    pub fn iter_all(&self) -> impl Iterator<Item = (String, &TypeDescriptor)> {
        let top = self
            .top_level
            .iter()
            .map(|(field, desc)| (field.as_str().to_string(), desc));
        let nested = self.nested.iter().flat_map(|(section, fields)| {
            fields
                .iter()
                .map(move |(name, desc)| (format!("{}.{}", section, name), desc))
        });
        top.chain(nested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SectionDescriptors {
        SectionDescriptors::new()
            .with_top_level(CoreField::Subject, TypeDescriptor::model("Subject"))
            .with_nested(
                CoreField::Subject,
                "alleles",
                TypeDescriptor::list_of(TypeDescriptor::model("PIDName")),
            )
    }

    #[test]
    fn test_lookup_by_parent() {
        let sections = sample();
        assert_eq!(
            sections.descriptor("subject", None),
            Some(&TypeDescriptor::model("Subject"))
        );
        assert!(sections.descriptor("alleles", None).is_none());
        assert!(sections
            .descriptor("alleles", Some(CoreField::Subject))
            .is_some());
        assert!(sections
            .descriptor("alleles", Some(CoreField::Procedures))
            .is_none());
        assert!(sections.descriptor("not_a_section", None).is_none());
    }

    #[test]
    fn test_extend_overrides() {
        let mut sections = sample();
        sections.extend(SectionDescriptors::new().with_nested(
            CoreField::Subject,
            "alleles",
            TypeDescriptor::model("any"),
        ));
        assert_eq!(
            sections.descriptor("alleles", Some(CoreField::Subject)),
            Some(&TypeDescriptor::model("any"))
        );
        assert_eq!(sections.nested_fields(CoreField::Subject), vec!["alleles"]);
    }

    #[test]
    fn test_yaml_shape() {
        let yaml = r#"
top_level:
  subject: Subject
nested:
  subject:
    alleles: List[PIDName]
    breeding_info: Optional[BreedingInfo]
"#;
        let sections: SectionDescriptors = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            sections.nested_fields(CoreField::Subject),
            vec!["alleles", "breeding_info"]
        );
        let paths: Vec<String> = sections.iter_all().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec!["subject", "subject.alleles", "subject.breeding_info"]
        );
    }

    #[test]
    fn test_unknown_section_rejected() {
        let yaml = "top_level:\n  subjekt: Subject\n";
        assert!(serde_yaml::from_str::<SectionDescriptors>(yaml).is_err());
    }
}
