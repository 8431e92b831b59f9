/*
 * Schema Registry
 *
 * Named models behind the ModelValidator port, plus descriptor matching:
 *
 *   Model(name)   → registry[name].validate(value)
 *   ListOf(T)     → value is a list, every element matches T ([] matches)
 *   OptionalOf(T) → field level: always matches
 *                   inside a model: null matches, otherwise T must match
 *   UnionOf(Ts)   → first variant that matches, in declaration order
 *
 * Immutable once built; shared across rayon workers by reference.
 */

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::features::schema::domain::{SectionDescriptors, TypeDescriptor, ValidationError};
use crate::features::schema::ports::ModelValidator;

#[derive(Clone, Default)]
pub struct SchemaRegistry {
    models: FxHashMap<String, Arc<dyn ModelValidator>>,
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("models", &self.names())
            .finish()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builtin primitives and metadata models
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for (name, model) in crate::features::schema::infrastructure::builtin_models() {
            registry.register_arc(name, model);
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, model: impl ModelValidator + 'static) {
        self.models.insert(name.into(), Arc::new(model));
    }

    pub fn register_arc(&mut self, name: impl Into<String>, model: Arc<dyn ModelValidator>) {
        self.models.insert(name.into(), model);
    }

    /// Overlay `other`; its models replace same-named ones
    pub fn extend(&mut self, other: SchemaRegistry) {
        self.models.extend(other.models);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Registered model names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.models.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Validate `value` against the model registered as `name`
    pub fn validate_model(&self, name: &str, value: &Value, path: &str) -> Result<(), ValidationError> {
        match self.models.get(name) {
            Some(model) => model.validate(value, path, self),
            None => Err(ValidationError::UnknownModel {
                path: path.to_string(),
                model: name.to_string(),
            }),
        }
    }

    /// Match a top-level or section field value. An outer `OptionalOf`
    /// always matches; presence is decided by the classifier.
    pub fn check_field(
        &self,
        descriptor: &TypeDescriptor,
        value: &Value,
        path: &str,
    ) -> Result<(), ValidationError> {
        match descriptor {
            TypeDescriptor::OptionalOf(_) => Ok(()),
            other => self.check(other, value, path),
        }
    }

    /// Match a value nested inside a model or list
    pub fn check(
        &self,
        descriptor: &TypeDescriptor,
        value: &Value,
        path: &str,
    ) -> Result<(), ValidationError> {
        match descriptor {
            TypeDescriptor::Model(name) => self.validate_model(name, value, path),

            TypeDescriptor::ListOf(inner) => {
                let items = value.as_array().ok_or_else(|| ValidationError::NotAList {
                    path: path.to_string(),
                    found: crate::features::schema::domain::kind_of(value),
                })?;
                for (i, item) in items.iter().enumerate() {
                    self.check(inner, item, &format!("{}[{}]", path, i))?;
                }
                Ok(())
            }

            TypeDescriptor::OptionalOf(inner) => {
                if value.is_null() {
                    Ok(())
                } else {
                    self.check(inner, value, path)
                }
            }

            TypeDescriptor::UnionOf(variants) => {
                let mut attempts = Vec::with_capacity(variants.len());
                for variant in variants {
                    match self.check(variant, value, path) {
                        Ok(()) => return Ok(()),
                        Err(err) => attempts.push(format!("{}: {}", variant, err)),
                    }
                }
                Err(ValidationError::NoUnionVariant {
                    path: path.to_string(),
                    attempts,
                })
            }
        }
    }

    /// (declaring path, model) for every model referenced but not registered
    pub fn unresolved_references(&self, sections: &SectionDescriptors) -> Vec<(String, String)> {
        let mut missing = Vec::new();
        for (path, descriptor) in sections.iter_all() {
            for name in descriptor.model_names() {
                if !self.contains(name) {
                    missing.push((path.clone(), name.to_string()));
                }
            }
        }
        let mut model_names: Vec<&String> = self.models.keys().collect();
        model_names.sort();
        for owner in model_names {
            for name in self.models[owner].references() {
                if !self.contains(&name) {
                    missing.push((owner.clone(), name));
                }
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::schema::infrastructure::PrimitiveModel;
    use serde_json::json;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry.register("str", PrimitiveModel::Str);
        registry.register("int", PrimitiveModel::Int);
        registry
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let err = registry()
            .validate_model("Subject", &json!({}), "subject")
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownModel { .. }));
    }

    #[test]
    fn test_list_of() {
        let registry = registry();
        let desc = TypeDescriptor::list_of(TypeDescriptor::model("int"));
        assert!(registry.check(&desc, &json!([]), "x").is_ok());
        assert!(registry.check(&desc, &json!([1, 2]), "x").is_ok());

        let err = registry.check(&desc, &json!([1, "two"]), "x").unwrap_err();
        assert_eq!(err.path(), "x[1]");
        assert!(matches!(
            registry.check(&desc, &json!({"a": 1}), "x"),
            Err(ValidationError::NotAList { .. })
        ));
    }

    #[test]
    fn test_optional_field_vs_nested() {
        let registry = registry();
        let desc = TypeDescriptor::optional_of(TypeDescriptor::model("int"));

        assert!(registry.check_field(&desc, &json!("not an int"), "x").is_ok());
        assert!(registry.check(&desc, &json!(null), "x").is_ok());
        assert!(registry.check(&desc, &json!("not an int"), "x").is_err());
    }

    #[test]
    fn test_union_first_match() {
        let registry = registry();
        let desc = TypeDescriptor::union_of(vec![
            TypeDescriptor::model("int"),
            TypeDescriptor::model("str"),
        ]);
        assert!(registry.check(&desc, &json!(3), "x").is_ok());
        assert!(registry.check(&desc, &json!("three"), "x").is_ok());

        match registry.check(&desc, &json!(true), "x") {
            Err(ValidationError::NoUnionVariant { attempts, .. }) => assert_eq!(attempts.len(), 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_references() {
        let registry = registry();
        let sections = SectionDescriptors::new()
            .with_top_level(
                crate::shared::models::CoreField::Subject,
                TypeDescriptor::model("Subject"),
            );
        assert_eq!(
            registry.unresolved_references(&sections),
            vec![("subject".to_string(), "Subject".to_string())]
        );
    }
}
