//! Serde-typed models
//!
//! Wraps any `DeserializeOwned` Rust type as a named model: a value is valid
//! when `serde_json::from_value::<T>` accepts it. Useful when a model is
//! easier to state as a struct than as a declarative schema.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;

use crate::features::schema::application::SchemaRegistry;
use crate::features::schema::domain::ValidationError;
use crate::features::schema::ports::ModelValidator;

pub struct TypedModel<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedModel<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: DeserializeOwned> ModelValidator for TypedModel<T> {
    fn validate(
        &self,
        value: &Value,
        path: &str,
        _registry: &SchemaRegistry,
    ) -> Result<(), ValidationError> {
        T::deserialize(value)
            .map(|_| ())
            .map_err(|err| ValidationError::Deserialize {
                path: path.to_string(),
                model: self.name.to_string(),
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    #[allow(dead_code)]
    struct Calibration {
        calibration_date: String,
        device_name: String,
        #[serde(default)]
        notes: Option<String>,
    }

    #[test]
    fn test_typed_model() {
        let model = TypedModel::<Calibration>::new("Calibration");
        let registry = SchemaRegistry::new();

        let good = json!({"calibration_date": "2023-01-01", "device_name": "Laser A"});
        assert!(model.validate(&good, "rig.calibrations[0]", &registry).is_ok());

        let bad = json!({"calibration_date": "2023-01-01"});
        match model.validate(&bad, "rig.calibrations[0]", &registry) {
            Err(ValidationError::Deserialize { model, message, .. }) => {
                assert_eq!(model, "Calibration");
                assert!(message.contains("device_name"));
            }
            other => panic!("unexpected {:?}", other.err()),
        }
    }
}
