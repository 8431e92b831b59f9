//! Record helpers
//!
//! A record is a JSON object mapping field names to arbitrary values.
//! Records are read-only inputs: nothing here mutates them.

use serde_json::{Map, Value};

/// A metadata record (one JSON document per data asset)
pub type Record = Map<String, Value>;

/// View a value as a record. Non-objects are not records.
pub fn as_record(value: &Value) -> Option<&Record> {
    value.as_object()
}

/// `null`, `""`, `[]` and `{}` are all "empty".
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// True when `field` exists in `record` with a non-empty value.
pub fn is_present(record: &Record, field: &str) -> bool {
    record.get(field).map_or(false, |value| !is_empty_value(value))
}

/// Identity of a record for matrix rows: `_id`, else `name`, else `#<index>`.
pub fn record_id(record: &Value, index: usize) -> String {
    let from_key = |key: &str| {
        record.get(key).and_then(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    };

    from_key("_id")
        .or_else(|| from_key("name"))
        .unwrap_or_else(|| format!("#{}", index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emptiness_ladder() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));

        assert!(!is_empty_value(&json!("actual data")));
        assert!(!is_empty_value(&json!(1)));
        assert!(!is_empty_value(&json!(0)));
        assert!(!is_empty_value(&json!(false)));
        assert!(!is_empty_value(&json!({"actual key": "actual value"})));
        assert!(!is_empty_value(&json!([null])));
    }

    #[test]
    fn test_is_present() {
        let record = json!({
            "test1": null,
            "test2": "",
            "test5": "actual data",
            "test6": 1,
        });
        let record = as_record(&record).unwrap();

        assert!(!is_present(record, "test1"));
        assert!(!is_present(record, "test2"));
        assert!(is_present(record, "test5"));
        assert!(is_present(record, "test6"));
        assert!(!is_present(record, "meow"));
    }

    #[test]
    fn test_record_id_fallbacks() {
        assert_eq!(record_id(&json!({"_id": "abc", "name": "n"}), 3), "abc");
        assert_eq!(record_id(&json!({"name": "asset_1"}), 3), "asset_1");
        assert_eq!(record_id(&json!({"_id": ""}), 3), "#3");
        assert_eq!(record_id(&json!("not a record"), 0), "#0");
    }
}
