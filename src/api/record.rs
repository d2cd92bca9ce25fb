//! Dynamic record mapping for JIRA responses.
//!
//! JIRA issues carry project-specific custom fields, so responses have no
//! fixed schema. [`Record`] converts an arbitrary decoded JSON object into
//! a generic field-addressable tree that callers can navigate without a
//! typed model. Conversion is fully recursive: nested objects become
//! `Record`s, arrays are converted element by element to arbitrary depth
//! (including arrays of arrays), and scalars pass through unchanged.

use std::collections::HashMap;

/// A single converted JSON value inside a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number.
    Number(serde_json::Number),
    /// JSON string.
    String(String),
    /// JSON array with every element converted recursively.
    List(Vec<Value>),
    /// JSON object converted to a record.
    Record(Record),
}

impl Value {
    /// Convert a decoded JSON value into a [`Value`] tree.
    ///
    /// This is pure and total: it never fails for any `serde_json::Value`.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(members) => Value::Record(Record {
                fields: members
                    .into_iter()
                    .map(|(name, value)| (name, Value::from_json(value)))
                    .collect(),
            }),
        }
    }

    /// Get the string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as an i64, if this is an integer number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Get the value as an f64, if this is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Get the list elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get the nested record, if this is a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Check whether this value is JSON null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// A schema-less representation of a decoded JSON object.
///
/// Read-only after construction. Two records built from equal JSON compare
/// equal; there is no identity beyond structure. Field iteration order is
/// not guaranteed (the backing map is a `HashMap`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Look up a field by name.
    ///
    /// Returns `None` for absent fields; lookup never panics.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate over field names, in no guaranteed order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over (name, value) pairs, in no guaranteed order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether this record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Assert that a converted value is structurally equal to its JSON source.
    fn assert_round_trip(value: &Value, json: &serde_json::Value) {
        match (value, json) {
            (Value::Null, serde_json::Value::Null) => {}
            (Value::Bool(a), serde_json::Value::Bool(b)) => assert_eq!(a, b),
            (Value::Number(a), serde_json::Value::Number(b)) => assert_eq!(a, b),
            (Value::String(a), serde_json::Value::String(b)) => assert_eq!(a, b),
            (Value::List(items), serde_json::Value::Array(source)) => {
                assert_eq!(items.len(), source.len());
                for (item, source_item) in items.iter().zip(source) {
                    assert_round_trip(item, source_item);
                }
            }
            (Value::Record(record), serde_json::Value::Object(members)) => {
                assert_eq!(record.len(), members.len());
                for (name, source_value) in members {
                    let looked_up = record.get(name).expect("field should be present");
                    assert_round_trip(looked_up, source_value);
                }
            }
            (value, json) => panic!("shape mismatch: {:?} vs {:?}", value, json),
        }
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(Value::from_json(json!(null)), Value::Null);
        assert_eq!(Value::from_json(json!(true)), Value::Bool(true));
        assert_eq!(
            Value::from_json(json!("text")),
            Value::String("text".to_string())
        );
        assert_eq!(Value::from_json(json!(42)).as_i64(), Some(42));
        assert_eq!(Value::from_json(json!(1.5)).as_f64(), Some(1.5));
    }

    #[test]
    fn test_object_becomes_record() {
        let value = Value::from_json(json!({"key": "PROJ-1", "id": 10}));
        let record = value.as_record().unwrap();

        assert_eq!(record.get("key").and_then(Value::as_str), Some("PROJ-1"));
        assert_eq!(record.get("id").and_then(Value::as_i64), Some(10));
    }

    #[test]
    fn test_absent_field_is_none() {
        let value = Value::from_json(json!({"key": "PROJ-1"}));
        let record = value.as_record().unwrap();

        assert!(record.get("missing").is_none());
    }

    #[test]
    fn test_nested_objects_convert_recursively() {
        let value = Value::from_json(json!({
            "fields": {
                "status": {"name": "Open"},
                "summary": "a bug"
            }
        }));

        let status_name = value
            .as_record()
            .and_then(|r| r.get("fields"))
            .and_then(Value::as_record)
            .and_then(|r| r.get("status"))
            .and_then(Value::as_record)
            .and_then(|r| r.get("name"))
            .and_then(Value::as_str);
        assert_eq!(status_name, Some("Open"));
    }

    #[test]
    fn test_arrays_of_objects_convert() {
        let value = Value::from_json(json!({
            "comments": [{"body": "first"}, {"body": "second"}]
        }));

        let comments = value
            .as_record()
            .and_then(|r| r.get("comments"))
            .and_then(Value::as_list)
            .unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(
            comments[1]
                .as_record()
                .and_then(|r| r.get("body"))
                .and_then(Value::as_str),
            Some("second")
        );
    }

    #[test]
    fn test_deep_array_nesting_converts() {
        // Arrays of arrays of arrays of objects: deeper than the two levels
        // the mapper is typically exercised with.
        let json = json!([[[{"leaf": true}], [1, 2]], ["text", null]]);
        let value = Value::from_json(json.clone());

        assert_round_trip(&value, &json);

        let leaf = value.as_list().unwrap()[0].as_list().unwrap()[0]
            .as_list()
            .unwrap()[0]
            .as_record()
            .and_then(|r| r.get("leaf"))
            .and_then(Value::as_bool);
        assert_eq!(leaf, Some(true));
    }

    #[test]
    fn test_round_trip_representative_issue() {
        let json = json!({
            "id": "10002",
            "key": "PROJ-2",
            "fields": {
                "summary": "widget is broken",
                "labels": ["ops", "urgent"],
                "assignee": null,
                "comment": {
                    "total": 1,
                    "comments": [
                        {"author": {"name": "admin"}, "body": "looking into it"}
                    ]
                },
                "worklog_matrix": [[1, 2], [3, 4]]
            }
        });

        assert_round_trip(&Value::from_json(json.clone()), &json);
    }

    #[test]
    fn test_empty_object_and_array() {
        let json = json!({"empty_object": {}, "empty_array": []});
        let value = Value::from_json(json.clone());
        assert_round_trip(&value, &json);

        let record = value.as_record().unwrap();
        assert!(record
            .get("empty_object")
            .and_then(Value::as_record)
            .unwrap()
            .is_empty());
        assert_eq!(
            record.get("empty_array").and_then(Value::as_list),
            Some(&[] as &[Value])
        );
    }

    #[test]
    fn test_key_enumeration() {
        let value = Value::from_json(json!({"a": 1, "b": 2, "c": 3}));
        let record = value.as_record().unwrap();

        let mut keys: Vec<&str> = record.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_structural_equality() {
        let a = Value::from_json(json!({"fields": {"labels": ["x"]}}));
        let b = Value::from_json(json!({"fields": {"labels": ["x"]}}));
        let c = Value::from_json(json!({"fields": {"labels": ["y"]}}));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
