//! Splitting a record into the payloads a person-oriented sink stores.

use indexmap::IndexMap;
use serde::Serialize;

use super::node::{NestedRecord, RecordNode};
use super::value::TypedValue;

const NAME_KEY: &str = "name";
const FIRST_NAME_KEY: &str = "firstName";
const LAST_NAME_KEY: &str = "lastName";
const AGE_KEY: &str = "age";
const ADDRESS_KEY: &str = "address";

/// A record split into mandatory fields, address and everything else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<TypedValue>,
    /// The top-level `address` subtree, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<RecordNode>,
    /// Remaining top-level properties.
    pub additional_info: IndexMap<String, RecordNode>,
}

impl PersonPayload {
    /// Split a record. Any other `name.*` properties stay in
    /// `additional_info` under `name`.
    pub fn from_record(record: NestedRecord) -> Self {
        let mut fields = record.into_fields();

        let mut first_name = None;
        let mut last_name = None;
        if let Some(name) = fields.shift_remove(NAME_KEY) {
            match name {
                RecordNode::Object(mut parts) => {
                    first_name = take_text(&mut parts, FIRST_NAME_KEY);
                    last_name = take_text(&mut parts, LAST_NAME_KEY);
                    if !parts.is_empty() {
                        fields.insert(NAME_KEY.to_string(), RecordNode::Object(parts));
                    }
                }
                scalar => {
                    fields.insert(NAME_KEY.to_string(), scalar);
                }
            }
        }

        let age = match fields.shift_remove(AGE_KEY) {
            Some(RecordNode::Value(value)) => Some(value),
            Some(other) => {
                fields.insert(AGE_KEY.to_string(), other);
                None
            }
            None => None,
        };

        let address = fields.shift_remove(ADDRESS_KEY);

        Self {
            first_name,
            last_name,
            age,
            address,
            additional_info: fields,
        }
    }

    /// `first last`, skipping whichever part is missing.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }

    /// Age as a whole number, when it was coerced to one.
    pub fn age_years(&self) -> Option<i64> {
        self.age.as_ref().and_then(TypedValue::as_i64)
    }
}

fn take_text(parts: &mut IndexMap<String, RecordNode>, key: &str) -> Option<String> {
    match parts.shift_remove(key)? {
        RecordNode::Value(value) => Some(value.to_string()),
        other => {
            parts.insert(key.to_string(), other);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::build_record;
    use crate::schema::HeaderSchema;
    use serde_json::json;

    fn build(cells: &[&str], fields: &[&str]) -> NestedRecord {
        let schema = HeaderSchema::parse(cells.iter().map(|s| s.to_string()).collect());
        let row: Vec<String> = fields.iter().map(|s| s.to_string()).collect();
        build_record(&schema, &row).unwrap()
    }

    #[test]
    fn test_split_full_record() {
        let record = build(
            &["name.firstName", "name.lastName", "age", "address.city", "address.zip", "gender"],
            &["Alice", "Smith", "30", "NYC", "10001", "female"],
        );
        let payload = PersonPayload::from_record(record);

        assert_eq!(payload.full_name().as_deref(), Some("Alice Smith"));
        assert_eq!(payload.age_years(), Some(30));
        assert_eq!(
            serde_json::to_value(payload.address.as_ref().unwrap()).unwrap(),
            json!({"city": "NYC", "zip": 10001})
        );
        assert_eq!(
            serde_json::to_value(&payload.additional_info).unwrap(),
            json!({"gender": "female"})
        );
    }

    #[test]
    fn test_extra_name_parts_stay_in_additional_info() {
        let record = build(
            &["name.firstName", "name.lastName", "name.middle", "age"],
            &["Bob", "Jones", "Q", "41"],
        );
        let payload = PersonPayload::from_record(record);

        assert_eq!(payload.first_name.as_deref(), Some("Bob"));
        assert!(payload.address.is_none());
        assert_eq!(
            serde_json::to_value(&payload.additional_info).unwrap(),
            json!({"name": {"middle": "Q"}})
        );
    }

    #[test]
    fn test_missing_values_are_none() {
        let record = build(&["name.firstName", "name.lastName", "age"], &["Carol", "", ""]);
        let payload = PersonPayload::from_record(record);

        assert_eq!(payload.full_name().as_deref(), Some("Carol"));
        assert!(payload.age.is_none());
        assert!(payload.additional_info.is_empty());
    }
}
