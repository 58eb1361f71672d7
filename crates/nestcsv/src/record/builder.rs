//! Building nested records from tokenized rows.

use crate::error::{NestError, Result};
use crate::schema::HeaderSchema;

use super::node::NestedRecord;
use super::value::coerce;

/// Builds one nested record per data row against a fixed header schema.
#[derive(Debug, Clone, Copy)]
pub struct RecordBuilder<'s> {
    schema: &'s HeaderSchema,
}

impl<'s> RecordBuilder<'s> {
    pub fn new(schema: &'s HeaderSchema) -> Self {
        Self { schema }
    }

    /// Build a record from the row's raw fields.
    ///
    /// Empty fields are left out of the record. A non-empty field under an
    /// invalid header path fails the whole row.
    pub fn build(&self, fields: &[String]) -> Result<NestedRecord> {
        if fields.len() != self.schema.len() {
            return Err(NestError::FieldCountMismatch {
                expected: self.schema.len(),
                found: fields.len(),
            });
        }

        let mut record = NestedRecord::new();
        for (column, raw) in self.schema.columns.iter().zip(fields) {
            if raw.is_empty() {
                continue;
            }
            let path = column.path()?;
            record.insert_path(path, coerce(raw));
        }

        Ok(record)
    }
}

/// Build a single record; see [`RecordBuilder::build`].
pub fn build_record(schema: &HeaderSchema, fields: &[String]) -> Result<NestedRecord> {
    RecordBuilder::new(schema).build(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema(cells: &[&str]) -> HeaderSchema {
        HeaderSchema::parse(cells.iter().map(|s| s.to_string()).collect())
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_typed_nested_record() {
        let header = schema(&["name.firstName", "name.lastName", "age", "address.city", "active"]);
        let record = build_record(&header, &row(&["Alice", "Smith", "30", "NYC", "TRUE"])).unwrap();

        assert_eq!(
            record.to_json().unwrap(),
            json!({
                "name": {"firstName": "Alice", "lastName": "Smith"},
                "age": 30,
                "address": {"city": "NYC"},
                "active": true
            })
        );
    }

    #[test]
    fn test_empty_fields_omitted() {
        let header = schema(&["name.firstName", "name.lastName", "age", "address.city"]);
        let record = build_record(&header, &row(&["Alice", "", "30", ""])).unwrap();

        assert_eq!(
            record.to_json().unwrap(),
            json!({"name": {"firstName": "Alice"}, "age": 30})
        );
        assert!(record.get("address").is_none());
    }

    #[test]
    fn test_five_level_path() {
        let header = schema(&["a.b.c.d.e"]);
        let record = build_record(&header, &row(&["12"])).unwrap();

        assert_eq!(record.to_json().unwrap(), json!({"a": {"b": {"c": {"d": {"e": 12}}}}}));
        assert_eq!(record.get("a").map(|n| n.depth()), Some(4));
    }

    #[test]
    fn test_field_count_mismatch() {
        let header = schema(&["a", "b"]);
        let err = build_record(&header, &row(&["1"])).unwrap_err();
        assert!(matches!(
            err,
            NestError::FieldCountMismatch { expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_invalid_path_fails_only_with_value() {
        let header = schema(&["age", "bad..path"]);

        let ok = build_record(&header, &row(&["30", ""])).unwrap();
        assert_eq!(ok.to_json().unwrap(), json!({"age": 30}));

        let err = build_record(&header, &row(&["30", "x"])).unwrap_err();
        assert!(matches!(err, NestError::InvalidPropertyPath { .. }));
    }

    #[test]
    fn test_duplicate_path_last_write_wins() {
        let header = schema(&["age", "age"]);
        let record = build_record(&header, &row(&["30", "31"])).unwrap();
        assert_eq!(record.to_json().unwrap(), json!({"age": 31}));
    }
}
