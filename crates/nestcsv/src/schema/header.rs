//! Header row schema and validation.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::{NestError, Result};

use super::path::HeaderPath;

/// Header paths every input file must provide.
pub const MANDATORY_FIELDS: &[&str] = &["name.firstName", "name.lastName", "age"];

/// One column of the header row.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderColumn {
    /// Zero-based column index.
    pub position: usize,
    /// The header cell as written.
    pub name: String,
    /// Parsed path, absent when the cell is not a valid path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<HeaderPath>,
    /// Why the cell could not be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_reason: Option<String>,
}

impl HeaderColumn {
    fn new(position: usize, name: String) -> Self {
        match HeaderPath::parse(&name) {
            Ok(path) => Self {
                position,
                name,
                path: Some(path),
                invalid_reason: None,
            },
            Err(NestError::InvalidPropertyPath { reason, .. }) => Self {
                position,
                name,
                path: None,
                invalid_reason: Some(reason),
            },
            Err(other) => Self {
                position,
                name,
                path: None,
                invalid_reason: Some(other.to_string()),
            },
        }
    }

    /// The parsed path, or the error a row hits when it writes to this column.
    pub fn path(&self) -> Result<&HeaderPath> {
        self.path.as_ref().ok_or_else(|| NestError::InvalidPropertyPath {
            header: self.name.clone(),
            reason: self
                .invalid_reason
                .clone()
                .unwrap_or_else(|| "unparseable path".to_string()),
        })
    }

    /// First path segment, or `None` when the cell is not a valid path.
    pub fn root(&self) -> Option<&str> {
        self.path.as_ref().map(HeaderPath::root)
    }
}

/// Columns sharing a root segment that are not adjacent in the header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupingIssue {
    /// The shared root segment.
    pub root: String,
    /// Positions of every column under this root.
    pub positions: Vec<usize>,
}

impl GroupingIssue {
    pub fn describe(&self) -> String {
        format!(
            "properties under '{}' are not contiguous (columns {})",
            self.root,
            self.positions
                .iter()
                .map(|p| (p + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Parsed header row, fixed for the duration of one conversion.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderSchema {
    pub columns: Vec<HeaderColumn>,
}

impl HeaderSchema {
    /// Parse every header cell into a path once.
    pub fn parse(cells: Vec<String>) -> Self {
        let columns: Vec<HeaderColumn> = cells
            .into_iter()
            .enumerate()
            .map(|(position, name)| HeaderColumn::new(position, name))
            .collect();

        debug!(
            columns = columns.len(),
            invalid = columns.iter().filter(|c| c.path.is_none()).count(),
            "Parsed header row"
        );

        Self { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by its header name.
    pub fn get_column(&self, name: &str) -> Option<&HeaderColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns whose cells are not valid paths.
    pub fn invalid_columns(&self) -> impl Iterator<Item = &HeaderColumn> {
        self.columns.iter().filter(|c| c.path.is_none())
    }

    /// Mandatory fields absent from the header, in the order given.
    pub fn missing_mandatory<S: AsRef<str>>(&self, mandatory: &[S]) -> Vec<String> {
        mandatory
            .iter()
            .map(|m| m.as_ref())
            .filter(|m| self.get_column(m).is_none())
            .map(String::from)
            .collect()
    }

    /// Roots used by several columns whose columns are interleaved with
    /// another root's columns. Invalid cells are left out.
    pub fn grouping_issues(&self) -> Vec<GroupingIssue> {
        let mut by_root: IndexMap<&str, Vec<usize>> = IndexMap::new();
        for column in &self.columns {
            if let Some(root) = column.root() {
                by_root.entry(root).or_default().push(column.position);
            }
        }

        by_root
            .into_iter()
            .filter(|(_, positions)| positions.len() > 1)
            .filter(|(_, positions)| {
                let first = positions[0];
                let last = positions[positions.len() - 1];
                last - first + 1 != positions.len()
            })
            .map(|(root, positions)| GroupingIssue {
                root: root.to_string(),
                positions,
            })
            .collect()
    }

    /// Check the mandatory fields and collect advisory grouping issues.
    ///
    /// Only missing mandatory fields are an error.
    pub fn validate<S: AsRef<str>>(&self, mandatory: &[S]) -> Result<Vec<GroupingIssue>> {
        let missing = self.missing_mandatory(mandatory);
        if !missing.is_empty() {
            return Err(NestError::MissingMandatoryFields { missing });
        }
        Ok(self.grouping_issues())
    }
}

/// Validate a header row against [`MANDATORY_FIELDS`].
pub fn validate_headers(schema: &HeaderSchema) -> Result<Vec<GroupingIssue>> {
    schema.validate(MANDATORY_FIELDS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(cells: &[&str]) -> HeaderSchema {
        HeaderSchema::parse(cells.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_valid_header() {
        let header = schema(&["name.firstName", "name.lastName", "age", "address.city"]);
        let issues = validate_headers(&header).unwrap();
        assert!(issues.is_empty());
        assert_eq!(header.len(), 4);
    }

    #[test]
    fn test_missing_age() {
        let header = schema(&["name.firstName", "name.lastName", "address.city"]);
        match validate_headers(&header) {
            Err(NestError::MissingMandatoryFields { missing }) => {
                assert_eq!(missing, vec!["age"]);
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_all_mandatory() {
        let header = schema(&["email"]);
        let missing = header.missing_mandatory(MANDATORY_FIELDS);
        assert_eq!(missing, vec!["name.firstName", "name.lastName", "age"]);
    }

    #[test]
    fn test_non_contiguous_group_is_advisory() {
        let header = schema(&[
            "name.firstName",
            "age",
            "name.lastName",
            "address.city",
            "address.zip",
        ]);
        let issues = validate_headers(&header).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].root, "name");
        assert_eq!(issues[0].positions, vec![0, 2]);
        assert!(issues[0].describe().contains("columns 1, 3"));
    }

    #[test]
    fn test_single_column_roots_never_flagged() {
        let header = schema(&["age", "name.firstName", "name.lastName", "email"]);
        assert!(header.grouping_issues().is_empty());
    }

    #[test]
    fn test_invalid_cells_not_grouped() {
        let header = schema(&["name.firstName", ".a", "name.lastName", "age", ".b"]);
        let issues = header.grouping_issues();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].root, "name");
        assert_eq!(header.columns[1].root(), None);
    }

    #[test]
    fn test_invalid_column_kept_with_reason() {
        let header = schema(&["name.firstName", "name.lastName", "age", "meta..x"]);
        assert!(validate_headers(&header).is_ok());
        let invalid: Vec<_> = header.invalid_columns().collect();
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0].position, 3);
        assert!(matches!(
            invalid[0].path(),
            Err(NestError::InvalidPropertyPath { .. })
        ));
    }
}
