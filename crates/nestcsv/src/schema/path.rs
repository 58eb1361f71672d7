//! Dot-notation property paths.

use std::fmt;

use serde::Serialize;

use crate::error::{NestError, Result};

/// Separator between path segments in a header cell.
pub const PATH_SEPARATOR: char = '.';

/// A header cell split into its property path segments.
///
/// Segments are trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HeaderPath {
    segments: Vec<String>,
}

impl HeaderPath {
    /// Parse a header cell such as `address.city`.
    pub fn parse(raw: &str) -> Result<Self> {
        let segments: Vec<String> = raw
            .split(PATH_SEPARATOR)
            .map(|s| s.trim().to_string())
            .collect();

        if let Some(index) = segments.iter().position(|s| s.is_empty()) {
            return Err(NestError::InvalidPropertyPath {
                header: raw.to_string(),
                reason: format!("segment {} is empty", index + 1),
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Split into the container segments and the final leaf segment.
    pub fn split_leaf(&self) -> (&[String], &str) {
        let last = self.segments.len() - 1;
        (&self.segments[..last], &self.segments[last])
    }
}

impl fmt::Display for HeaderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_path() {
        let path = HeaderPath::parse("name.firstName").unwrap();
        assert_eq!(path.segments(), &["name", "firstName"]);
        assert_eq!(path.root(), "name");
        assert_eq!(path.depth(), 2);
        assert!(path.is_nested());
        assert_eq!(path.to_string(), "name.firstName");
    }

    #[test]
    fn test_parse_flat_path() {
        let path = HeaderPath::parse("age").unwrap();
        assert!(!path.is_nested());
        let (parents, leaf) = path.split_leaf();
        assert!(parents.is_empty());
        assert_eq!(leaf, "age");
    }

    #[test]
    fn test_reject_empty_segments() {
        for raw in ["", "a..b", ".a", "a.", "a. .b"] {
            let err = HeaderPath::parse(raw).unwrap_err();
            assert!(
                matches!(err, NestError::InvalidPropertyPath { .. }),
                "expected invalid path for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_segments_trimmed() {
        let path = HeaderPath::parse("address. city").unwrap();
        assert_eq!(path.segments(), &["address", "city"]);
        assert_eq!(path.to_string(), "address.city");
    }

    #[test]
    fn test_deep_path() {
        let path = HeaderPath::parse("a.b.c.d.e").unwrap();
        let (parents, leaf) = path.split_leaf();
        assert_eq!(parents.len(), 4);
        assert_eq!(leaf, "e");
    }
}
