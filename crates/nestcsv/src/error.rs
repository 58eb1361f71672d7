//! Error types for the nestcsv library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for nestcsv operations.
///
/// Only the input/schema variants abort a conversion. Row-level problems
/// are reported as [`Diagnostic`](crate::diagnostics::Diagnostic) values
/// instead of errors.
#[derive(Debug, Error)]
pub enum NestError {
    /// The input contained no logical lines at all.
    #[error("Empty input: no header row found")]
    EmptyInput,

    /// The input contained a header row but no data rows.
    #[error("Missing data rows: input has a header row only")]
    MissingDataRows,

    /// One or more mandatory header paths are absent.
    #[error("Missing mandatory fields: {}", missing.join(", "))]
    MissingMandatoryFields { missing: Vec<String> },

    /// A data row has a different number of fields than the header.
    #[error("Field count mismatch: expected {expected} fields, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    /// A header cell is not a usable dot-notation path.
    #[error("Invalid property path '{header}': {reason}")]
    InvalidPropertyPath { header: String, reason: String },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NestError {
    /// Returns true if this error aborts a whole conversion.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            NestError::InvalidPropertyPath { .. } | NestError::FieldCountMismatch { .. }
        )
    }
}

/// Result type alias for nestcsv operations.
pub type Result<T> = std::result::Result<T, NestError>;
