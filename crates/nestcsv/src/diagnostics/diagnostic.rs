//! Diagnostic entries for skipped rows and header hygiene.

use serde::{Deserialize, Serialize};

use crate::error::NestError;
use crate::schema::{GroupingIssue, HeaderColumn};

/// Kind of problem reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Row field count differs from the header's.
    FieldCountMismatch,
    /// Row writes a value under an unusable header path.
    InvalidPropertyPath,
    /// Columns sharing a root are not adjacent in the header.
    NonContiguousGroup,
    /// Header cell is not a valid dot-notation path.
    InvalidHeaderPath,
}

impl DiagnosticKind {
    /// Get a human-readable label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            DiagnosticKind::FieldCountMismatch => "Field Count Mismatch",
            DiagnosticKind::InvalidPropertyPath => "Invalid Property Path",
            DiagnosticKind::NonContiguousGroup => "Non-Contiguous Group",
            DiagnosticKind::InvalidHeaderPath => "Invalid Header Path",
        }
    }

    /// Returns true if diagnostics of this kind mean a row was dropped.
    pub fn skips_row(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::FieldCountMismatch | DiagnosticKind::InvalidPropertyPath
        )
    }
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational only.
    Info,
    /// Data was dropped or looks suspicious.
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        }
    }
}

/// One entry of the diagnostics channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    pub severity: Severity,
    /// Logical row number (header is row 0), for row-level entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    /// Header cell involved, when one is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            row: None,
            column: None,
            message: message.into(),
        }
    }

    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Diagnostic for a row dropped because of `error`.
    ///
    /// Returns `None` for errors that abort a conversion instead of
    /// skipping a row.
    pub fn skipped_row(row: usize, error: &NestError) -> Option<Self> {
        let diagnostic = match error {
            NestError::FieldCountMismatch { .. } => Diagnostic::new(
                DiagnosticKind::FieldCountMismatch,
                Severity::Warning,
                format!("Row {} skipped: {}", row, error),
            ),
            NestError::InvalidPropertyPath { header, .. } => Diagnostic::new(
                DiagnosticKind::InvalidPropertyPath,
                Severity::Warning,
                format!("Row {} skipped: {}", row, error),
            )
            .with_column(header.clone()),
            NestError::EmptyInput
            | NestError::MissingDataRows
            | NestError::MissingMandatoryFields { .. }
            | NestError::Io { .. }
            | NestError::Config(_)
            | NestError::Json(_) => return None,
        };
        Some(diagnostic.with_row(row))
    }

    /// Advisory diagnostic for a non-contiguous group of columns.
    pub fn grouping(issue: &GroupingIssue) -> Self {
        Diagnostic::new(
            DiagnosticKind::NonContiguousGroup,
            Severity::Info,
            format!("Header grouping: {}", issue.describe()),
        )
        .with_column(issue.root.clone())
    }

    /// Diagnostic for a header cell that is not a valid path.
    pub fn invalid_header(column: &HeaderColumn) -> Self {
        Diagnostic::new(
            DiagnosticKind::InvalidHeaderPath,
            Severity::Warning,
            format!(
                "Header column {} '{}' is not a valid property path: {}",
                column.position + 1,
                column.name,
                column.invalid_reason.as_deref().unwrap_or("unparseable path")
            ),
        )
        .with_column(column.name.clone())
    }
}
