//! Diagnostics reported alongside converted records.

mod diagnostic;

pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
