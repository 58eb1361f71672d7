//! nestcsv: streaming converter from dot-notation CSV to nested records.
//!
//! The header row of the input names property paths such as
//! `name.firstName` or `address.city`. Every data row becomes one
//! [`NestedRecord`] whose leaves are typed values inferred from the raw
//! text.
//!
//! # Core Principles
//!
//! - **Header first**: the header is parsed and validated before any data row
//! - **Row isolation**: a malformed row is skipped and reported, never fatal
//! - **Typed leaves**: integers, floats, booleans and strings are inferred per field
//!
//! # Example
//!
//! ```
//! use nestcsv::Converter;
//!
//! let text = "name.firstName,name.lastName,age,address.city\nAlice,Smith,30,NYC\n";
//! let conversion = Converter::new().convert(text).unwrap();
//!
//! assert_eq!(conversion.records.len(), 1);
//! assert_eq!(
//!     conversion.records[0].get_value("address.city").and_then(|v| v.as_str()),
//!     Some("NYC")
//! );
//! ```

pub mod diagnostics;
pub mod error;
pub mod input;
pub mod record;
pub mod schema;

mod converter;

pub use crate::converter::{
    Conversion, ConversionSummary, Converter, ConverterConfig, HeaderReport, Progress,
    RecordStream, StreamReport, DEFAULT_PROGRESS_INTERVAL,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{NestError, Result};
pub use input::{tokenize_lines, tokenize_row, SourceMetadata, Tokenizer, TokenizerConfig};
pub use record::{build_record, coerce, NestedRecord, PersonPayload, RecordNode, TypedValue};
pub use schema::{validate_headers, GroupingIssue, HeaderPath, HeaderSchema, MANDATORY_FIELDS};
