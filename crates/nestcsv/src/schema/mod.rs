//! Header paths and header row validation.

mod header;
mod path;

pub use header::{
    validate_headers, GroupingIssue, HeaderColumn, HeaderSchema, MANDATORY_FIELDS,
};
pub use path::{HeaderPath, PATH_SEPARATOR};
