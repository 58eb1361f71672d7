//! Typed values, nested records and record building.

mod builder;
mod node;
mod payload;
mod value;

pub use builder::{build_record, RecordBuilder};
pub use node::{NestedRecord, RecordNode};
pub use payload::PersonPayload;
pub use value::{coerce, TypedValue};
