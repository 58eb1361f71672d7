//! Input tokenizing and source file handling.

mod source;
mod tokenizer;

pub use source::{content_hash, SourceMetadata, SourceText};
pub use tokenizer::{tokenize_lines, tokenize_row, LogicalLines, Tokenizer, TokenizerConfig};
