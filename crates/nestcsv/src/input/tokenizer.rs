//! Quote-aware line splitting and field tokenizing.

use serde::{Deserialize, Serialize};

use crate::error::{NestError, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Tokenizer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Field separator.
    pub delimiter: char,
    /// Quote character.
    pub quote: char,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
        }
    }
}

impl TokenizerConfig {
    /// Check that the delimiter and quote can be told apart from each other
    /// and from line terminators.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == self.quote {
            return Err(NestError::Config(format!(
                "delimiter and quote must differ (both are {:?})",
                self.delimiter
            )));
        }
        for (name, ch) in [("delimiter", self.delimiter), ("quote", self.quote)] {
            if ch == '\n' || ch == '\r' {
                return Err(NestError::Config(format!(
                    "{} cannot be a line terminator",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Splits text into logical rows and rows into fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer for comma-separated, double-quoted input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer with custom configuration.
    pub fn with_config(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Iterate over the logical lines of `text`.
    ///
    /// A leading UTF-8 byte order mark is skipped.
    pub fn lines<'a>(&self, text: &'a str) -> LogicalLines<'a> {
        LogicalLines {
            text: text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text),
            pos: 0,
            quote: self.config.quote,
        }
    }

    /// Split one logical line into trimmed field values.
    ///
    /// Quote characters are removed, a doubled quote inside a quoted
    /// section becomes one literal quote, and delimiters or line breaks
    /// inside quotes are kept as content.
    pub fn row(&self, line: &str) -> Vec<String> {
        let TokenizerConfig { delimiter, quote } = self.config;
        let mut fields = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch == quote {
                if in_quotes && chars.peek() == Some(&quote) {
                    current.push(quote);
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            } else if ch == delimiter && !in_quotes {
                fields.push(current.trim().to_string());
                current.clear();
            } else {
                current.push(ch);
            }
        }
        fields.push(current.trim().to_string());

        fields
    }
}

/// Streaming iterator over logical lines.
///
/// A line break only ends a line when it is outside quotes. Lines that
/// are blank after trimming are skipped. Yielded slices borrow from the
/// input and keep quoting (including doubled quotes) verbatim.
#[derive(Debug, Clone)]
pub struct LogicalLines<'a> {
    text: &'a str,
    pos: usize,
    quote: char,
}

impl<'a> Iterator for LogicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        while self.pos < self.text.len() {
            let rest = &self.text[self.pos..];
            let mut in_quotes = false;
            let mut end = rest.len();
            let mut advance = rest.len();

            for (i, ch) in rest.char_indices() {
                if ch == self.quote {
                    in_quotes = !in_quotes;
                } else if ch == '\n' && !in_quotes {
                    end = if rest[..i].ends_with('\r') { i - 1 } else { i };
                    advance = i + 1;
                    break;
                }
            }

            self.pos += advance;
            let line = &rest[..end];
            if !line.trim().is_empty() {
                return Some(line);
            }
        }
        None
    }
}

/// Split `text` into logical lines using the default tokenizer.
pub fn tokenize_lines(text: &str) -> Vec<&str> {
    Tokenizer::new().lines(text).collect()
}

/// Split one logical line into fields using the default tokenizer.
pub fn tokenize_row(line: &str) -> Vec<String> {
    Tokenizer::new().row(line)
}
