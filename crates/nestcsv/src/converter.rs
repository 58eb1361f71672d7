//! Row pipeline: header validation, then record building row by row.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{NestError, Result};
use crate::input::{LogicalLines, SourceMetadata, SourceText, Tokenizer, TokenizerConfig};
use crate::record::{NestedRecord, RecordBuilder};
use crate::schema::{GroupingIssue, HeaderSchema, MANDATORY_FIELDS};

/// Default number of data rows between progress notifications.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Configuration for a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Tokenizer configuration.
    pub tokenizer: TokenizerConfig,
    /// Header paths that must be present.
    pub mandatory_fields: Vec<String>,
    /// Data rows between progress notifications (0 = only at the end).
    pub progress_interval: usize,
    /// Maximum data rows to read (None = all).
    pub max_rows: Option<usize>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            mandatory_fields: MANDATORY_FIELDS.iter().map(|s| s.to_string()).collect(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_rows: None,
        }
    }
}

impl ConverterConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| NestError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: ConverterConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.tokenizer.validate()?;
        if let Some(field) = self.mandatory_fields.iter().find(|f| f.trim().is_empty()) {
            return Err(NestError::Config(format!(
                "mandatory field names cannot be blank (got {:?})",
                field
            )));
        }
        Ok(())
    }
}

/// Snapshot passed to progress hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Data rows read so far.
    pub rows_processed: usize,
    /// Records produced so far.
    pub records_emitted: usize,
    /// Rows dropped so far.
    pub rows_skipped: usize,
    /// True for the final notification of a conversion.
    pub finished: bool,
}

type ProgressHook = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Counts describing a finished (or abandoned) conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    /// Number of header columns.
    pub columns: usize,
    /// Data rows read.
    pub rows_read: usize,
    /// Records produced.
    pub records_emitted: usize,
    /// Rows dropped for any reason.
    pub rows_skipped: usize,
    /// Rows dropped for a field count mismatch.
    pub field_count_mismatches: usize,
    /// Rows dropped for writing under an invalid header path.
    pub invalid_paths: usize,
    /// Advisory header diagnostics.
    pub header_warnings: usize,
}

impl ConversionSummary {
    fn record_skip(&mut self, kind: DiagnosticKind) {
        self.rows_skipped += 1;
        match kind {
            DiagnosticKind::FieldCountMismatch => self.field_count_mismatches += 1,
            DiagnosticKind::InvalidPropertyPath => self.invalid_paths += 1,
            DiagnosticKind::NonContiguousGroup | DiagnosticKind::InvalidHeaderPath => {}
        }
    }

    fn progress(&self, finished: bool) -> Progress {
        Progress {
            rows_processed: self.rows_read,
            records_emitted: self.records_emitted,
            rows_skipped: self.rows_skipped,
            finished,
        }
    }
}

/// Result of converting one input.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Parsed header row.
    pub schema: HeaderSchema,
    /// One record per valid data row, in input order.
    pub records: Vec<NestedRecord>,
    /// Skipped rows and header warnings.
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ConversionSummary,
}

/// What is left of a stream once the caller stops pulling records.
#[derive(Debug, Clone, Serialize)]
pub struct StreamReport {
    pub schema: HeaderSchema,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ConversionSummary,
}

/// Header-only inspection result.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderReport {
    pub schema: HeaderSchema,
    /// Mandatory fields absent from the header.
    pub missing_mandatory: Vec<String>,
    /// Advisory grouping problems.
    pub grouping_issues: Vec<GroupingIssue>,
}

impl HeaderReport {
    /// Returns true if a conversion of this header would proceed.
    pub fn is_convertible(&self) -> bool {
        self.missing_mandatory.is_empty()
    }
}

/// Converts dot-notation CSV text into nested records.
#[derive(Clone)]
pub struct Converter {
    config: ConverterConfig,
    tokenizer: Tokenizer,
    progress: Option<ProgressHook>,
}

impl Converter {
    /// Create a converter with default configuration.
    pub fn new() -> Self {
        Self::with_config(ConverterConfig::default())
    }

    /// Create a converter with custom configuration.
    pub fn with_config(config: ConverterConfig) -> Self {
        let tokenizer = Tokenizer::with_config(config.tokenizer);
        Self {
            config,
            tokenizer,
            progress: None,
        }
    }

    /// Register a hook called every `progress_interval` rows and once at the end.
    pub fn with_progress(mut self, hook: impl Fn(&Progress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(hook));
        self
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Parse and validate the header, then stream records from the data rows.
    ///
    /// Fails before any row is read when the input is empty, has no data
    /// rows, or lacks a mandatory header path.
    pub fn stream<'a>(&'a self, text: &'a str) -> Result<RecordStream<'a>> {
        self.config.validate()?;

        let mut lines = self.tokenizer.lines(text);
        let header_line = lines.next().ok_or(NestError::EmptyInput)?;
        let first_row = lines.next().ok_or(NestError::MissingDataRows)?;

        let schema = HeaderSchema::parse(self.tokenizer.row(header_line));
        let grouping = schema.validate(self.config.mandatory_fields.as_slice())?;

        let mut diagnostics = Vec::new();
        for column in schema.invalid_columns() {
            let diagnostic = Diagnostic::invalid_header(column);
            warn!("{}", diagnostic.message);
            diagnostics.push(diagnostic);
        }
        for issue in &grouping {
            let diagnostic = Diagnostic::grouping(issue);
            warn!("{}", diagnostic.message);
            diagnostics.push(diagnostic);
        }

        let summary = ConversionSummary {
            columns: schema.len(),
            header_warnings: diagnostics.len(),
            ..ConversionSummary::default()
        };

        debug!(columns = schema.len(), "Header validated");

        Ok(RecordStream {
            converter: self,
            pending: Some(first_row),
            lines,
            schema,
            diagnostics,
            summary,
            done: false,
        })
    }

    /// Convert the whole input into records plus diagnostics.
    pub fn convert(&self, text: &str) -> Result<Conversion> {
        let mut stream = self.stream(text)?;
        let records: Vec<NestedRecord> = stream.by_ref().collect();
        let report = stream.finish();

        Ok(Conversion {
            schema: report.schema,
            records,
            diagnostics: report.diagnostics,
            summary: report.summary,
        })
    }

    /// Read and convert a UTF-8 file.
    pub fn convert_file(&self, path: impl AsRef<Path>) -> Result<(Conversion, SourceMetadata)> {
        let source = SourceText::read(path)?;
        info!(
            "Converting {} ({} bytes)",
            source.path.display(),
            source.size_bytes
        );

        let conversion = self.convert(&source.text)?;
        let metadata = SourceMetadata::new(
            source.path,
            source.hash,
            source.size_bytes,
            conversion.summary.rows_read,
            conversion.summary.columns,
        );

        Ok((conversion, metadata))
    }

    /// Parse the header row and report on it without reading data rows.
    pub fn inspect_header(&self, text: &str) -> Result<HeaderReport> {
        self.config.validate()?;

        let header_line = self
            .tokenizer
            .lines(text)
            .next()
            .ok_or(NestError::EmptyInput)?;
        let schema = HeaderSchema::parse(self.tokenizer.row(header_line));
        let missing_mandatory = schema.missing_mandatory(self.config.mandatory_fields.as_slice());
        let grouping_issues = schema.grouping_issues();

        Ok(HeaderReport {
            schema,
            missing_mandatory,
            grouping_issues,
        })
    }

    fn notify(&self, progress: &Progress) {
        if let Some(hook) = &self.progress {
            hook(progress);
        }
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the records of one input, one data row at a time.
///
/// Rows that cannot be built are skipped and recorded as diagnostics.
/// Call [`RecordStream::finish`] to collect them.
pub struct RecordStream<'a> {
    converter: &'a Converter,
    pending: Option<&'a str>,
    lines: LogicalLines<'a>,
    schema: HeaderSchema,
    diagnostics: Vec<Diagnostic>,
    summary: ConversionSummary,
    done: bool,
}

impl<'a> RecordStream<'a> {
    pub fn schema(&self) -> &HeaderSchema {
        &self.schema
    }

    /// Diagnostics collected so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn summary(&self) -> &ConversionSummary {
        &self.summary
    }

    /// Stop streaming and return the diagnostics and counts. Rows not yet
    /// pulled are not counted.
    pub fn finish(self) -> StreamReport {
        StreamReport {
            schema: self.schema,
            diagnostics: self.diagnostics,
            summary: self.summary,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        if let Some(max) = self.converter.config.max_rows {
            if self.summary.rows_read >= max {
                return None;
            }
        }
        self.pending.take().or_else(|| self.lines.next())
    }

    fn tick(&self) {
        let interval = self.converter.config.progress_interval;
        if interval > 0 && self.summary.rows_read % interval == 0 {
            let progress = self.summary.progress(false);
            info!(
                rows = progress.rows_processed,
                records = progress.records_emitted,
                skipped = progress.rows_skipped,
                "Progress"
            );
            self.converter.notify(&progress);
        }
    }

    fn complete(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        info!(
            rows = self.summary.rows_read,
            records = self.summary.records_emitted,
            skipped = self.summary.rows_skipped,
            "Conversion finished"
        );
        self.converter.notify(&self.summary.progress(true));
    }
}

impl<'a> Iterator for RecordStream<'a> {
    type Item = NestedRecord;

    fn next(&mut self) -> Option<NestedRecord> {
        loop {
            let Some(line) = self.next_line() else {
                self.complete();
                return None;
            };

            self.summary.rows_read += 1;
            let row = self.summary.rows_read;
            let fields = self.converter.tokenizer.row(line);

            let built = RecordBuilder::new(&self.schema).build(&fields);
            match built {
                Ok(record) => {
                    self.summary.records_emitted += 1;
                    self.tick();
                    return Some(record);
                }
                Err(e) => {
                    let Some(diagnostic) = Diagnostic::skipped_row(row, &e) else {
                        error!(row, error = %e, "Stopping conversion");
                        self.complete();
                        return None;
                    };
                    warn!(row, reason = %e, "Skipping row");
                    self.summary.record_skip(diagnostic.kind);
                    self.diagnostics.push(diagnostic);
                    self.tick();
                }
            }
        }
    }
}
