//! Convert command - turn a CSV file into nested JSON records.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use colored::Colorize;
use nestcsv::{Conversion, Converter, ConverterConfig, Severity};
use tracing::debug;

pub struct ConvertArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub ndjson: bool,
    pub config: Option<PathBuf>,
    pub progress_interval: Option<usize>,
    pub max_rows: Option<usize>,
    pub delimiter: Option<char>,
    pub verbose: bool,
}

pub fn run(args: ConvertArgs) -> Result<(), Box<dyn std::error::Error>> {
    if !args.file.exists() {
        return Err(format!("File not found: {}", args.file.display()).into());
    }

    let mut config = match &args.config {
        Some(path) => ConverterConfig::from_json_file(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(interval) = args.progress_interval {
        config.progress_interval = interval;
    }
    if let Some(max) = args.max_rows {
        config.max_rows = Some(max);
    }
    if let Some(delimiter) = args.delimiter {
        config.tokenizer.delimiter = delimiter;
    }
    debug!(?config, "Using configuration");

    eprintln!(
        "{} {}",
        "Converting".cyan().bold(),
        args.file.display().to_string().white()
    );

    let converter = Converter::with_config(config);
    let (conversion, source) = converter.convert_file(&args.file)?;

    match &args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_records(writer, &conversion, args.ndjson)?;
        }
        None => {
            let stdout = io::stdout();
            write_records(stdout.lock(), &conversion, args.ndjson)?;
        }
    }

    print_summary(&conversion, args.verbose);

    if let Some(path) = &args.output {
        eprintln!(
            "{} {} ({})",
            "Saved to".green().bold(),
            path.display().to_string().white(),
            source.hash
        );
    }

    Ok(())
}

fn write_records<W: Write>(
    mut writer: W,
    conversion: &Conversion,
    ndjson: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if ndjson {
        for record in &conversion.records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
    } else {
        serde_json::to_writer_pretty(&mut writer, &conversion.records)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn print_summary(conversion: &Conversion, verbose: bool) {
    let summary = &conversion.summary;

    eprintln!();
    eprintln!(
        "Converted {} of {} rows ({} skipped, {} header warnings)",
        summary.records_emitted.to_string().white().bold(),
        summary.rows_read,
        summary.rows_skipped.to_string().yellow(),
        summary.header_warnings.to_string().yellow()
    );

    if summary.rows_skipped > 0 {
        eprintln!(
            "  {} field count mismatches, {} invalid property paths",
            summary.field_count_mismatches, summary.invalid_paths
        );
    }

    // Skipped rows are already logged one by one; repeat them only on request.
    let shown = conversion
        .diagnostics
        .iter()
        .filter(|d| verbose || !d.kind.skips_row());
    for diagnostic in shown {
        let label = match diagnostic.severity {
            Severity::Warning => diagnostic.kind.label().yellow(),
            Severity::Info => diagnostic.kind.label().blue(),
        };
        eprintln!("  [{}] {}", label, diagnostic.message);
    }

    if conversion.records.is_empty() {
        eprintln!("{}", "No records produced".red());
    }
}
