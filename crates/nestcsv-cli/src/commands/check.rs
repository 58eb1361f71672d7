//! Check command - validate the header row without converting data.

use std::path::PathBuf;

use colored::Colorize;
use nestcsv::input::SourceText;
use nestcsv::{Converter, ConverterConfig};

pub fn run(
    file: PathBuf,
    config: Option<PathBuf>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => ConverterConfig::from_json_file(path)?,
        None => ConverterConfig::default(),
    };

    let source = SourceText::read(&file)?;
    let report = Converter::with_config(config).inspect_header(&source.text)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {}",
            "Header of".cyan().bold(),
            file.display().to_string().white()
        );
        println!();

        for column in &report.schema.columns {
            match &column.path {
                Some(path) => println!(
                    "  {:>3}  {:30} depth {}",
                    column.position + 1,
                    column.name,
                    path.depth()
                ),
                None => println!(
                    "  {:>3}  {:30} {}",
                    column.position + 1,
                    column.name,
                    format!(
                        "invalid: {}",
                        column.invalid_reason.as_deref().unwrap_or("unparseable path")
                    )
                    .red()
                ),
            }
        }
        println!();

        for issue in &report.grouping_issues {
            println!("{} {}", "Warning:".yellow().bold(), issue.describe());
        }

        if report.missing_mandatory.is_empty() {
            println!("{}", "All mandatory fields present".green());
        } else {
            println!(
                "{} {}",
                "Missing mandatory fields:".red().bold(),
                report.missing_mandatory.join(", ")
            );
        }
    }

    if !report.is_convertible() {
        return Err(format!(
            "header is missing mandatory fields: {}",
            report.missing_mandatory.join(", ")
        )
        .into());
    }

    Ok(())
}
