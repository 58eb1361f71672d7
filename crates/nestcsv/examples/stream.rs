//! Example: Stream records out of a CSV file and split them into payloads.
//!
//! Usage:
//!   cargo run --example stream -- <file_path>

use std::env;
use std::path::Path;

use nestcsv::input::SourceText;
use nestcsv::{Converter, PersonPayload};

fn main() -> nestcsv::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example stream -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let source = SourceText::read(path)?;
    let converter = Converter::new().with_progress(|p| {
        if p.finished {
            println!("-- done: {} rows, {} skipped", p.rows_processed, p.rows_skipped);
        }
    });

    let mut stream = converter.stream(&source.text)?;
    for record in stream.by_ref() {
        let payload = PersonPayload::from_record(record);
        println!(
            "{:30} age={:<5} address={} extra={}",
            payload.full_name().unwrap_or_default(),
            payload
                .age
                .as_ref()
                .map(|a| a.to_string())
                .unwrap_or_default(),
            payload.address.is_some(),
            payload.additional_info.len()
        );
    }

    let report = stream.finish();
    for diagnostic in &report.diagnostics {
        println!("  [{}] {}", diagnostic.kind.label(), diagnostic.message);
    }

    Ok(())
}
