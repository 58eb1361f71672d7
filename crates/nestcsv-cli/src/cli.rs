//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nestcsv: convert dot-notation CSV into nested JSON records
#[derive(Parser)]
#[command(name = "nestcsv")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a CSV file into nested records
    Convert {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the records (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write one JSON record per line instead of a JSON array
        #[arg(long)]
        ndjson: bool,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Data rows between progress reports (0 = only at the end)
        #[arg(long)]
        progress_interval: Option<usize>,

        /// Maximum number of data rows to read
        #[arg(long)]
        max_rows: Option<usize>,

        /// Field delimiter
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Validate the header row of a CSV file
    Check {
        /// Path to the CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
