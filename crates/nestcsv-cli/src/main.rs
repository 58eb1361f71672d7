//! nestcsv CLI - convert dot-notation CSV into nested records.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Convert {
            file,
            output,
            ndjson,
            config,
            progress_interval,
            max_rows,
            delimiter,
        } => commands::convert::run(commands::convert::ConvertArgs {
            file,
            output,
            ndjson,
            config,
            progress_interval,
            max_rows,
            delimiter,
            verbose: cli.verbose,
        }),

        Commands::Check { file, config, json } => commands::check::run(file, config, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
