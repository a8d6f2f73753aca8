//! csvcompare CLI - key-aligned comparison of CSV datasets.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

/// Differences found, or a file failed the structural check.
const EXIT_DIFFERENT: i32 = 1;
const EXIT_ERROR: i32 = 2;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Compare {
            first,
            second,
            index,
            strip_whitespace,
            drop_columns,
            drop_rows,
            profile,
            json,
            sort,
        } => commands::compare::run(commands::compare::CompareArgs {
            first,
            second,
            index,
            strip_whitespace,
            drop_columns,
            drop_rows,
            profile,
            json,
            sort,
        }),

        Commands::Check { file, json } => commands::check::run(file, json),

        Commands::Normalize {
            file,
            strip_whitespace,
            drop_columns,
            output,
        } => commands::normalize::run(file, strip_whitespace, drop_columns, output).map(|()| true),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_DIFFERENT),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}
