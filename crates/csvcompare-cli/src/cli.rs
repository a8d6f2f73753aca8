//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// csvcompare: key-aligned comparison of CSV datasets
#[derive(Parser)]
#[command(name = "csvcompare")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two CSV files aligned by an index column
    Compare {
        /// First CSV file
        #[arg(value_name = "FIRST")]
        first: PathBuf,

        /// Second CSV file
        #[arg(value_name = "SECOND")]
        second: PathBuf,

        /// Column whose values identify rows (overrides the profile)
        #[arg(short, long)]
        index: Option<String>,

        /// Trim whitespace from names and values before comparing
        #[arg(long)]
        strip_whitespace: bool,

        /// Drop a column from both files (repeatable)
        #[arg(long = "drop-column", value_name = "COLUMN")]
        drop_columns: Vec<String>,

        /// Drop rows where COLUMN equals VALUE in both files (repeatable)
        #[arg(long = "drop-row", value_name = "COLUMN=VALUE", value_parser = parse_row_filter)]
        drop_rows: Vec<(String, String)>,

        /// JSON profile with comparison and read options
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Sort reported columns, rows, and mismatches
        #[arg(long)]
        sort: bool,
    },

    /// Report records whose field count differs from the header
    Check {
        /// CSV file to check
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Clean a CSV file and write it back in its original encoding
    Normalize {
        /// CSV file to normalize
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Trim whitespace from names and values
        #[arg(long)]
        strip_whitespace: bool,

        /// Drop a column (repeatable)
        #[arg(long = "drop-column", value_name = "COLUMN")]
        drop_columns: Vec<String>,

        /// Write here instead of overwriting FILE
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Parse `COLUMN=VALUE`; the value may itself contain `=`.
pub fn parse_row_filter(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((column, value)) if !column.is_empty() => {
            Ok((column.to_string(), value.to_string()))
        }
        _ => Err(format!("Expected COLUMN=VALUE, got '{s}'")),
    }
}
