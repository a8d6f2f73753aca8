//! Compare command - diff two CSV files by an index column.

use std::path::PathBuf;

use colored::Colorize;
use csvcompare::compare::RowFilter;
use csvcompare::{CompareOutput, CompareProfile, Comparer};

/// Arguments for the compare command.
pub struct CompareArgs {
    pub first: PathBuf,
    pub second: PathBuf,
    pub index: Option<String>,
    pub strip_whitespace: bool,
    pub drop_columns: Vec<String>,
    pub drop_rows: Vec<(String, String)>,
    pub profile: Option<PathBuf>,
    pub json: bool,
    pub sort: bool,
}

/// Returns `Ok(true)` when the files match.
pub fn run(args: CompareArgs) -> Result<bool, Box<dyn std::error::Error>> {
    let profile = match &args.profile {
        Some(path) => CompareProfile::load(path)?,
        None => CompareProfile::default(),
    };
    let profile = merge_flags(profile, &args);

    let index = profile
        .index_column
        .clone()
        .ok_or("No index column given. Pass --index or set index_column in the profile")?;

    tracing::debug!(
        first = %args.first.display(),
        second = %args.second.display(),
        index = %index,
        profile = ?args.profile,
        "Starting comparison"
    );

    let mut comparer = Comparer::from_profile(&args.first, &args.second, &profile)?;
    let mut output = comparer.compare(&index)?;
    if profile.sort {
        output = output.sorted();
    }

    if args.json {
        println!("{}", output.to_json_pretty()?);
    } else {
        println!("{}", render_report(&output));
    }

    Ok(output.is_match())
}

/// Command-line flags extend or override the profile.
fn merge_flags(mut profile: CompareProfile, args: &CompareArgs) -> CompareProfile {
    if let Some(index) = &args.index {
        profile.index_column = Some(index.clone());
    }
    profile.strip_whitespace |= args.strip_whitespace;
    profile.sort |= args.sort;
    profile.drop_columns.extend(args.drop_columns.iter().cloned());
    profile
        .drop_rows
        .extend(args.drop_rows.iter().map(|(column, value)| RowFilter {
            column: column.clone(),
            values: vec![value.clone()],
        }));
    profile
}

/// Colour the plain report: labels, section titles, and the match result.
fn render_report(output: &CompareOutput) -> String {
    let mut lines = Vec::new();
    for (label, value) in output.header() {
        let value = match (label, output.is_match()) {
            ("Match result", true) => value.as_str().green().bold().to_string(),
            ("Match result", false) => value.as_str().red().bold().to_string(),
            _ => value,
        };
        lines.push(format!("{} {}", format!("{label}:").as_str().cyan().bold(), value));
    }

    for (title, items) in output.sections() {
        if items.is_empty() {
            continue;
        }
        lines.push(title.yellow().bold().to_string());
        lines.extend(items.into_iter().map(|item| format!("\t{item}")));
    }

    lines.join("\n")
}
