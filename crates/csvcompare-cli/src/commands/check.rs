//! Check command - report structurally irregular records.

use std::path::PathBuf;

use colored::Colorize;
use csvcompare::{CsvDataset, Dataset};

/// Returns `Ok(true)` when every record has the header's field count.
pub fn run(file: PathBuf, json_output: bool) -> Result<bool, Box<dyn std::error::Error>> {
    let dataset = CsvDataset::from_file(&file)?;
    let errors = dataset.structural_errors();

    if json_output {
        let report = serde_json::json!({
            "file": dataset.origin().to_string(),
            "encoding": dataset.encoding().name(),
            "columns": dataset.columns().len(),
            "rows": dataset.len(),
            "structural_errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(errors.is_empty());
    }

    println!(
        "{} {} ({}, {} columns, {} rows)",
        "Checked".cyan().bold(),
        file.display().to_string().white(),
        dataset.encoding().name(),
        dataset.columns().len(),
        dataset.len()
    );

    if errors.is_empty() {
        println!("{}", "No structural errors".green());
        return Ok(true);
    }

    println!(
        "{} {}",
        errors.len().to_string().red().bold(),
        "irregular records:".red()
    );
    for error in &errors {
        println!(
            "  line {}: expected {} fields, found {}",
            error.line.to_string().white().bold(),
            error.expected,
            error.found
        );
    }

    Ok(false)
}
