//! Normalize command - clean a file and write it back.

use std::path::PathBuf;

use colored::Colorize;
use csvcompare::{CsvDataset, Dataset};

pub fn run(
    file: PathBuf,
    strip_whitespace: bool,
    drop_columns: Vec<String>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut dataset = CsvDataset::from_file(&file)?;
    tracing::debug!(
        file = %file.display(),
        strip_whitespace,
        dropped = drop_columns.len(),
        "Normalizing"
    );

    if strip_whitespace {
        dataset.strip_whitespace();
    }
    if !drop_columns.is_empty() {
        let columns: Vec<&str> = drop_columns.iter().map(String::as_str).collect();
        dataset.drop_columns(&columns);
    }

    let target = match &output {
        Some(path) => {
            dataset.write_to(path)?;
            path
        }
        None => {
            dataset.write_to_file()?;
            &file
        }
    };

    println!(
        "{} {} ({} columns, {} rows, {})",
        "Wrote".green().bold(),
        target.display().to_string().white(),
        dataset.columns().len(),
        dataset.len(),
        dataset.encoding().name()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file
    }

    #[test]
    fn test_normalize_in_place() {
        let file = create_test_file(" id , name ,tmp\n 1 , a ,x\n");
        run(
            file.path().to_path_buf(),
            true,
            vec!["tmp".to_string()],
            None,
        )
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "id,name\n1,a\n"
        );
    }

    #[test]
    fn test_normalize_to_output() {
        let file = create_test_file("id,name\n1,a\n");
        let out = NamedTempFile::new().unwrap();

        run(
            file.path().to_path_buf(),
            false,
            vec!["name".to_string()],
            Some(out.path().to_path_buf()),
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(out.path()).unwrap(), "id\n1\n");
        assert_eq!(
            std::fs::read_to_string(file.path()).unwrap(),
            "id,name\n1,a\n"
        );
    }
}
