//! The comparison engine: key-aligned diff of two datasets.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexSet;

use crate::error::{CompareError, Result};
use crate::table::{CsvDataset, Dataset, NullDataset, Row};

use super::output::{CompareOutput, Mismatch};
use super::profile::CompareProfile;

/// Which dataset of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first file"),
            Side::Second => write!(f, "second file"),
        }
    }
}

/// Compares two datasets by a key column.
///
/// # Example
///
/// ```
/// use csvcompare::Comparer;
///
/// let mut comparer = Comparer::from_lines(
///     ["c1,c2", "r1,v1", "r2,v2"],
///     ["c1,c2", "r1,v1", "r2,changed"],
/// )
/// .unwrap();
///
/// let output = comparer.compare("c1").unwrap();
/// assert!(!output.is_match());
/// assert_eq!(output.mismatched_rows()[0].row, "r2");
/// ```
pub struct Comparer {
    first: Box<dyn Dataset>,
    second: Box<dyn Dataset>,
}

impl Comparer {
    /// A comparer with no data attached on either side.
    pub fn new() -> Self {
        Self {
            first: Box::new(NullDataset),
            second: Box::new(NullDataset),
        }
    }

    /// Read both datasets from CSV files.
    pub fn from_files(first: impl AsRef<Path>, second: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::from_datasets(
            CsvDataset::from_file(first)?,
            CsvDataset::from_file(second)?,
        ))
    }

    /// Parse both datasets from lists of CSV lines.
    pub fn from_lines<I, J, S, T>(first: I, second: J) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        Ok(Self::from_datasets(
            CsvDataset::from_lines(first)?,
            CsvDataset::from_lines(second)?,
        ))
    }

    /// Compare two already-built datasets.
    pub fn from_datasets(
        first: impl Dataset + 'static,
        second: impl Dataset + 'static,
    ) -> Self {
        Self {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Read both files with the profile's per-side options, then apply its
    /// mutations.
    pub fn from_profile(
        first: impl AsRef<Path>,
        second: impl AsRef<Path>,
        profile: &CompareProfile,
    ) -> Result<Self> {
        let first = CsvDataset::from_file_with_options(first, profile.first.read_options()?)?;
        let second = CsvDataset::from_file_with_options(second, profile.second.read_options()?)?;

        let mut comparer = Self::from_datasets(first, second);
        comparer.apply_profile(profile);
        Ok(comparer)
    }

    /// Replace the first dataset.
    pub fn set_first(&mut self, dataset: impl Dataset + 'static) {
        self.first = Box::new(dataset);
    }

    /// Replace the second dataset.
    pub fn set_second(&mut self, dataset: impl Dataset + 'static) {
        self.second = Box::new(dataset);
    }

    pub fn first(&self) -> &dyn Dataset {
        self.first.as_ref()
    }

    pub fn second(&self) -> &dyn Dataset {
        self.second.as_ref()
    }

    pub fn first_mut(&mut self) -> &mut dyn Dataset {
        self.first.as_mut()
    }

    pub fn second_mut(&mut self) -> &mut dyn Dataset {
        self.second.as_mut()
    }

    /// Trim whitespace in both datasets.
    pub fn strip_whitespace(&mut self) {
        self.first.strip_whitespace();
        self.second.strip_whitespace();
    }

    /// Drop columns from both datasets.
    pub fn drop_columns(&mut self, columns: &[&str]) {
        self.first.drop_columns(columns);
        self.second.drop_columns(columns);
    }

    /// Drop rows whose `column` value is in `values`, in both datasets.
    pub fn drop_rows(&mut self, column: &str, values: &[&str]) {
        self.first.drop_rows(column, values);
        self.second.drop_rows(column, values);
    }

    /// Drop rows matching a predicate, in both datasets.
    pub fn drop_rows_by(&mut self, predicate: &dyn Fn(&Row) -> bool) {
        self.first.drop_rows_by(predicate);
        self.second.drop_rows_by(predicate);
    }

    /// Apply a per-row transform to `column` in both datasets.
    pub fn apply_transform(&mut self, column: &str, transform: &dyn Fn(&Row) -> String) {
        self.first.apply_transform(column, transform);
        self.second.apply_transform(column, transform);
    }

    /// Apply a profile's whitespace, column, and row options to both sides.
    pub fn apply_profile(&mut self, profile: &CompareProfile) {
        if profile.strip_whitespace {
            self.strip_whitespace();
        }

        let columns: Vec<&str> = profile.drop_columns.iter().map(String::as_str).collect();
        if !columns.is_empty() {
            self.drop_columns(&columns);
        }

        for filter in &profile.drop_rows {
            let values: Vec<&str> = filter.values.iter().map(String::as_str).collect();
            self.drop_rows(&filter.column, &values);
        }
    }

    /// Compare the datasets, aligning rows by `index_column`.
    ///
    /// Fails only when the key column is missing from either side. Both
    /// datasets have their key values disambiguated independently, so
    /// repeated keys become `k`, `k.1`, ... on each side.
    pub fn compare(&mut self, index_column: &str) -> Result<CompareOutput> {
        let _span = tracing::info_span!("compare", index_column).entered();

        for (side, dataset) in [(Side::First, &self.first), (Side::Second, &self.second)] {
            if !dataset.columns().iter().any(|c| c == index_column) {
                return Err(CompareError::ColumnNotFound {
                    column: index_column.to_string(),
                    location: side.to_string(),
                    available: dataset.columns().to_vec(),
                });
            }
        }

        self.first.set_index_column(index_column)?;
        self.second.set_index_column(index_column)?;

        let first_columns: IndexSet<&str> =
            self.first.columns().iter().map(String::as_str).collect();
        let second_columns: IndexSet<&str> =
            self.second.columns().iter().map(String::as_str).collect();
        let first_keys: IndexSet<String> =
            self.first.row_values_in_column(index_column).into_iter().collect();
        let second_keys: IndexSet<String> =
            self.second.row_values_in_column(index_column).into_iter().collect();

        let extra_cols_in_first = difference(&first_columns, &second_columns);
        let extra_cols_in_second = difference(&second_columns, &first_columns);
        let extra_rows_in_first = difference(&first_keys, &second_keys);
        let extra_rows_in_second = difference(&second_keys, &first_keys);

        let common_columns: Vec<&str> = first_columns
            .intersection(&second_columns)
            .copied()
            .collect();
        let common_rows: Vec<&String> = first_keys.intersection(&second_keys).collect();

        let first_rows = rows_by_key(self.first.rows(), index_column);
        let second_rows = rows_by_key(self.second.rows(), index_column);

        let mut mismatches = Vec::new();
        for key in &common_rows {
            for column in &common_columns {
                let first_value = cell(&first_rows, key, column);
                let second_value = cell(&second_rows, key, column);
                if first_value != second_value {
                    mismatches.push(Mismatch::new(
                        key.as_str(),
                        *column,
                        first_value,
                        second_value,
                    ));
                }
            }
        }

        let output = CompareOutput::new(
            self.first.origin().to_string(),
            self.second.origin().to_string(),
        )
        .with_extra_cols_in_first_file(extra_cols_in_first)
        .with_extra_cols_in_second_file(extra_cols_in_second)
        .with_extra_rows_in_first_file(extra_rows_in_first)
        .with_extra_rows_in_second_file(extra_rows_in_second)
        .with_mismatched_rows(mismatches);

        tracing::info!(
            matched = output.is_match(),
            extra_cols_in_first = output.extra_cols_in_first_file().len(),
            extra_cols_in_second = output.extra_cols_in_second_file().len(),
            extra_rows_in_first = output.extra_rows_in_first_file().len(),
            extra_rows_in_second = output.extra_rows_in_second_file().len(),
            mismatches = output.mismatched_rows().len(),
            "Comparison finished"
        );

        Ok(output)
    }
}

impl Default for Comparer {
    fn default() -> Self {
        Self::new()
    }
}

fn difference<T: AsRef<str> + std::hash::Hash + Eq>(
    left: &IndexSet<T>,
    right: &IndexSet<T>,
) -> Vec<String> {
    left.difference(right)
        .map(|value| value.as_ref().to_string())
        .collect()
}

/// First row for each key value.
fn rows_by_key<'a>(rows: &'a [Row], index_column: &str) -> HashMap<&'a str, &'a Row> {
    let mut by_key = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(key) = row.get(index_column) {
            by_key.entry(key.as_str()).or_insert(row);
        }
    }
    by_key
}

fn cell<'a>(rows: &HashMap<&str, &'a Row>, key: &str, column: &str) -> &'a str {
    rows.get(key)
        .and_then(|row| row.get(column))
        .map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: [&str; 4] = ["c1,c2", "r1,v1", "r2,v2", "r3,MISMATCH"];
    const SECOND: [&str; 4] = ["c1,c2", "r1,v1", "r2,v2", "r3,v3"];

    #[test]
    fn test_single_mismatch() {
        let mut comparer = Comparer::from_lines(FIRST, SECOND).unwrap();
        let output = comparer.compare("c1").unwrap();

        assert!(!output.is_match());
        assert_eq!(
            output.mismatched_rows(),
            [Mismatch::new("r3", "c2", "MISMATCH", "v3")]
        );
        assert_eq!(output.first_file(), "init from lines");
        assert_eq!(output.second_file(), "init from lines");
    }

    #[test]
    fn test_self_comparison_matches() {
        let mut comparer = Comparer::from_lines(FIRST, FIRST).unwrap();
        for column in ["c1", "c2"] {
            let output = comparer.compare(column).unwrap();
            assert!(output.is_match(), "column {column}: {output}");
            assert_eq!(output.difference_count(), 0);
        }
    }

    #[test]
    fn test_missing_index_column_names_side() {
        let mut comparer = Comparer::from_lines(["a,b", "1,2"], ["a,c", "1,2"]).unwrap();

        match comparer.compare("nonexistent") {
            Err(CompareError::ColumnNotFound { location, .. }) => {
                assert_eq!(location, "first file");
            }
            other => panic!("expected ColumnNotFound, got {:?}", other.map(|o| o.to_string())),
        }

        match comparer.compare("b") {
            Err(err @ CompareError::ColumnNotFound { .. }) => {
                let message = err.to_string();
                assert!(message.contains("not found in second file"));
                assert!(message.contains("\"a\""));
                assert!(message.contains("\"c\""));
            }
            other => panic!("expected ColumnNotFound, got {:?}", other.map(|o| o.to_string())),
        }
    }

    #[test]
    fn test_null_comparer_fails_validation() {
        let mut comparer = Comparer::new();
        assert!(matches!(
            comparer.compare("id"),
            Err(CompareError::ColumnNotFound { .. })
        ));
        assert_eq!(comparer.first().origin().to_string(), "null");
    }

    #[test]
    fn test_attaching_datasets_later() {
        let mut comparer = Comparer::default();
        comparer.set_first(CsvDataset::from_lines(FIRST).unwrap());
        comparer.set_second(CsvDataset::from_lines(FIRST).unwrap());
        assert!(comparer.compare("c1").unwrap().is_match());
    }

    #[test]
    fn test_duplicate_keys_align_by_occurrence() {
        let mut comparer =
            Comparer::from_lines(["id,v", "k,1", "k,2"], ["id,v", "k,1", "k,3"]).unwrap();
        let output = comparer.compare("id").unwrap();

        assert_eq!(output.mismatched_rows(), [Mismatch::new("k.1", "v", "2", "3")]);
        assert!(output.extra_rows_in_first_file().is_empty());
    }

    #[test]
    fn test_extra_duplicate_key_on_one_side() {
        let mut comparer =
            Comparer::from_lines(["id,v", "k,1", "k,1"], ["id,v", "k,1"]).unwrap();
        let output = comparer.compare("id").unwrap();
        assert_eq!(output.extra_rows_in_first_file(), ["k.1"]);
    }

    #[test]
    fn test_missing_cells_compare_as_empty() {
        let mut comparer = Comparer::from_lines(["id,a,b", "1,x"], ["id,a,b", "1,x,"]).unwrap();
        assert!(comparer.compare("id").unwrap().is_match());
    }

    #[test]
    fn test_output_follows_source_order() {
        let mut comparer = Comparer::from_lines(
            ["id,z,a,m", "3,1,1,1", "1,1,1,1", "2,1,1,1"],
            ["id", "9"],
        )
        .unwrap();
        let output = comparer.compare("id").unwrap();
        assert_eq!(output.extra_cols_in_first_file(), ["z", "a", "m"]);
        assert_eq!(output.extra_rows_in_first_file(), ["3", "1", "2"]);
        assert_eq!(output.extra_rows_in_second_file(), ["9"]);
    }

    #[test]
    fn test_apply_profile() {
        let profile = CompareProfile::from_json(
            r#"{
                "strip_whitespace": true,
                "drop_columns": ["noise"],
                "drop_rows": [{"column": "id", "values": ["4"]}]
            }"#,
        )
        .unwrap();

        let mut comparer = Comparer::from_lines(
            ["id, value ,noise", "1, a ,x", "4,b,y"],
            ["id,value", "1,a"],
        )
        .unwrap();
        comparer.apply_profile(&profile);

        assert!(comparer.compare("id").unwrap().is_match());
    }

    #[test]
    fn test_side_display() {
        assert_eq!(Side::First.to_string(), "first file");
        assert_eq!(Side::Second.to_string(), "second file");
    }
}
