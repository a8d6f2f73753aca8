//! Placeholder dataset with no data.

use crate::error::Result;
use crate::input::{Origin, StructuralError};

use super::{Dataset, Row};

static NULL_ORIGIN: Origin = Origin::Null;

/// A dataset that holds nothing.
///
/// Mutations do nothing and reads return empty values. A [`Comparer`] starts
/// out with two of these until real data is attached.
///
/// [`Comparer`]: crate::Comparer
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDataset;

impl Dataset for NullDataset {
    fn origin(&self) -> &Origin {
        &NULL_ORIGIN
    }

    fn columns(&self) -> &[String] {
        &[]
    }

    fn rows(&self) -> &[Row] {
        &[]
    }

    fn source_text(&self) -> &str {
        ""
    }

    fn index_column(&self) -> Result<String> {
        Ok(String::new())
    }

    fn set_index_column(&mut self, _column: &str) -> Result<()> {
        Ok(())
    }

    fn row_values_in_column(&self, _column: &str) -> Vec<String> {
        Vec::new()
    }

    fn row(&self, _column: &str, _value: &str) -> Option<&Row> {
        None
    }

    fn rows_matching(&self, _column: &str, _value: &str) -> Vec<&Row> {
        Vec::new()
    }

    fn value(&self, _key: &str, _column: &str) -> String {
        String::new()
    }

    fn set_value(&mut self, _key: &str, _column: &str, _value: &str) {}

    fn strip_whitespace(&mut self) {}

    fn apply_transform(&mut self, _column: &str, _transform: &dyn Fn(&Row) -> String) {}

    fn drop_columns(&mut self, _columns: &[&str]) {}

    fn drop_rows_by(&mut self, _predicate: &dyn Fn(&Row) -> bool) {}

    fn drop_rows(&mut self, _column: &str, _values: &[&str]) {}

    fn structural_errors(&self) -> Vec<StructuralError> {
        Vec::new()
    }

    fn has_error(&self) -> bool {
        false
    }

    fn write_to_file(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let dataset = NullDataset;
        assert!(dataset.rows().is_empty());
        assert!(dataset.columns().is_empty());
        assert_eq!(dataset.source_text(), "");
        assert_eq!(dataset.origin().to_string(), "null");
        assert_eq!(dataset.index_column().unwrap(), "");
    }

    #[test]
    fn test_noop_methods() {
        let mut dataset = NullDataset;
        dataset.strip_whitespace();
        dataset.apply_transform("col", &|_row: &Row| "x".to_string());
        dataset.drop_columns(&["col"]);
        dataset.drop_rows_by(&|_row: &Row| true);
        dataset.drop_rows("col", &["val"]);
        dataset.set_value("row", "col", "val");
        dataset.set_index_column("anything").unwrap();
        dataset.write_to_file().unwrap();

        assert!(dataset.columns().is_empty());
        assert_eq!(dataset.index_column().unwrap(), "");
    }

    #[test]
    fn test_return_values() {
        let dataset = NullDataset;
        assert!(dataset.row_values_in_column("col").is_empty());
        assert_eq!(dataset.value("row", "col"), "");
        assert!(dataset.row("col", "row").is_none());
        assert!(dataset.rows_matching("col", "row").is_empty());
        assert!(!dataset.has_error());
        assert!(dataset.structural_errors().is_empty());
    }
}
