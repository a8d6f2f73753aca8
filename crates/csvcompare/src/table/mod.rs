//! Tabular datasets: the shared contract, the row-backed implementation, and
//! the empty placeholder.

pub mod dedupe;
mod dataset;
mod null;

use indexmap::IndexMap;

use crate::error::Result;
use crate::input::{Origin, StructuralError};

pub use dataset::CsvDataset;
pub use null::NullDataset;

/// A single row: column name to cell text, in column order.
pub type Row = IndexMap<String, String>;

/// Read and mutate operations shared by every dataset.
///
/// Rows are addressed through the index column. Implementations provide every
/// method explicitly.
pub trait Dataset {
    /// Where the data came from.
    fn origin(&self) -> &Origin;

    /// Column names in source order.
    fn columns(&self) -> &[String];

    /// Rows in source order.
    fn rows(&self) -> &[Row];

    /// The raw text the dataset was parsed from.
    fn source_text(&self) -> &str;

    /// The index column, defaulting to the first column.
    fn index_column(&self) -> Result<String>;

    /// Select the index column and disambiguate its values in place.
    fn set_index_column(&mut self, column: &str) -> Result<()>;

    /// Values of `column` in row order, or empty if the column is unknown.
    fn row_values_in_column(&self, column: &str) -> Vec<String>;

    /// First row whose `column` equals `value`.
    fn row(&self, column: &str, value: &str) -> Option<&Row>;

    /// All rows whose `column` equals `value`.
    fn rows_matching(&self, column: &str, value: &str) -> Vec<&Row>;

    /// Cell text addressed by index-column value; empty when absent.
    fn value(&self, key: &str, column: &str) -> String;

    /// Overwrite a cell addressed by index-column value, if it exists.
    fn set_value(&mut self, key: &str, column: &str, value: &str);

    /// Trim column names, row keys, and cell values.
    fn strip_whitespace(&mut self);

    /// Set `column` on every row to `transform(row)`.
    fn apply_transform(&mut self, column: &str, transform: &dyn Fn(&Row) -> String);

    /// Remove columns from every row and from the column list.
    fn drop_columns(&mut self, columns: &[&str]);

    /// Remove every row the predicate accepts.
    fn drop_rows_by(&mut self, predicate: &dyn Fn(&Row) -> bool);

    /// Remove rows whose `column` value is one of `values`.
    fn drop_rows(&mut self, column: &str, values: &[&str]);

    /// Records in the source text whose field count differs from the header.
    fn structural_errors(&self) -> Vec<StructuralError>;

    /// Whether the source text has any structural errors.
    fn has_error(&self) -> bool;

    /// Write the current columns and rows back to the origin file.
    fn write_to_file(&self) -> Result<()>;
}
