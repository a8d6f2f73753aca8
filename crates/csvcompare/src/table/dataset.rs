//! Row-backed dataset parsed from CSV.

use std::fs;
use std::path::Path;

use crate::error::{CompareError, Result};
use crate::input::encoding;
use crate::input::{Origin, Parser, ReadOptions, SourceEncoding, StructuralError};

use super::dedupe::unique_values;
use super::{Dataset, Row};

/// A CSV dataset held in memory as keyed rows.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    rows: Vec<Row>,
    columns: Vec<String>,
    source_text: String,
    index_column: Option<String>,
    origin: Origin,
    encoding: SourceEncoding,
    options: ReadOptions,
}

impl CsvDataset {
    /// Read a CSV file, detecting its encoding.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use csvcompare::{CsvDataset, Dataset};
    ///
    /// let dataset = CsvDataset::from_file("orders.csv").unwrap();
    /// println!("Columns: {:?}", dataset.columns());
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_options(path, ReadOptions::default())
    }

    /// Read a CSV file with custom options.
    pub fn from_file_with_options(path: impl AsRef<Path>, options: ReadOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CompareError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| CompareError::io(path, e))?;

        let source_encoding = match options.encoding {
            Some(forced) => encoding::forced(&bytes, forced),
            None => encoding::detect(&bytes).unwrap_or_else(|| {
                tracing::warn!(
                    path = %path.display(),
                    "Encoding detection failed, using UTF-8"
                );
                SourceEncoding::default()
            }),
        };

        let text = encoding::decode(&bytes, source_encoding).map_err(|failure| {
            CompareError::Decode {
                path: path.to_path_buf(),
                encoding: source_encoding.name(),
                offset: failure.offset,
                reason: failure.reason,
            }
        })?;

        let mut dataset = Self::from_text_with_options(text, options)?;
        dataset.origin = Origin::File(path.to_path_buf());
        dataset.encoding = source_encoding;

        tracing::debug!(
            path = %path.display(),
            encoding = source_encoding.name(),
            rows = dataset.rows.len(),
            columns = dataset.columns.len(),
            "Loaded dataset"
        );

        Ok(dataset)
    }

    /// Parse lines of CSV text (joined with `\n`).
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_lines_with_options(lines, ReadOptions::default())
    }

    /// Parse lines of CSV text with custom options.
    pub fn from_lines_with_options<I, S>(lines: I, options: ReadOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");

        let mut dataset = Self::from_text_with_options(text, options)?;
        dataset.origin = Origin::Lines;
        Ok(dataset)
    }

    /// Parse raw CSV text.
    pub fn from_text(text: impl Into<String>) -> Result<Self> {
        Self::from_text_with_options(text, ReadOptions::default())
    }

    /// Parse raw CSV text with custom options.
    pub fn from_text_with_options(text: impl Into<String>, options: ReadOptions) -> Result<Self> {
        let source_text = text.into();
        let table = Parser::with_options(options.clone()).parse_text(&source_text)?;

        Ok(Self {
            rows: table.rows,
            columns: table.columns,
            source_text,
            index_column: None,
            origin: Origin::Text,
            encoding: SourceEncoding::default(),
            options,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Encoding used for decoding and write-back.
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// Write the current columns and rows to `path` in the source encoding.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = Parser::with_options(self.options.clone()).write_text(&self.columns, &self.rows)?;
        let bytes = encoding::encode(&text, self.encoding);

        fs::write(path, bytes).map_err(|e| CompareError::io(path, e))?;

        tracing::info!(
            path = %path.display(),
            encoding = self.encoding.name(),
            rows = self.rows.len(),
            "Wrote dataset"
        );
        Ok(())
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn no_columns(&self) -> CompareError {
        CompareError::NoColumns {
            origin: self.origin.to_string(),
        }
    }

    fn position_of(&self, column: &str, value: &str) -> Option<usize> {
        if !self.has_column(column) {
            return None;
        }
        self.rows
            .iter()
            .position(|row| row.get(column).is_some_and(|v| v == value))
    }
}

impl Dataset for CsvDataset {
    fn origin(&self) -> &Origin {
        &self.origin
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn source_text(&self) -> &str {
        &self.source_text
    }

    fn index_column(&self) -> Result<String> {
        let first = self.columns.first().ok_or_else(|| self.no_columns())?;
        Ok(self.index_column.clone().unwrap_or_else(|| first.clone()))
    }

    fn set_index_column(&mut self, column: &str) -> Result<()> {
        if self.columns.is_empty() {
            return Err(self.no_columns());
        }
        if !self.has_column(column) {
            return Err(CompareError::ColumnNotFound {
                column: column.to_string(),
                location: self.origin.to_string(),
                available: self.columns.clone(),
            });
        }

        self.index_column = Some(column.to_string());

        let unique = unique_values(&self.row_values_in_column(column));
        for (row, value) in self.rows.iter_mut().zip(unique) {
            row.insert(column.to_string(), value);
        }
        Ok(())
    }

    fn row_values_in_column(&self, column: &str) -> Vec<String> {
        if !self.has_column(column) {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or_default())
            .collect()
    }

    fn row(&self, column: &str, value: &str) -> Option<&Row> {
        self.position_of(column, value).map(|idx| &self.rows[idx])
    }

    fn rows_matching(&self, column: &str, value: &str) -> Vec<&Row> {
        if !self.has_column(column) {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter(|row| row.get(column).is_some_and(|v| v == value))
            .collect()
    }

    fn value(&self, key: &str, column: &str) -> String {
        let Ok(index) = self.index_column() else {
            return String::new();
        };
        self.row(&index, key)
            .and_then(|row| row.get(column))
            .cloned()
            .unwrap_or_default()
    }

    fn set_value(&mut self, key: &str, column: &str, value: &str) {
        let Ok(index) = self.index_column() else {
            return;
        };
        if let Some(idx) = self.position_of(&index, key) {
            if let Some(cell) = self.rows[idx].get_mut(column) {
                *cell = value.to_string();
            }
        }
    }

    fn strip_whitespace(&mut self) {
        for row in &mut self.rows {
            *row = std::mem::take(row)
                .into_iter()
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .collect();
        }
        for column in &mut self.columns {
            *column = column.trim().to_string();
        }
        if let Some(index) = &mut self.index_column {
            *index = index.trim().to_string();
        }
    }

    fn apply_transform(&mut self, column: &str, transform: &dyn Fn(&Row) -> String) {
        for row in &mut self.rows {
            let value = transform(&*row);
            row.insert(column.to_string(), value);
        }
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    fn drop_columns(&mut self, columns: &[&str]) {
        let dropped = |name: &str| columns.iter().any(|column| *column == name);

        for row in &mut self.rows {
            row.retain(|key, _| !dropped(key.as_str()));
        }
        self.columns.retain(|column| !dropped(column.as_str()));
        if self.index_column.as_deref().is_some_and(dropped) {
            self.index_column = None;
        }
    }

    fn drop_rows_by(&mut self, predicate: &dyn Fn(&Row) -> bool) {
        self.rows.retain(|row| !predicate(row));
    }

    fn drop_rows(&mut self, column: &str, values: &[&str]) {
        if !self.has_column(column) {
            return;
        }
        self.drop_rows_by(&|row: &Row| {
            row.get(column)
                .is_some_and(|value| values.iter().any(|v| *v == value.as_str()))
        });
    }

    fn structural_errors(&self) -> Vec<StructuralError> {
        Parser::with_options(self.options.clone()).structural_errors(&self.source_text)
    }

    fn has_error(&self) -> bool {
        !self.structural_errors().is_empty()
    }

    fn write_to_file(&self) -> Result<()> {
        match self.origin.path() {
            Some(path) if self.origin.is_writable() => self.write_to(path),
            _ => Err(CompareError::NotWritable {
                origin: self.origin.to_string(),
            }),
        }
    }
}
