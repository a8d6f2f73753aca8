//! Comparison results and their rendering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell whose value differs between the two datasets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Mismatch {
    /// Index-column value of the row.
    pub row: String,
    /// Column name.
    pub column: String,
    /// Value in the first dataset.
    pub first: String,
    /// Value in the second dataset.
    pub second: String,
}

impl Mismatch {
    pub fn new(
        row: impl Into<String>,
        column: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
            first: first.into(),
            second: second.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row: {}, column: {}, first: {}, second: {}",
            self.row, self.column, self.first, self.second
        )
    }
}

/// The result of comparing two datasets.
///
/// `match_result` is derived from the collections: every `with_*` builder
/// recomputes it, so it is true exactly when nothing differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareOutput {
    first_file: String,
    second_file: String,
    match_result: bool,
    extra_cols_in_first_file: Vec<String>,
    extra_cols_in_second_file: Vec<String>,
    extra_rows_in_first_file: Vec<String>,
    extra_rows_in_second_file: Vec<String>,
    mismatched_rows: Vec<Mismatch>,
}

impl CompareOutput {
    /// An output with no differences between the named origins.
    pub fn new(first_file: impl Into<String>, second_file: impl Into<String>) -> Self {
        Self {
            first_file: first_file.into(),
            second_file: second_file.into(),
            match_result: true,
            extra_cols_in_first_file: Vec::new(),
            extra_cols_in_second_file: Vec::new(),
            extra_rows_in_first_file: Vec::new(),
            extra_rows_in_second_file: Vec::new(),
            mismatched_rows: Vec::new(),
        }
    }

    pub fn with_extra_cols_in_first_file(mut self, columns: Vec<String>) -> Self {
        self.extra_cols_in_first_file = columns;
        self.refresh()
    }

    pub fn with_extra_cols_in_second_file(mut self, columns: Vec<String>) -> Self {
        self.extra_cols_in_second_file = columns;
        self.refresh()
    }

    pub fn with_extra_rows_in_first_file(mut self, rows: Vec<String>) -> Self {
        self.extra_rows_in_first_file = rows;
        self.refresh()
    }

    pub fn with_extra_rows_in_second_file(mut self, rows: Vec<String>) -> Self {
        self.extra_rows_in_second_file = rows;
        self.refresh()
    }

    pub fn with_mismatched_rows(mut self, mismatches: Vec<Mismatch>) -> Self {
        self.mismatched_rows = mismatches;
        self.refresh()
    }

    fn refresh(mut self) -> Self {
        self.match_result = self.difference_count() == 0;
        self
    }

    /// True when the datasets are identical under the chosen key.
    pub fn is_match(&self) -> bool {
        self.match_result
    }

    pub fn match_result(&self) -> bool {
        self.match_result
    }

    pub fn first_file(&self) -> &str {
        &self.first_file
    }

    pub fn second_file(&self) -> &str {
        &self.second_file
    }

    pub fn extra_cols_in_first_file(&self) -> &[String] {
        &self.extra_cols_in_first_file
    }

    pub fn extra_cols_in_second_file(&self) -> &[String] {
        &self.extra_cols_in_second_file
    }

    pub fn extra_rows_in_first_file(&self) -> &[String] {
        &self.extra_rows_in_first_file
    }

    pub fn extra_rows_in_second_file(&self) -> &[String] {
        &self.extra_rows_in_second_file
    }

    pub fn mismatched_rows(&self) -> &[Mismatch] {
        &self.mismatched_rows
    }

    /// Total number of reported differences.
    pub fn difference_count(&self) -> usize {
        self.extra_cols_in_first_file.len()
            + self.extra_cols_in_second_file.len()
            + self.extra_rows_in_first_file.len()
            + self.extra_rows_in_second_file.len()
            + self.mismatched_rows.len()
    }

    /// Sort every list lexicographically; mismatches by row, then column.
    pub fn sorted(mut self) -> Self {
        self.extra_cols_in_first_file.sort();
        self.extra_cols_in_second_file.sort();
        self.extra_rows_in_first_file.sort();
        self.extra_rows_in_second_file.sort();
        self.mismatched_rows.sort();
        self
    }

    /// Field-for-field mapping view.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "first_file": self.first_file,
            "second_file": self.second_file,
            "match_result": self.match_result,
            "extra_cols_in_first_file": self.extra_cols_in_first_file,
            "extra_cols_in_second_file": self.extra_cols_in_second_file,
            "extra_rows_in_first_file": self.extra_rows_in_first_file,
            "extra_rows_in_second_file": self.extra_rows_in_second_file,
            "mismatched_rows": self.mismatched_rows,
        })
    }

    /// Pretty-printed JSON of the mapping view.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl CompareOutput {
    /// Labelled summary lines: both origins and the match result.
    pub fn header(&self) -> [(&'static str, String); 3] {
        let result = if self.match_result { "True" } else { "False" };
        [
            ("First file", self.first_file.clone()),
            ("Second file", self.second_file.clone()),
            ("Match result", result.to_string()),
        ]
    }

    /// Titled report sections in rendering order, empty ones included.
    pub fn sections(&self) -> [(&'static str, Vec<String>); 5] {
        [
            ("Extra columns in first file", self.extra_cols_in_first_file.clone()),
            ("Extra columns in second file", self.extra_cols_in_second_file.clone()),
            ("Extra rows in first file", self.extra_rows_in_first_file.clone()),
            ("Extra rows in second file", self.extra_rows_in_second_file.clone()),
            (
                "Mismatched rows",
                self.mismatched_rows.iter().map(Mismatch::to_string).collect(),
            ),
        ]
    }
}

impl fmt::Display for CompareOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines: Vec<String> = self
            .header()
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();

        for (title, items) in self.sections() {
            if items.is_empty() {
                continue;
            }
            lines.push(title.to_string());
            lines.extend(items.into_iter().map(|item| format!("\t{item}")));
        }

        write!(f, "{}", lines.join("\n"))
    }
}
