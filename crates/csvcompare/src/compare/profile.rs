//! Comparison profiles: reusable comparison options stored as JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};
use crate::input::{ReadOptions, column_names_from_values, encoding};

/// Options for one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceProfile {
    /// Column names to use instead of the header row.
    pub columns: Option<Vec<serde_json::Value>>,
    /// Encoding label, e.g. `utf-8` or `latin1`.
    pub encoding: Option<String>,
    /// Single-character field delimiter.
    pub delimiter: Option<String>,
}

impl SourceProfile {
    /// Convert into parser read options.
    pub fn read_options(&self) -> Result<ReadOptions> {
        let mut options = ReadOptions::default();

        if let Some(values) = &self.columns {
            options = options.with_columns(column_names_from_values(values)?);
        }
        if let Some(label) = &self.encoding {
            options = options.with_encoding(encoding::for_label(label)?);
        }
        if let Some(delimiter) = &self.delimiter {
            match delimiter.as_bytes() {
                [byte] => options = options.with_delimiter(*byte),
                _ => {
                    return Err(CompareError::Config(format!(
                        "Delimiter must be a single byte, got {delimiter:?}"
                    )));
                }
            }
        }

        Ok(options)
    }
}

/// Rows to drop where `column` holds one of `values`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFilter {
    pub column: String,
    pub values: Vec<String>,
}

/// Comparison options loaded from a profile file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareProfile {
    /// Key column to align rows by.
    pub index_column: Option<String>,
    /// Trim whitespace on both sides before comparing.
    pub strip_whitespace: bool,
    /// Columns to drop on both sides.
    pub drop_columns: Vec<String>,
    /// Rows to drop on both sides.
    pub drop_rows: Vec<RowFilter>,
    /// Sort the reported lists.
    pub sort: bool,
    /// Read options for the first dataset.
    pub first: SourceProfile,
    /// Read options for the second dataset.
    pub second: SourceProfile,
}

impl CompareProfile {
    /// Parse a profile from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a profile from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| CompareError::io(path, e))?;
        let profile = Self::from_json(&text)?;

        tracing::debug!(path = %path.display(), "Loaded comparison profile");
        Ok(profile)
    }
}
