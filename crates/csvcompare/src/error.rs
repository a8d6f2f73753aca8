//! Error types for the csvcompare library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for csvcompare operations.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Source file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Error reading or writing a file.
    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File bytes are not valid in the detected (or forced) encoding.
    #[error(
        "Failed to decode {} with encoding {encoding} at byte {offset}: {reason}",
        path.display()
    )]
    Decode {
        path: PathBuf,
        encoding: &'static str,
        offset: usize,
        reason: String,
    },

    /// A caller-supplied column name is not a string.
    #[error("All column names must be strings: element {position} is {found}")]
    InvalidColumnName { position: usize, found: String },

    /// A column is missing where one was required.
    #[error("Column '{column}' not found in {location}. Available columns: {available:?}")]
    ColumnNotFound {
        column: String,
        location: String,
        available: Vec<String>,
    },

    /// The dataset has no columns to select an index column from.
    #[error("No columns available to set or get the index column ({origin})")]
    NoColumns { origin: String },

    /// Write-back attempted on a dataset not backed by a file.
    #[error(
        "Cannot write: '{origin}' is not a valid file path. \
         Write-back is only supported for datasets read from a file"
    )]
    NotWritable { origin: String },

    /// Encoding label not recognized.
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompareError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type alias for csvcompare operations.
pub type Result<T> = std::result::Result<T, CompareError>;
