//! csvcompare: key-aligned comparison of CSV datasets.
//!
//! Two datasets are aligned by an index column and compared cell by cell.
//! The result lists columns and rows present on only one side, plus every
//! cell whose text differs.
//!
//! # Core Principles
//!
//! - **Text only**: Cells are compared as raw strings, never coerced
//! - **Unique keys**: Repeated index values are disambiguated as `k`, `k.1`, ...
//! - **Encoding aware**: Files are decoded strictly and written back in their source encoding
//!
//! # Example
//!
//! ```no_run
//! use csvcompare::Comparer;
//!
//! let mut comparer = Comparer::from_files("before.csv", "after.csv").unwrap();
//! let output = comparer.compare("id").unwrap();
//!
//! println!("Match: {}", output.is_match());
//! println!("Mismatched cells: {}", output.mismatched_rows().len());
//! ```

pub mod compare;
pub mod error;
pub mod input;
pub mod table;

pub use compare::{CompareOutput, CompareProfile, Comparer, Mismatch, Side};
pub use error::{CompareError, Result};
pub use input::{Origin, ReadOptions, SourceEncoding, StructuralError};
pub use table::{CsvDataset, Dataset, NullDataset, Row};
