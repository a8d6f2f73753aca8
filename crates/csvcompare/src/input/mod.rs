//! Input handling: encodings, parsing, and data source origins.

pub mod encoding;
mod parser;
mod source;

pub use encoding::SourceEncoding;
pub use parser::{ParsedTable, Parser, ReadOptions, StructuralError, column_names_from_values};
pub use source::Origin;
