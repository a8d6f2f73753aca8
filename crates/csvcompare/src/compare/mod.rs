//! Dataset comparison: the engine, its output, and saved profiles.

mod engine;
mod output;
mod profile;

pub use engine::{Comparer, Side};
pub use output::{CompareOutput, Mismatch};
pub use profile::{CompareProfile, RowFilter, SourceProfile};
