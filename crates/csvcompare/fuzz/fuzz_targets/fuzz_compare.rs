//! Fuzz target for comparison.
//!
//! Two arbitrary texts are compared on the first dataset's first column.
//! The match flag must agree with the reported differences.

#![no_main]

use arbitrary::Arbitrary;
use csvcompare::{Comparer, CsvDataset, Dataset};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    first: String,
    second: String,
}

fuzz_target!(|input: Input| {
    if input.first.len() + input.second.len() > 100_000 {
        return;
    }

    let (Ok(first), Ok(second)) = (
        CsvDataset::from_text(input.first),
        CsvDataset::from_text(input.second),
    ) else {
        return;
    };
    let Some(index) = first.columns().first().cloned() else {
        return;
    };

    let mut comparer = Comparer::from_datasets(first, second);
    if let Ok(output) = comparer.compare(&index) {
        assert_eq!(output.is_match(), output.difference_count() == 0);
    }
});
