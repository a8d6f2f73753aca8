//! Fuzz target for file loading.
//!
//! Arbitrary bytes go through encoding detection, strict decoding, and CSV
//! parsing. Loading may fail but must never panic.

#![no_main]

use csvcompare::{CsvDataset, Dataset};
use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            if let Ok(dataset) = CsvDataset::from_file(temp_file.path()) {
                let _ = dataset.structural_errors();
                let _ = dataset.index_column();
            }
        }
    }
});
