//! Suffix-based de-duplication for column names and key values.

use std::collections::{HashMap, HashSet};

/// Make repeated values unique by appending `.1`, `.2`, ...
///
/// The first occurrence of a value is kept. Each repeat takes the next
/// per-value counter that yields an unseen string, so a literal `a.1` in the
/// input is skipped over: `["a", "a.1", "a"]` becomes `["a", "a.1", "a.2"]`.
pub fn unique_values<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(values.len());
    let mut counters: HashMap<&str, usize> = HashMap::new();
    let mut result = Vec::with_capacity(values.len());

    for value in values {
        let value = value.as_ref();
        if seen.insert(value.to_string()) {
            result.push(value.to_string());
            continue;
        }

        let counter = counters.entry(value).or_insert(0);
        let renamed = loop {
            *counter += 1;
            let candidate = format!("{value}.{counter}");
            if !seen.contains(&candidate) {
                break candidate;
            }
        };
        seen.insert(renamed.clone());
        result.push(renamed);
    }

    result
}
