//! CLI command implementations.
//!
//! `compare` and `check` return `Ok(false)` when they find differences or
//! irregular records, so `main` can pick the exit code.

pub mod check;
pub mod compare;
pub mod normalize;
