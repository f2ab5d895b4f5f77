//! Property-based test strategies for the solfege toolkit.
//!
//! Provides generators for finite numeric data shaped like analysis
//! output, for exercising the comparison checks across wide input ranges.

pub mod generators;

pub use proptest;
pub use test_strategy;
