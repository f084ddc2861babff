//! Benchmark progress reporters

pub mod reporter;
