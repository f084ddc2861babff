//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod handle_message;
pub mod retrieve;
pub mod route_query;
pub mod run_benchmark;

#[cfg(test)]
pub(crate) mod testing;
