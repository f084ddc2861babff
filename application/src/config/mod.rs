//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`RetrievalParams`]: fan-out mode, `top_k` and the primary backend
//! - [`BenchmarkParams`]: concurrency, warmup and sampling of a benchmark run
//! - [`SessionParams`]: system preamble and history bound of a chat session

pub mod benchmark_params;
pub mod retrieval_params;
pub mod session_params;

pub use benchmark_params::BenchmarkParams;
pub use retrieval_params::{FanOut, RetrievalParams};
pub use session_params::SessionParams;
