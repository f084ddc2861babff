//! Domain layer for vault-rag
//!
//! This crate contains the core entities and value objects. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Retrieval
//!
//! The same query is sent to several similarity-search backends. Only the
//! **primary** backend's results are used as context; the others exist for
//! latency comparison, recorded per call in [`RetrievalMetrics`].
//!
//! ## Routing
//!
//! Each incoming chat query is classified into a [`Route`]:
//!
//! - **Search**: retrieve evidence, then reply with it in context
//! - **Chat**: reply from the [`ConversationState`] alone
//!
//! ## Benchmark
//!
//! Timed [`BenchmarkSample`]s are aggregated into [`BenchmarkStatistics`]
//! (mean / p95 / p99 / min / max per backend, throughput, p95 overhead).

pub mod benchmark;
pub mod conversation;
pub mod core;
pub mod prompt;
pub mod retrieval;
pub mod routing;
pub mod util;

// Re-export commonly used types
pub use benchmark::{
    phase::BenchmarkPhase,
    report::{BenchmarkReport, ChartData, SummaryMetrics},
    sample::{BenchmarkSample, SampleStatus},
    statistics::{
        BackendStatistics, BenchmarkStatistics, LatencyStats, overhead_percent, percentile,
        throughput,
    },
};
pub use conversation::{
    state::ConversationState,
    turn::{ConversationTurn, Role},
};
pub use crate::core::{error::DomainError, query::Query};
pub use prompt::PromptTemplate;
pub use retrieval::{
    backend::{
        BackendAvailability, BackendDescriptor, BackendKind, DISK_BACKEND, ENCRYPTED_BACKEND,
        IN_MEMORY_BACKEND,
    },
    item::RankedItem,
    metrics::RetrievalMetrics,
};
pub use routing::{
    decision::{NO_SUB_QUERY, Route, RouteDecision, RoutePhase},
    parsing::parse_route_decision,
};
