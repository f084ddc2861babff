//! Retrieval domain.
//!
//! - [`backend::BackendKind`]: the storage engine family behind a backend
//! - [`backend::BackendAvailability`]: whether a backend can be queried
//! - [`item::RankedItem`]: one result returned by the primary backend
//! - [`metrics::RetrievalMetrics`]: per-backend elapsed time for one call

pub mod backend;
pub mod item;
pub mod metrics;
