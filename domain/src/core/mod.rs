//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: a validated, non-empty query text
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod query;
