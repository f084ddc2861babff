//! Query routing domain.
//!
//! - [`decision::RouteDecision`]: classifier output for one incoming query
//! - [`decision::Route`]: the SEARCH / CHAT branch a query takes
//! - [`decision::RoutePhase`]: states of the router/dispatcher flow
//! - [`parsing::parse_route_decision`]: extract a decision from raw model text

pub mod decision;
pub mod parsing;
