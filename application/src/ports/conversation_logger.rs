//! Port for structured conversation logging.
//!
//! Records what happened in each chat turn (route decision, retrieval
//! metrics, the Human and Assistant turns) as machine-readable events,
//! separately from the `tracing` diagnostics.

use serde_json::{Value, json};
use vault_domain::{RankedItem, RetrievalMetrics, Route, RouteDecision};

/// A structured conversation event.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "route_decision", "assistant_turn").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn route_decision(decision: &RouteDecision, route: Route) -> Self {
        Self::new(
            "route_decision",
            json!({
                "decision": decision.decision,
                "route": route.as_str(),
                "sub_query": decision.sub_query,
                "original_query": decision.original_query,
            }),
        )
    }

    pub fn retrieval(metrics: &RetrievalMetrics, items: &[RankedItem]) -> Self {
        Self::new(
            "retrieval",
            json!({
                "metrics": metrics,
                "items": items,
            }),
        )
    }

    pub fn human_turn(content: &str) -> Self {
        Self::new("human_turn", json!({ "content": content }))
    }

    pub fn assistant_turn(content: &str) -> Self {
        Self::new("assistant_turn", json!({ "content": content }))
    }
}

/// Port for logging conversation events.
///
/// `log` is synchronous and infallible; a failed write is dropped.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_decision_payload() {
        let decision = RouteDecision::search("mule accounts", "Tell me about mule accounts");
        let event = ConversationEvent::route_decision(&decision, Route::Search);
        assert_eq!(event.event_type, "route_decision");
        assert_eq!(event.payload["route"], "SEARCH");
        assert_eq!(event.payload["sub_query"], "mule accounts");
    }

    #[test]
    fn test_retrieval_payload_embeds_metrics_object() {
        let mut metrics = RetrievalMetrics::new();
        metrics.record("cyborg", 0.25);
        let event = ConversationEvent::retrieval(&metrics, &[RankedItem::new(0, "evidence")]);
        assert_eq!(event.payload["metrics"]["cyborg"], 0.25);
        assert_eq!(event.payload["items"][0]["content"], "evidence");
    }
}
