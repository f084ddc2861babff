//! Handle Message use case.
//!
//! Request boundary over a [`ChatSession`]. Takes one inbound message and
//! always answers with a [`ChatResponse`]; internal failures are logged in
//! full and replaced with a generic reply and empty metrics.

use crate::use_cases::route_query::{ChatSession, RouterError};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::error;
use vault_domain::RetrievalMetrics;

/// Reply sent back when a message could not be handled
pub const GENERIC_ERROR_RESPONSE: &str =
    "Internal error while processing your message. Check the logs for details.";

/// Outbound response: `{response, metrics}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub metrics: RetrievalMetrics,
}

impl ChatResponse {
    pub fn error() -> Self {
        Self {
            response: GENERIC_ERROR_RESPONSE.to_string(),
            metrics: RetrievalMetrics::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.response == GENERIC_ERROR_RESPONSE && self.metrics.is_empty()
    }
}

/// Long-lived service holding the process's chat session.
///
/// Built once at startup and shared by reference with every handler.
/// Messages are handled one at a time so the session's history stays
/// strictly chronological.
pub struct ChatService {
    session: Mutex<ChatSession>,
}

impl ChatService {
    pub fn new(session: ChatSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    pub async fn handle_message(&self, msg: &str) -> ChatResponse {
        match self.try_handle(msg).await {
            Ok(response) => response,
            Err(e) => {
                error!("Failed to handle message: {}", e);
                ChatResponse::error()
            }
        }
    }

    async fn try_handle(&self, msg: &str) -> Result<ChatResponse, RouterError> {
        let mut session = self.session.lock().await;
        let outcome = session.handle_turn(msg).await?;
        Ok(ChatResponse {
            response: outcome.reply,
            metrics: outcome.metrics,
        })
    }

    /// Number of turns currently held by the session, preamble included
    pub async fn history_len(&self) -> usize {
        self.session.lock().await.state().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RetrievalParams, SessionParams};
    use crate::ports::llm_gateway::{ClassificationError, GatewayError};
    use crate::use_cases::retrieve::{BackendAdapter, RetrievalOrchestrator};
    use crate::use_cases::testing::{MockBackend, MockClassifier, MockReplier};
    use std::sync::Arc;
    use vault_domain::{BackendKind, RouteDecision};

    fn service(
        decisions: Vec<Result<RouteDecision, ClassificationError>>,
        replies: Vec<Result<String, GatewayError>>,
    ) -> ChatService {
        let orchestrator = RetrievalOrchestrator::new(
            vec![
                BackendAdapter::new("faiss", Arc::new(MockBackend::new(BackendKind::InMemory))),
                BackendAdapter::new(
                    "cyborg",
                    Arc::new(MockBackend::new(BackendKind::Encrypted).with_items(&["ctx"])),
                ),
            ],
            RetrievalParams::default(),
        )
        .unwrap();
        ChatService::new(ChatSession::new(
            Arc::new(orchestrator),
            Arc::new(MockClassifier::new(decisions)),
            Arc::new(MockReplier::new(replies)),
            &SessionParams::default(),
        ))
    }

    #[tokio::test]
    async fn test_search_response_carries_metrics() {
        let service = service(
            vec![Ok(RouteDecision::search("ctx", "explain"))],
            vec![Ok("explained".to_string())],
        );
        let response = service.handle_message("explain").await;
        assert_eq!(response.response, "explained");
        assert_eq!(response.metrics.len(), 2);
        assert!(!response.is_error());
    }

    #[tokio::test]
    async fn test_failure_becomes_generic_response() {
        let service = service(
            vec![Ok(RouteDecision::chat("hi"))],
            vec![Err(GatewayError::ConnectionError("refused".to_string()))],
        );
        let response = service.handle_message("hi").await;
        assert!(response.is_error());
        assert_eq!(response.response, GENERIC_ERROR_RESPONSE);
        assert!(response.metrics.is_empty());
        assert_eq!(service.history_len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_message_is_generic_error() {
        let service = service(vec![], vec![]);
        assert!(service.handle_message("").await.is_error());
    }

    #[test]
    fn test_error_response_serializes_empty_metrics() {
        let json = serde_json::to_value(ChatResponse::error()).unwrap();
        assert_eq!(json["metrics"], serde_json::json!({}));
        assert_eq!(json["response"], GENERIC_ERROR_RESPONSE);
    }
}
