//! LLM collaborator ports
//!
//! Defines the two language-model calls the router depends on: query
//! classification and reply generation.

use async_trait::async_trait;
use thiserror::Error;
use vault_domain::{ConversationTurn, DomainError, RouteDecision};

/// Errors that can occur while talking to an LLM provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Timeout")]
    Timeout,
}

/// Errors from the classification collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassificationError {
    #[error("Classifier request failed: {0}")]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Malformed(#[from] DomainError),
}

/// Decides whether a query needs retrieval (SEARCH) or not (CHAT)
#[async_trait]
pub trait QueryClassifier: Send + Sync {
    async fn classify(&self, query: &str) -> Result<RouteDecision, ClassificationError>;
}

/// Produces the assistant reply for a conversation
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// `history` always starts with the System preamble and ends with the
    /// Human turn being answered
    async fn generate_reply(&self, history: &[ConversationTurn]) -> Result<String, GatewayError>;
}
