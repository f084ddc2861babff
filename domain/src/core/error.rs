//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Malformed classification output: {0}")]
    MalformedClassification(String),

    #[error("top_k must be at least 1")]
    InvalidTopK,
}

impl DomainError {
    /// Check if this error came from parsing classifier output
    pub fn is_classification(&self) -> bool {
        matches!(self, DomainError::MalformedClassification(_))
    }
}
