//! Query value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A query issued against the vector backends (Value Object)
///
/// Backends only ever see non-empty text, so construction validates that up
/// front instead of every adapter re-checking it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    text: String,
}

impl Query {
    /// Create a new query, rejecting empty or whitespace-only text
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidQuery(
                "query text cannot be empty".to_string(),
            ));
        }
        Ok(Self { text })
    }

    /// Get the query text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consume and return the inner text
    pub fn into_text(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl TryFrom<&str> for Query {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Query::new(s)
    }
}

impl TryFrom<String> for Query {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Query::new(s)
    }
}
