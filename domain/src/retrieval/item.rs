//! Ranked result items

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One retrieval result (Value Object)
///
/// Items are ordered relevance-descending; `position` 0 is the most relevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub position: usize,
    pub content: String,
    /// Similarity score reported by the backend, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    /// Record attributes carried alongside the content (amount, label, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl RankedItem {
    pub fn new(position: usize, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            score: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Render the item as a single context line for prompts
    pub fn render(&self) -> String {
        if self.metadata.is_empty() {
            return format!("[{}] {}", self.position, self.content);
        }
        let attrs = self
            .metadata
            .iter()
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}] {} ({})", self.position, self.content, attrs)
    }
}
