//! Hand-written collaborators shared by the use case tests.

use crate::ports::corpus::{CorpusError, CorpusRecord, CorpusSource};
use crate::ports::llm_gateway::{
    ClassificationError, GatewayError, QueryClassifier, ReplyGenerator,
};
use crate::ports::vector_backend::{BackendError, VectorBackend};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vault_domain::{BackendKind, ConversationTurn, RankedItem, RouteDecision};

pub struct MockBackend {
    kind: BackendKind,
    items: Vec<String>,
    /// Fail every n-th call (1 = always)
    fail_every: Option<usize>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl MockBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
            fail_every: None,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_items(mut self, items: &[&str]) -> Self {
        self.items = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_every = Some(1);
        self
    }

    /// Fail calls 1, n+1, 2n+1, ... and succeed otherwise
    pub fn failing_every(mut self, n: usize) -> Self {
        self.fail_every = Some(n.max(1));
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl VectorBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn similarity_search(
        &self,
        _query: &str,
        top_k: usize,
    ) -> Result<Vec<RankedItem>, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_every.is_some_and(|n| call % n == 0) {
            return Err(BackendError::QueryFailed("mock failure".to_string()));
        }
        Ok(self
            .items
            .iter()
            .take(top_k)
            .enumerate()
            .map(|(i, content)| RankedItem::new(i, content.clone()))
            .collect())
    }
}

/// Classifier that returns scripted decisions in order
pub struct MockClassifier {
    responses: Mutex<VecDeque<Result<RouteDecision, ClassificationError>>>,
}

impl MockClassifier {
    pub fn new(responses: Vec<Result<RouteDecision, ClassificationError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl QueryClassifier for MockClassifier {
    async fn classify(&self, query: &str) -> Result<RouteDecision, ClassificationError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RouteDecision::chat(query)))
    }
}

/// Reply generator that records every history it is given
pub struct MockReplier {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    seen: Arc<Mutex<Vec<Vec<ConversationTurn>>>>,
}

impl MockReplier {
    pub fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Arc<Mutex<Vec<Vec<ConversationTurn>>>> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl ReplyGenerator for MockReplier {
    async fn generate_reply(&self, history: &[ConversationTurn]) -> Result<String, GatewayError> {
        self.seen.lock().unwrap().push(history.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("ok".to_string()))
    }
}

pub struct MockCorpus {
    pub texts: Vec<String>,
}

impl MockCorpus {
    pub fn numbered(count: usize) -> Self {
        Self {
            texts: (0..count).map(|i| format!("transaction {}", i)).collect(),
        }
    }
}

impl CorpusSource for MockCorpus {
    fn records(&self) -> Result<Vec<CorpusRecord>, CorpusError> {
        Ok(self.texts.iter().map(CorpusRecord::new).collect())
    }

    fn sample_queries(&self, count: usize) -> Result<Vec<String>, CorpusError> {
        Ok(self.texts.iter().take(count).cloned().collect())
    }
}
