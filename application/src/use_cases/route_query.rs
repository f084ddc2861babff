//! Route Query use case.
//!
//! [`ChatSession`] is the router/dispatcher for one conversation. Each call
//! to [`ChatSession::handle_turn`] walks the routing state machine:
//!
//! ```text
//! AwaitingClassification ─┬─ SEARCH ──▶ SearchPath ─┬─▶ AwaitingReply ──▶ Done
//!                         └─ CHAT / * ─▶ ChatPath ──┘
//! ```
//!
//! The conversation is only updated once the reply is in hand. If any step
//! fails, the session is left exactly as it was before the call.

use crate::config::SessionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{ClassificationError, GatewayError, QueryClassifier, ReplyGenerator};
use crate::use_cases::retrieve::{RetrievalError, RetrievalOrchestrator};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use vault_domain::util::truncate_str;
use vault_domain::{
    ConversationState, DomainError, PromptTemplate, Query, RetrievalMetrics, Route, RoutePhase,
};

/// Errors that can occur while handling one chat turn
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("Classification failed: {0}")]
    Classification(#[from] ClassificationError),

    #[error("Reply generation failed: {0}")]
    ReplyGeneration(GatewayError),

    #[error("Retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("{0}")]
    InvalidQuery(#[from] DomainError),
}

/// Result of one successfully handled turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub reply: String,
    pub route: Route,
    /// Per-backend seconds; all zero on the chat path
    pub metrics: RetrievalMetrics,
}

/// One conversation: its history plus the collaborators that extend it
pub struct ChatSession {
    orchestrator: Arc<RetrievalOrchestrator>,
    classifier: Arc<dyn QueryClassifier>,
    replier: Arc<dyn ReplyGenerator>,
    conversation_logger: Arc<dyn ConversationLogger>,
    state: ConversationState,
    phase: RoutePhase,
}

impl ChatSession {
    pub fn new(
        orchestrator: Arc<RetrievalOrchestrator>,
        classifier: Arc<dyn QueryClassifier>,
        replier: Arc<dyn ReplyGenerator>,
        params: &SessionParams,
    ) -> Self {
        let state = ConversationState::new(params.system_prompt())
            .with_history_limit(params.max_history_turns);
        Self {
            orchestrator,
            classifier,
            replier,
            conversation_logger: Arc::new(NoConversationLogger),
            state,
            phase: RoutePhase::Done,
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Phase reached by the most recent turn; after a failure this is the
    /// phase the turn failed in
    pub fn phase(&self) -> RoutePhase {
        self.phase
    }

    pub fn orchestrator(&self) -> &RetrievalOrchestrator {
        &self.orchestrator
    }

    fn enter(&mut self, phase: RoutePhase) {
        debug!("Router phase: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Classify, optionally retrieve, and reply to one incoming query.
    pub async fn handle_turn(&mut self, query: &str) -> Result<TurnOutcome, RouterError> {
        let query = Query::new(query)?;
        self.enter(RoutePhase::AwaitingClassification);
        info!("Handling turn: {}", truncate_str(query.text(), 80));

        let decision = self.classifier.classify(query.text()).await?;
        let route = decision.route();
        if !decision.is_recognized() {
            warn!(
                "Unrecognized route decision '{}', falling back to CHAT",
                decision.decision
            );
        }
        self.conversation_logger
            .log(ConversationEvent::route_decision(&decision, route));

        let original = if decision.original_query.trim().is_empty() {
            query.text()
        } else {
            decision.original_query.as_str()
        };

        self.enter(route.into());
        let (human, metrics) = match route {
            Route::Search => {
                let search_text = decision.search_text();
                debug!("Searching for: {}", truncate_str(search_text, 80));
                let outcome = self.orchestrator.retrieve(search_text).await?;
                self.conversation_logger
                    .log(ConversationEvent::retrieval(&outcome.metrics, &outcome.items));
                (
                    PromptTemplate::search_prompt(original, &outcome.items),
                    outcome.metrics,
                )
            }
            Route::Chat => (original.to_string(), self.orchestrator.zero_metrics()),
        };

        self.enter(RoutePhase::AwaitingReply);
        let mut pending = self.state.clone();
        pending.push_human(human.as_str());

        let reply = self
            .replier
            .generate_reply(pending.turns())
            .await
            .map_err(RouterError::ReplyGeneration)?;
        pending.push_assistant(reply.as_str());

        self.conversation_logger
            .log(ConversationEvent::human_turn(&human));
        self.conversation_logger
            .log(ConversationEvent::assistant_turn(&reply));
        self.state = pending;
        self.enter(RoutePhase::Done);

        Ok(TurnOutcome {
            reply,
            route,
            metrics,
        })
    }
}
