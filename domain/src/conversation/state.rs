//! Conversation state for a single chat session

use super::turn::{ConversationTurn, Role};
use serde::Serialize;

/// Smallest accepted history limit: one Human turn plus its Assistant reply.
pub const MIN_HISTORY_TURNS: usize = 2;

/// Ordered log of conversation turns (Entity)
///
/// Turn 0 is always the System preamble. All other turns are appended in
/// chronological order and never edited. When a history limit is set, the
/// oldest exchanges are evicted once the limit is exceeded, so the first
/// non-system turn is always a Human turn.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationState {
    turns: Vec<ConversationTurn>,
    #[serde(skip)]
    max_turns: Option<usize>,
}

impl ConversationState {
    /// Start a conversation with the given system preamble and no history limit
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            turns: vec![ConversationTurn::system(system_prompt)],
            max_turns: None,
        }
    }

    /// Bound the number of non-system turns kept.
    ///
    /// Limits below [`MIN_HISTORY_TURNS`] are raised to it so the pending
    /// exchange is never evicted before the reply is generated.
    pub fn with_history_limit(mut self, max_turns: Option<usize>) -> Self {
        self.max_turns = max_turns.map(|m| m.max(MIN_HISTORY_TURNS));
        self.enforce_limit();
        self
    }

    pub fn history_limit(&self) -> Option<usize> {
        self.max_turns
    }

    pub fn push_human(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::human(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(ConversationTurn::assistant(content));
    }

    fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
        self.enforce_limit();
    }

    fn enforce_limit(&mut self) {
        let Some(max) = self.max_turns else {
            return;
        };
        let mut excess = (self.turns.len() - 1).saturating_sub(max);
        if excess == 0 {
            return;
        }
        // Evict whole exchanges: the oldest kept turn must be a Human turn
        while let Some(turn) = self.turns.get(1 + excess)
            && turn.role != Role::Human
        {
            excess += 1;
        }
        self.turns.drain(1..=excess);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn system(&self) -> &ConversationTurn {
        &self.turns[0]
    }

    pub fn last(&self) -> &ConversationTurn {
        // turns always holds the system preamble
        &self.turns[self.turns.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// A conversation always holds its system preamble, so it is never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of Human turns recorded so far (after eviction)
    pub fn exchange_count(&self) -> usize {
        self.turns.iter().filter(|t| t.role == Role::Human).count()
    }
}
