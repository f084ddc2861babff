//! Chat session parameters.

use serde::{Deserialize, Serialize};
use vault_domain::PromptTemplate;

/// Parameters of a chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionParams {
    /// Override for the analyst system preamble.
    pub system_prompt: Option<String>,
    /// Maximum number of non-system turns kept; `None` keeps everything.
    pub max_history_turns: Option<usize>,
}

impl SessionParams {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_history_turns(mut self, max: Option<usize>) -> Self {
        self.max_history_turns = max;
        self
    }

    /// The preamble placed at turn 0
    pub fn system_prompt(&self) -> &str {
        self.system_prompt
            .as_deref()
            .unwrap_or(PromptTemplate::analyst_system())
    }
}
