//! Chat session configuration from TOML (`[session]` section)

use serde::{Deserialize, Serialize};
use vault_application::SessionParams;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// Keep at most this many non-system turns; unset keeps everything
    pub max_history_turns: Option<usize>,
    /// Replace the built-in analyst preamble
    pub system_prompt: Option<String>,
}

impl FileSessionConfig {
    pub fn to_params(&self) -> SessionParams {
        let params = SessionParams::default().with_max_history_turns(self.max_history_turns);
        match &self.system_prompt {
            Some(prompt) if !prompt.trim().is_empty() => params.with_system_prompt(prompt.clone()),
            _ => params,
        }
    }
}
