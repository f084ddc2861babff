//! LLM configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// OpenAI-compatible chat completion endpoint used for routing and replies
///
/// # Example
///
/// ```toml
/// [llm]
/// base_url = "https://api.openai.com"
/// router_model = "gpt-4o-mini"
/// reply_model = "gpt-4o"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Base URL for the API (can point at any OpenAI-compatible server).
    pub base_url: String,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended; use the env var instead).
    pub api_key: Option<String>,
    /// Model that classifies queries into SEARCH / CHAT
    pub router_model: String,
    /// Model that writes the analyst reply
    pub reply_model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            router_model: "gpt-4o-mini".to_string(),
            reply_model: "gpt-4o".to_string(),
            max_tokens: 1024,
            timeout_seconds: 60,
        }
    }
}

impl FileLlmConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        super::backends::resolve_secret(self.api_key.as_ref(), &self.api_key_env)
    }
}
