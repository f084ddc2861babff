//! Embedding configuration from TOML (`[embedding]` section)

use serde::{Deserialize, Serialize};

/// Raw embedding configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEmbeddingConfig {
    /// "hashing" (offline) or "openai"
    pub provider: String,
    pub dimensions: usize,
    /// Model name for remote providers
    pub model: String,
    pub base_url: String,
    pub api_key_env: String,
    pub api_key: Option<String>,
}

impl Default for FileEmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "hashing".to_string(),
            dimensions: 384,
            model: "text-embedding-3-small".to_string(),
            base_url: "https://api.openai.com".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
        }
    }
}

impl FileEmbeddingConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        super::backends::resolve_secret(self.api_key.as_ref(), &self.api_key_env)
    }
}
