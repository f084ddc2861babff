//! Retrieval configuration from TOML (`[retrieval]` section)

use serde::{Deserialize, Serialize};
use vault_application::{FanOut, RetrievalParams};
use vault_domain::ENCRYPTED_BACKEND;

/// Raw retrieval configuration from TOML
///
/// # Example
///
/// ```toml
/// [retrieval]
/// top_k = 1
/// primary = "cyborg"
/// fan_out = "sequential"   # or "concurrent"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    pub top_k: usize,
    /// Name of the backend whose results feed the reply
    pub primary: String,
    pub fan_out: String,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 1,
            primary: ENCRYPTED_BACKEND.to_string(),
            fan_out: "sequential".to_string(),
        }
    }
}

impl FileRetrievalConfig {
    /// Parse `fan_out`; [`to_params`](Self::to_params) falls back to sequential.
    pub fn parse_fan_out(&self) -> Result<FanOut, String> {
        self.fan_out.parse()
    }

    pub fn to_params(&self) -> RetrievalParams {
        RetrievalParams::default()
            .with_top_k(self.top_k)
            .with_primary(self.primary.clone())
            .with_fan_out(self.parse_fan_out().unwrap_or_default())
    }
}
