//! Retrieval parameters: orchestrator fan-out control.

use serde::{Deserialize, Serialize};
use vault_domain::ENCRYPTED_BACKEND;

/// How the orchestrator issues one query to its backends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FanOut {
    /// One backend after another; no backend's work overlaps another's timer
    #[default]
    Sequential,
    /// All backends at once; per-backend timers may include scheduling delay
    Concurrent,
}

impl std::str::FromStr for FanOut {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(FanOut::Sequential),
            "concurrent" | "parallel" => Ok(FanOut::Concurrent),
            other => Err(format!("unknown fan-out mode '{}'", other)),
        }
    }
}

/// Orchestrator parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalParams {
    /// Number of items requested from each backend.
    pub top_k: usize,
    /// Name of the backend whose results are used as context.
    pub primary: String,
    pub fan_out: FanOut,
}

impl Default for RetrievalParams {
    fn default() -> Self {
        Self {
            top_k: 1,
            primary: ENCRYPTED_BACKEND.to_string(),
            fan_out: FanOut::Sequential,
        }
    }
}

impl RetrievalParams {
    // ==================== Builder Methods ====================

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_primary(mut self, primary: impl Into<String>) -> Self {
        self.primary = primary.into();
        self
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }
}
