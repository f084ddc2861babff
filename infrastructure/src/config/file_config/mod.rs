//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application params.

mod backends;
mod benchmark;
mod corpus;
mod embedding;
mod llm;
mod logging;
mod output;
mod repl;
mod retrieval;
mod session;

pub use backends::{
    FileBackendsConfig, FileDiskBackendConfig, FileEncryptedBackendConfig,
    FileInMemoryBackendConfig,
};
pub use benchmark::FileBenchmarkConfig;
pub use corpus::FileCorpusConfig;
pub use embedding::FileEmbeddingConfig;
pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use retrieval::FileRetrievalConfig;
pub use session::FileSessionConfig;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("retrieval.top_k cannot be 0")]
    ZeroTopK,

    #[error("retrieval.primary cannot be empty")]
    EmptyPrimary,

    #[error("retrieval.primary: backend '{0}' is not enabled")]
    UnknownPrimary(String),

    #[error("retrieval.fan_out: {0}")]
    InvalidFanOut(String),

    #[error("no backends are enabled")]
    NoBackends,

    #[error("backend name '{0}' is used more than once")]
    DuplicateBackendName(String),

    #[error("benchmark.concurrency cannot be 0")]
    ZeroConcurrency,

    #[error("benchmark.{field}: backend '{name}' is not enabled")]
    UnknownBenchmarkBackend { field: &'static str, name: String },

    #[error("embedding.provider: unknown value '{0}' (expected 'hashing' or 'openai')")]
    UnknownEmbeddingProvider(String),

    #[error("embedding.dimensions cannot be 0")]
    ZeroDimensions,

    #[error("{0}.timeout_seconds cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("llm.{0} cannot be empty")]
    EmptyModelName(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub retrieval: FileRetrievalConfig,
    pub backends: FileBackendsConfig,
    pub embedding: FileEmbeddingConfig,
    pub llm: FileLlmConfig,
    pub corpus: FileCorpusConfig,
    pub benchmark: FileBenchmarkConfig,
    pub session: FileSessionConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        // Retrieval
        if self.retrieval.top_k == 0 {
            issues.push(ConfigValidationError::ZeroTopK);
        }
        if let Err(e) = self.retrieval.parse_fan_out() {
            issues.push(ConfigValidationError::InvalidFanOut(e));
        }

        // Backends
        let enabled = self.backends.enabled();
        if enabled.is_empty() {
            issues.push(ConfigValidationError::NoBackends);
        }
        let mut seen = HashSet::new();
        for (name, _) in &enabled {
            if !seen.insert(*name) {
                issues.push(ConfigValidationError::DuplicateBackendName(name.to_string()));
            }
        }
        if self.retrieval.primary.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyPrimary);
        } else if !enabled.is_empty() && !self.backends.is_configured(&self.retrieval.primary) {
            issues.push(ConfigValidationError::UnknownPrimary(
                self.retrieval.primary.clone(),
            ));
        }

        // Benchmark
        if self.benchmark.concurrency == 0 {
            issues.push(ConfigValidationError::ZeroConcurrency);
        }
        for (field, name) in [
            ("baseline", &self.benchmark.baseline),
            ("target", &self.benchmark.target),
        ] {
            if !self.backends.is_configured(name) {
                issues.push(ConfigValidationError::UnknownBenchmarkBackend {
                    field,
                    name: name.clone(),
                });
            }
        }

        // Embedding
        if !matches!(self.embedding.provider.as_str(), "hashing" | "openai") {
            issues.push(ConfigValidationError::UnknownEmbeddingProvider(
                self.embedding.provider.clone(),
            ));
        }
        if self.embedding.dimensions == 0 {
            issues.push(ConfigValidationError::ZeroDimensions);
        }

        // LLM
        if self.llm.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout("llm"));
        }
        if self.backends.encrypted.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout("backends.encrypted"));
        }
        if self.llm.router_model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName("router_model"));
        }
        if self.llm.reply_model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName("reply_model"));
        }

        issues
    }
}
