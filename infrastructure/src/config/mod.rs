//! Configuration file loading for vault-rag
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VAULT_RAG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./vault-rag.toml` or `./.vault-rag.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/vault-rag/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBackendsConfig, FileBenchmarkConfig, FileConfig, FileCorpusConfig,
    FileDiskBackendConfig, FileEmbeddingConfig, FileEncryptedBackendConfig,
    FileInMemoryBackendConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileRetrievalConfig, FileSessionConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
