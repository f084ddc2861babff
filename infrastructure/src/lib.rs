//! Infrastructure layer for vault-rag
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod corpus;
pub mod embedding;
mod http;
pub mod llm;
pub mod logging;
pub mod vector;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBackendsConfig, FileBenchmarkConfig, FileConfig,
    FileCorpusConfig, FileEmbeddingConfig, FileLlmConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileRetrievalConfig, FileSessionConfig,
};
pub use corpus::CsvCorpus;
pub use embedding::{HashingEmbedder, OpenAiEmbedder};
pub use http::HttpFailure;
pub use llm::OpenAiChatClient;
pub use logging::JsonlConversationLogger;
pub use vector::{
    BackendFactory, DiskBackend, EncryptedIndexSettings, EncryptedRemoteBackend, FlatIndex,
    InMemoryBackend, build_embedder, build_index,
};
