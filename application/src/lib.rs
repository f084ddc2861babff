//! Application layer for vault-rag
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BenchmarkParams, FanOut, RetrievalParams, SessionParams};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    corpus::{CorpusError, CorpusRecord, CorpusSource},
    embedder::{Embedder, EmbeddingError},
    llm_gateway::{ClassificationError, GatewayError, QueryClassifier, ReplyGenerator},
    progress::{BenchmarkProgress, NoProgress},
    vector_backend::{BackendError, VectorBackend},
};
pub use use_cases::handle_message::{ChatResponse, ChatService, GENERIC_ERROR_RESPONSE};
pub use use_cases::retrieve::{
    AdapterOutcome, BackendAdapter, RetrievalError, RetrievalOrchestrator, RetrievalOutcome,
};
pub use use_cases::route_query::{ChatSession, RouterError, TurnOutcome};
pub use use_cases::run_benchmark::{BenchmarkError, BenchmarkRun, RunBenchmarkUseCase};
