//! LLM adapters
//!
//! [`OpenAiChatClient`] talks to any OpenAI-compatible chat completion API
//! and serves as both the query classifier and the reply generator.

mod chat_client;

pub use chat_client::OpenAiChatClient;
