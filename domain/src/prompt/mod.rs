//! Prompt domain
//!
//! Templates for the analyst system preamble, the router classification
//! prompt and the retrieval-augmented human turn.

mod template;

pub use template::PromptTemplate;
