//! Prompt templates for routing and reply generation

use crate::retrieval::item::RankedItem;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Default system preamble placed at turn 0 of every conversation
    pub fn analyst_system() -> &'static str {
        r#"You are a Senior Fraud Detection Analyst.
You have access to a secure, encrypted vector database (CyborgDB).

YOUR RULES:
1. Analyze the "RETRIEVED EVIDENCE" provided by the user.
2. Compare it to the "INCOMING TRANSACTION".
3. End with a Verdict: [FRAUD] or [SAFE].
4. If asked follow-up questions, use the conversation history."#
    }

    /// System prompt for the classification collaborator
    pub fn router_system() -> &'static str {
        r#"You are an expert router for a Fraud Detection RAG system.
Decide whether the user's input needs evidence from the transaction database.

Respond with a single JSON object and nothing else:
{"decision": "SEARCH" | "CHAT", "query": "...", "original_query": "..."}

- decision: "SEARCH" if the query requires technical fraud detection info, "CHAT" for general conversation.
- query: if SEARCH, the core technical keywords to search for; if CHAT, "N/A".
- original_query: the user's original query, verbatim."#
    }

    /// User prompt for the classification collaborator
    pub fn router_prompt(query: &str) -> String {
        format!(
            r#"Analyze the user's input.
{}"#,
            query
        )
    }

    /// Human turn for the search path: original query plus retrieved context
    pub fn search_prompt(original_query: &str, context: &[RankedItem]) -> String {
        format!(
            "Human query {} and retrieved context is {}",
            original_query,
            Self::render_context(context)
        )
    }

    /// Render retrieved items as a bracketed evidence list
    pub fn render_context(context: &[RankedItem]) -> String {
        if context.is_empty() {
            return "[]".to_string();
        }
        let lines = context
            .iter()
            .map(|item| item.render())
            .collect::<Vec<_>>()
            .join("\n");
        format!("[\n{}\n]", lines)
    }
}
