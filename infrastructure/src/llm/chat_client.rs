//! OpenAI-compatible chat completion client.

use crate::http::{HttpFailure, build_client, endpoint, send_json};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use vault_application::{ClassificationError, GatewayError, QueryClassifier, ReplyGenerator};
use vault_domain::util::truncate_str;
use vault_domain::{ConversationTurn, PromptTemplate, Role, RouteDecision, parse_route_decision};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> From<&'a ConversationTurn> for ChatMessage<'a> {
    fn from(turn: &'a ConversationTurn) -> Self {
        let role = match turn.role {
            Role::System => "system",
            Role::Human => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: &turn.content,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl From<HttpFailure> for GatewayError {
    fn from(e: HttpFailure) -> Self {
        match e {
            HttpFailure::Timeout => GatewayError::Timeout,
            HttpFailure::Connection(msg) => GatewayError::ConnectionError(msg),
            HttpFailure::Status { status, body } => {
                GatewayError::RequestFailed(format!("HTTP {}: {}", status, body))
            }
            HttpFailure::Decode(msg) => GatewayError::InvalidResponse(msg),
        }
    }
}

pub struct OpenAiChatClient {
    client: reqwest::Client,
    url: String,
    api_key: String,
    router_model: String,
    reply_model: String,
    max_tokens: u32,
}

impl OpenAiChatClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        router_model: impl Into<String>,
        reply_model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GatewayError::MissingCredentials("LLM API key".to_string()))?;
        let client = build_client(timeout)?;
        Ok(Self {
            client,
            url: endpoint(base_url, "/v1/chat/completions"),
            api_key,
            router_model: router_model.into(),
            reply_model: reply_model.into(),
            max_tokens: 1024,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage<'_>>,
        temperature: Option<f32>,
    ) -> Result<String, GatewayError> {
        debug!("Chat completion: model={}, {} messages", model, messages.len());
        let request = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model,
                messages,
                max_tokens: self.max_tokens,
                temperature,
            });
        let response: CompletionResponse = send_json(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| GatewayError::InvalidResponse("empty completion".to_string()))
    }
}

#[async_trait]
impl QueryClassifier for OpenAiChatClient {
    async fn classify(&self, query: &str) -> Result<RouteDecision, ClassificationError> {
        let prompt = PromptTemplate::router_prompt(query);
        let messages = vec![
            ChatMessage {
                role: "system",
                content: PromptTemplate::router_system(),
            },
            ChatMessage {
                role: "user",
                content: &prompt,
            },
        ];
        let raw = self.complete(&self.router_model, messages, Some(0.0)).await?;
        debug!("Classifier output: {}", truncate_str(&raw, 200));
        Ok(parse_route_decision(&raw)?)
    }
}

#[async_trait]
impl ReplyGenerator for OpenAiChatClient {
    async fn generate_reply(&self, history: &[ConversationTurn]) -> Result<String, GatewayError> {
        let messages = history.iter().map(ChatMessage::from).collect();
        self.complete(&self.reply_model, messages, None).await
    }
}
