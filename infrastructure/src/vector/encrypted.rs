//! Encrypted remote index backend.
//!
//! Client for an encrypted vector service. Queries are sent as text; the
//! service embeds and searches inside its encrypted index:
//!
//! ```text
//! POST {base_url}/v1/vectors/query
//! X-API-Key: <api key>
//! {"index_name": ..., "index_key": ..., "query_contents": ..., "top_k": ...}
//! ```

use crate::http::{HttpFailure, build_client, endpoint, send_json};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use vault_application::{BackendError, VectorBackend};
use vault_domain::{BackendKind, RankedItem};

/// Connection settings for [`EncryptedRemoteBackend`]
#[derive(Debug, Clone)]
pub struct EncryptedIndexSettings {
    pub base_url: String,
    pub index_name: String,
    pub api_key: Option<String>,
    pub index_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    index_name: &'a str,
    index_key: &'a str,
    query_contents: &'a str,
    top_k: usize,
    include: [&'static str; 3],
}

#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<QueryResult>,
}

#[derive(Deserialize)]
struct QueryResult {
    id: String,
    #[serde(default)]
    distance: Option<f32>,
    #[serde(default)]
    contents: Option<String>,
    #[serde(default)]
    metadata: BTreeMap<String, serde_json::Value>,
}

impl QueryResult {
    fn into_item(self, position: usize) -> RankedItem {
        let content = self
            .contents
            .or_else(|| {
                self.metadata
                    .get("text")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| self.id.clone());

        let mut item = RankedItem::new(position, content).with_metadata("id", self.id);
        if let Some(distance) = self.distance {
            item = item.with_score(distance);
        }
        for (key, value) in self.metadata {
            if key == "text" {
                continue;
            }
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            item = item.with_metadata(key, value);
        }
        item
    }
}

pub struct EncryptedRemoteBackend {
    client: reqwest::Client,
    url: String,
    index_name: String,
    api_key: String,
    index_key: String,
}

impl EncryptedRemoteBackend {
    /// Fails when either key is missing or the client cannot be built
    pub fn connect(settings: EncryptedIndexSettings) -> Result<Self, BackendError> {
        let api_key = settings
            .api_key
            .ok_or_else(|| BackendError::Misconfigured("missing API key".to_string()))?;
        let index_key = settings
            .index_key
            .ok_or_else(|| BackendError::Misconfigured("missing index key".to_string()))?;
        if settings.index_name.trim().is_empty() {
            return Err(BackendError::Misconfigured(
                "index name cannot be empty".to_string(),
            ));
        }
        let client = build_client(settings.timeout)
            .map_err(|e| BackendError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            url: endpoint(&settings.base_url, "/v1/vectors/query"),
            index_name: settings.index_name,
            api_key,
            index_key,
        })
    }
}

impl From<HttpFailure> for BackendError {
    fn from(e: HttpFailure) -> Self {
        match e {
            HttpFailure::Timeout => BackendError::Timeout,
            HttpFailure::Connection(msg) => BackendError::ConnectionError(msg),
            other => BackendError::QueryFailed(other.to_string()),
        }
    }
}

#[async_trait]
impl VectorBackend for EncryptedRemoteBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Encrypted
    }

    async fn similarity_search(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RankedItem>, BackendError> {
        let request = self
            .client
            .post(&self.url)
            .header("X-API-Key", &self.api_key)
            .json(&QueryRequest {
                index_name: &self.index_name,
                index_key: &self.index_key,
                query_contents: query,
                top_k,
                include: ["distance", "metadata", "contents"],
            });
        let response: QueryResponse = send_json(request).await?;

        Ok(response
            .results
            .into_iter()
            .take(top_k)
            .enumerate()
            .map(|(position, result)| result.into_item(position))
            .collect())
    }
}
