//! Pinecone-style vector index client.
//!
//! Embeds through the injected provider and talks to the index's
//! `/vectors/upsert` and `/query` endpoints. The store never retries: an
//! embedding or storage failure is surfaced to the caller as a
//! `MemoryError`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use taskforge_core::error::MemoryError;
use taskforge_core::memory::{ContextItem, MemoryQuery, MemoryStore, MemoryWrite};
use taskforge_core::provider::{EmbeddingRequest, Provider};
use taskforge_core::thought::ThoughtMetadata;

use crate::vector::sort_by_score;

/// A client for one namespace of a Pinecone-style index.
pub struct PineconeStore {
    base_url: String,
    api_key: String,
    namespace: String,
    provider: Arc<dyn Provider>,
    embedding_model: String,
    client: reqwest::Client,
}

impl PineconeStore {
    /// Create a store for `namespace` on the index at `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        namespace: impl Into<String>,
        provider: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            namespace: namespace.into(),
            provider,
            embedding_model: embedding_model.into(),
            client,
        }
    }

    /// Create a store from an index name and service environment, using the
    /// conventional `https://{index}.svc.{environment}.pinecone.io` host.
    pub fn for_index(
        index_name: &str,
        environment: &str,
        api_key: impl Into<String>,
        namespace: impl Into<String>,
        provider: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self::new(
            format!("https://{index_name}.svc.{environment}.pinecone.io"),
            api_key,
            namespace,
            provider,
            embedding_model,
        )
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, MemoryError> {
        let response = self
            .provider
            .embed(EmbeddingRequest::single(&self.embedding_model, text))
            .await
            .map_err(|e| MemoryError::EmbeddingFailed(e.to_string()))?;
        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| MemoryError::EmbeddingFailed("Empty embedding response".into()))
    }
}

#[async_trait]
impl MemoryStore for PineconeStore {
    fn name(&self) -> &str {
        "pinecone"
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn add(&self, write: MemoryWrite) -> Result<(), MemoryError> {
        let vector = self.embed(&write.result).await?;

        let url = format!("{}/vectors/upsert", self.base_url);
        let body = UpsertRequest {
            vectors: vec![ApiVector {
                id: write.record_id.clone(),
                values: vector,
                metadata: write.metadata(),
            }],
            namespace: self.namespace.clone(),
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Storage(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Index rejected upsert");
            return Err(MemoryError::Storage(format!(
                "Upsert failed with status {status}: {error_body}"
            )));
        }

        let parsed: UpsertResponse = response.json().await.map_err(|e| {
            MemoryError::Storage(format!("Failed to parse upsert response: {e}"))
        })?;

        debug!(
            namespace = %self.namespace,
            id = %write.record_id,
            count = parsed.upserted_count,
            "Stored memory record"
        );
        Ok(())
    }

    async fn query(&self, query: MemoryQuery) -> Result<Vec<ContextItem>, MemoryError> {
        let vector = self.embed(&query.text).await?;

        let url = format!("{}/query", self.base_url);
        let body = QueryRequest {
            vector,
            top_k: query.top_k,
            namespace: self.namespace.clone(),
            include_metadata: true,
            include_values: true,
            filter: query.filter.clone(),
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::QueryFailed(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Index rejected query");
            return Err(MemoryError::QueryFailed(format!(
                "Query failed with status {status}: {error_body}"
            )));
        }

        let parsed: QueryResponse = response.json().await.map_err(|e| {
            MemoryError::QueryFailed(format!("Failed to parse query response: {e}"))
        })?;

        let mut items: Vec<ContextItem> = parsed
            .matches
            .into_iter()
            .map(|m| ContextItem {
                id: m.id,
                score: m.score,
                metadata: m.metadata,
                vector: m.values,
            })
            .collect();

        // matches arrive best-first; re-sort before trusting the order
        sort_by_score(&mut items);
        items.truncate(query.top_k);
        Ok(items)
    }
}

// --- Pinecone API types (internal) ---

#[derive(Debug, Serialize)]
struct UpsertRequest {
    vectors: Vec<ApiVector>,
    namespace: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiVector {
    id: String,
    values: Vec<f32>,
    metadata: ThoughtMetadata,
}

#[derive(Debug, Deserialize)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount", default)]
    upserted_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: usize,
    namespace: String,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ApiMatch>,
}

#[derive(Debug, Deserialize)]
struct ApiMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    values: Vec<f32>,
    metadata: ThoughtMetadata,
}
