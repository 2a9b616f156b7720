//! In-memory store — useful for tests and ephemeral runs.
//!
//! A single [`InMemoryIndex`] plays the role of the remote index: it holds
//! records for any number of namespaces. Each [`InMemoryStore`] is a
//! namespace-scoped view over one shared index, with the same
//! embed-on-write and embed-on-query behavior as the remote store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use taskforge_core::error::MemoryError;
use taskforge_core::memory::{ContextItem, MemoryQuery, MemoryStore, MemoryWrite};
use taskforge_core::provider::{EmbeddingRequest, Provider};
use taskforge_core::thought::ThoughtMetadata;

use crate::vector::{cosine_similarity, sort_by_score};

#[derive(Debug, Clone)]
struct StoredRecord {
    id: String,
    vector: Vec<f32>,
    metadata: ThoughtMetadata,
}

/// A process-local index holding records for any number of namespaces.
#[derive(Default)]
pub struct InMemoryIndex {
    // namespace -> records
    records: RwLock<HashMap<String, Vec<StoredRecord>>>,
}

impl InMemoryIndex {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of records currently stored under `namespace`.
    pub async fn count(&self, namespace: &str) -> usize {
        self.records.read().await.get(namespace).map_or(0, Vec::len)
    }
}

/// A namespace-scoped store over a shared [`InMemoryIndex`].
pub struct InMemoryStore {
    index: Arc<InMemoryIndex>,
    provider: Arc<dyn Provider>,
    embedding_model: String,
    namespace: String,
}

impl InMemoryStore {
    pub fn new(
        index: Arc<InMemoryIndex>,
        provider: Arc<dyn Provider>,
        embedding_model: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            index,
            provider,
            embedding_model: embedding_model.into(),
            namespace: namespace.into(),
        }
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

/// Equality filter over the record's flattened metadata.
fn metadata_matches(metadata: &ThoughtMetadata, filter: &serde_json::Value) -> bool {
    let Some(conditions) = filter.as_object() else {
        return true;
    };
    let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(metadata) else {
        return false;
    };
    conditions
        .iter()
        .all(|(key, expected)| fields.get(key) == Some(expected))
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn add(&self, write: MemoryWrite) -> Result<(), MemoryError> {
        let vector = self.embed(&write.result).await?;
        let id = if write.record_id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            write.record_id.clone()
        };
        let record = StoredRecord {
            id: id.clone(),
            vector,
            metadata: write.metadata(),
        };

        let mut records = self.index.records.write().await;
        let bucket = records.entry(self.namespace.clone()).or_default();
        // upsert semantics: a record with the same id is replaced
        if let Some(existing) = bucket.iter_mut().find(|r| r.id == id) {
            *existing = record;
        } else {
            bucket.push(record);
        }
        debug!(namespace = %self.namespace, id = %id, "Stored memory record");
        Ok(())
    }

    async fn query(&self, query: MemoryQuery) -> Result<Vec<ContextItem>, MemoryError> {
        let query_vector = self.embed(&query.text).await?;

        let records = self.index.records.read().await;
        let mut items: Vec<ContextItem> = records
            .get(&self.namespace)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|r| {
                        query
                            .filter
                            .as_ref()
                            .is_none_or(|f| metadata_matches(&r.metadata, f))
                    })
                    .map(|r| ContextItem {
                        id: r.id.clone(),
                        score: cosine_similarity(&r.vector, &query_vector),
                        metadata: r.metadata.clone(),
                        vector: r.vector.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        sort_by_score(&mut items);
        items.truncate(query.top_k);
        Ok(items)
    }
}
