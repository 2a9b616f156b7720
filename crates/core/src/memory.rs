//! MemoryStore trait — semantic storage for the agent's thoughts.
//!
//! A store is bound to a single namespace at construction. Writes embed the
//! result text and upsert it with its metadata; queries embed the query text
//! and return the nearest records, best first.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MemoryError;
use crate::thought::{ThoughtKind, ThoughtMetadata};

/// A write request: one thought to embed and persist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryWrite {
    /// Record id. An existing record with the same id is overwritten.
    pub record_id: String,

    /// Name of the task that produced the thought
    pub task_name: String,

    /// The generated text; this is what gets embedded
    pub result: String,

    /// Classification tag
    pub kind: ThoughtKind,

    /// Additional metadata keys, stored verbatim
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MemoryWrite {
    pub fn new(
        record_id: impl Into<String>,
        task_name: impl Into<String>,
        result: impl Into<String>,
        kind: ThoughtKind,
    ) -> Self {
        Self {
            record_id: record_id.into(),
            task_name: task_name.into(),
            result: result.into(),
            kind,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The metadata this write persists alongside the vector.
    pub fn metadata(&self) -> ThoughtMetadata {
        ThoughtMetadata {
            task: self.task_name.clone(),
            result: self.result.clone(),
            kind: self.kind.clone(),
            extra: self.extra.clone(),
        }
    }
}

/// A query for the records nearest to a piece of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryQuery {
    /// Text to search near
    pub text: String,

    /// Result cap
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Optional backend-side metadata filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
}

fn default_top_k() -> usize {
    5
}

impl MemoryQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top_k: default_top_k(),
            filter: None,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_filter(mut self, filter: serde_json::Value) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// One query hit: a stored record with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextItem {
    /// Record id
    pub id: String,

    /// Similarity score, higher is closer
    pub score: f32,

    /// The record's metadata
    pub metadata: ThoughtMetadata,

    /// The stored vector
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vector: Vec<f32>,
}

/// The memory backend seam.
///
/// Implementations: Pinecone-style remote index, in-memory (for tests and
/// ephemeral runs). A store instance is pinned to one namespace.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The backend name (e.g., "pinecone", "in-memory").
    fn name(&self) -> &str;

    /// The namespace every operation on this store is scoped to.
    fn namespace(&self) -> &str;

    /// Embed `write.result` and upsert it with its metadata.
    ///
    /// Failures propagate to the caller; there is no retry on this path.
    async fn add(&self, write: MemoryWrite) -> std::result::Result<(), MemoryError>;

    /// Embed `query.text` and return the nearest records, highest score
    /// first, at most `query.top_k` of them.
    async fn query(&self, query: MemoryQuery)
        -> std::result::Result<Vec<ContextItem>, MemoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_to_five_results() {
        let query = MemoryQuery::new("retro game night");
        assert_eq!(query.top_k, 5);
        assert!(query.filter.is_none());
    }

    #[test]
    fn write_builds_its_metadata() {
        let write = MemoryWrite::new(
            "result_1",
            "Plan the night",
            "A plan with three steps.",
            ThoughtKind::ExecuteThought,
        )
        .with_extra("iteration", serde_json::json!(1));

        let meta = write.metadata();
        assert_eq!(meta.task, "Plan the night");
        assert_eq!(meta.result, "A plan with three steps.");
        assert_eq!(meta.kind, ThoughtKind::ExecuteThought);
        assert_eq!(meta.extra["iteration"], 1);
    }

    #[test]
    fn context_item_skips_empty_vector_in_json() {
        let item = ContextItem {
            id: "result_1".into(),
            score: 0.87,
            metadata: ThoughtMetadata::new("t", "r", ThoughtKind::InternalThought),
            vector: Vec::new(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("\"vector\""));
    }
}
