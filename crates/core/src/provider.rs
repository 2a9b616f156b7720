//! Provider trait — the abstraction over the model backend.
//!
//! A Provider knows how to send a conversation to a model service and get
//! text back, and how to turn text into embedding vectors. The agent loop
//! calls `complete()` without knowing which backend is in play; memory
//! stores call `embed()` the same way.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::{CompletionRequest, CompletionResponse, Usage};

/// A batch of texts to embed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// The embedding model (e.g., "text-embedding-ada-002").
    pub model: String,

    /// Texts to embed, in order.
    pub inputs: Vec<String>,
}

impl EmbeddingRequest {
    /// A request for a single text.
    pub fn single(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            inputs: vec![text.into()],
        }
    }
}

/// Vectors produced for an embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// One vector per input, in input order.
    pub embeddings: Vec<Vec<f32>>,

    /// The model that served the request.
    pub model: String,

    /// Token accounting, when the backend reports it.
    pub usage: Option<Usage>,
}

/// The model backend seam.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "openai", "mock").
    fn name(&self) -> &str;

    /// Run a completion and return the full response.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;

    /// Turn texts into embedding vectors.
    ///
    /// The default implementation reports that embeddings aren't supported.
    async fn embed(
        &self,
        _request: EmbeddingRequest,
    ) -> std::result::Result<EmbeddingResponse, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support embeddings",
            self.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    struct TextOnly;

    #[async_trait]
    impl Provider for TextOnly {
        fn name(&self) -> &str {
            "text-only"
        }

        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Ok(CompletionResponse {
                message: Message::assistant("ok"),
                model: request.model,
                usage: None,
            })
        }
    }

    #[test]
    fn single_embedding_request() {
        let req = EmbeddingRequest::single("text-embedding-ada-002", "hello");
        assert_eq!(req.inputs, vec!["hello"]);
    }

    #[tokio::test]
    async fn complete_echoes_the_requested_model() {
        let resp = TextOnly
            .complete(CompletionRequest::from_prompt("gpt-3.5-turbo-16k", "hi"))
            .await
            .unwrap();
        assert_eq!(resp.model, "gpt-3.5-turbo-16k");
        assert_eq!(resp.text(), "ok");
    }

    #[tokio::test]
    async fn default_embed_reports_unsupported() {
        let err = TextOnly
            .embed(EmbeddingRequest::single("text-embedding-ada-002", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
