//! Shared test helpers for loop tests.

use std::sync::Mutex;

use taskforge_core::error::ProviderError;
use taskforge_core::message::{CompletionRequest, CompletionResponse, Message, Usage};
use taskforge_core::provider::{EmbeddingRequest, EmbeddingResponse, Provider};

/// A mock provider that returns a sequence of scripted completion texts.
///
/// Each call to `complete` returns the next text in the queue and records
/// the request for later inspection. Panics if more calls are made than
/// responses provided. `embed` always succeeds with a fixed vector so the
/// same mock can back an in-memory store.
pub struct SequentialMockProvider {
    responses: Mutex<Vec<String>>,
    requests: Mutex<Vec<CompletionRequest>>,
    embedding: Vec<f32>,
    embed_count: Mutex<usize>,
}

impl SequentialMockProvider {
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
            embedding: vec![0.1, 0.2, 0.3],
            embed_count: Mutex::new(0),
        }
    }

    /// Completion requests seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    #[allow(dead_code)]
    pub fn embed_count(&self) -> usize {
        *self.embed_count.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl Provider for SequentialMockProvider {
    fn name(&self) -> &str {
        "sequential_mock"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let mut requests = self.requests.lock().unwrap();
        let responses = self.responses.lock().unwrap();

        if requests.len() >= responses.len() {
            panic!(
                "SequentialMockProvider: no more responses (call #{}, have {})",
                requests.len() + 1,
                responses.len()
            );
        }

        let text = responses[requests.len()].clone();
        requests.push(request);
        Ok(make_text_response(&text))
    }

    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, ProviderError> {
        *self.embed_count.lock().unwrap() += 1;
        Ok(EmbeddingResponse {
            embeddings: vec![self.embedding.clone(); request.inputs.len()],
            model: request.model,
            usage: None,
        })
    }
}

/// Create a simple completion response around the given text.
pub fn make_text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        model: "mock-model".into(),
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
    }
}
