//! Retry decorator — fixed-backoff retry around a provider's completion path.
//!
//! The agent loop treats completions as something that eventually succeeds:
//! under the default policy a transient failure is waited out indefinitely,
//! ten seconds per attempt, and `complete` only ever returns on success or
//! on a non-transient error. Tests inject a bounded policy with a short
//! delay instead.
//!
//! Only `complete` is retried. `embed` passes straight through so failures
//! on the memory path surface immediately.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use taskforge_core::error::ProviderError;
use taskforge_core::message::{CompletionRequest, CompletionResponse};
use taskforge_core::provider::{EmbeddingRequest, EmbeddingResponse, Provider};

/// How retries are paced and bounded.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Fixed delay between attempts
    pub backoff: Duration,

    /// Total attempt cap; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever with a fixed delay between attempts.
    pub fn fixed(backoff: Duration) -> Self {
        Self {
            backoff,
            max_attempts: None,
        }
    }

    /// Make at most `max_attempts` attempts in total.
    pub fn bounded(backoff: Duration, max_attempts: u32) -> Self {
        Self {
            backoff,
            max_attempts: Some(max_attempts),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(Duration::from_secs(10))
    }
}

/// A provider that wraps another provider and retries transient completion
/// failures according to a [`RetryPolicy`].
pub struct RetryProvider {
    inner: Arc<dyn Provider>,
    policy: RetryPolicy,
}

impl RetryProvider {
    /// Wrap `inner` with the default policy (unlimited attempts, 10 s apart).
    pub fn new(inner: Arc<dyn Provider>) -> Self {
        Self {
            inner,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[async_trait]
impl Provider for RetryProvider {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let error = match self.inner.complete(request.clone()).await {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            if !error.is_transient() {
                return Err(error);
            }
            if let Some(max) = self.policy.max_attempts
                && attempt >= max
            {
                return Err(error);
            }

            warn!(
                provider = %self.inner.name(),
                attempt,
                backoff_secs = self.policy.backoff.as_secs_f64(),
                error = %error,
                "Completion failed, waiting before retry"
            );
            tokio::time::sleep(self.policy.backoff).await;
        }
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> std::result::Result<EmbeddingResponse, ProviderError> {
        self.inner.embed(request).await
    }
}
