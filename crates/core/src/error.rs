//! Error types for the taskforge domain.
//!
//! Built on `thiserror`. Providers, memory stores, and the task queue each
//! get their own error enum, wrapped by the top-level [`Error`].

use thiserror::Error;

/// The top-level error type for all taskforge operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Shorthand for results carrying the top-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

// --- Per-subsystem errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl ProviderError {
    /// Whether waiting and retrying can change the outcome.
    ///
    /// Rate limits, timeouts, transport failures, and API-status rejections
    /// of any code count as transient. Credential failures and missing
    /// configuration do not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ApiError { .. } | Self::RateLimited { .. } | Self::Timeout(_) | Self::Network(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("Task queue is empty")]
    Empty,
}

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),
}
