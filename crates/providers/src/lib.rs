//! Model provider implementations for taskforge.
//!
//! All providers implement the `taskforge_core::Provider` trait. The agent
//! wires the OpenAI-compatible client behind the retry decorator for its
//! completion path and hands the raw client to the memory store for
//! embeddings, so embedding failures are never absorbed by retries.

pub mod openai_compat;
pub mod retry;

pub use openai_compat::OpenAiCompatProvider;
pub use retry::{RetryPolicy, RetryProvider};
