//! # Taskforge Core
//!
//! Domain types, traits, and error definitions for the taskforge autonomous
//! task loop. The two seams of the system live here as traits: the model
//! [`Provider`] and the [`MemoryStore`]. Concrete backends sit in sibling
//! crates and depend inward on this one, which keeps the loop testable with
//! scripted stand-ins and lets backends be swapped without touching it.

pub mod error;
pub mod memory;
pub mod message;
pub mod provider;
pub mod task;
pub mod thought;

// Key types re-exported at the crate root
pub use error::{Error, MemoryError, ProviderError, QueueError, Result};
pub use memory::{ContextItem, MemoryQuery, MemoryStore, MemoryWrite};
pub use message::{CompletionRequest, CompletionResponse, Message, Role, Usage};
pub use provider::{EmbeddingRequest, EmbeddingResponse, Provider};
pub use task::{Task, TaskId, TaskQueue};
pub use thought::{ThoughtKind, ThoughtMetadata};
