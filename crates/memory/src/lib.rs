//! # Taskforge Memory
//!
//! Vector memory backends for taskforge agents.
//!
//! Each store implements the [`MemoryStore`](taskforge_core::memory::MemoryStore)
//! trait from `taskforge-core`: it embeds text through an injected
//! [`Provider`](taskforge_core::provider::Provider) and keeps the resulting
//! vectors in one namespace of an index.
//!
//! Backends:
//! - [`PineconeStore`]: a Pinecone-style HTTP index, one client per namespace
//! - [`InMemoryStore`]: a process-local index for tests and offline runs
//!
//! Namespaces are derived from the agent id and its objective with
//! [`derive_namespace`], so two agents (or one agent with two objectives)
//! never read each other's context.

pub mod in_memory;
pub mod namespace;
pub mod pinecone;
pub mod vector;

pub use in_memory::{InMemoryIndex, InMemoryStore};
pub use namespace::derive_namespace;
pub use pinecone::PineconeStore;
pub use vector::{cosine_similarity, sort_by_score};
