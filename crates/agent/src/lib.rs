//! # Taskforge Agent
//!
//! The task loop that drives taskforge. Given an objective, the agent:
//!
//! 1. **Pops** the head task from its queue
//! 2. **Thinks** privately about how to approach it (stored in memory)
//! 3. **Executes** the task with a model call (stored in memory)
//! 4. **Derives** follow-up tasks from the result and appends them
//! 5. **Reprioritizes** the whole queue, then pauses and repeats
//!
//! Each phase recalls semantic context for the objective from the injected
//! [`MemoryStore`](taskforge_core::memory::MemoryStore). The loop ends when
//! a prioritization leaves the queue empty.

pub mod parser;
pub mod prompts;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use parser::parse_numbered_list;
pub use runner::{Agent, EmptyPrioritization, StepReport};
