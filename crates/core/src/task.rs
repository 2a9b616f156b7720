//! Task and TaskQueue domain types.
//!
//! The queue is the agent's working set. Task ids are minted by the queue,
//! start at 1, and strictly increase for the queue's whole lifetime — a
//! `replace` hands out fresh ids but never winds the counter back, so an id
//! seen once is never seen again on a different task.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::QueueError;

/// Unique identifier for a task, minted by the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single unit of work. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Queue-assigned id
    pub id: TaskId,

    /// Natural-language description of the work
    pub name: String,
}

/// FIFO task queue with monotonic id assignment.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
    last_id: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the back of the queue with a freshly minted id.
    pub fn append(&mut self, name: impl Into<String>) -> TaskId {
        self.last_id += 1;
        let id = TaskId(self.last_id);
        self.tasks.push_back(Task { id, name: name.into() });
        id
    }

    /// Remove and return the task at the front of the queue.
    pub fn pop_next(&mut self) -> std::result::Result<Task, QueueError> {
        self.tasks.pop_front().ok_or(QueueError::Empty)
    }

    /// Discard the current contents and refill from `names`, in order,
    /// each with a fresh id. Ids of discarded tasks are never reused.
    pub fn replace<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks.clear();
        for name in names {
            self.append(name);
        }
    }

    /// The id the next appended task will receive.
    pub fn next_id(&self) -> TaskId {
        TaskId(self.last_id + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// The names of all queued tasks, front to back.
    pub fn names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_start_at_one_and_increase() {
        let mut queue = TaskQueue::new();
        assert_eq!(queue.next_id(), TaskId(1));
        assert_eq!(queue.append("first"), TaskId(1));
        assert_eq!(queue.append("second"), TaskId(2));
        assert_eq!(queue.next_id(), TaskId(3));
    }

    #[test]
    fn pop_next_is_fifo() {
        let mut queue = TaskQueue::new();
        queue.append("first");
        queue.append("second");
        let task = queue.pop_next().unwrap();
        assert_eq!(task.id, TaskId(1));
        assert_eq!(task.name, "first");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn pop_next_on_empty_queue_fails() {
        let mut queue = TaskQueue::new();
        assert_eq!(queue.pop_next(), Err(QueueError::Empty));
    }

    #[test]
    fn replace_never_reuses_ids() {
        let mut queue = TaskQueue::new();
        queue.append("a");
        queue.append("b");
        queue.replace(["c", "d"]);
        assert_eq!(queue.pop_next().unwrap().id, TaskId(3));
        assert_eq!(queue.pop_next().unwrap().id, TaskId(4));
    }

    #[test]
    fn replace_with_empty_drains_the_queue() {
        let mut queue = TaskQueue::new();
        queue.append("a");
        queue.replace(Vec::<String>::new());
        assert!(queue.is_empty());
        // the counter survives the wipe
        assert_eq!(queue.append("b"), TaskId(2));
    }

    #[test]
    fn names_preserve_order() {
        let mut queue = TaskQueue::new();
        queue.append("first");
        queue.append("second");
        assert_eq!(queue.names(), vec!["first", "second"]);
    }

    #[test]
    fn task_id_displays_as_plain_integer() {
        assert_eq!(TaskId(7).to_string(), "7");
    }
}
