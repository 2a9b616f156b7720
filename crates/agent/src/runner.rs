//! The task loop implementation.
//!
//! One iteration takes the head task through four model calls:
//!
//! 1. **Internal thought** — private planning, stored in memory
//! 2. **Execution** — the actual response to the task, stored in memory
//! 3. **Task creation** — derive follow-up tasks from the result
//! 4. **Prioritization** — re-rank the whole queue
//!
//! The loop runs until the queue is empty. There is no iteration cap and no
//! cycle detection; an objective whose follow-up lists never dry up runs
//! until interrupted.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use taskforge_core::Error;
use taskforge_core::memory::{MemoryQuery, MemoryStore, MemoryWrite};
use taskforge_core::message::CompletionRequest;
use taskforge_core::provider::Provider;
use taskforge_core::task::{Task, TaskQueue};
use taskforge_core::thought::{ThoughtKind, ThoughtMetadata};

use crate::parser::parse_numbered_list;
use crate::prompts;

const INTERNAL_THOUGHT_TEMPERATURE: f32 = 0.8;
const EXECUTE_TEMPERATURE: f32 = 0.7;
const TASK_CREATION_TEMPERATURE: f32 = 0.6;
const PRIORITIZATION_TEMPERATURE: f32 = 0.6;

/// What to do when the prioritization response parses to no tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyPrioritization {
    /// Keep the queue as it was and log a warning.
    #[default]
    KeepQueue,

    /// Take the model at its word and drain the queue.
    ReplaceQueue,
}

/// The outcome of one loop iteration, for logging and tests.
#[derive(Debug, Clone)]
pub struct StepReport {
    /// The task that was executed.
    pub task: Task,

    /// The private planning text.
    pub internal_thought: String,

    /// The response to the task.
    pub execution_result: String,

    /// Task names appended by the creation phase.
    pub created: Vec<String>,

    /// Queue names after the prioritization phase, front to back.
    pub prioritized: Vec<String>,
}

/// The task loop. Owns the queue; everything else is injected.
pub struct Agent {
    /// What the agent is trying to accomplish. Immutable for the run.
    objective: String,

    /// The working set of tasks
    queue: TaskQueue,

    /// Completion backend (wrap in a retry decorator for production)
    provider: Arc<dyn Provider>,

    /// Semantic memory, bound to this agent's namespace
    memory: Arc<dyn MemoryStore>,

    /// Completion model name
    model: String,

    /// Context records to recall per phase
    top_k: usize,

    /// Pause between iterations
    pacing: Duration,

    /// Empty-prioritization policy
    on_empty_prioritization: EmptyPrioritization,
}

impl Agent {
    /// Create an agent and seed its queue with the objective decomposition
    /// task. The first iteration is what actually breaks the objective down.
    pub fn new(
        objective: impl Into<String>,
        provider: Arc<dyn Provider>,
        memory: Arc<dyn MemoryStore>,
        model: impl Into<String>,
    ) -> Self {
        let objective = objective.into();
        let mut queue = TaskQueue::new();
        queue.append(prompts::initial_task(&objective));

        Self {
            objective,
            queue,
            provider,
            memory,
            model: model.into(),
            top_k: 5,
            pacing: Duration::from_secs(3),
            on_empty_prioritization: EmptyPrioritization::default(),
        }
    }

    /// Set how many context records each recall asks for.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the pause between loop iterations.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Set the empty-prioritization policy.
    pub fn with_empty_prioritization(mut self, policy: EmptyPrioritization) -> Self {
        self.on_empty_prioritization = policy;
        self
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    /// Recall memories related to the objective.
    ///
    /// Memory failures propagate; context is not optional enough to limp on
    /// with a store that has started erroring.
    async fn recall_context(&self) -> Result<Vec<ThoughtMetadata>, Error> {
        let items = self
            .memory
            .query(MemoryQuery::new(&self.objective).with_top_k(self.top_k))
            .await?;
        if !items.is_empty() {
            debug!(count = items.len(), "Recalled context");
        }
        Ok(items.into_iter().map(|item| item.metadata).collect())
    }

    async fn complete(&self, prompt: String, temperature: f32) -> Result<String, Error> {
        let request =
            CompletionRequest::from_prompt(&self.model, prompt).with_temperature(temperature);
        let response = self.provider.complete(request).await?;
        Ok(response.text().to_string())
    }

    async fn remember(&self, task: &Task, text: &str, kind: ThoughtKind) -> Result<(), Error> {
        // one record per phase per task, so the phases never overwrite
        // each other
        let record_id = match kind {
            ThoughtKind::InternalThought => format!("thought_{}", task.id),
            _ => format!("result_{}", task.id),
        };
        self.memory
            .add(MemoryWrite::new(record_id, &task.name, text, kind))
            .await?;
        Ok(())
    }

    /// Run one full iteration on the head task.
    ///
    /// Calling this on an empty queue is a logic error and fails with
    /// [`taskforge_core::error::QueueError::Empty`]; `run` checks emptiness
    /// before every step.
    pub async fn step(&mut self) -> Result<StepReport, Error> {
        let task = self.queue.pop_next()?;
        info!(task_id = %task.id, task = %task.name, "Executing task");

        // ── Internal thought ──
        let context = self.recall_context().await?;
        let prompt = prompts::internal_thought(&self.objective, &task.name, &context);
        let internal_thought = self.complete(prompt, INTERNAL_THOUGHT_TEMPERATURE).await?;
        self.remember(&task, &internal_thought, ThoughtKind::InternalThought)
            .await?;
        debug!(thought = %internal_thought, "Internal thought");

        // ── Execution ──
        let context = self.recall_context().await?;
        let prompt =
            prompts::execute_thought(&self.objective, &task.name, &internal_thought, &context);
        let execution_result = self.complete(prompt, EXECUTE_TEMPERATURE).await?;
        self.remember(&task, &execution_result, ThoughtKind::ExecuteThought)
            .await?;
        debug!(result = %execution_result, "Execution result");

        // ── Task creation ──
        let prompt = prompts::task_creation(
            &self.objective,
            &execution_result,
            &task.name,
            &self.queue.names(),
        );
        let response = self.complete(prompt, TASK_CREATION_TEMPERATURE).await?;
        let created = parse_numbered_list(&response);
        for name in &created {
            self.queue.append(name.clone());
        }
        info!(count = created.len(), "Created follow-up tasks");
        debug!(?created, "Created task names");

        // ── Prioritization ──
        let prompt = prompts::task_prioritization(&self.objective, &self.queue.names());
        let response = self.complete(prompt, PRIORITIZATION_TEMPERATURE).await?;
        let ranked = parse_numbered_list(&response);
        if ranked.is_empty() && self.on_empty_prioritization == EmptyPrioritization::KeepQueue {
            warn!("Prioritization parsed to no tasks; keeping the queue unchanged");
        } else {
            self.queue.replace(ranked);
        }
        let prioritized = self.queue.names();
        debug!(?prioritized, "Queue after prioritization");

        Ok(StepReport {
            task,
            internal_thought,
            execution_result,
            created,
            prioritized,
        })
    }

    /// Run until the queue is empty.
    pub async fn run(&mut self) -> Result<(), Error> {
        info!(
            objective = %self.objective,
            store = self.memory.name(),
            namespace = %self.memory.namespace(),
            model = %self.model,
            "Task loop starting"
        );

        while !self.queue.is_empty() {
            info!(tasks_left = self.queue.len(), "Tasks remaining");
            let report = self.step().await?;
            info!(
                task_id = %report.task.id,
                created = report.created.len(),
                queued = report.prioritized.len(),
                "Iteration finished"
            );
            sleep(self.pacing).await;
        }

        info!("Done: task queue is empty");
        Ok(())
    }
}
