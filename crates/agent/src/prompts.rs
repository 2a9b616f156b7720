//! Prompt templates for the task loop.
//!
//! Each phase of the loop renders one prompt string that is sent as a
//! single user message. Builders take plain string slices so they stay
//! trivially testable; none of them talk to a provider.

use taskforge_core::thought::{ThoughtKind, ThoughtMetadata};

/// Format instruction shared by the list-producing prompts.
const LIST_FORMAT: &str = "Return one task per line in your response. \
The result must be a numbered list in the format:\n\
#. First task\n\
#. Second task\n\
The number of each entry must be followed by a period. \
If your list is empty, write \"There are no tasks to add at this time.\"\n\
Unless your list is empty, do not include any headers before your numbered \
list or follow your numbered list with any other output.";

/// Render one recalled memory as a sentence the model can read.
pub fn stringify_context(metadata: &ThoughtMetadata) -> String {
    match metadata.kind {
        ThoughtKind::InternalThought => format!(
            "Based on the task \"{}\", you had the private thought \"{}\"",
            metadata.task, metadata.result
        ),
        ThoughtKind::ExecuteThought => format!(
            "Based on the task \"{}\", you executed the response \"{}\"",
            metadata.task, metadata.result
        ),
        ThoughtKind::Other(_) => format!(
            "Based on the task \"{}\", you had the thought \"{}\"",
            metadata.task, metadata.result
        ),
    }
}

fn push_context_block(prompt: &mut String, context: &[ThoughtMetadata]) {
    if context.is_empty() {
        return;
    }
    prompt.push_str(
        "For some context, here are your memories related to the query.\n\
         MEMORIES sorted in relevance:\n",
    );
    for item in context {
        prompt.push_str(&stringify_context(item));
        prompt.push('\n');
    }
}

/// The seed task: ask the model to decompose the objective into a task list.
pub fn initial_task(objective: &str) -> String {
    format!(
        "You are an autonomous agent.\n\
         Your goal is to accomplish the following objective: {objective}\n\
         Your first task is to develop a task list for the given objective.\n\
         {LIST_FORMAT}"
    )
}

/// Private planning prompt. The response stays in memory, never in the queue.
pub fn internal_thought(objective: &str, task: &str, context: &[ThoughtMetadata]) -> String {
    let mut prompt = format!(
        "You have been given the following objective: {objective}.\n\
         Related to that objective, you have been given the following task: {task}.\n\
         You must think about it and plan what action to take.\n"
    );
    push_context_block(&mut prompt, context);
    prompt.push_str(&format!(
        "Think of some actions you would take after hearing about the task \
         \"{task}\" based on your past thoughts and actions.\n\
         This is not shown to the outside world, but only to yourself. \
         It is just your internal thought."
    ));
    prompt
}

/// Execution prompt: act on the task, informed by the private thought.
pub fn execute_thought(
    objective: &str,
    task: &str,
    internal_thought: &str,
    context: &[ThoughtMetadata],
) -> String {
    let mut prompt = format!(
        "Perform one task based on the following objective: {objective}\n\
         Your current task is: {task}\n\
         Based on the task, you have thought about the input and had the \
         following thought: {internal_thought}\n"
    );
    push_context_block(&mut prompt, context);
    prompt.push_str("Return your response to the task.");
    prompt
}

/// Ask for follow-up tasks given the last execution result.
pub fn task_creation(
    objective: &str,
    previous_result: &str,
    previous_task: &str,
    task_list: &[String],
) -> String {
    let mut prompt = format!(
        "You are to use the result from an execution agent to create new tasks \
         with the following objective: {objective}.\n\
         The last completed task has the result:\n\
         {previous_result}\n\
         The last completed task was: {previous_task}.\n"
    );
    if !task_list.is_empty() {
        prompt.push_str(&format!(
            "For some context, here are your current incomplete tasks:\n{}\n",
            task_list.join("\n")
        ));
    }
    prompt.push_str(LIST_FORMAT);
    prompt
}

/// Ask for the full queue back in priority order.
pub fn task_prioritization(objective: &str, task_list: &[String]) -> String {
    format!(
        "You are tasked with prioritizing the following tasks:\n\
         {}\n\
         Consider the ultimate objective of your team: {objective}.\n\
         Tasks should be sorted from highest to lowest priority, where \
         higher-priority tasks are those that act as pre-requisites or are \
         more essential for meeting the objective.\n\
         Do not remove any tasks. Return the ranked tasks as a numbered list \
         in the format:\n\
         #. First task\n\
         #. Second task\n\
         The entries must be consecutively numbered, starting with 1. \
         The number of each entry must be followed by a period.\n\
         Do not include any headers before your ranked list or follow your \
         list with any other output.",
        task_list.join("\n")
    )
}
