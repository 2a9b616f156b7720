//! Thought classification for memory records.

use serde::{Deserialize, Serialize};

/// What kind of thought a memory record holds.
///
/// Serialized as the bare tag string. Tags this agent does not produce
/// itself round-trip through `Other` instead of failing deserialization,
/// so records written by other agents stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThoughtKind {
    /// Private reasoning about how to approach a task
    InternalThought,
    /// The result of carrying a task out
    ExecuteThought,
    /// Any tag minted elsewhere
    Other(String),
}

impl ThoughtKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::InternalThought => "INTERNAL_THOUGHT",
            Self::ExecuteThought => "EXECUTE_THOUGHT",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for ThoughtKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "INTERNAL_THOUGHT" => Self::InternalThought,
            "EXECUTE_THOUGHT" => Self::ExecuteThought,
            _ => Self::Other(tag),
        }
    }
}

impl From<ThoughtKind> for String {
    fn from(kind: ThoughtKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for ThoughtKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata attached to every memory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThoughtMetadata {
    /// Name of the task that produced this record
    pub task: String,

    /// The generated text
    pub result: String,

    /// Classification tag
    #[serde(rename = "thought_type")]
    pub kind: ThoughtKind,

    /// Open extension map for keys this agent does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ThoughtMetadata {
    pub fn new(
        task: impl Into<String>,
        result: impl Into<String>,
        kind: ThoughtKind,
    ) -> Self {
        Self {
            task: task.into(),
            result: result.into(),
            kind,
            extra: serde_json::Map::new(),
        }
    }
}
