//! Chat message and completion request/response types.
//!
//! These are the value objects that flow between the agent loop and the
//! model provider: the loop renders a prompt, wraps it in messages, and
//! reads the generated text back out of the response.

use serde::{Deserialize, Serialize};

/// The role of a message in a model conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standing instructions for the model
    System,
    /// The human (or, here, the loop speaking for them)
    User,
    /// Text the model generated
    Assistant,
}

/// A single message in a model conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking
    pub role: Role,

    /// The message text
    pub content: String,
}

impl Message {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Everything needed to ask a model for text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g., "gpt-3.5-turbo-16k")
    pub model: String,

    /// The conversation so far
    pub messages: Vec<Message>,

    /// Sampling temperature; lower is more deterministic
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Cap on generated tokens, when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: default_temperature(),
            max_tokens: None,
        }
    }

    /// A request carrying one user message with the whole rendered prompt.
    pub fn from_prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(model, vec![Message::user(prompt)])
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The message the model produced
    pub message: Message,

    /// The model that actually answered; can differ from the one requested
    pub model: String,

    /// Usage totals, when the backend reports them
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// The generated text with surrounding whitespace removed.
    pub fn text(&self) -> &str {
        self.message.content.trim()
    }
}

/// Token counts reported by a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_role_and_text() {
        let msg = Message::user("Plan the evening");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Plan the evening");
    }

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::system("You are an agent.")).unwrap();
        assert!(json.contains("\"system\""));
        let json = serde_json::to_string(&Message::assistant("Done.")).unwrap();
        assert!(json.contains("\"assistant\""));
    }

    #[test]
    fn from_prompt_builds_a_single_user_message() {
        let req = CompletionRequest::from_prompt("gpt-3.5-turbo-16k", "Do the thing")
            .with_temperature(0.8);
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert!((req.temperature - 0.8).abs() < f32::EPSILON);
        assert!(req.max_tokens.is_none());
    }

    #[test]
    fn response_text_trims_whitespace() {
        let resp = CompletionResponse {
            message: Message::assistant("  1. First task\n"),
            model: "gpt-3.5-turbo-16k".into(),
            usage: None,
        };
        assert_eq!(resp.text(), "1. First task");
    }

    #[test]
    fn request_serialization_skips_absent_max_tokens() {
        let req = CompletionRequest::from_prompt("m", "p");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("max_tokens"));
        let json = serde_json::to_string(&req.with_max_tokens(256)).unwrap();
        assert!(json.contains("\"max_tokens\":256"));
    }
}
