//! Chat completions and embeddings over the OpenAI wire protocol.
//!
//! Anything that speaks `/chat/completions` and `/embeddings` works here,
//! including proxies and self-hosted servers that mimic the hosted API.
//! Requests authenticate with a bearer token; when an organization id is
//! configured it rides along in the `OpenAI-Organization` header.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use taskforge_core::error::ProviderError;
use taskforge_core::message::{CompletionRequest, CompletionResponse, Message, Role, Usage};
use taskforge_core::provider::{EmbeddingRequest, EmbeddingResponse, Provider};

const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// Chat and embedding provider for OpenAI-compatible endpoints.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    organization: Option<String>,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Point the provider at an arbitrary OpenAI-compatible base URL.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            organization: None,
            client,
        }
    }

    /// The hosted OpenAI API.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new("openai", "https://api.openai.com/v1", api_key)
    }

    /// Attach an organization id, sent as the `OpenAI-Organization` header.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    fn authorized_post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        if let Some(org) = &self.organization {
            builder = builder.header("OpenAI-Organization", org);
        }
        builder
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError> {
        let body = ChatRequest {
            model: &request.model,
            messages: wire_messages(&request.messages),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(provider = %self.name, model = %request.model, "Requesting chat completion");

        let response = self
            .authorized_post("/chat/completions")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = screen_status(response).await?;

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| decode_error("completion reply", e))?;

        let choice = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 200,
                message: "Reply contained no choices".into(),
            })?;

        Ok(CompletionResponse {
            message: Message::assistant(choice.message.content.unwrap_or_default()),
            model: reply.model,
            usage: reply.usage.map(TokenCounts::into_usage),
        })
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> std::result::Result<EmbeddingResponse, ProviderError> {
        let body = EmbeddingsRequest {
            model: &request.model,
            input: &request.inputs,
            encoding_format: "float",
        };

        debug!(
            provider = %self.name,
            model = %request.model,
            count = request.inputs.len(),
            "Requesting embeddings"
        );

        let response = self
            .authorized_post("/embeddings")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = screen_status(response).await?;

        let reply: EmbeddingsReply = response
            .json()
            .await
            .map_err(|e| decode_error("embedding reply", e))?;

        Ok(EmbeddingResponse {
            embeddings: reply.data.into_iter().map(|row| row.embedding).collect(),
            model: reply.model,
            usage: reply.usage.map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: 0,
                total_tokens: u.total_tokens,
            }),
        })
    }
}

fn wire_messages(messages: &[Message]) -> Vec<WireMessage<'_>> {
    messages
        .iter()
        .map(|m| WireMessage {
            role: match m.role {
                Role::System => "system",
                Role::User => "user",
                Role::Assistant => "assistant",
            },
            content: &m.content,
        })
        .collect()
}

/// Split the reply by status before touching the body. 200 passes through
/// untouched so the caller can decode it.
async fn screen_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();
    match status {
        200 => Ok(response),
        429 => Err(ProviderError::RateLimited {
            retry_after_secs: 10,
        }),
        401 | 403 => Err(ProviderError::AuthenticationFailed(
            "API key rejected or lacks access".into(),
        )),
        _ => {
            let detail = response.text().await.unwrap_or_default();
            warn!(status, body = %detail, "Provider returned an error response");
            Err(ProviderError::ApiError {
                status_code: status,
                message: detail,
            })
        }
    }
}

fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

fn decode_error(what: &str, e: reqwest::Error) -> ProviderError {
    ProviderError::ApiError {
        status_code: 200,
        message: format!("Failed to parse {what}: {e}"),
    }
}

// --- wire types ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<TokenCounts>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenCounts {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl TokenCounts {
    fn into_usage(self) -> Usage {
        Usage {
            prompt_tokens: self.prompt_tokens,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'static str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsReply {
    data: Vec<EmbeddingRow>,
    model: String,
    usage: Option<EmbeddingTokenCounts>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingRow {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingTokenCounts {
    prompt_tokens: u32,
    total_tokens: u32,
}
