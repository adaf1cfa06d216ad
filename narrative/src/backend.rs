//! Chat-completions backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::NarrativeConfig;
use crate::error::{NarrativeError, Result};

/// One message of a chat conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// A system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A single completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// Something that can answer a chat request with text.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `request` authenticated with `api_key` and return the reply text.
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String>;
}

/// Backend for any OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpChatBackend {
    /// API base URL.
    base_url: String,

    /// HTTP client with the configured timeout.
    client: reqwest::Client,
}

impl HttpChatBackend {
    /// Create a backend from the service configuration.
    pub fn new(config: &NarrativeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn complete(&self, api_key: &str, request: &ChatRequest) -> Result<String> {
        debug!("Requesting chat completion with model: {}", request.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(NarrativeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let result: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| NarrativeError::InvalidResponse(e.to_string()))?;

        if let Some(usage) = &result.usage {
            debug!("Chat completion used {} tokens", usage.total_tokens);
        }

        let choice = result
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| NarrativeError::InvalidResponse("no choices in response".to_string()))?;

        choice.message.content.ok_or(NarrativeError::EmptyContent)
    }
}

/// Chat completions response format.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    total_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}
