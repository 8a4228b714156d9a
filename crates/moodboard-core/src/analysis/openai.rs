//! OpenAI LLM provider using the Chat Completions API.
//!
//! The wire types here are shared with the Azure provider, which speaks the
//! same format under a different URL and auth header.

use super::provider::{status_error, ChatRequest, LlmProvider, LlmResponse};
use crate::error::AnalysisError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub(super) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// OpenAI provider using Chat Completions API.
pub struct OpenAiProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_endpoint(api_key, model, DEFAULT_ENDPOINT)
    }

    /// Create with a custom endpoint (OpenAI-compatible gateways).
    pub fn with_endpoint(api_key: &str, model: &str, endpoint: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// --- Request types ---

#[derive(Serialize)]
pub(super) struct ChatBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Serialize)]
pub(super) struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatBody {
    pub(super) fn from_request(request: &ChatRequest, model: Option<String>) -> Self {
        Self {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    model: Option<String>,
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

/// Send a prepared chat request and decode the first choice.
///
/// `label` names the provider in error messages; `fallback_model` is
/// reported when the response omits a model field.
pub(super) async fn send_chat(
    request: reqwest::RequestBuilder,
    body: &ChatBody,
    label: &str,
    fallback_model: &str,
) -> Result<LlmResponse, AnalysisError> {
    let start = Instant::now();

    let resp = request
        .header("Content-Type", "application/json")
        .json(body)
        .send()
        .await
        .map_err(|e| AnalysisError::Llm {
            message: format!("{label} request failed: {e}"),
            status_code: None,
        })?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(status_error(label, status.as_u16(), &text));
    }

    let chat_resp: ChatResponse = resp.json().await.map_err(|e| AnalysisError::Llm {
        message: format!("Failed to parse {label} response: {e}"),
        status_code: None,
    })?;

    let text = chat_resp
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .ok_or_else(|| AnalysisError::Llm {
            message: format!("{label} returned no choices"),
            status_code: None,
        })?;

    Ok(LlmResponse {
        text: text.trim().to_string(),
        model: chat_resp
            .model
            .unwrap_or_else(|| fallback_model.to_string()),
        tokens_used: chat_resp.usage.map(|u| u.total_tokens),
        latency_ms: start.elapsed().as_millis() as u64,
    })
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &ChatRequest) -> Result<LlmResponse, AnalysisError> {
        let body = ChatBody::from_request(request, Some(self.model.clone()));
        let builder = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key));
        send_chat(builder, &body, "OpenAI", &self.model).await
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
