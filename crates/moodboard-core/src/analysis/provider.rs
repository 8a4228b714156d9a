//! LLM provider trait and request/response types.
//!
//! Defines the interface that all chat providers implement, plus the
//! factory that creates the right provider from config.

use crate::config::{resolve_credential, LlmConfig};
use crate::error::AnalysisError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// A chat-completion request: one system message and one user message.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// System (persona) prompt
    pub system: String,
    /// User prompt
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

/// The response from a chat-completion call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text
    pub text: String,
    /// Model (or deployment) identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "azure", "openai").
    fn name(&self) -> &str;

    /// Run one chat completion.
    async fn generate(&self, request: &ChatRequest) -> Result<LlmResponse, AnalysisError>;

    /// How long a caller should wait for [`generate`](Self::generate).
    fn timeout(&self) -> Duration;
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Map a non-2xx chat-completion response to a user-facing error.
pub(crate) fn status_error(label: &str, status: u16, body: &str) -> AnalysisError {
    let message = match status {
        401 => format!(
            "Authentication failed. Please check your {label} API key and resource configuration."
        ),
        429 => "Rate limit exceeded. Please wait a moment and try again.".to_string(),
        404 => format!(
            "{label} resource or deployment not found. Please check your resource name and deployment name."
        ),
        _ => {
            let detail = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            format!("{label} API error: {status} - {detail}")
        }
    };
    AnalysisError::Llm {
        message,
        status_code: Some(status),
    }
}

fn missing(what: &str) -> AnalysisError {
    AnalysisError::NotConfigured(format!("{what} not set"))
}

/// Factory that creates the appropriate provider from config.
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create a provider by name ("azure" or "openai").
    ///
    /// Fails with [`AnalysisError::NotConfigured`] when a credential is
    /// missing or still a template value.
    pub fn create(
        provider: &str,
        config: &LlmConfig,
        timeout: Duration,
    ) -> Result<Box<dyn LlmProvider>, AnalysisError> {
        match provider {
            "azure" => {
                let cfg = config.azure.clone().unwrap_or_default();
                let api_key = resolve_credential(&cfg.api_key)
                    .ok_or_else(|| missing("Azure OpenAI API key (AZURE_OPENAI_API_KEY)"))?;
                let resource = resolve_credential(&cfg.resource)
                    .ok_or_else(|| missing("Azure OpenAI resource name (AZURE_OPENAI_RESOURCE_NAME)"))?;
                let deployment = resolve_credential(&cfg.deployment).ok_or_else(|| {
                    missing("Azure OpenAI deployment name (AZURE_OPENAI_DEPLOYMENT_NAME)")
                })?;
                Ok(Box::new(super::azure::AzureOpenAiProvider::new(
                    &resource,
                    &api_key,
                    &deployment,
                    &cfg.api_version,
                )
                .with_timeout(timeout)))
            }
            "openai" => {
                let cfg = config.openai.clone().unwrap_or_default();
                let api_key = resolve_credential(&cfg.api_key)
                    .ok_or_else(|| missing("OpenAI API key (OPENAI_API_KEY)"))?;
                Ok(Box::new(super::openai::OpenAiProvider::with_endpoint(
                    &api_key,
                    &cfg.model,
                    &cfg.endpoint,
                )
                .with_timeout(timeout)))
            }
            other => Err(AnalysisError::Llm {
                message: format!("Unknown LLM provider: {other}"),
                status_code: None,
            }),
        }
    }

    /// Create the configured provider, or `None` when analysis should run
    /// in mock mode (no provider selected, or credentials missing).
    pub fn from_config(
        config: &LlmConfig,
        timeout: Duration,
    ) -> Result<Option<Box<dyn LlmProvider>>, AnalysisError> {
        let Some(name) = config.provider.as_deref() else {
            return Ok(None);
        };
        match Self::create(name, config, timeout) {
            Ok(provider) => Ok(Some(provider)),
            Err(AnalysisError::NotConfigured(reason)) => {
                tracing::info!("LLM provider '{name}' unavailable ({reason}), using mock analysis");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
