//! Azure OpenAI provider.
//!
//! Same Chat Completions format as OpenAI; the deployment is addressed by
//! URL and the key travels in an `api-key` header.

use super::openai::{send_chat, ChatBody, DEFAULT_TIMEOUT};
use super::provider::{ChatRequest, LlmProvider, LlmResponse};
use crate::error::AnalysisError;
use async_trait::async_trait;
use std::time::Duration;

pub struct AzureOpenAiProvider {
    api_key: String,
    deployment: String,
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl AzureOpenAiProvider {
    pub fn new(resource: &str, api_key: &str, deployment: &str, api_version: &str) -> Self {
        let base = format!("https://{resource}.openai.azure.com");
        Self::with_base_url(&base, api_key, deployment, api_version)
    }

    /// Create against an explicit host, e.g. a proxy in front of Azure.
    pub fn with_base_url(base: &str, api_key: &str, deployment: &str, api_version: &str) -> Self {
        let url = format!(
            "{}/openai/deployments/{deployment}/chat/completions?api-version={api_version}",
            base.trim_end_matches('/')
        );
        Self {
            api_key: api_key.to_string(),
            deployment: deployment.to_string(),
            url,
            client: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl LlmProvider for AzureOpenAiProvider {
    fn name(&self) -> &str {
        "azure"
    }

    async fn generate(&self, request: &ChatRequest) -> Result<LlmResponse, AnalysisError> {
        let body = ChatBody::from_request(request, None);
        let builder = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key);
        send_chat(builder, &body, "Azure OpenAI", &self.deployment).await
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
