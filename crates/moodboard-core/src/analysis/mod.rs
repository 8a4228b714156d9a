//! Design analysis of a generated board.
//!
//! The [`Analyst`] sends a text-only prompt describing the board to a chat
//! provider (Azure OpenAI or OpenAI). Analysis never blocks the user: with
//! no provider it returns a canned mock, and a failed call returns a canned
//! fallback carrying the failure reason.

pub(crate) mod azure;
pub(crate) mod openai;
pub mod prompt;
pub(crate) mod provider;
pub(crate) mod templates;

pub use azure::AzureOpenAiProvider;
pub use openai::OpenAiProvider;
pub use provider::{ChatRequest, LlmProvider, LlmProviderFactory, LlmResponse};

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{AnalysisConfig, Config};
use crate::error::AnalysisError;
use crate::types::ImageRecord;

/// How an analysis text was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalysisOrigin {
    /// Answered by the model
    Generated { model: String },
    /// No provider configured
    Mock,
    /// Provider failed; canned text
    Fallback { reason: String },
}

/// A design critique attached to a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignAnalysis {
    pub keywords: String,
    /// Markdown-flavoured text
    pub text: String,
    pub origin: AnalysisOrigin,
}

impl DesignAnalysis {
    pub fn is_generated(&self) -> bool {
        matches!(self.origin, AnalysisOrigin::Generated { .. })
    }
}

/// Produces a [`DesignAnalysis`] for a set of images.
pub struct Analyst {
    provider: Option<Arc<dyn LlmProvider>>,
    options: AnalysisConfig,
}

impl Analyst {
    pub fn new(provider: Option<Box<dyn LlmProvider>>, options: AnalysisConfig) -> Self {
        Self {
            provider: provider.map(Arc::from),
            options,
        }
    }

    /// Build from config. Missing credentials select mock mode.
    pub fn from_config(config: &Config) -> Result<Self, AnalysisError> {
        let timeout = Duration::from_millis(config.analysis.timeout_ms);
        let provider = LlmProviderFactory::from_config(&config.llm, timeout)?;
        Ok(Self::new(provider, config.analysis.clone()))
    }

    /// Analyst that always returns the mock analysis.
    pub fn mock() -> Self {
        Self::new(None, AnalysisConfig::default())
    }

    /// Name of the live provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Analyze `images` gathered for `keywords`.
    ///
    /// Errors only for an empty image list. Provider failures and timeouts
    /// become a fallback analysis.
    pub async fn analyze(
        &self,
        images: &[ImageRecord],
        keywords: &str,
    ) -> Result<DesignAnalysis, AnalysisError> {
        if images.is_empty() {
            return Err(AnalysisError::NoImages);
        }
        let keywords = keywords.trim();

        let Some(provider) = &self.provider else {
            tracing::info!("No LLM provider configured, returning mock analysis");
            return Ok(DesignAnalysis {
                keywords: keywords.to_string(),
                text: templates::mock_analysis(keywords),
                origin: AnalysisOrigin::Mock,
            });
        };

        let request = prompt::design_request(keywords, images, &self.options);
        tracing::debug!(
            "Requesting analysis from {} for {} image(s)",
            provider.name(),
            images.len()
        );

        let timeout = provider.timeout();
        let result = match tokio::time::timeout(timeout, provider.generate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(AnalysisError::Timeout {
                timeout_ms: timeout.as_millis() as u64,
            }),
        };

        match result {
            Ok(response) => {
                tracing::info!(
                    "Analysis generated by {} in {}ms",
                    response.model,
                    response.latency_ms
                );
                Ok(DesignAnalysis {
                    keywords: keywords.to_string(),
                    text: response.text.trim().to_string(),
                    origin: AnalysisOrigin::Generated {
                        model: response.model,
                    },
                })
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!("Analysis failed: {reason}");
                Ok(DesignAnalysis {
                    keywords: keywords.to_string(),
                    text: templates::fallback_analysis(keywords, &reason),
                    origin: AnalysisOrigin::Fallback { reason },
                })
            }
        }
    }
}
