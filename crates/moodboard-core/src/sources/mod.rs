//! Image search sources and the fail-soft adapter around them.
//!
//! Providers implement [`ImageSource`] and are free to fail. The
//! [`SourceAdapter`] is what the aggregator talks to: it bounds each call,
//! applies a timeout, and answers every ordinary failure with placeholder
//! records so callers never branch on "real or placeholder".

mod pexels;
mod pinterest;
mod placeholder;

pub use pexels::PexelsSource;
pub use pinterest::PinterestSource;
pub use placeholder::PlaceholderGenerator;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{SourceError, SourceResult};
use crate::types::ImageRecord;

/// Trait that all image search providers implement.
///
/// Uses `async_trait` because we need `Arc<dyn ImageSource>` for dynamic
/// dispatch.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Source tag stamped on records (e.g. "Pexels").
    fn name(&self) -> &str;

    /// Whether credentials are present. Checked before any network call.
    fn is_configured(&self) -> bool;

    /// Search for up to `limit` images.
    async fn search(&self, keywords: &str, limit: usize) -> SourceResult<Vec<ImageRecord>>;
}

/// Result of one adapter call: real records, or placeholders plus the reason.
#[derive(Debug, Clone)]
pub enum SourceOutcome {
    Fetched(Vec<ImageRecord>),
    Recovered {
        records: Vec<ImageRecord>,
        error: SourceError,
    },
}

impl SourceOutcome {
    pub fn records(&self) -> &[ImageRecord] {
        match self {
            SourceOutcome::Fetched(records) => records,
            SourceOutcome::Recovered { records, .. } => records,
        }
    }

    pub fn into_records(self) -> Vec<ImageRecord> {
        match self {
            SourceOutcome::Fetched(records) => records,
            SourceOutcome::Recovered { records, .. } => records,
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, SourceOutcome::Recovered { .. })
    }
}

/// Wraps one provider behind a bounded, timed, failure-absorbing interface.
#[derive(Clone)]
pub struct SourceAdapter {
    source: Arc<dyn ImageSource>,
    placeholders: PlaceholderGenerator,
    limit: usize,
    timeout: Duration,
}

impl SourceAdapter {
    pub fn new(
        source: Arc<dyn ImageSource>,
        placeholders: PlaceholderGenerator,
        limit: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            placeholders,
            limit,
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Fetch images for `keywords`. Never fails; see [`fetch_outcome`](Self::fetch_outcome).
    pub async fn fetch(&self, keywords: &str) -> Vec<ImageRecord> {
        self.fetch_outcome(keywords).await.into_records()
    }

    /// Fetch images and report whether placeholders were substituted.
    pub async fn fetch_outcome(&self, keywords: &str) -> SourceOutcome {
        match self.try_fetch(keywords).await {
            Ok(records) => {
                tracing::debug!("{}: {} image(s)", self.name(), records.len());
                SourceOutcome::Fetched(records)
            }
            Err(error) => {
                match &error {
                    SourceError::NotConfigured { .. } => {
                        tracing::info!("{error}, using placeholders")
                    }
                    _ => tracing::warn!("{error}, using placeholders"),
                }
                SourceOutcome::Recovered {
                    records: self.placeholders.placeholders(keywords, self.name(), self.limit),
                    error,
                }
            }
        }
    }

    async fn try_fetch(&self, keywords: &str) -> SourceResult<Vec<ImageRecord>> {
        if !self.source.is_configured() {
            return Err(SourceError::NotConfigured {
                provider: self.name().to_string(),
            });
        }

        let mut records =
            match tokio::time::timeout(self.timeout, self.source.search(keywords, self.limit)).await
            {
                Ok(result) => result?,
                Err(_) => {
                    return Err(SourceError::Timeout {
                        provider: self.name().to_string(),
                        timeout_ms: self.timeout.as_millis() as u64,
                    })
                }
            };

        if records.is_empty() {
            return Err(SourceError::Empty {
                provider: self.name().to_string(),
            });
        }
        records.truncate(self.limit);
        Ok(records)
    }
}

/// Shared HTTP client for sources.
///
/// Built once per aggregator so connections are pooled across calls.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("moodboard/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}
