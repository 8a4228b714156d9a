//! Multi-source aggregation: fan out, merge, shuffle, truncate.
//!
//! The aggregator owns an ordered call plan. Each plan entry names a
//! [`SourceAdapter`] and how many times to call it per aggregation, so the
//! ratio between sources is a tunable value rather than a duplicated call.
//! Adapters are fail-soft; the aggregator only has to defend against defects
//! (a panicking adapter), which it isolates per call.

use futures_util::future::join_all;
use futures_util::FutureExt;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{MoodboardError, Result};
use crate::sources::{http_client, PexelsSource, PinterestSource, PlaceholderGenerator, SourceAdapter};
use crate::types::ImageRecord;

/// One entry of the call plan.
#[derive(Clone)]
pub struct SourcePlan {
    pub adapter: SourceAdapter,
    /// Calls per aggregation (0 disables the source)
    pub calls: usize,
}

impl SourcePlan {
    pub fn new(adapter: SourceAdapter, calls: usize) -> Self {
        Self { adapter, calls }
    }
}

/// Options for controlling aggregation behavior.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Maximum records returned
    pub total: usize,
    /// Issue all calls together instead of one after another
    pub concurrent: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            total: 12,
            concurrent: false,
        }
    }
}

/// Fans a keyword query out to every planned source call and merges the
/// results into one bounded, uniformly shuffled list.
pub struct Aggregator {
    plans: Vec<SourcePlan>,
    placeholders: PlaceholderGenerator,
    options: AggregateOptions,
}

impl Aggregator {
    pub fn new(
        plans: Vec<SourcePlan>,
        placeholders: PlaceholderGenerator,
        options: AggregateOptions,
    ) -> Self {
        Self {
            plans,
            placeholders,
            options,
        }
    }

    /// Build the standard plan: Pexels as primary, Pinterest as secondary.
    pub fn from_config(config: &Config) -> Self {
        let agg = &config.aggregation;
        let client = http_client();
        let placeholders = PlaceholderGenerator::from_config(&config.placeholders);
        let timeout = Duration::from_millis(agg.request_timeout_ms);

        let primary = SourceAdapter::new(
            Arc::new(PexelsSource::new(&config.sources.pexels, client.clone())),
            placeholders.clone(),
            agg.per_source_limit,
            timeout,
        );
        let secondary = SourceAdapter::new(
            Arc::new(PinterestSource::new(&config.sources.pinterest, client)),
            placeholders.clone(),
            agg.per_source_limit,
            timeout,
        );

        Self::new(
            vec![
                SourcePlan::new(primary, agg.primary_calls),
                SourcePlan::new(secondary, agg.secondary_multiplier),
            ],
            placeholders,
            AggregateOptions {
                total: agg.total,
                concurrent: agg.concurrent,
            },
        )
    }

    /// Aggregate with an entropy-seeded shuffle.
    pub async fn aggregate(&self, keywords: &str) -> Result<Vec<ImageRecord>> {
        let mut rng = StdRng::from_entropy();
        self.aggregate_with_rng(keywords, &mut rng).await
    }

    /// Aggregate using the given random source for the shuffle.
    ///
    /// Fails only for an empty keyword string. Source failures never surface:
    /// the result is always non-empty as long as the placeholder catalog is.
    pub async fn aggregate_with_rng<R: Rng + ?Sized>(
        &self,
        keywords: &str,
        rng: &mut R,
    ) -> Result<Vec<ImageRecord>> {
        let keywords = keywords.trim();
        if keywords.is_empty() {
            return Err(MoodboardError::InvalidRequest(
                "keywords must not be empty".to_string(),
            ));
        }

        tracing::info!("Fetching images for \"{keywords}\"");
        let batches = self.collect(keywords).await;

        if batches.iter().all(Option::is_none) {
            tracing::error!("Every source call failed unexpectedly, using placeholders");
            return Ok(self.placeholders.placeholders_default(keywords));
        }

        let merged = merge_unique(batches.into_iter().flatten());
        if merged.is_empty() {
            tracing::warn!("Sources produced no images, using placeholders");
            return Ok(self.placeholders.placeholders_default(keywords));
        }

        let images = shuffle_truncate(merged, self.options.total, rng);
        tracing::info!("Aggregated {} image(s)", images.len());
        Ok(images)
    }

    /// Adapters in call order, each repeated per its plan.
    fn calls(&self) -> impl Iterator<Item = &SourceAdapter> {
        self.plans
            .iter()
            .flat_map(|plan| std::iter::repeat(&plan.adapter).take(plan.calls))
    }

    /// Run every planned call. `None` marks a call that panicked.
    async fn collect(&self, keywords: &str) -> Vec<Option<Vec<ImageRecord>>> {
        if self.options.concurrent {
            join_all(self.calls().map(|adapter| guarded_fetch(adapter, keywords))).await
        } else {
            let mut batches = Vec::new();
            for adapter in self.calls() {
                batches.push(guarded_fetch(adapter, keywords).await);
            }
            batches
        }
    }
}

async fn guarded_fetch(adapter: &SourceAdapter, keywords: &str) -> Option<Vec<ImageRecord>> {
    match AssertUnwindSafe(adapter.fetch(keywords)).catch_unwind().await {
        Ok(records) => Some(records),
        Err(panic) => {
            tracing::error!("{} call panicked: {}", adapter.name(), panic_message(&*panic));
            None
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Concatenate batches in order, dropping records whose id was already seen.
fn merge_unique(batches: impl Iterator<Item = Vec<ImageRecord>>) -> Vec<ImageRecord> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for record in batches.flatten() {
        if seen.insert(record.id.clone()) {
            merged.push(record);
        } else {
            tracing::debug!("Dropping duplicate image id {}", record.id);
        }
    }
    merged
}

/// Uniformly permute `records` (Fisher-Yates) and keep the first `total`.
pub fn shuffle_truncate<R: Rng + ?Sized>(
    mut records: Vec<ImageRecord>,
    total: usize,
    rng: &mut R,
) -> Vec<ImageRecord> {
    records.shuffle(rng);
    records.truncate(total);
    records
}
