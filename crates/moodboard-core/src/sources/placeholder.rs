//! Deterministic placeholder records from a fixed catalog.

use std::sync::Arc;

use crate::config::PlaceholderConfig;
use crate::types::{call_stamp, ImageRecord, PHOTOGRAPHER_DEMO, SOURCE_PLACEHOLDER};

/// Produces synthetic image records when a source cannot deliver real ones.
///
/// URLs cycle through the catalog in order, so two calls with the same
/// arguments yield the same URLs in the same order. Ids are minted fresh per
/// call.
#[derive(Debug, Clone)]
pub struct PlaceholderGenerator {
    catalog: Arc<[String]>,
    max_per_call: usize,
}

impl PlaceholderGenerator {
    /// Create a generator. An empty catalog makes every call return nothing;
    /// config validation rejects that before we get here.
    pub fn new(catalog: Vec<String>, max_per_call: usize) -> Self {
        Self {
            catalog: catalog.into(),
            max_per_call,
        }
    }

    pub fn from_config(config: &PlaceholderConfig) -> Self {
        Self::new(config.catalog.clone(), config.max_per_call)
    }

    /// Generate up to `count` records tagged with `source`.
    ///
    /// The result holds `min(count, max_per_call)` records. When that exceeds
    /// the catalog size the URLs wrap around and repeat, each with its own id.
    pub fn placeholders(&self, keywords: &str, source: &str, count: usize) -> Vec<ImageRecord> {
        if self.catalog.is_empty() {
            return Vec::new();
        }

        let count = count.min(self.max_per_call);
        let stamp = call_stamp();
        let prefix = source.to_lowercase();

        (0..count)
            .map(|i| {
                let url = &self.catalog[i % self.catalog.len()];
                ImageRecord::new(format!("placeholder-{prefix}-{stamp}-{i}"), url.clone(), source)
                    .with_photographer(PHOTOGRAPHER_DEMO)
                    .with_title(format!("{} inspiration {}", keywords.trim(), i + 1))
            })
            .collect()
    }

    /// Generate a full batch under the generic "Placeholder" tag.
    pub fn placeholders_default(&self, keywords: &str) -> Vec<ImageRecord> {
        self.placeholders(keywords, SOURCE_PLACEHOLDER, self.max_per_call)
    }
}

impl Default for PlaceholderGenerator {
    fn default() -> Self {
        Self::from_config(&PlaceholderConfig::default())
    }
}
