//! Core data types exchanged between sources, the aggregator and presentation.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::analysis::DesignAnalysis;

/// Source tag for Pexels results.
pub const SOURCE_PEXELS: &str = "Pexels";

/// Source tag for Pinterest results (via Google Custom Search).
pub const SOURCE_PINTEREST: &str = "Pinterest";

/// Default source tag for placeholder records.
pub const SOURCE_PLACEHOLDER: &str = "Placeholder";

/// Attribution value used when a provider does not report a photographer.
pub const PHOTOGRAPHER_UNKNOWN: &str = "Unknown";

/// Attribution value carried by every placeholder record.
pub const PHOTOGRAPHER_DEMO: &str = "Demo Image";

/// One normalized image result, regardless of where it came from.
///
/// Records are built once by a source or the placeholder generator and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Unique within a single aggregation result
    pub id: String,

    /// Full-resolution asset location
    pub url: String,

    /// Lower-resolution asset location (falls back to `url`)
    pub thumbnail: String,

    /// Provenance tag ("Pexels", "Pinterest", "Placeholder", ...)
    pub source: String,

    /// Human-readable caption, may be empty
    #[serde(default)]
    pub title: String,

    /// Attribution; "Unknown" and "Demo Image" mean "do not display"
    #[serde(default = "unknown_photographer")]
    pub photographer: String,

    /// Pixel width, when the source reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Pixel height, when the source reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

fn unknown_photographer() -> String {
    PHOTOGRAPHER_UNKNOWN.to_string()
}

impl ImageRecord {
    /// Start a record with the required fields. The thumbnail defaults to `url`.
    pub fn new(id: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: id.into(),
            thumbnail: url.clone(),
            url,
            source: source.into(),
            title: String::new(),
            photographer: unknown_photographer(),
            width: None,
            height: None,
        }
    }

    /// Set the thumbnail; `None` or an empty string keeps the `url` fallback.
    pub fn with_thumbnail(mut self, thumbnail: Option<impl Into<String>>) -> Self {
        if let Some(thumbnail) = thumbnail.map(Into::into).filter(|t| !t.is_empty()) {
            self.thumbnail = thumbnail;
        }
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_photographer(mut self, photographer: impl Into<String>) -> Self {
        self.photographer = photographer.into();
        self
    }

    /// Attach dimensions. Zero values are treated as "not reported".
    pub fn with_dimensions(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width.filter(|w| *w > 0);
        self.height = height.filter(|h| *h > 0);
        self
    }

    /// Whether the photographer credit should be shown to users.
    pub fn shows_attribution(&self) -> bool {
        !self.photographer.is_empty()
            && self.photographer != PHOTOGRAPHER_UNKNOWN
            && self.photographer != PHOTOGRAPHER_DEMO
    }

    /// Whether this record came from the placeholder catalog.
    pub fn is_placeholder(&self) -> bool {
        self.photographer == PHOTOGRAPHER_DEMO
    }
}

/// A generated moodboard: the unit handed to presentation and export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// The keyword string the board was generated for
    pub keywords: String,

    /// Aggregated, shuffled and truncated images
    pub images: Vec<ImageRecord>,

    /// Design critique, if one was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<DesignAnalysis>,

    /// Unix timestamp (milliseconds) of generation
    pub generated_at: u64,
}

impl Board {
    pub fn new(keywords: impl Into<String>, images: Vec<ImageRecord>) -> Self {
        Self {
            keywords: keywords.into(),
            images,
            analysis: None,
            generated_at: unix_millis(),
        }
    }

    /// Look up an image by id.
    pub fn find(&self, id: &str) -> Option<&ImageRecord> {
        self.images.iter().find(|image| image.id == id)
    }
}

/// Milliseconds since the Unix epoch (0 if the clock is before it).
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

static CALL_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A per-call identifier fragment: `<unix millis>-<sequence>`.
///
/// The sequence keeps two calls inside the same millisecond apart, so ids
/// minted from different calls never collide within one process.
pub fn call_stamp() -> String {
    let seq = CALL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", unix_millis(), seq)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_defaults_to_url() {
        let record = ImageRecord::new("1", "https://img/full.jpg", SOURCE_PEXELS);
        assert_eq!(record.thumbnail, "https://img/full.jpg");

        let record = record.with_thumbnail(Some(""));
        assert_eq!(record.thumbnail, "https://img/full.jpg");

        let record = record.with_thumbnail(Some("https://img/small.jpg"));
        assert_eq!(record.thumbnail, "https://img/small.jpg");
    }

    #[test]
    fn test_attribution_markers() {
        let base = ImageRecord::new("1", "https://img/a.jpg", SOURCE_PEXELS);
        assert!(!base.shows_attribution()); // defaults to Unknown
        assert!(!base.clone().with_photographer(PHOTOGRAPHER_DEMO).shows_attribution());
        assert!(!base.clone().with_photographer("").shows_attribution());
        assert!(base.with_photographer("Ana Lee").shows_attribution());
    }

    #[test]
    fn test_zero_dimensions_dropped() {
        let record =
            ImageRecord::new("1", "https://img/a.jpg", SOURCE_PEXELS).with_dimensions(Some(0), Some(600));
        assert_eq!(record.width, None);
        assert_eq!(record.height, Some(600));
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"id":"x","url":"https://a","thumbnail":"https://a","source":"Pinterest"}"#;
        let record: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "");
        assert_eq!(record.photographer, PHOTOGRAPHER_UNKNOWN);
        assert!(record.width.is_none());
    }

    #[test]
    fn test_serialize_skips_missing_dimensions() {
        let record = ImageRecord::new("x", "https://a", SOURCE_PINTEREST);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("width"));
    }

    #[test]
    fn test_call_stamps_are_distinct() {
        let a = call_stamp();
        let b = call_stamp();
        assert_ne!(a, b);
    }

    #[test]
    fn test_board_find() {
        let board = Board::new(
            "sunset",
            vec![ImageRecord::new("a", "https://a", SOURCE_PEXELS)],
        );
        assert!(board.find("a").is_some());
        assert!(board.find("b").is_none());
    }
}
