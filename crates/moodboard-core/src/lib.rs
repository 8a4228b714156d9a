//! Moodboard Core - multi-source design inspiration aggregation.
//!
//! Turns a keyword string into a bounded, shuffled set of image records
//! drawn from several providers, and never comes back empty-handed: any
//! provider that fails is answered with placeholder images instead.
//!
//! # Architecture
//!
//! ```text
//! keywords → [Pexels ×1, Pinterest ×2] → merge → shuffle → truncate → Board
//!                 ↘ failure → placeholders ↙                 ↘ analysis (optional)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use moodboard_core::{Config, Moodboarder};
//!
//! #[tokio::main]
//! async fn main() -> moodboard_core::Result<()> {
//!     let config = Config::load()?;
//!     let moodboarder = Moodboarder::new(config)?;
//!
//!     let board = moodboarder.generate("sunset beach minimal").await?;
//!     println!("{} images", board.images.len());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod aggregate;
pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod sources;
pub mod types;

// Re-exports for convenient access
pub use aggregate::{AggregateOptions, Aggregator, SourcePlan};
pub use analysis::{AnalysisOrigin, Analyst, DesignAnalysis};
pub use config::Config;
pub use error::{AnalysisError, ConfigError, ExportError, MoodboardError, Result, SourceError};
pub use export::{download_file_name, ExportPayload, ImageDownloader};
pub use output::{OutputFormat, OutputWriter};
pub use sources::{ImageSource, PlaceholderGenerator, SourceAdapter, SourceOutcome};
pub use types::{Board, ImageRecord};

use rand::Rng;
use std::time::Duration;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Moodboard generator - the main entry point.
pub struct Moodboarder {
    config: Config,
    aggregator: Aggregator,
    analyst: Analyst,
    downloader: ImageDownloader,
}

impl Moodboarder {
    /// Create a generator wired to the providers named in `config`.
    pub fn new(config: Config) -> Result<Self> {
        tracing::debug!("Initializing moodboard v{}", VERSION);
        let aggregator = Aggregator::from_config(&config);
        let analyst = Analyst::from_config(&config)?;
        Ok(Self::with_parts(config, aggregator, analyst))
    }

    /// Assemble from pre-built collaborators.
    pub fn with_parts(config: Config, aggregator: Aggregator, analyst: Analyst) -> Self {
        let downloader = ImageDownloader::default()
            .with_timeout(Duration::from_millis(config.aggregation.request_timeout_ms));
        Self {
            config,
            aggregator,
            analyst,
            downloader,
        }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn analyst(&self) -> &Analyst {
        &self.analyst
    }

    /// Generate a board for `keywords`.
    pub async fn generate(&self, keywords: &str) -> Result<Board> {
        self.check_keywords(keywords)?;
        let images = self.aggregator.aggregate(keywords).await?;
        Ok(Board::new(keywords.trim(), images))
    }

    /// Generate a board using `rng` for the shuffle.
    pub async fn generate_with_rng<R: Rng + ?Sized>(&self, keywords: &str, rng: &mut R) -> Result<Board> {
        self.check_keywords(keywords)?;
        let images = self.aggregator.aggregate_with_rng(keywords, rng).await?;
        Ok(Board::new(keywords.trim(), images))
    }

    /// Produce a design analysis for a board.
    pub async fn analyze(&self, board: &Board) -> Result<DesignAnalysis> {
        Ok(self.analyst.analyze(&board.images, &board.keywords).await?)
    }

    /// Download the board image with the given id.
    pub async fn export(&self, board: &Board, id: &str) -> Result<ExportPayload> {
        let record = board
            .find(id)
            .ok_or_else(|| ExportError::UnknownImage(id.to_string()))?;
        Ok(self.downloader.download(record).await?)
    }

    fn check_keywords(&self, keywords: &str) -> Result<()> {
        let min = self.config.aggregation.min_keyword_chars;
        let len = keywords.trim().chars().count();
        if len == 0 {
            return Err(MoodboardError::InvalidRequest(
                "Please enter keywords to search".to_string(),
            ));
        }
        if len < min {
            return Err(MoodboardError::InvalidRequest(format!(
                "Please enter at least {min} characters"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::testing::{adapter, Behavior, ScriptedSource};
    use rand::SeedableRng;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    fn moodboarder() -> Moodboarder {
        let aggregator = Aggregator::new(
            vec![
                SourcePlan::new(adapter(ScriptedSource::new("Pexels", Behavior::Succeed(4)), 4), 1),
                SourcePlan::new(adapter(ScriptedSource::new("Pinterest", Behavior::Succeed(4)), 4), 2),
            ],
            PlaceholderGenerator::default(),
            AggregateOptions::default(),
        );
        Moodboarder::with_parts(Config::default(), aggregator, Analyst::mock())
    }

    #[tokio::test]
    async fn test_moodboarder_new_with_defaults() {
        let moodboarder = Moodboarder::new(Config::default()).unwrap();
        assert_eq!(moodboarder.config().aggregation.total, 12);
        assert!(moodboarder.analyst().provider_name().is_none());
    }

    #[tokio::test]
    async fn test_generate_board() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let board = moodboarder()
            .generate_with_rng("  sunset beach ", &mut rng)
            .await
            .unwrap();
        assert_eq!(board.keywords, "sunset beach");
        assert_eq!(board.images.len(), 12);
        assert!(board.analysis.is_none());
    }

    #[tokio::test]
    async fn test_short_keywords_rejected() {
        let err = moodboarder().generate("ab").await.unwrap_err();
        assert!(err.to_string().contains("at least 3 characters"));
        assert!(matches!(
            moodboarder().generate("   ").await.unwrap_err(),
            MoodboardError::InvalidRequest(_)
        ));
    }

    #[tokio::test]
    async fn test_analyze_board() {
        let moodboarder = moodboarder();
        let board = moodboarder.generate("sunset").await.unwrap();
        let analysis = moodboarder.analyze(&board).await.unwrap();
        assert_eq!(analysis.origin, AnalysisOrigin::Mock);

        let empty = Board::new("sunset", Vec::new());
        let err = moodboarder.analyze(&empty).await.unwrap_err();
        assert!(matches!(err, MoodboardError::Analysis(AnalysisError::NoImages)));
    }

    #[tokio::test]
    async fn test_export_unknown_id() {
        let moodboarder = moodboarder();
        let board = Board::new("sunset", Vec::new());
        let err = moodboarder.export(&board, "missing").await.unwrap_err();
        assert!(matches!(err, MoodboardError::Export(ExportError::UnknownImage(_))));
    }
}
