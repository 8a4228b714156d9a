//! Error types for moodboard generation.
//!
//! Errors are organized by collaborator so that messages carry the provider
//! or URL involved. Source and analysis errors are normally absorbed by their
//! fail-soft callers and only surface in logs.

use thiserror::Error;

/// Top-level error type for moodboard operations.
#[derive(Error, Debug)]
pub enum MoodboardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The request itself is unusable (e.g. empty keywords)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Analysis errors that the caller asked to see
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Export download errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Failures of a single image search provider.
///
/// Never crosses the [`SourceAdapter`](crate::sources::SourceAdapter)
/// boundary: the adapter answers every variant with placeholders.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    /// Credentials missing or still set to a template value
    #[error("{provider} credentials not configured")]
    NotConfigured { provider: String },

    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("{provider} request failed: {message}")]
    Request { provider: String, message: String },

    /// Non-2xx response
    #[error("{provider} API error: HTTP {status}")]
    Status { provider: String, status: u16 },

    /// Body was not the JSON shape we expect
    #[error("{provider} returned a malformed response: {message}")]
    Malformed { provider: String, message: String },

    /// Successful call with zero usable results
    #[error("{provider} returned no results")]
    Empty { provider: String },

    /// Call did not settle within the per-call timeout
    #[error("{provider} timed out after {timeout_ms}ms")]
    Timeout { provider: String, timeout_ms: u64 },
}

/// Errors from the design-analysis collaborator.
#[derive(Error, Debug, Clone)]
pub enum AnalysisError {
    /// No provider selected or credentials missing
    #[error("{0}")]
    NotConfigured(String),

    /// Analysis was requested for an empty board
    #[error("Please generate a moodboard first")]
    NoImages,

    /// Provider call failed
    #[error("{message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// Provider did not answer within the configured timeout
    #[error("Analysis timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Errors while downloading a chosen image for export.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Transport-level failure
    #[error("Failed to fetch image {url}: {message}")]
    Download { url: String, message: String },

    /// Non-2xx response
    #[error("Failed to fetch image {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    /// 2xx with no bytes
    #[error("Image {url} returned an empty body")]
    EmptyBody { url: String },

    /// Download did not finish within the per-call timeout
    #[error("Fetching image {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    /// The requested record is not on the board
    #[error("No image with id {0} on this board")]
    UnknownImage(String),
}

/// Convenience type alias for moodboard results.
pub type Result<T> = std::result::Result<T, MoodboardError>;

/// Convenience type alias for source-level results.
pub type SourceResult<T> = std::result::Result<T, SourceError>;
