//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};

/// Aggregation settings: how many calls, how many images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Images requested from (and kept per call of) each source
    pub per_source_limit: usize,

    /// Images on the final board
    pub total: usize,

    /// Calls issued to the primary source per aggregation
    pub primary_calls: usize,

    /// Calls issued to the secondary source per aggregation.
    /// The proxy search yields less per call, so it is asked twice by default.
    pub secondary_multiplier: usize,

    /// Issue all source calls together instead of one after another
    pub concurrent: bool,

    /// Per-call timeout for a source, in milliseconds
    pub request_timeout_ms: u64,

    /// Minimum keyword length accepted by front-ends
    pub min_keyword_chars: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            per_source_limit: 4,
            total: 12,
            primary_calls: 1,
            secondary_multiplier: 2,
            concurrent: false,
            request_timeout_ms: 10_000,
            min_keyword_chars: 3,
        }
    }
}

/// Image search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SourcesConfig {
    /// Primary provider
    pub pexels: PexelsConfig,

    /// Secondary provider (Google Custom Search restricted to a site)
    pub pinterest: PinterestConfig,
}

/// Pexels search API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PexelsConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Search endpoint
    pub endpoint: String,

    /// Orientation filter
    pub orientation: String,

    /// Minimum photo size filter
    pub size: String,
}

impl Default for PexelsConfig {
    fn default() -> Self {
        Self {
            api_key: "${PEXELS_API_KEY}".to_string(),
            endpoint: "https://api.pexels.com/v1/search".to_string(),
            orientation: "landscape".to_string(),
            size: "large".to_string(),
        }
    }
}

/// Google Custom Search configuration, used as a Pinterest proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PinterestConfig {
    /// Google API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Custom Search Engine id, the `cx` parameter (supports ${ENV_VAR} syntax)
    pub engine_id: String,

    /// Search endpoint
    pub endpoint: String,

    /// Site the query is restricted to
    pub site: String,

    /// `imgSize` parameter
    pub img_size: String,

    /// `safe` parameter
    pub safe: String,

    /// `imgType` parameter
    pub img_type: String,
}

impl Default for PinterestConfig {
    fn default() -> Self {
        Self {
            api_key: "${GOOGLE_API_KEY}".to_string(),
            engine_id: "${GOOGLE_CSE_ID}".to_string(),
            endpoint: "https://www.googleapis.com/customsearch/v1".to_string(),
            site: "pinterest.com".to_string(),
            img_size: "xlarge".to_string(),
            safe: "active".to_string(),
            img_type: "photo".to_string(),
        }
    }
}

/// Placeholder catalog used whenever a source cannot produce real results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceholderConfig {
    /// Fixed, non-empty list of asset URLs, cycled in order
    pub catalog: Vec<String>,

    /// Hard ceiling on records produced by one call
    pub max_per_call: usize,
}

const UNSPLASH_QUERY: &str = "ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D&auto=format&fit=crop&w=2000&q=80";

impl Default for PlaceholderConfig {
    fn default() -> Self {
        let catalog = [
            "photo-1586281380349-632531db7ed4",
            "photo-1555066931-4365d14bab8c",
            "photo-1460925895917-afdab827c52f",
            "photo-1581291518857-4e27b48ff24e",
            "photo-1558655146-d09347e92766",
            "photo-1507003211169-0a1dd7228f2d",
        ]
        .iter()
        .map(|photo| format!("https://images.unsplash.com/{photo}?{UNSPLASH_QUERY}"))
        .collect();

        Self {
            catalog,
            max_per_call: 4,
        }
    }
}

/// LLM provider configurations for design analysis.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LlmConfig {
    /// Selected provider ("azure" or "openai"); unset means mock analysis
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Azure OpenAI configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureOpenAiConfig>,

    /// OpenAI (or compatible) configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai: Option<OpenAiConfig>,
}

/// Azure OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureOpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Resource name, the `<resource>.openai.azure.com` host prefix
    pub resource: String,

    /// Deployment name
    pub deployment: String,

    /// `api-version` query parameter
    pub api_version: String,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${AZURE_OPENAI_API_KEY}".to_string(),
            resource: "${AZURE_OPENAI_RESOURCE_NAME}".to_string(),
            deployment: "${AZURE_OPENAI_DEPLOYMENT_NAME}".to_string(),
            api_version: "2023-05-15".to_string(),
        }
    }
}

/// OpenAI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Chat completions endpoint
    pub endpoint: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
        }
    }
}

/// Design analysis request settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// LLM call timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.7,
            timeout_ms: 60_000,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json", "jsonl" or "html")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
