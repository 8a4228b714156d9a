//! Configuration management for moodboard generation.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. The resulting `Config` is passed explicitly into every source,
//! the aggregator and the analyst; nothing reads ambient state afterwards.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Aggregation bounds and call plan
    pub aggregation: AggregationConfig,

    /// Image search providers
    pub sources: SourcesConfig,

    /// Placeholder catalog
    pub placeholders: PlaceholderConfig,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// Analysis request settings
    pub analysis: AnalysisConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Whether one provider has usable credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStatus {
    pub provider: &'static str,
    pub configured: bool,
    /// Env vars or keys to set when not configured
    pub hint: &'static str,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.moodboard.moodboard/config.toml
    /// - Linux: ~/.config/moodboard/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\moodboard\moodboard\config\config.toml
    ///
    /// Falls back to ~/.moodboard/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "moodboard", "moodboard")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".moodboard").join("config.toml")
            })
    }

    /// Expand `~` in a user-supplied path.
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        PathBuf::from(shellexpand::tilde(&path_str).into_owned())
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    /// Report which providers have credentials, without touching the network.
    pub fn credential_report(&self) -> Vec<CredentialStatus> {
        let pexels = &self.sources.pexels;
        let pinterest = &self.sources.pinterest;
        let azure = self.llm.azure.clone().unwrap_or_default();
        let openai = self.llm.openai.clone().unwrap_or_default();

        vec![
            CredentialStatus {
                provider: "pexels",
                configured: resolve_credential(&pexels.api_key).is_some(),
                hint: "PEXELS_API_KEY",
            },
            CredentialStatus {
                provider: "pinterest",
                configured: resolve_credential(&pinterest.api_key).is_some()
                    && resolve_credential(&pinterest.engine_id).is_some(),
                hint: "GOOGLE_API_KEY and GOOGLE_CSE_ID",
            },
            CredentialStatus {
                provider: "azure",
                configured: resolve_credential(&azure.api_key).is_some()
                    && resolve_credential(&azure.resource).is_some()
                    && resolve_credential(&azure.deployment).is_some(),
                hint: "AZURE_OPENAI_API_KEY, AZURE_OPENAI_RESOURCE_NAME and AZURE_OPENAI_DEPLOYMENT_NAME",
            },
            CredentialStatus {
                provider: "openai",
                configured: resolve_credential(&openai.api_key).is_some(),
                hint: "OPENAI_API_KEY",
            },
        ]
    }
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok()
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Resolve a credential, treating empty and template values as unset.
///
/// Template values are the `YOUR_..._HERE` style strings shipped in sample
/// configs.
pub fn resolve_credential(value: &str) -> Option<String> {
    resolve_env_var(value)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.starts_with("YOUR_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.aggregation.per_source_limit, 4);
        assert_eq!(config.aggregation.total, 12);
        assert_eq!(config.aggregation.secondary_multiplier, 2);
        assert!(!config.aggregation.concurrent);
        assert_eq!(config.placeholders.catalog.len(), 6);
        assert_eq!(config.placeholders.max_per_call, 4);
        assert!(config.llm.provider.is_none());
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[aggregation]"));
        assert!(toml.contains("[sources.pexels]"));
        assert!(toml.contains("[placeholders]"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[aggregation]").unwrap();
        writeln!(file, "total = 8").unwrap();
        writeln!(file, "[sources.pexels]").unwrap();
        writeln!(file, "api_key = \"abc\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.aggregation.total, 8);
        assert_eq!(config.aggregation.per_source_limit, 4);
        assert_eq!(config.sources.pexels.api_key, "abc");
        assert_eq!(config.sources.pexels.orientation, "landscape");
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[aggregation]").unwrap();
        writeln!(file, "total = 0").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("aggregation.total"));
    }

    #[test]
    fn test_resolve_env_var() {
        assert_eq!(resolve_env_var("plain-key"), Some("plain-key".to_string()));
        assert_eq!(resolve_env_var(""), None);
        assert_eq!(resolve_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), None);
    }

    #[test]
    fn test_resolve_credential_rejects_templates() {
        assert_eq!(resolve_credential("YOUR_PEXELS_API_KEY_HERE"), None);
        assert_eq!(resolve_credential("YOUR_CUSTOM_SEARCH_ENGINE_ID"), None);
        assert_eq!(resolve_credential("   "), None);
        assert_eq!(resolve_credential("k41y"), Some("k41y".to_string()));
    }

    #[test]
    fn test_credential_report_lists_every_provider() {
        let mut config = Config::default();
        config.sources.pexels.api_key = "real-key".to_string();
        config.sources.pinterest.api_key = "g-key".to_string();
        config.sources.pinterest.engine_id = "YOUR_CUSTOM_SEARCH_ENGINE_ID".to_string();

        let report = config.credential_report();
        let names: Vec<_> = report.iter().map(|s| s.provider).collect();
        assert_eq!(names, vec!["pexels", "pinterest", "azure", "openai"]);
        assert!(report[0].configured);
        assert!(!report[1].configured); // engine id is still a template
    }
}
