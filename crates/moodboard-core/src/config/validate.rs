//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Google Custom Search rejects `num` above this.
const MAX_PER_SOURCE_LIMIT: usize = 10;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let agg = &self.aggregation;
        if agg.per_source_limit == 0 || agg.per_source_limit > MAX_PER_SOURCE_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "aggregation.per_source_limit must be between 1 and {MAX_PER_SOURCE_LIMIT}"
            )));
        }
        if agg.total == 0 {
            return Err(ConfigError::ValidationError(
                "aggregation.total must be > 0".into(),
            ));
        }
        if agg.primary_calls + agg.secondary_multiplier == 0 {
            return Err(ConfigError::ValidationError(
                "aggregation.primary_calls + aggregation.secondary_multiplier must be > 0".into(),
            ));
        }
        if agg.request_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "aggregation.request_timeout_ms must be > 0".into(),
            ));
        }
        if self.placeholders.catalog.is_empty() {
            return Err(ConfigError::ValidationError(
                "placeholders.catalog must not be empty".into(),
            ));
        }
        if self.placeholders.catalog.iter().any(|url| url.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "placeholders.catalog must not contain empty URLs".into(),
            ));
        }
        if self.placeholders.max_per_call == 0 {
            return Err(ConfigError::ValidationError(
                "placeholders.max_per_call must be > 0".into(),
            ));
        }
        if self.analysis.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.max_tokens must be > 0".into(),
            ));
        }
        if self.analysis.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "analysis.timeout_ms must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.analysis.temperature) {
            return Err(ConfigError::ValidationError(
                "analysis.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if let Some(provider) = &self.llm.provider {
            if provider != "azure" && provider != "openai" {
                return Err(ConfigError::ValidationError(format!(
                    "llm.provider must be \"azure\" or \"openai\", got \"{provider}\""
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_passes_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_per_source_limit_out_of_range() {
        let mut config = Config::default();
        config.aggregation.per_source_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("per_source_limit"));

        config.aggregation.per_source_limit = 11;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_no_calls() {
        let mut config = Config::default();
        config.aggregation.primary_calls = 0;
        config.aggregation.secondary_multiplier = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("secondary_multiplier"));
    }

    #[test]
    fn test_validate_allows_primary_only() {
        let mut config = Config::default();
        config.aggregation.secondary_multiplier = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let mut config = Config::default();
        config.placeholders.catalog.clear();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("placeholders.catalog"));

        config.placeholders.catalog = vec![" ".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.aggregation.request_timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_ms"));
    }

    #[test]
    fn test_validate_rejects_invalid_temperature() {
        let mut config = Config::default();
        config.analysis.temperature = 2.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("temperature"));
    }

    #[test]
    fn test_validate_rejects_unknown_llm_provider() {
        let mut config = Config::default();
        config.llm.provider = Some("ollama".to_string());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("llm.provider"));
    }
}
