//! Logging initialization.
//!
//! Uses the `tracing` ecosystem. Logs always go to stderr so that board
//! output on stdout can be piped.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default filter directive when RUST_LOG is unset
    pub level: &'static str,
    /// Structured JSON lines instead of human-readable output
    pub json: bool,
}

impl LogSettings {
    /// Merge the `[logging]` section with CLI flags. Flags win; an unknown
    /// level in config falls back to "info".
    pub fn resolve(config: &moodboard_core::Config, verbose: bool, json_logs: bool) -> Self {
        let configured = config.logging.level.to_lowercase();
        let level = LEVELS
            .iter()
            .copied()
            .find(|l| *l == configured)
            .unwrap_or("info");
        let level = if verbose && !matches!(level, "debug" | "trace") {
            "debug"
        } else {
            level
        };
        Self {
            level,
            json: json_logs || config.logging.format == "json",
        }
    }
}

/// Install the global subscriber.
///
/// The RUST_LOG environment variable overrides `settings.level`.
pub fn init(settings: &LogSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(settings.level));

    if settings.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodboard_core::Config;

    #[test]
    fn test_defaults() {
        let settings = LogSettings::resolve(&Config::default(), false, false);
        assert_eq!(settings, LogSettings { level: "info", json: false });
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        let settings = LogSettings::resolve(&config, true, true);
        assert_eq!(settings.level, "debug");
        assert!(settings.json);
    }

    #[test]
    fn test_verbose_keeps_trace() {
        let mut config = Config::default();
        config.logging.level = "TRACE".to_string();
        assert_eq!(LogSettings::resolve(&config, true, false).level, "trace");
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let mut config = Config::default();
        config.logging.level = "chatty".to_string();
        config.logging.format = "json".to_string();
        let settings = LogSettings::resolve(&config, false, false);
        assert_eq!(settings.level, "info");
        assert!(settings.json);
    }
}
