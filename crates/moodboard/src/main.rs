//! Moodboard CLI - design inspiration boards from multiple image sources.
//!
//! Moodboard queries Pexels and Pinterest (through Google Custom Search) for
//! a keyword string, mixes the results into one shuffled board, and can ask
//! an LLM for a design critique of it. Missing credentials or failing
//! providers never stop a run: placeholder images stand in.
//!
//! # Usage
//!
//! ```bash
//! # Generate a board
//! moodboard generate sunset beach minimal
//!
//! # Save an HTML page with an AI critique
//! moodboard generate neon city --analyze --format html -o board.html
//!
//! # Download one image from a saved board
//! moodboard export --input board.json --id 2014422
//!
//! # Check which providers are configured
//! moodboard config check
//! ```

use clap::{Parser, Subcommand};
use moodboard_core::Config;
use std::path::PathBuf;

mod cli;
mod logging;

/// Moodboard - design inspiration boards from multiple image sources.
#[derive(Parser, Debug)]
#[command(name = "moodboard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "MOODBOARD_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Search all sources and build a moodboard
    Generate(cli::generate::GenerateArgs),

    /// Produce a design analysis for a saved board
    Analyze(cli::analyze::AnalyzeArgs),

    /// Download one image from a saved board
    Export(cli::export::ExportArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    // Logging isn't initialized yet, so use eprintln for config warnings.
    match path {
        Some(path) => {
            let path = Config::expand_path(path);
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(Config::load_from(&path)?)
        }
        None => match Config::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration. Check your config file with `moodboard config path`."
                );
                Ok(Config::default())
            }
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    let log_settings = logging::LogSettings::resolve(&config, cli.verbose, cli.json_logs);
    logging::init(&log_settings);

    tracing::debug!("Moodboard v{}", moodboard_core::VERSION);

    let config_path = cli
        .config
        .as_deref()
        .map(Config::expand_path)
        .unwrap_or_else(Config::default_path);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Generate(args) => {
            // Spinners would interleave with machine-readable logs
            cli::generate::execute(args, config, !log_settings.json).await
        }
        Commands::Analyze(args) => cli::analyze::execute(args, config).await,
        Commands::Export(args) => cli::export::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args, &config, &config_path).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_with_global_flags() {
        let cli = Cli::try_parse_from([
            "moodboard", "-v", "generate", "sunset", "beach", "--seed", "7", "--config", "/tmp/m.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/m.toml")));
        match cli.command {
            Commands::Generate(args) => {
                assert_eq!(args.keywords, vec!["sunset", "beach"]);
                assert_eq!(args.seed, Some(7));
            }
            other => panic!("expected generate, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_requires_keywords() {
        assert!(Cli::try_parse_from(["moodboard", "generate"]).is_err());
    }

    #[test]
    fn test_parse_config_check() {
        let cli = Cli::try_parse_from(["moodboard", "config", "check"]).unwrap();
        assert!(matches!(cli.command, Commands::Config(_)));
    }

    #[test]
    fn test_load_missing_explicit_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moodboard.toml");
        std::fs::write(&path, "[aggregation]\ntotal = 8\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.aggregation.total, 8);
    }
}
