//! The `moodboard analyze` command.

use clap::Args;
use moodboard_core::{AnalysisOrigin, Config, Moodboarder};
use std::path::PathBuf;

use super::load_board;

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Board file written by `generate --format json`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the analysis text to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the analysis as JSON (text plus origin)
    #[arg(long)]
    pub json: bool,
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, config: Config) -> anyhow::Result<()> {
    let board = load_board(&args.input)?;
    let moodboarder = Moodboarder::new(config)?;

    let analysis = moodboarder.analyze(&board).await?;
    match &analysis.origin {
        AnalysisOrigin::Generated { model } => tracing::info!("Analysis by {model}"),
        AnalysisOrigin::Mock => {
            tracing::warn!("No LLM provider configured; showing a generic analysis. See `moodboard config check`.")
        }
        AnalysisOrigin::Fallback { reason } => {
            tracing::warn!("AI analysis unavailable ({reason}); showing general guidance")
        }
    }

    let rendered = if args.json {
        serde_json::to_string_pretty(&analysis)?
    } else {
        analysis.text.clone()
    };

    match &args.output {
        Some(path) => {
            let path = Config::expand_path(path);
            std::fs::write(&path, format!("{rendered}\n"))?;
            tracing::info!("Analysis written to {:?}", path);
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
