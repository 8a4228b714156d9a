//! The `moodboard export` command.

use clap::Args;
use moodboard_core::{download_file_name, Config, Moodboarder};
use std::path::PathBuf;

use super::load_board;

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Board file written by `generate --format json`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Id of the image to download
    #[arg(long)]
    pub id: String,

    /// Destination file (defaults to moodboard-<keywords>-<timestamp>.<ext>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the design-tool `insert-image` message as JSON instead of raw bytes
    #[arg(long)]
    pub host_message: bool,
}

/// Execute the export command.
pub async fn execute(args: ExportArgs, config: Config) -> anyhow::Result<()> {
    let board = load_board(&args.input)?;
    let moodboarder = Moodboarder::new(config)?;

    tracing::info!("Downloading image {}...", args.id);
    let payload = moodboarder.export(&board, &args.id).await?;
    tracing::info!("Fetched {} ({} bytes)", payload.node_name(), payload.bytes.len());

    if args.host_message {
        let json = serde_json::to_string(&payload.host_message())?;
        match &args.output {
            Some(path) => std::fs::write(Config::expand_path(path), json)?,
            None => println!("{json}"),
        }
        return Ok(());
    }

    let path = args.output.as_deref().map(Config::expand_path).unwrap_or_else(|| {
        PathBuf::from(download_file_name(
            "moodboard",
            &board.keywords,
            payload.file_extension(),
        ))
    });
    std::fs::write(&path, &payload.bytes)?;
    println!("{}", path.display());
    Ok(())
}
