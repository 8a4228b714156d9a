//! The `moodboard generate` command.

use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use moodboard_core::{Board, Config, Moodboarder, OutputFormat as CoreOutputFormat, OutputWriter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::fs::File;
use std::future::Future;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Search keywords (joined with spaces)
    #[arg(required = true)]
    pub keywords: Vec<String>,

    /// Output format (defaults to `output.format` in config)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed the shuffle for a reproducible order
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attach a design analysis to the board
    #[arg(long)]
    pub analyze: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pub pretty: bool,
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The whole board as one JSON object
    Json,
    /// One image record per line
    Jsonl,
    /// Standalone HTML page
    Html,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => CoreOutputFormat::Json,
            OutputFormat::Jsonl => CoreOutputFormat::JsonLines,
            OutputFormat::Html => CoreOutputFormat::Html,
        }
    }
}

impl GenerateArgs {
    pub fn query(&self) -> String {
        self.keywords.join(" ")
    }

    fn resolve_format(&self, config: &Config) -> anyhow::Result<CoreOutputFormat> {
        match self.format {
            Some(format) => Ok(format.into()),
            None => CoreOutputFormat::parse(&config.output.format).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown output format '{}' in config. Use json, jsonl or html.",
                    config.output.format
                )
            }),
        }
    }
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: Config, spinner: bool) -> anyhow::Result<()> {
    let format = args.resolve_format(&config)?;
    let pretty = args.pretty || config.output.pretty;
    let query = args.query();
    let moodboarder = Moodboarder::new(config)?;

    let pb = spinner.then(|| create_spinner(&format!("Searching for \"{query}\"...")));
    let board = with_spinner(pb.as_ref(), build_board(&moodboarder, &args, &query, pb.as_ref())).await?;

    tracing::info!("{}", summary(&board));

    match &args.output {
        Some(path) => {
            let path = Config::expand_path(path);
            let file = File::create(&path)?;
            let mut writer = OutputWriter::new(BufWriter::new(file), format, pretty);
            writer.write_board(&board)?;
            writer.flush()?;
            tracing::info!("Board written to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = OutputWriter::new(stdout.lock(), format, pretty);
            writer.write_board(&board)?;
            writer.flush()?;
        }
    }

    Ok(())
}

async fn build_board(
    moodboarder: &Moodboarder,
    args: &GenerateArgs,
    query: &str,
    pb: Option<&ProgressBar>,
) -> moodboard_core::Result<Board> {
    let mut board = match args.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            moodboarder.generate_with_rng(query, &mut rng).await?
        }
        None => moodboarder.generate(query).await?,
    };

    if args.analyze {
        if let Some(pb) = pb {
            pb.set_message("Analyzing moodboard...");
        }
        board.analysis = Some(moodboarder.analyze(&board).await?);
    }
    Ok(board)
}

/// Await `work`, then clear the spinner whatever the outcome.
async fn with_spinner<T>(pb: Option<&ProgressBar>, work: impl Future<Output = T>) -> T {
    let output = work.await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    output
}

/// One-line breakdown like `12 image(s): Pexels 4, Pinterest 8 (4 placeholder)`.
fn summary(board: &Board) -> String {
    let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
    for image in &board.images {
        *by_source.entry(image.source.as_str()).or_default() += 1;
    }
    let parts: Vec<String> = by_source
        .iter()
        .map(|(source, count)| format!("{source} {count}"))
        .collect();
    let placeholders = board.images.iter().filter(|i| i.is_placeholder()).count();

    let mut line = format!("{} image(s): {}", board.images.len(), parts.join(", "));
    if placeholders > 0 {
        line.push_str(&format!(" ({placeholders} placeholder)"));
    }
    line
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
