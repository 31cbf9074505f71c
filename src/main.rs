use anyhow::{Context, Result};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use snake_arcade::flow::FlowController;
use snake_arcade::game::GameConfig;
use snake_arcade::modes::ArcadeMode;
use snake_arcade::scores::ScoreStore;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Grid snake with lives, obstacles and a two-player duel")]
struct Cli {
    /// Score table file
    #[arg(long, default_value = "scores.json")]
    scores: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed for food, obstacle and heading randomness
    #[arg(long)]
    seed: Option<u64>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig::default();
    let scores = ScoreStore::load(&cli.scores);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let flow = FlowController::new(config, scores, rng);
    let mut arcade = ArcadeMode::new(flow);
    arcade.run().await?;

    Ok(())
}
