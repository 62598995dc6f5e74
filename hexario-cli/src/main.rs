//! HEXARIO CLI - Command-line interface
//!
//! Commands:
//! - play: Run headless episodes with random actions
//! - benchmark: Measure tick throughput over many parallel games

mod benchmark;
mod play;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hexario_core::GameConfig;

#[derive(Parser)]
#[command(name = "hexario")]
#[command(about = "Headless driver for the HEXARIO territory engine")]
struct Cli {
    /// Seed for spawns and actions (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Game configuration JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log engine events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes with random actions
    Play(play::PlayArgs),
    /// Benchmark tick throughput
    Benchmark(benchmark::BenchmarkArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Commands::Play(args) => play::run(args, config),
        Commands::Benchmark(args) => benchmark::run(args, config),
    }
}

/// Logs go to stderr so JSON output stays clean
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Config file (or defaults) with the command line seed applied on top
fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => GameConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}
