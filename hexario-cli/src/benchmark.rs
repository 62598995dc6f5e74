//! Benchmark command - measure tick throughput
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: run_games(), report_results()
//! - Level 3: benchmark_game()
//! - Level 4: timing utilities, formatting

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;

use hexario_core::{Game, GameConfig};

use crate::play::{create_rng, run_episode, ArenaArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    #[command(flatten)]
    pub arena: ArenaArgs,

    /// Number of independent games
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Maximum ticks per game
    #[arg(long, default_value = "1000")]
    pub max_ticks: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of one benchmarked game
#[derive(Clone, Copy, Debug)]
struct GameRun {
    ticks: u64,
    elapsed: Duration,
}

/// Benchmark totals
#[derive(Clone, Debug)]
struct BenchmarkResult {
    games: usize,
    total_ticks: u64,
    wall_time: Duration,
    /// Sum of per-game time across threads
    cpu_time: Duration,
    ticks_per_second: f64,
    system_info: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Derive one seed per game from the base seed
/// 2. Play all games in parallel
/// 3. Report throughput
pub fn run(args: BenchmarkArgs, config: GameConfig) -> Result<()> {
    let config = args.arena.apply(config)?;
    let base_seed = config.seed.unwrap_or_else(|| create_rng(None).gen());

    tracing::info!(
        "Benchmarking {} games: {} players, radius {}, base seed {}",
        args.games,
        config.num_players,
        config.map_radius,
        base_seed
    );

    let result = run_games(&config, base_seed, &args)?;

    report_results(&result, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn run_games(config: &GameConfig, base_seed: u64, args: &BenchmarkArgs) -> Result<BenchmarkResult> {
    let progress = ProgressBar::new(args.games as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} games ({elapsed})") {
        progress.set_style(style);
    }
    if args.json {
        progress.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }

    let start = Instant::now();
    let runs = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let run = benchmark_game(config, base_seed.wrapping_add(i as u64), args.max_ticks);
            progress.inc(1);
            run
        })
        .collect::<Result<Vec<GameRun>>>()?;
    let wall_time = start.elapsed();
    progress.finish_and_clear();

    let total_ticks: u64 = runs.iter().map(|r| r.ticks).sum();
    let cpu_time: Duration = runs.iter().map(|r| r.elapsed).sum();

    Ok(BenchmarkResult {
        games: runs.len(),
        total_ticks,
        wall_time,
        cpu_time,
        ticks_per_second: total_ticks as f64 / wall_time.as_secs_f64().max(f64::EPSILON),
        system_info: get_system_info(),
    })
}

/// Report benchmark results
fn report_results(result: &BenchmarkResult, args: &BenchmarkArgs) {
    if args.json {
        print_json_results(result);
    } else {
        print_text_results(result);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one seeded game and time it
fn benchmark_game(config: &GameConfig, seed: u64, max_ticks: u64) -> Result<GameRun> {
    let mut game = Game::new(config.clone().with_seed(seed))?;
    let mut rng = create_rng(Some(seed));

    let start = Instant::now();
    let record = run_episode(&mut game, 1, max_ticks, &mut rng)?;

    Ok(GameRun {
        ticks: record.ticks,
        elapsed: start.elapsed(),
    })
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Get system information string
fn get_system_info() -> String {
    format!(
        "hexario {}, {} CPUs",
        env!("CARGO_PKG_VERSION"),
        rayon::current_num_threads()
    )
}

/// Format duration for display
fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!("{}m {:.1}s", d.as_secs() / 60, (d.as_secs() % 60) as f64 + d.subsec_millis() as f64 / 1000.0)
    } else if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

/// Print results as JSON
fn print_json_results(result: &BenchmarkResult) {
    #[derive(serde::Serialize)]
    struct JsonOutput {
        system_info: String,
        games: usize,
        total_ticks: u64,
        wall_time_ms: u64,
        cpu_time_ms: u64,
        ticks_per_second: f64,
    }

    let output = JsonOutput {
        system_info: result.system_info.clone(),
        games: result.games,
        total_ticks: result.total_ticks,
        wall_time_ms: result.wall_time.as_millis() as u64,
        cpu_time_ms: result.cpu_time.as_millis() as u64,
        ticks_per_second: result.ticks_per_second,
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(result: &BenchmarkResult) {
    println!("\n=== HEXARIO Benchmark Results ===");
    println!("System: {}\n", result.system_info);
    println!("Games:        {}", result.games);
    println!("Total ticks:  {}", result.total_ticks);
    println!("Wall time:    {}", format_duration(result.wall_time));
    println!("CPU time:     {}", format_duration(result.cpu_time));
    println!("Ticks/s:      {:.0}", result.ticks_per_second);
    if result.games > 0 {
        println!(
            "Avg ticks:    {:.1}",
            result.total_ticks as f64 / result.games as f64
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
