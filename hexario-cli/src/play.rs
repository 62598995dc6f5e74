//! Play command - run headless episodes with random actions
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_episodes(), report_results()
//! - Level 3: run_episode(), compute_statistics()
//! - Level 4: action sampling, formatting utilities

use std::f32::consts::PI;

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use hexario_core::{ActionSpace, Game, GameConfig, GameEvent, PlayerSnapshot};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Overrides applied on top of the loaded game configuration
#[derive(Args, Clone, Debug, Default)]
pub struct ArenaArgs {
    /// Number of players
    #[arg(long)]
    pub players: Option<usize>,

    /// Map radius
    #[arg(long)]
    pub radius: Option<i32>,

    /// Steer with heading angles instead of neighbor indices
    #[arg(long)]
    pub continuous: bool,
}

impl ArenaArgs {
    pub fn apply(&self, mut config: GameConfig) -> Result<GameConfig> {
        if let Some(players) = self.players {
            config.num_players = players;
        }
        if let Some(radius) = self.radius {
            config.map_radius = radius;
        }
        if self.continuous {
            config.action_space = ActionSpace::Continuous;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[derive(Args)]
pub struct PlayArgs {
    #[command(flatten)]
    pub arena: ArenaArgs,

    /// Number of episodes to play
    #[arg(long, default_value = "10")]
    pub episodes: usize,

    /// Maximum ticks per episode
    #[arg(long, default_value = "1000")]
    pub max_ticks: u64,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single episode
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub ticks: u64,
    pub eliminations: usize,
    pub players: Vec<PlayerSnapshot>,
}

/// Aggregated results over all episodes
#[derive(Clone, Debug, Serialize)]
struct PlayStatistics {
    episodes: Vec<EpisodeRecord>,
    wins: usize,
    survivors: usize,
    deaths: usize,
    avg_ticks: f32,
    best_captures: i32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Apply command line overrides to the configuration
/// 2. Play the episodes
/// 3. Report results
pub fn run(args: PlayArgs, config: GameConfig) -> Result<()> {
    let config = args.arena.apply(config)?;

    tracing::info!(
        "Starting {} episodes: {} players, radius {}, {:?} actions",
        args.episodes,
        config.num_players,
        config.map_radius,
        config.action_space
    );

    let stats = play_episodes(&config, &args)?;

    report_results(&stats, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play every episode on one game, respawning all players in between
fn play_episodes(config: &GameConfig, args: &PlayArgs) -> Result<PlayStatistics> {
    let mut game = Game::new(config.clone()).context("Failed to create game")?;
    let mut rng = create_rng(config.seed);
    let mut records = Vec::with_capacity(args.episodes);

    for episode in 0..args.episodes {
        let record = run_episode(&mut game, episode + 1, args.max_ticks, &mut rng)?;

        tracing::info!(
            "Episode {}: {} ticks, {} eliminations",
            record.episode,
            record.ticks,
            record.eliminations
        );

        records.push(record);
    }

    Ok(compute_statistics(records))
}

/// Report episode results
fn report_results(stats: &PlayStatistics, args: &PlayArgs) {
    if args.json {
        print_json_results(stats);
    } else {
        print_text_results(stats);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Respawn everyone and step with random actions until every player is
/// dead or has won, or `max_ticks` have passed
pub fn run_episode(
    game: &mut Game,
    episode: usize,
    max_ticks: u64,
    rng: &mut ChaCha8Rng,
) -> Result<EpisodeRecord> {
    for id in 0..game.num_players() {
        game.reset_player(id)?;
    }

    let start = game.tick();
    let mut eliminations = 0;
    while !game.is_settled() && game.tick() - start < max_ticks {
        let actions = random_actions(game.config().action_space, game.num_players(), rng);
        let events = game
            .step(&actions)
            .with_context(|| format!("Tick {} rejected", game.tick()))?;
        eliminations += events
            .iter()
            .filter(|e| matches!(e, GameEvent::Eliminated { .. }))
            .count();
    }

    Ok(EpisodeRecord {
        episode,
        ticks: game.tick() - start,
        eliminations,
        players: game.snapshots(),
    })
}

/// Compute aggregate statistics from episode records
fn compute_statistics(episodes: Vec<EpisodeRecord>) -> PlayStatistics {
    let players = episodes.iter().flat_map(|e| e.players.iter());
    let wins = players.clone().filter(|p| p.winner).count();
    let survivors = players.clone().filter(|p| p.alive && !p.winner).count();
    let deaths = players.clone().filter(|p| !p.alive).count();
    let best_captures = players
        .filter(|p| p.alive)
        .map(|p| p.captures)
        .max()
        .unwrap_or(0);

    let total_ticks: u64 = episodes.iter().map(|e| e.ticks).sum();
    let avg_ticks = if episodes.is_empty() {
        0.0
    } else {
        total_ticks as f32 / episodes.len() as f32
    };

    PlayStatistics {
        episodes,
        wins,
        survivors,
        deaths,
        avg_ticks,
        best_captures,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// One uniformly random action per player slot
pub fn random_actions(action_space: ActionSpace, num_players: usize, rng: &mut ChaCha8Rng) -> Vec<f32> {
    (0..num_players)
        .map(|_| match action_space {
            ActionSpace::Discrete => rng.gen_range(0..6) as f32,
            ActionSpace::Continuous => rng.gen_range(-PI..PI),
        })
        .collect()
}

fn outcome(player: &PlayerSnapshot) -> &'static str {
    if player.winner {
        "won"
    } else if player.alive {
        "alive"
    } else {
        "dead"
    }
}

/// Print results as JSON
fn print_json_results(stats: &PlayStatistics) {
    if let Ok(json) = serde_json::to_string_pretty(stats) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(stats: &PlayStatistics) {
    println!("\n=== Play Results ===");
    println!("Episodes:    {}", stats.episodes.len());
    println!("Wins:        {}", stats.wins);
    println!("Survivors:   {}", stats.survivors);
    println!("Deaths:      {}", stats.deaths);
    println!("Avg ticks:   {:.1}", stats.avg_ticks);
    println!("Best final:  {} tiles", stats.best_captures);

    println!("\nEpisode details:");
    for episode in &stats.episodes {
        println!("  Episode {} ({} ticks):", episode.episode, episode.ticks);
        for p in &episode.players {
            println!(
                "    Player {}: {:<5} kills={} captures={}",
                p.id,
                outcome(p),
                p.kills,
                p.captures
            );
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
