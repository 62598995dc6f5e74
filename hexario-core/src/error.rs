//! Error types for caller contract violations
//!
//! Broken internal invariants are not represented here; those panic.

use crate::geometry::Tile;
use crate::player::PlayerId;

/// Errors reported by the engine when a caller breaks its contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("player {id} does not exist (game has {num_players} players)")]
    InvalidPlayer { id: PlayerId, num_players: usize },

    #[error("expected {expected} actions, one per player, got {got}")]
    ActionCountMismatch { expected: usize, got: usize },

    #[error("invalid action {action} for player {player}")]
    InvalidAction { player: PlayerId, action: f32 },

    #[error("observation buffer has length {got}, required is {expected}")]
    ObservationSizeMismatch { expected: usize, got: usize },

    #[error("map radius {radius} is too small, minimum is {min}")]
    MapTooSmall { radius: i32, min: i32 },

    #[error("tile {tile} is too close to the border to spawn on")]
    InvalidSpawn { tile: Tile },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
