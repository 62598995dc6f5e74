//! HEXARIO Core - Territory game engine
//!
//! This crate provides the simulation for HEXARIO, a paper.io style
//! territory game on a hexagonal grid:
//! - Geometry (axial tiles, cube rounding, rings and areas)
//! - Board ownership and enclosure detection
//! - Player state (trail, captures, kills)
//! - The tick engine: movement, collisions, claim closing, winning
//! - Feature observations for external agents

pub mod geometry;
pub mod board;
pub mod player;
pub mod game;
pub mod observation;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use geometry::{hex_area, hex_distance, hex_ring, BoundingBox, CartCoord, Tile, CENTER, DIRECTIONS};
pub use board::{Board, Owner, MIN_MAP_RADIUS};
pub use player::{Player, PlayerId, PlayerSnapshot, STARTING_CAPTURES};
pub use game::{EliminationCause, Game, GameEvent};
pub use observation::FeatureCode;
pub use config::{ActionSpace, GameConfig, Perspective};
pub use error::{GameError, Result};
