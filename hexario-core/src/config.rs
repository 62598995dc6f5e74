//! Game configuration
//!
//! Supplied once when a game is created and immutable afterwards.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::MIN_MAP_RADIUS;
use crate::error::{GameError, Result};
use crate::player::DEFAULT_VELOCITY;

/// How a per-tick action is interpreted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSpace {
    /// Neighbor direction index 0-5; the player snaps to that tile
    #[default]
    Discrete,
    /// Heading angle in radians; the player moves `velocity` units
    Continuous,
}

/// Which tiles a feature observation covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    /// Hex area around the player's head
    #[default]
    Local,
    /// Whole map, masked outside the player's visibility window
    Global,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Border ring distance from the center
    pub map_radius: i32,
    pub num_players: usize,
    pub action_space: ActionSpace,
    pub perspective: Perspective,
    /// Observation window, in `hex_area` radius units
    pub observation_radius: i32,
    /// Movement per tick in continuous mode
    pub velocity: f32,
    /// Spawn RNG seed (None = entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_radius: 10,
            num_players: 1,
            action_space: ActionSpace::Discrete,
            perspective: Perspective::Local,
            observation_radius: 5,
            velocity: DEFAULT_VELOCITY,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default config for `num_players` on a map of `map_radius`
    pub fn new(map_radius: i32, num_players: usize) -> Self {
        Self {
            map_radius,
            num_players,
            ..Default::default()
        }
    }

    pub fn with_action_space(mut self, action_space: ActionSpace) -> Self {
        self.action_space = action_space;
        self
    }

    pub fn with_perspective(mut self, perspective: Perspective) -> Self {
        self.perspective = perspective;
        self
    }

    pub fn with_observation_radius(mut self, radius: i32) -> Self {
        self.observation_radius = radius;
        self
    }

    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the engine cannot run
    pub fn validate(&self) -> Result<()> {
        if self.map_radius < MIN_MAP_RADIUS {
            return Err(GameError::MapTooSmall {
                radius: self.map_radius,
                min: MIN_MAP_RADIUS,
            });
        }
        if self.num_players == 0 {
            return Err(GameError::InvalidConfig(
                "at least one player is required".to_string(),
            ));
        }
        if self.observation_radius < 2 {
            return Err(GameError::InvalidConfig(format!(
                "observation radius must be at least 2, got {}",
                self.observation_radius
            )));
        }
        if !(self.velocity > 0.0 && self.velocity <= 1.0) {
            return Err(GameError::InvalidConfig(format!(
                "velocity must be in (0, 1], got {}",
                self.velocity
            )));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
