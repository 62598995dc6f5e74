//! Feature observations for external agents
//!
//! Every tile is reduced to a single [`FeatureCode`] and written into a
//! caller-owned `f32` buffer whose layout follows [`hex_area`] order.

use serde::{Deserialize, Serialize};

use crate::board::Owner;
use crate::config::Perspective;
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::geometry::{area_size, hex_area, hex_distance, Tile, CENTER, DIRECTIONS};
use crate::player::PlayerId;

/// What a single observation cell shows, as seen by one player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeatureCode {
    Invalid,
    Free,
    OwnClaim,
    OwnCapture,
    OwnPosition,
    EnemyClaim,
    EnemyCapture,
    EnemyPosition,
    Border,
}

impl FeatureCode {
    pub fn value(self) -> f32 {
        match self {
            FeatureCode::Invalid => -1.0,
            FeatureCode::Free => 0.0,
            FeatureCode::OwnClaim => 2.0,
            FeatureCode::OwnCapture => 3.0,
            FeatureCode::OwnPosition => 4.0,
            FeatureCode::EnemyClaim => 5.0,
            FeatureCode::EnemyCapture => 6.0,
            FeatureCode::EnemyPosition => 7.0,
            FeatureCode::Border => 8.0,
        }
    }
}

impl Game {
    /// Buffer length expected by [`Game::write_observation`]
    pub fn observation_size(&self) -> usize {
        match self.config().perspective {
            Perspective::Local => area_size(self.config().observation_radius),
            Perspective::Global => area_size(self.board().radius()),
        }
    }

    /// Code of `tile` from the point of view of `viewer`.
    ///
    /// Ownership gives the base code; living players then paint their head
    /// and trail over it, later slots over earlier ones.
    pub fn feature_code(&self, viewer: PlayerId, tile: Tile) -> FeatureCode {
        let board = self.board();
        if !board.is_valid(tile) {
            return FeatureCode::Invalid;
        }

        let mut code = match board.owner(tile) {
            Owner::Border => FeatureCode::Border,
            Owner::Free => FeatureCode::Free,
            Owner::Player(owner) if owner == viewer => FeatureCode::OwnCapture,
            Owner::Player(_) => FeatureCode::EnemyCapture,
        };

        for player in self.players().iter().filter(|p| p.is_alive()) {
            let own = player.id() == viewer;
            if player.head() == tile {
                code = if own {
                    FeatureCode::OwnPosition
                } else {
                    FeatureCode::EnemyPosition
                };
            } else if player.has_claimed(tile) {
                code = if own {
                    FeatureCode::OwnClaim
                } else {
                    FeatureCode::EnemyClaim
                };
            }
        }
        code
    }

    /// Fill `out` with the observation of player `id`.
    ///
    /// Dead players observe an all-zero buffer.
    pub fn write_observation(&self, id: PlayerId, out: &mut [f32]) -> Result<()> {
        let player = self.player(id)?;
        let expected = self.observation_size();
        if out.len() != expected {
            return Err(GameError::ObservationSizeMismatch {
                expected,
                got: out.len(),
            });
        }

        if player.is_dead() {
            out.fill(0.0);
            return Ok(());
        }

        let head = player.head();
        let radius = self.config().observation_radius;
        match self.config().perspective {
            Perspective::Local => {
                for (cell, tile) in out.iter_mut().zip(hex_area(head, radius)) {
                    *cell = self.feature_code(id, tile).value();
                }
            }
            Perspective::Global => {
                for (cell, tile) in out.iter_mut().zip(hex_area(CENTER, self.board().radius())) {
                    *cell = if hex_distance(head, tile) < radius {
                        self.feature_code(id, tile).value()
                    } else {
                        FeatureCode::Invalid.value()
                    };
                }
            }
        }
        Ok(())
    }

    pub fn observation(&self, id: PlayerId) -> Result<Vec<f32>> {
        let mut out = vec![0.0; self.observation_size()];
        self.write_observation(id, &mut out)?;
        Ok(out)
    }

    /// Steps from the head of `id` to the first border tile, per direction,
    /// capped at twice the map radius
    pub fn distances_to_border(&self, id: PlayerId) -> Result<[f32; 6]> {
        let head = self.player(id)?.head();
        let max_dist = 2 * self.board().radius();
        let mut result = [max_dist as f32; 6];

        for (slot, direction) in result.iter_mut().zip(DIRECTIONS) {
            let mut tile = head;
            for d in 1..max_dist {
                tile = tile.add(direction);
                if self.board().is_border(tile) {
                    *slot = d as f32;
                    break;
                }
            }
        }
        Ok(result)
    }
}
