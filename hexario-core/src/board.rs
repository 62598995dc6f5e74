//! Tile ownership and the enclosure flood fill
//!
//! Map for radius = 3 (playable tiles are within distance 2 of the center,
//! the border ring sits at distance 3):
//!
//! ```text
//!        (0,-3) ---------
//!           \
//!            \
//! (-3,0) ----------------- (3,0)
//!                \
//!                 \
//!         ---------(0,3)
//! ```

use std::collections::VecDeque;

use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::geometry::{hex_area, hex_distance, hex_ring, BoundingBox, Tile, CENTER};
use crate::player::PlayerId;

/// Smallest radius that still leaves a spawn region
pub const MIN_MAP_RADIUS: i32 = 4;

/// Owner of a single tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Free,
    Border,
    Player(PlayerId),
}

impl Owner {
    pub fn player(self) -> Option<PlayerId> {
        match self {
            Owner::Player(id) => Some(id),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    radius: i32,
    /// Playable tiles, i.e. those strictly inside the border ring
    num_tiles: usize,
    /// Sparse: absent tiles are free
    tiles: FxHashMap<Tile, Owner>,
    /// Tiles a player may be spawned on at random
    spawn_region: Vec<Tile>,
}

impl Board {
    pub fn new(radius: i32) -> Result<Self> {
        if radius < MIN_MAP_RADIUS {
            return Err(GameError::MapTooSmall {
                radius,
                min: MIN_MAP_RADIUS,
            });
        }

        let r = radius as usize;
        let mut board = Self {
            radius,
            num_tiles: 1 + 3 * r * (r - 1),
            tiles: FxHashMap::default(),
            // every tile within `radius - 3` of the center
            spawn_region: hex_area(CENTER, radius - 2),
        };
        board.reset();
        Ok(board)
    }

    /// Drop all ownership and seed the border again
    pub fn reset(&mut self) {
        self.tiles.clear();
        for tile in hex_ring(CENTER, self.radius + 1) {
            self.tiles.insert(tile, Owner::Border);
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn num_tiles(&self) -> usize {
        self.num_tiles
    }

    /// Within the map, border ring included
    pub fn is_valid(&self, tile: Tile) -> bool {
        hex_distance(CENTER, tile) <= self.radius
    }

    pub fn owner(&self, tile: Tile) -> Owner {
        self.tiles.get(&tile).copied().unwrap_or(Owner::Free)
    }

    pub fn is_owner(&self, tile: Tile, player: PlayerId) -> bool {
        self.owner(tile) == Owner::Player(player)
    }

    pub fn is_border(&self, tile: Tile) -> bool {
        self.owner(tile) == Owner::Border
    }

    /// Every non-free tile with its owner
    pub fn all(&self) -> impl Iterator<Item = (Tile, Owner)> + '_ {
        self.tiles.iter().map(|(&tile, &owner)| (tile, owner))
    }

    pub fn all_by_owner(&self, player: PlayerId) -> FxHashSet<Tile> {
        self.tiles
            .iter()
            .filter(|&(_, &owner)| owner == Owner::Player(player))
            .map(|(&tile, _)| tile)
            .collect()
    }

    pub fn count_by_owner(&self, player: PlayerId) -> usize {
        self.tiles
            .values()
            .filter(|&&owner| owner == Owner::Player(player))
            .count()
    }

    pub fn spawn_region(&self) -> &[Tile] {
        &self.spawn_region
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Border tiles are permanent and silently keep their owner
    pub fn set_owner(&mut self, tile: Tile, player: PlayerId) {
        if self.is_border(tile) {
            return;
        }
        self.tiles.insert(tile, Owner::Player(player));
    }

    pub fn set_owner_all<I>(&mut self, tiles: I, player: PlayerId)
    where
        I: IntoIterator<Item = Tile>,
    {
        for tile in tiles {
            self.set_owner(tile, player);
        }
    }

    pub fn set_free(&mut self, tile: Tile) {
        if self.is_border(tile) {
            return;
        }
        self.tiles.remove(&tile);
    }

    /// Release every tile of `player`, returning how many there were
    pub fn free_all_by_owner(&mut self, player: PlayerId) -> usize {
        let before = self.tiles.len();
        self.tiles.retain(|_, owner| *owner != Owner::Player(player));
        before - self.tiles.len()
    }

    /// Uniform sample from the spawn region
    pub fn random_tile<R: Rng>(&self, rng: &mut R) -> Tile {
        self.spawn_region[rng.gen_range(0..self.spawn_region.len())]
    }

    // ========================================================================
    // INCLUSIONS
    // ========================================================================

    /// Tiles not owned by `player` but walled in by its territory.
    ///
    /// 1. Collect every tile of the player's bounding box, grown by one in
    ///    each direction, that the player does not own.
    /// 2. Flood fill over those candidates from the grown box's min corner,
    ///    which always lies outside the territory.
    /// 3. Whatever the fill did not reach is enclosed.
    pub fn inclusions(&self, player: PlayerId, bounds: &BoundingBox) -> FxHashSet<Tile> {
        let scope = bounds.expanded(1);
        let mut candidates: FxHashSet<Tile> = scope
            .tiles()
            .filter(|&tile| !self.is_owner(tile, player))
            .collect();

        let root = scope.min;
        candidates.remove(&root);
        let mut queue = VecDeque::from([root]);

        while let Some(front) = queue.pop_front() {
            for neighbor in front.neighbors() {
                if candidates.remove(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        candidates
    }
}
