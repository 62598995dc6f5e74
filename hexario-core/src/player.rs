//! Per-player state
//!
//! A player carries no rules of its own; the game decides when it moves,
//! claims, captures or dies. Slots are created once and revived with
//! [`Player::spawn`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, CartCoord, Tile};

/// Index of a player slot, 0..N
pub type PlayerId = usize;

/// Territory a freshly spawned player starts with (`hex_area(spawn, 2)`)
pub const STARTING_CAPTURES: i32 = 7;

/// Default movement per tick in continuous mode, in tile units
pub const DEFAULT_VELOCITY: f32 = 0.1;

/// Path waypoints are only recorded once the player moved this far
const PATH_SPACING: f32 = 1.0;

#[derive(Clone, Debug)]
pub struct Player {
    id: PlayerId,
    dead: bool,
    winner: bool,
    kills: u32,
    /// Tiles currently owned; reaching zero through a loss eliminates the player
    captures: i32,
    velocity: f32,
    position: CartCoord,
    /// Always `position.to_tile()`
    head: Tile,
    /// Claimed but not yet captured tiles
    claim: FxHashSet<Tile>,
    /// Extent of everything the player owns or claims
    bounding_box: BoundingBox,
    /// Waypoints of the open trail, for drawing only
    path: Vec<CartCoord>,
}

impl Player {
    /// Create an empty slot; it stays dead until spawned
    pub fn new(id: PlayerId, velocity: f32) -> Self {
        Self {
            id,
            dead: true,
            winner: false,
            kills: 0,
            captures: 0,
            velocity,
            position: CartCoord::default(),
            head: Tile::new(0, 0),
            claim: FxHashSet::default(),
            bounding_box: BoundingBox::around(Tile::new(0, 0), 0),
            path: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn is_winner(&self) -> bool {
        self.winner
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn captures(&self) -> i32 {
        self.captures
    }

    /// Size of the open trail
    pub fn num_claims(&self) -> usize {
        self.claim.len()
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn position(&self) -> CartCoord {
        self.position
    }

    pub fn head(&self) -> Tile {
        self.head
    }

    pub fn claim(&self) -> &FxHashSet<Tile> {
        &self.claim
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    pub fn path(&self) -> &[CartCoord] {
        &self.path
    }

    pub fn has_any_claim(&self) -> bool {
        !self.claim.is_empty()
    }

    pub fn has_claimed(&self, tile: Tile) -> bool {
        self.claim.contains(&tile)
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Start a fresh life on `tile`.
    ///
    /// The caller marks the spawn area owned on the board.
    pub fn spawn(&mut self, tile: Tile) {
        self.dead = false;
        self.winner = false;
        self.kills = 0;
        self.captures = STARTING_CAPTURES;
        self.claim.clear();
        self.path.clear();
        self.head = tile;
        self.position = tile.to_cart();
        self.bounding_box = BoundingBox::around(tile, 1);
    }

    pub fn set_position(&mut self, position: CartCoord) {
        self.position = position;
        self.head = position.to_tile();
    }

    /// Add `tile` to the open trail
    pub fn claim_tile(&mut self, tile: Tile) {
        let needs_waypoint = match self.path.last() {
            Some(last) => self.position.distance_to(*last) > PATH_SPACING,
            None => true,
        };
        if needs_waypoint {
            self.path.push(self.position);
        }

        if self.claim.insert(tile) {
            self.bounding_box.extend(self.head);
        }
    }

    /// Close the trail, handing back the tiles that were claimed
    pub fn approve_claim(&mut self) -> FxHashSet<Tile> {
        self.path.clear();
        std::mem::take(&mut self.claim)
    }

    pub(crate) fn set_dead(&mut self) {
        self.dead = true;
    }

    pub(crate) fn set_winner(&mut self) {
        self.winner = true;
    }

    pub(crate) fn add_kill(&mut self) {
        self.kills += 1;
    }

    pub(crate) fn add_captures(&mut self, delta: i32) {
        self.captures += delta;
        assert!(
            self.captures >= 0,
            "player {} has negative captures ({})",
            self.id,
            self.captures
        );
    }
}

/// Players are the same player iff their slots match
impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

/// Read-only copy of a player's public state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub alive: bool,
    pub winner: bool,
    pub kills: u32,
    pub captures: i32,
    pub claims: usize,
    pub head: Tile,
    pub position: CartCoord,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            alive: !player.dead,
            winner: player.winner,
            kills: player.kills,
            captures: player.captures,
            claims: player.claim.len(),
            head: player.head,
            position: player.position,
        }
    }
}
