//! Game state and the per-tick rules

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Owner};
use crate::config::{ActionSpace, GameConfig};
use crate::error::{GameError, Result};
use crate::geometry::{hex_area, hex_distance, CartCoord, Tile, CENTER};
use crate::player::{Player, PlayerId, PlayerSnapshot};

// ============================================================================
// EVENTS
// ============================================================================

/// Why a player left the arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Head moved onto a border tile
    Border,
    /// Both heads landed on the same tile
    HeadOn,
    /// Two players passed through each other's trails
    Crossing,
    /// Another head landed on the open trail
    TrailCut,
    /// Last owned tile captured by an opponent
    Surrounded,
    /// Last owned tile taken by another player's spawn
    Displaced,
}

/// Something that happened during a tick or a respawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Eliminated {
        player: PlayerId,
        cause: EliminationCause,
        killer: Option<PlayerId>,
    },
    /// A trail was closed; `tiles` counts trail and enclosed tiles together
    Captured { player: PlayerId, tiles: usize },
    Won { player: PlayerId },
}

// ============================================================================
// GAME
// ============================================================================

/// The simulation: one board, a fixed set of player slots and the spawn RNG.
///
/// Callers advance it with [`Game::step`] and read it between ticks; nothing
/// outside this type mutates the board or the players.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    players: Vec<Player>,
    rng: ChaCha8Rng,
    tick: u64,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a game seeded from `config.seed`, or from entropy if unset
    pub fn new(config: GameConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Create a game drawing spawn tiles from `rng`.
    ///
    /// Every player is spawned at a random tile before this returns.
    pub fn with_rng(config: GameConfig, rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.map_radius)?;
        let players = (0..config.num_players)
            .map(|id| Player::new(id, config.velocity))
            .collect();

        let mut game = Self {
            config,
            board,
            players,
            rng,
            tick: 0,
        };
        for id in 0..game.players.len() {
            game.reset_player(id)?;
        }
        Ok(game)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    /// Completed ticks since construction
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id).ok_or(GameError::InvalidPlayer {
            id,
            num_players: self.players.len(),
        })
    }

    pub fn snapshots(&self) -> Vec<PlayerSnapshot> {
        self.players.iter().map(PlayerSnapshot::from).collect()
    }

    /// True once every player is dead or has won
    pub fn is_settled(&self) -> bool {
        self.players.iter().all(|p| p.is_dead() || p.is_winner())
    }

    // ========================================================================
    // SPAWNING
    // ========================================================================

    /// Respawn `id` on a random tile of the spawn region
    pub fn reset_player(&mut self, id: PlayerId) -> Result<Vec<GameEvent>> {
        self.player(id)?;
        let tile = self.board.random_tile(&mut self.rng);
        self.spawn(id, tile)
    }

    /// Respawn `id` on `tile`, which must be at least two steps from the border
    pub fn reset_player_at(&mut self, id: PlayerId, tile: Tile) -> Result<Vec<GameEvent>> {
        self.player(id)?;
        if hex_distance(CENTER, tile) > self.board.radius() - 2 {
            return Err(GameError::InvalidSpawn { tile });
        }
        self.spawn(id, tile)
    }

    fn spawn(&mut self, id: PlayerId, tile: Tile) -> Result<Vec<GameEvent>> {
        let mut events = Vec::new();
        self.board.free_all_by_owner(id);
        self.players[id].spawn(tile);

        for t in hex_area(tile, 2) {
            if let Some(prev) = self.board.owner(t).player() {
                if prev != id {
                    self.players[prev].add_captures(-1);
                    if self.players[prev].captures() <= 0 {
                        self.eliminate(prev, EliminationCause::Displaced, None, &mut events);
                    }
                }
            }
            self.board.set_owner(t, id);
        }

        debug!(player = id, %tile, "spawned");
        Ok(events)
    }

    // ========================================================================
    // TICK
    // ========================================================================

    /// Advance one tick with one action per player slot.
    ///
    /// Actions of dead players are ignored. The whole vector is checked
    /// before any state changes, so a rejected call leaves the game untouched.
    pub fn step(&mut self, actions: &[f32]) -> Result<Vec<GameEvent>> {
        self.validate_actions(actions)?;

        let mut events = Vec::new();
        self.move_players(actions);
        self.check_borders(&mut events);
        if self.players.len() > 1 {
            self.resolve_collisions(&mut events);
        }
        self.resolve_claims(&mut events);

        self.tick += 1;
        Ok(events)
    }

    fn validate_actions(&self, actions: &[f32]) -> Result<()> {
        if actions.len() != self.players.len() {
            return Err(GameError::ActionCountMismatch {
                expected: self.players.len(),
                got: actions.len(),
            });
        }

        for (player, &action) in self.players.iter().zip(actions) {
            if player.is_dead() {
                continue;
            }
            let valid = match self.config.action_space {
                ActionSpace::Discrete => {
                    (0.0..6.0).contains(&action) && action.fract() == 0.0
                }
                ActionSpace::Continuous => action.is_finite(),
            };
            if !valid {
                return Err(GameError::InvalidAction {
                    player: player.id(),
                    action,
                });
            }
        }
        Ok(())
    }

    /// Phase 1
    fn move_players(&mut self, actions: &[f32]) {
        let action_space = self.config.action_space;
        for (player, &action) in self.players.iter_mut().zip(actions) {
            if player.is_dead() {
                continue;
            }
            let position = match action_space {
                ActionSpace::Discrete => player.head().neighbor(action as usize).to_cart(),
                ActionSpace::Continuous => {
                    let (sin, cos) = action.sin_cos();
                    let current = player.position();
                    let velocity = player.velocity();
                    CartCoord::new(current.x - velocity * sin, current.y + velocity * cos)
                }
            };
            player.set_position(position);
        }
    }

    /// Phase 2
    fn check_borders(&mut self, events: &mut Vec<GameEvent>) {
        for id in 0..self.players.len() {
            let player = &self.players[id];
            if player.is_alive() && self.board.is_border(player.head()) {
                self.eliminate(id, EliminationCause::Border, None, events);
            }
        }
    }

    /// Phase 3, over unordered pairs of living players
    fn resolve_collisions(&mut self, events: &mut Vec<GameEvent>) {
        let n = self.players.len();
        for a in 0..n {
            for b in (a + 1)..n {
                if self.players[a].is_dead() || self.players[b].is_dead() {
                    continue;
                }
                self.resolve_pair(a, b, events);
            }
        }
    }

    fn resolve_pair(&mut self, a: PlayerId, b: PlayerId, events: &mut Vec<GameEvent>) {
        let head_a = self.players[a].head();
        let head_b = self.players[b].head();

        if head_a == head_b {
            match self.board.owner(head_a) {
                Owner::Player(owner) if owner == a => {
                    self.eliminate(b, EliminationCause::HeadOn, Some(a), events);
                }
                Owner::Player(owner) if owner == b => {
                    self.eliminate(a, EliminationCause::HeadOn, Some(b), events);
                }
                _ => {
                    self.eliminate(a, EliminationCause::HeadOn, None, events);
                    self.eliminate(b, EliminationCause::HeadOn, None, events);
                }
            }
            return;
        }

        let a_cuts_b = self.players[b].has_claimed(head_a);
        let b_cuts_a = self.players[a].has_claimed(head_b);
        match (a_cuts_b, b_cuts_a) {
            (true, true) => {
                // Standing on your own territory protects you
                let a_dies = !self.board.is_owner(head_a, a);
                let b_dies = !self.board.is_owner(head_b, b);
                if a_dies {
                    let killer = (!b_dies).then_some(b);
                    self.eliminate(a, EliminationCause::Crossing, killer, events);
                }
                if b_dies {
                    let killer = (!a_dies).then_some(a);
                    self.eliminate(b, EliminationCause::Crossing, killer, events);
                }
            }
            (true, false) => self.eliminate(b, EliminationCause::TrailCut, Some(a), events),
            (false, true) => self.eliminate(a, EliminationCause::TrailCut, Some(b), events),
            (false, false) => {}
        }
    }

    /// Phase 4
    fn resolve_claims(&mut self, events: &mut Vec<GameEvent>) {
        for id in 0..self.players.len() {
            let player = &self.players[id];
            if player.is_dead() {
                continue;
            }
            let head = player.head();
            let has_trail = player.has_any_claim();
            if !self.board.is_owner(head, id) {
                self.players[id].claim_tile(head);
            } else if has_trail {
                self.close_trail(id, events);
            }
        }
    }

    fn close_trail(&mut self, id: PlayerId, events: &mut Vec<GameEvent>) {
        let trail = self.players[id].approve_claim();
        let mut captured = self.approve_captures(id, trail, events);

        let enclosed = self.board.inclusions(id, &self.players[id].bounding_box());
        debug_assert!(
            enclosed.iter().all(|&t| !self.board.is_owner(t, id)),
            "inclusions of player {id} overlap its own tiles"
        );
        captured += self.approve_captures(id, enclosed, events);

        let captures = self.players[id].captures();
        debug!(player = id, tiles = captured, captures, "trail closed");
        events.push(GameEvent::Captured {
            player: id,
            tiles: captured,
        });

        if captures as usize == self.board.num_tiles() && !self.players[id].is_winner() {
            self.players[id].set_winner();
            info!(player = id, tick = self.tick, "player owns the whole map");
            events.push(GameEvent::Won { player: id });
        }
    }

    /// Transfer `tiles` to `id`, returning how many changed hands.
    ///
    /// Border tiles are skipped. A previous owner whose capture count drops
    /// to zero is eliminated and credited to `id`.
    fn approve_captures<I>(&mut self, id: PlayerId, tiles: I, events: &mut Vec<GameEvent>) -> usize
    where
        I: IntoIterator<Item = Tile>,
    {
        let mut count = 0;
        for tile in tiles {
            match self.board.owner(tile) {
                Owner::Border => continue,
                Owner::Player(prev) if prev == id => continue,
                Owner::Player(prev) => {
                    self.players[prev].add_captures(-1);
                    if self.players[prev].captures() <= 0 {
                        self.eliminate(prev, EliminationCause::Surrounded, Some(id), events);
                    }
                }
                Owner::Free => {}
            }
            self.board.set_owner(tile, id);
            count += 1;
        }
        self.players[id].add_captures(count as i32);
        count
    }

    /// Mark `id` dead and release its territory; no-op if already dead
    fn eliminate(
        &mut self,
        id: PlayerId,
        cause: EliminationCause,
        killer: Option<PlayerId>,
        events: &mut Vec<GameEvent>,
    ) {
        if self.players[id].is_dead() {
            return;
        }
        self.players[id].set_dead();
        let freed = self.board.free_all_by_owner(id);
        if let Some(killer) = killer {
            self.players[killer].add_kill();
        }

        debug!(player = id, ?cause, ?killer, freed, "player eliminated");
        events.push(GameEvent::Eliminated {
            player: id,
            cause,
            killer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::hex_ring;

    /// Game with explicit spawn tiles, applied in slot order
    fn game_with(radius: i32, spawns: &[Tile]) -> Game {
        let config = GameConfig::new(radius, spawns.len()).with_seed(0);
        let mut game = Game::new(config).unwrap();
        for (id, &tile) in spawns.iter().enumerate() {
            game.reset_player_at(id, tile).unwrap();
        }
        game
    }

    fn step_discrete(game: &mut Game, actions: &[usize]) -> Vec<GameEvent> {
        let actions: Vec<f32> = actions.iter().map(|&a| a as f32).collect();
        game.step(&actions).unwrap()
    }

    fn eliminated(events: &[GameEvent]) -> Vec<(PlayerId, EliminationCause, Option<PlayerId>)> {
        events
            .iter()
            .filter_map(|e| match *e {
                GameEvent::Eliminated {
                    player,
                    cause,
                    killer,
                } => Some((player, cause, killer)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new(GameConfig::new(10, 4).with_seed(3)).unwrap();
        assert_eq!(game.num_players(), 4);
        assert_eq!(game.tick(), 0);
        assert!(!game.is_settled());
        for player in game.players() {
            assert!(hex_distance(CENTER, player.head()) <= 7);
            assert_eq!(
                player.captures() as usize,
                game.board().count_by_owner(player.id())
            );
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert_eq!(
            Game::new(GameConfig::new(3, 1)).unwrap_err(),
            GameError::MapTooSmall { radius: 3, min: 4 }
        );
    }

    #[test]
    fn test_spawn_claims_area() {
        let game = game_with(10, &[Tile::new(2, 1)]);
        let player = game.player(0).unwrap();
        assert!(player.is_alive());
        assert_eq!(player.captures(), 7);
        let owned = game.board().all_by_owner(0);
        assert_eq!(owned.len(), 7);
        assert!(hex_area(Tile::new(2, 1), 2).iter().all(|t| owned.contains(t)));
    }

    #[test]
    fn test_invalid_player() {
        let mut game = game_with(10, &[CENTER]);
        assert_eq!(
            game.player(5).unwrap_err(),
            GameError::InvalidPlayer {
                id: 5,
                num_players: 1
            }
        );
        assert!(game.reset_player(1).is_err());
    }

    #[test]
    fn test_invalid_spawn_tile() {
        let mut game = game_with(6, &[CENTER]);
        assert!(game.reset_player_at(0, Tile::new(4, 0)).is_ok());
        assert_eq!(
            game.reset_player_at(0, Tile::new(5, 0)).unwrap_err(),
            GameError::InvalidSpawn {
                tile: Tile::new(5, 0)
            }
        );
    }

    #[test]
    fn test_action_count_mismatch() {
        let mut game = game_with(10, &[CENTER, Tile::new(-5, 5)]);
        assert_eq!(
            game.step(&[0.0]).unwrap_err(),
            GameError::ActionCountMismatch {
                expected: 2,
                got: 1
            }
        );
        assert_eq!(game.tick(), 0);
    }

    #[test]
    fn test_invalid_action_leaves_state_untouched() {
        let mut game = game_with(10, &[CENTER, Tile::new(-5, 5)]);
        let before = game.snapshots();

        for bad in [6.0, -1.0, 2.5, f32::NAN] {
            let err = game.step(&[0.0, bad]).unwrap_err();
            assert!(matches!(err, GameError::InvalidAction { player: 1, .. }));
        }
        assert_eq!(game.snapshots(), before);
        assert_eq!(game.tick(), 0);
    }

    #[test]
    fn test_dead_player_action_ignored() {
        let mut game = game_with(4, &[CENTER, Tile::new(-2, 0)]);
        for other in [3, 0, 3, 0] {
            step_discrete(&mut game, &[0, other]);
        }
        assert!(game.player(0).unwrap().is_dead());
        assert!(game.player(1).unwrap().is_alive());
        assert!(game.step(&[f32::NAN, 3.0]).is_ok());
        assert_eq!(game.player(1).unwrap().head(), Tile::new(-3, 0));
    }

    #[test]
    fn test_discrete_movement_snaps() {
        let mut game = game_with(10, &[CENTER]);
        step_discrete(&mut game, &[5]);
        let player = game.player(0).unwrap();
        assert_eq!(player.head(), Tile::new(0, 1));
        assert_eq!(player.position(), Tile::new(0, 1).to_cart());
        assert_eq!(game.tick(), 1);
    }

    #[test]
    fn test_continuous_movement() {
        let config = GameConfig::new(10, 1)
            .with_seed(0)
            .with_action_space(ActionSpace::Continuous);
        let mut game = Game::new(config).unwrap();
        game.reset_player_at(0, CENTER).unwrap();

        game.step(&[0.0]).unwrap();
        let position = game.player(0).unwrap().position();
        assert!(position.x.abs() < 1e-6);
        assert!((position.y - 0.1).abs() < 1e-6);
        assert_eq!(game.player(0).unwrap().head(), CENTER);

        for _ in 1..30 {
            game.step(&[0.0]).unwrap();
        }
        let player = game.player(0).unwrap();
        assert!((player.position().y - 3.0).abs() < 1e-3);
        assert_eq!(player.head(), player.position().to_tile());
        assert_eq!(player.head(), Tile::new(-1, 2));
        assert!(player.has_claimed(Tile::new(-1, 2)));
    }

    #[test]
    fn test_border_death() {
        let mut game = game_with(4, &[CENTER]);
        for _ in 0..3 {
            assert!(step_discrete(&mut game, &[0]).is_empty());
        }
        let player = game.player(0).unwrap();
        assert_eq!(player.num_claims(), 2);
        assert!(player.has_claimed(Tile::new(2, 0)));
        assert!(player.has_claimed(Tile::new(3, 0)));

        let events = step_discrete(&mut game, &[0]);
        assert_eq!(eliminated(&events), vec![(0, EliminationCause::Border, None)]);
        assert!(game.player(0).unwrap().is_dead());
        assert_eq!(game.board().count_by_owner(0), 0);
        assert!(game.board().is_border(Tile::new(4, 0)));
        assert!(game.is_settled());
    }

    #[test]
    fn test_loop_captures_enclosed_tiles() {
        let mut game = game_with(10, &[CENTER, Tile::new(-5, 5)]);
        let path = [0, 0, 0, 1, 2, 2, 3, 4, 4];
        let mut captured = Vec::new();
        for (t, &a) in path.iter().enumerate() {
            let other = if t % 2 == 0 { 0 } else { 3 };
            for event in step_discrete(&mut game, &[a, other]) {
                assert!(!matches!(event, GameEvent::Eliminated { .. }));
                if let GameEvent::Captured { player, tiles } = event {
                    captured.push((player, tiles));
                }
            }
        }

        // 7 trail tiles plus 3 walled-in ones
        assert_eq!(captured, vec![(0, 10)]);
        let player = game.player(0).unwrap();
        assert_eq!(player.captures(), 17);
        assert!(!player.has_any_claim());
        assert!(player.path().is_empty());
        assert_eq!(game.board().count_by_owner(0), 17);
        assert_eq!(game.player(1).unwrap().captures(), 7);
    }

    #[test]
    fn test_head_on_owner_survives() {
        let mut game = game_with(10, &[CENTER, Tile::new(3, -1)]);
        step_discrete(&mut game, &[0, 3]);
        let events = step_discrete(&mut game, &[0, 5]);

        assert_eq!(eliminated(&events), vec![(0, EliminationCause::HeadOn, Some(1))]);
        assert!(game.player(0).unwrap().is_dead());
        assert_eq!(game.board().count_by_owner(0), 0);
        let survivor = game.player(1).unwrap();
        assert!(survivor.is_alive());
        assert_eq!(survivor.kills(), 1);
        assert_eq!(survivor.captures(), 7);
    }

    #[test]
    fn test_head_on_free_tile_kills_both() {
        let mut game = game_with(10, &[CENTER, Tile::new(4, 0)]);
        step_discrete(&mut game, &[0, 3]);
        let events = step_discrete(&mut game, &[0, 3]);

        assert_eq!(
            eliminated(&events),
            vec![
                (0, EliminationCause::HeadOn, None),
                (1, EliminationCause::HeadOn, None)
            ]
        );
        assert!(game.players().iter().all(|p| p.kills() == 0));
        assert!(game.board().all().all(|(_, owner)| owner == Owner::Border));
    }

    #[test]
    fn test_crossing_kills_both() {
        let mut game = game_with(10, &[Tile::new(-2, 0), Tile::new(3, 0)]);
        step_discrete(&mut game, &[0, 3]);
        step_discrete(&mut game, &[0, 3]);
        assert!(game.player(0).unwrap().has_claimed(Tile::new(0, 0)));
        assert!(game.player(1).unwrap().has_claimed(Tile::new(1, 0)));

        let events = step_discrete(&mut game, &[0, 3]);
        assert_eq!(
            eliminated(&events),
            vec![
                (0, EliminationCause::Crossing, None),
                (1, EliminationCause::Crossing, None)
            ]
        );
        assert!(game.players().iter().all(|p| p.kills() == 0));
    }

    #[test]
    fn test_crossing_survivor_on_own_tile_gets_kill() {
        let mut game = game_with(10, &[CENTER, Tile::new(4, 0)]);
        for actions in [[5, 3], [3, 0], [1, 3], [5, 3], [0, 3]] {
            assert!(step_discrete(&mut game, &actions).is_empty());
        }
        assert!(game.player(0).unwrap().has_claimed(Tile::new(1, 1)));
        assert!(game.player(1).unwrap().has_claimed(Tile::new(1, 0)));

        let events = step_discrete(&mut game, &[2, 5]);
        assert_eq!(eliminated(&events), vec![(1, EliminationCause::Crossing, Some(0))]);
        assert!(events.contains(&GameEvent::Captured { player: 0, tiles: 1 }));
        assert!(game.player(1).unwrap().is_dead());
        assert_eq!(game.player(0).unwrap().kills(), 1);
        assert!(game.board().is_owner(Tile::new(1, 1), 0));
    }

    #[test]
    fn test_crossing_both_on_own_tiles_survive() {
        let mut game = game_with(10, &[CENTER, Tile::new(3, 0)]);
        for actions in [[5, 4], [1, 3], [0, 2]] {
            assert!(step_discrete(&mut game, &actions).is_empty());
        }
        assert!(game.player(0).unwrap().has_claimed(Tile::new(2, 0)));
        assert!(game.player(1).unwrap().has_claimed(Tile::new(1, 0)));

        let events = step_discrete(&mut game, &[3, 0]);
        assert!(eliminated(&events).is_empty());
        assert!(game.players().iter().all(|p| p.is_alive() && p.kills() == 0));
        assert_eq!(game.player(0).unwrap().head(), Tile::new(1, 0));
        assert_eq!(game.player(1).unwrap().head(), Tile::new(2, 0));
    }

    #[test]
    fn test_head_on_third_player_tile_kills_both() {
        let mut game = game_with(10, &[Tile::new(4, -1), Tile::new(0, 3), CENTER]);
        step_discrete(&mut game, &[3, 2, 3]);
        step_discrete(&mut game, &[3, 1, 0]);
        let events = step_discrete(&mut game, &[4, 2, 3]);

        assert_eq!(
            eliminated(&events),
            vec![
                (0, EliminationCause::HeadOn, None),
                (1, EliminationCause::HeadOn, None)
            ]
        );
        assert!(game.players().iter().all(|p| p.kills() == 0));
        let owner = game.player(2).unwrap();
        assert!(owner.is_alive());
        assert_eq!(owner.captures(), 7);
        assert!(game.board().is_owner(Tile::new(1, 0), 2));
    }

    #[test]
    fn test_trail_cut() {
        let mut game = game_with(10, &[CENTER, Tile::new(3, -3)]);
        for actions in [[0, 3], [0, 5], [2, 1], [0, 4]] {
            assert!(step_discrete(&mut game, &actions).is_empty());
        }
        assert!(game.player(0).unwrap().has_claimed(Tile::new(2, -1)));

        let events = step_discrete(&mut game, &[0, 5]);
        assert_eq!(eliminated(&events), vec![(0, EliminationCause::TrailCut, Some(1))]);
        assert_eq!(game.player(1).unwrap().kills(), 1);
        assert_eq!(game.board().count_by_owner(0), 0);
    }

    #[test]
    fn test_surrounded_player_eliminated() {
        let mut game = game_with(10, &[Tile::new(4, -2), CENTER]);
        let path = [3, 4, 2, 3, 3, 4, 4, 5, 5, 0, 0, 1, 1, 1];
        let last = path.len() - 1;

        for (t, &a) in path.iter().enumerate() {
            let victim = if t % 2 == 0 { 0 } else { 3 };
            let events = step_discrete(&mut game, &[a, victim]);
            if t < last {
                assert!(game.player(1).unwrap().is_alive(), "victim died early at tick {t}");
            } else {
                assert_eq!(
                    eliminated(&events),
                    vec![(1, EliminationCause::Surrounded, Some(0))]
                );
            }
        }

        let attacker = game.player(0).unwrap();
        assert!(game.player(1).unwrap().is_dead());
        assert_eq!(attacker.kills(), 1);
        assert_eq!(attacker.captures(), 26);
        assert_eq!(game.board().count_by_owner(0), 26);
        assert_eq!(game.board().count_by_owner(1), 0);
    }

    #[test]
    fn test_winner() {
        let mut game = game_with(4, &[CENTER]);
        let path = [0, 0, 0, 4, 4, 4, 3, 3, 3, 2, 2, 2, 1, 1, 1, 0, 0, 0, 5, 5, 3, 3];
        let last = path.len() - 1;

        for (t, &a) in path.iter().enumerate() {
            let events = step_discrete(&mut game, &[a]);
            let won = events.contains(&GameEvent::Won { player: 0 });
            assert_eq!(won, t == last);
        }

        let player = game.player(0).unwrap();
        assert!(player.is_winner());
        assert_eq!(player.captures(), 37);
        assert_eq!(player.captures() as usize, game.board().num_tiles());
        assert!(game.is_settled());
        // border untouched
        assert!(hex_ring(CENTER, 5).iter().all(|&t| game.board().is_border(t)));
    }

    #[test]
    fn test_spawn_displaces_other_player() {
        let mut game = game_with(10, &[CENTER, Tile::new(-5, 5)]);

        let events = game.reset_player_at(1, Tile::new(1, 0)).unwrap();
        assert!(events.is_empty());
        assert_eq!(game.player(0).unwrap().captures(), 3);
        assert_eq!(game.board().count_by_owner(0), 3);

        let events = game.reset_player_at(1, CENTER).unwrap();
        assert_eq!(eliminated(&events), vec![(0, EliminationCause::Displaced, None)]);
        assert!(game.player(0).unwrap().is_dead());
        assert_eq!(game.player(1).unwrap().kills(), 0);
        assert_eq!(game.board().count_by_owner(1), 7);
    }

    #[test]
    fn test_respawn_after_death() {
        let mut game = game_with(4, &[CENTER]);
        for _ in 0..4 {
            step_discrete(&mut game, &[0]);
        }
        assert!(game.player(0).unwrap().is_dead());

        game.reset_player(0).unwrap();
        let player = game.player(0).unwrap();
        assert!(player.is_alive());
        assert_eq!(player.captures(), 7);
        assert_eq!(game.board().count_by_owner(0), 7);
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = GameConfig::new(8, 3).with_seed(42);
        let mut a = Game::new(config.clone()).unwrap();
        let mut b = Game::new(config).unwrap();

        for t in 0..200usize {
            let actions: Vec<f32> = (0..3).map(|p| ((t * 7 + p * 3) % 6) as f32).collect();
            assert_eq!(a.step(&actions).unwrap(), b.step(&actions).unwrap());
        }
        assert_eq!(a.snapshots(), b.snapshots());
        let mut tiles_a: Vec<_> = a.board().all().collect();
        let mut tiles_b: Vec<_> = b.board().all().collect();
        tiles_a.sort_by_key(|&(t, _)| t);
        tiles_b.sort_by_key(|&(t, _)| t);
        assert_eq!(tiles_a, tiles_b);
    }

    #[test]
    fn test_captures_match_ownership() {
        let mut game = Game::new(GameConfig::new(8, 4).with_seed(11)).unwrap();
        for t in 0..300usize {
            let actions: Vec<f32> = (0..4).map(|p| ((t / 3 + p) % 6) as f32).collect();
            game.step(&actions).unwrap();
            for player in game.players() {
                let owned = game.board().count_by_owner(player.id());
                if player.is_dead() {
                    assert_eq!(owned, 0);
                } else {
                    assert_eq!(player.captures() as usize, owned);
                }
            }
        }
    }
}
