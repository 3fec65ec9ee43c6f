//! The match world and its five-phase tick.
//!
//! A [`World`] owns every piece of mutable match state: the grid, the live
//! bombs, explosions and power-ups, the actor arena, and the match's random
//! source. [`World::tick`] is the only steady-state writer and advances
//! everything exactly once:
//!
//! 1. **FUSES**: burn every fuse; detonate each expired bomb still live,
//!    resolving chain reactions into one merged explosion per primary bomb
//! 2. **DEATHS**: kill every actor standing in a live explosion
//! 3. **EXPLOSIONS**: age every explosion, including those born this tick;
//!    expired ones clear their sectors and roll power-up drops
//! 4. **ACTORS**: enemies plan or walk, then the player applies its input.
//!    Every living actor holds the tiles its body overlaps, and an actor
//!    never steps into a tile another actor holds. Bombs planted here are
//!    staged and committed to the grid after the phase
//! 5. **DEATHS**: check again against the surviving explosions
//!
//! # Determinism
//!
//! All randomness (power-up rolls, planner direction shuffles, box
//! scattering) is drawn from one `ChaCha8Rng`. Given the same seed, map and
//! inputs, two worlds play out identically.
//!
//! # Example
//!
//! ```
//! use bomber_core::config::GameConfig;
//! use bomber_core::pathfinding::Strategy;
//! use bomber_core::world::{MatchStatus, PlayerInput, World};
//! use glam::IVec2;
//! use tilegrid::GridMap;
//!
//! let mut world = World::new(GridMap::classic(13), GameConfig::seeded(7)).unwrap();
//! world.spawn_player(IVec2::new(1, 1)).unwrap();
//! world.spawn_enemy(IVec2::new(11, 11), Strategy::Weighted).unwrap();
//!
//! for _ in 0..10 {
//!     world.tick(16, &PlayerInput::default());
//! }
//!
//! assert_eq!(world.tick_count(), 10);
//! assert_eq!(world.status(), MatchStatus::Running);
//! ```

use std::fmt;

use glam::IVec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tilegrid::grid::MIN_SIZE;
use tilegrid::{Direction, GridMap, MapError, Tile};
use tracing::{debug, info, trace};

use crate::actor::{Actor, ActorId, ActorKind};
use crate::agent::Agent;
use crate::bomb::Bomb;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::explosion::Explosion;
use crate::hazard::{Hazard, HazardGrid};
use crate::motion;
use crate::pathfinding::{Goal, PlanRequest, Strategy};
use crate::power_up::PowerUp;

// =============================================================================
// Match status and input
// =============================================================================

/// Outcome of the match so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Still being played.
    Running,
    /// The player died.
    PlayerLost,
    /// Every enemy died while the player survived.
    PlayerWon,
    /// A match without a player has at most one actor left alive.
    Finished {
        /// The last actor standing, if any.
        survivor: Option<ActorId>,
    },
}

impl MatchStatus {
    /// Returns true once the match has been decided.
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, MatchStatus::Running)
    }
}

/// Player commands for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Direction held this tick, if any.
    pub movement: Option<Direction>,
    /// Plant a bomb on the player's tile.
    pub plant_bomb: bool,
}

impl PlayerInput {
    /// Input that moves toward `dir`.
    #[must_use]
    pub const fn moving(dir: Direction) -> Self {
        Self {
            movement: Some(dir),
            plant_bomb: false,
        }
    }

    /// Input that plants a bomb without moving.
    #[must_use]
    pub const fn plant() -> Self {
        Self {
            movement: None,
            plant_bomb: true,
        }
    }
}

// =============================================================================
// World
// =============================================================================

/// Complete mutable state of one match.
pub struct World {
    config: GameConfig,
    grid: GridMap,
    bombs: Vec<Bomb>,
    explosions: Vec<Explosion>,
    power_ups: Vec<PowerUp>,
    actors: Vec<Actor>,
    player: Option<ActorId>,
    rng: ChaCha8Rng,
    tick: u64,
    elapsed_ms: u64,
    status: MatchStatus,
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("size", &self.grid.size())
            .field("bombs", &self.bombs.len())
            .field("explosions", &self.explosions.len())
            .field("power_ups", &self.power_ups.len())
            .field("actors", &self.actors.len())
            .field("tick", &self.tick)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl World {
    /// Creates a world on `grid` with no actors.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Config`] if `config` fails validation and
    /// [`GameError::Map`] if the grid is too small or its outer ring is not
    /// solid wall.
    pub fn new(grid: GridMap, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let rng = Self::rng_for(&config);
        Self::with_rng(grid, config, rng)
    }

    /// Creates a world on a freshly generated classic arena of side `size`,
    /// scattered with boxes at the configured density.
    ///
    /// # Errors
    ///
    /// Same as [`World::new`].
    pub fn generate(size: usize, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        if size < MIN_SIZE {
            return Err(MapError::TooSmall {
                size,
                min: MIN_SIZE,
            }
            .into());
        }
        let mut rng = Self::rng_for(&config);
        let mut grid = GridMap::classic(size);
        tilegrid::scatter_boxes(&mut grid, config.box_density, &mut rng);
        Self::with_rng(grid, config, rng)
    }

    fn rng_for(config: &GameConfig) -> ChaCha8Rng {
        config
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
    }

    fn with_rng(grid: GridMap, config: GameConfig, rng: ChaCha8Rng) -> Result<Self, GameError> {
        if grid.size() < MIN_SIZE {
            return Err(MapError::TooSmall {
                size: grid.size(),
                min: MIN_SIZE,
            }
            .into());
        }
        grid.check_border()?;

        info!(size = grid.size(), seed = ?config.seed, "world created");
        Ok(Self {
            config,
            grid,
            bombs: Vec::new(),
            explosions: Vec::new(),
            power_ups: Vec::new(),
            actors: Vec::new(),
            player: None,
            rng,
            tick: 0,
            elapsed_ms: 0,
            status: MatchStatus::Running,
        })
    }

    // -------------------------------------------------------------------------
    // Spawning
    // -------------------------------------------------------------------------

    /// Spawns the human-controlled player on `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::DuplicatePlayer`] if a player already exists, and
    /// the errors of [`World::spawn_enemy`] for a bad tile.
    pub fn spawn_player(&mut self, tile: IVec2) -> Result<ActorId, GameError> {
        if self.player.is_some() {
            return Err(GameError::DuplicatePlayer);
        }
        let id = self.spawn(tile, ActorKind::Player)?;
        self.player = Some(id);
        Ok(id)
    }

    /// Spawns an enemy on `tile` driven by `strategy`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] if `tile` is outside the grid and
    /// [`GameError::SpawnBlocked`] if it is not empty floor or another living
    /// actor stands there.
    pub fn spawn_enemy(&mut self, tile: IVec2, strategy: Strategy) -> Result<ActorId, GameError> {
        self.spawn(tile, ActorKind::Enemy(Agent::new(strategy)))
    }

    fn spawn(&mut self, tile: IVec2, kind: ActorKind) -> Result<ActorId, GameError> {
        if !self.grid.contains(tile) {
            return Err(GameError::OutOfBounds { tile });
        }
        let taken = self.actors.iter().any(|a| a.is_alive() && a.tile() == tile);
        if taken || self.grid.get(tile) != Tile::Empty {
            return Err(GameError::SpawnBlocked { tile });
        }

        let id = ActorId::new(self.actors.len());
        let actor = Actor::new(
            id,
            kind,
            tile,
            self.config.starting_range,
            self.config.starting_bomb_limit,
        );
        debug!(%id, x = tile.x, y = tile.y, player = actor.is_player(), "actor spawned");
        self.actors.push(actor);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Plants a bomb for `id` immediately, outside the tick.
    ///
    /// # Returns
    ///
    /// False (and nothing changes) if the actor does not exist, is dead, has
    /// no bomb left, or its tile is not empty floor or lies in a live
    /// explosion.
    pub fn plant_bomb(&mut self, id: ActorId) -> bool {
        let fuse_ms = self.config.fuse_ms;
        let Some(actor) = self.actors.get_mut(id.index()) else {
            return false;
        };
        match stage_bomb(actor, &self.grid, &self.explosions, &[], fuse_ms) {
            Some(bomb) => {
                self.commit_bomb(bomb);
                true
            }
            None => false,
        }
    }

    /// Places an already-built bomb on the grid.
    ///
    /// The owner's capacity is not touched.
    pub fn insert_bomb(&mut self, bomb: Bomb) {
        self.commit_bomb(bomb);
    }

    fn commit_bomb(&mut self, bomb: Bomb) {
        debug!(
            owner = %bomb.owner,
            x = bomb.position.x,
            y = bomb.position.y,
            range = bomb.range,
            "bomb planted"
        );
        self.grid.set(bomb.position, Tile::BombOccupied);
        self.bombs.push(bomb);
    }

    // -------------------------------------------------------------------------
    // Tick
    // -------------------------------------------------------------------------

    /// Advances the match by `dt` milliseconds.
    pub fn tick(&mut self, dt: u32, input: &PlayerInput) {
        self.tick += 1;
        self.elapsed_ms += u64::from(dt);

        // PHASE 1: FUSES
        self.burn_fuses(dt);

        // PHASE 2: DEATHS
        self.check_deaths();

        // PHASE 3: EXPLOSIONS
        self.age_explosions(dt);

        // PHASE 4: ACTORS
        self.move_actors(input);

        // PHASE 5: DEATHS
        self.check_deaths();

        self.refresh_status();
    }

    fn burn_fuses(&mut self, dt: u32) {
        for bomb in &mut self.bombs {
            bomb.burn(dt);
        }
        // Chains can remove later bombs, so rescan after each detonation
        while let Some(index) = self.bombs.iter().position(Bomb::is_expired) {
            let detonation = Explosion::detonate(
                &mut self.bombs,
                index,
                &mut self.grid,
                &mut self.power_ups,
                self.config.explosion_ttl_ms,
            );
            for owner in detonation.credited {
                if let Some(actor) = self.actors.get_mut(owner.index()) {
                    actor.bomb_limit += 1;
                }
            }
            self.explosions.push(detonation.explosion);
        }
    }

    fn check_deaths(&mut self) {
        for actor in &mut self.actors {
            if actor.check_death(&self.explosions) {
                let tile = actor.tile();
                info!(id = %actor.id(), x = tile.x, y = tile.y, "actor killed");
            }
        }
    }

    fn age_explosions(&mut self, dt: u32) {
        let grid = &mut self.grid;
        let power_ups = &mut self.power_ups;
        let rng = &mut self.rng;
        self.explosions
            .retain_mut(|explosion| !explosion.age_out(dt, grid, power_ups, rng));
    }

    fn move_actors(&mut self, input: &PlayerInput) {
        // Refreshed after each actor moves so later movers see its new tiles
        let mut footprints: Vec<Option<[IVec2; 2]>> = self
            .actors
            .iter()
            .map(|a| a.is_alive().then(|| a.footprint()))
            .collect();
        let mut staged: Vec<Bomb> = Vec::new();

        for index in 0..self.actors.len() {
            if self.actors[index].is_alive() && !self.actors[index].is_player() {
                let occupied = others(&footprints, index);
                self.update_enemy(index, &occupied, &mut staged);
                footprints[index] = Some(self.actors[index].footprint());
            }
        }

        if let Some(id) = self.player {
            let index = id.index();
            if self.actors[index].is_alive() {
                let occupied = others(&footprints, index);
                self.update_player(index, input, &occupied, &mut staged);
            }
        }

        for bomb in staged {
            self.commit_bomb(bomb);
        }
    }

    fn update_enemy(&mut self, index: usize, occupied: &[IVec2], staged: &mut Vec<Bomb>) {
        let fuse_ms = self.config.fuse_ms;
        let actor = &mut self.actors[index];
        let Some(agent) = actor.agent_mut() else {
            return;
        };

        if agent.is_idle() {
            if agent.take_plant_intent() {
                if let Some(bomb) =
                    stage_bomb(actor, &self.grid, &self.explosions, staged, fuse_ms)
                {
                    staged.push(bomb);
                }
            }

            let hazard = HazardGrid::build(
                &self.grid,
                self.bombs.iter().chain(staged.iter()),
                &self.explosions,
                occupied,
            );
            let request =
                PlanRequest::new(&hazard, actor.tile(), Goal::for_capacity(actor.bomb_limit));
            let id = actor.id();
            if let Some(agent) = actor.agent_mut() {
                agent.replan(&request, &mut self.rng);
                trace!(
                    %id,
                    goal = ?request.goal,
                    steps = agent.moves().len(),
                    plant = agent.wants_to_plant(),
                    "enemy replanned"
                );
            }
            return;
        }

        // A step only starts from an aligned position; check its target first
        if actor.is_aligned() && self.route_blocked(index, occupied, staged) {
            return;
        }
        if !motion::advance_enemy(&mut self.actors[index]) {
            return;
        }
        let actor = &mut self.actors[index];
        if let Some(kind) = motion::collect_power_up(actor, &mut self.power_ups) {
            debug!(id = %actor.id(), ?kind, "enemy collected power-up");
        }
        self.route_blocked(index, occupied, staged);
    }

    /// Drops the enemy's plan if its next waypoint has become worse than
    /// unsafe.
    ///
    /// # Returns
    ///
    /// True if the plan was dropped.
    fn route_blocked(&mut self, index: usize, occupied: &[IVec2], staged: &[Bomb]) -> bool {
        let actor = &mut self.actors[index];
        let Some(next) = actor.agent().and_then(Agent::next_waypoint) else {
            return false;
        };
        let hazard = HazardGrid::build(
            &self.grid,
            self.bombs.iter().chain(staged.iter()),
            &self.explosions,
            occupied,
        );
        if hazard.get(next) <= Hazard::Unsafe {
            return false;
        }
        trace!(id = %actor.id(), x = next.x, y = next.y, "route blocked, dropping plan");
        if let Some(agent) = actor.agent_mut() {
            agent.clear();
        }
        true
    }

    fn update_player(
        &mut self,
        index: usize,
        input: &PlayerInput,
        occupied: &[IVec2],
        staged: &mut Vec<Bomb>,
    ) {
        let fuse_ms = self.config.fuse_ms;
        let actor = &mut self.actors[index];

        if input.plant_bomb {
            if let Some(bomb) = stage_bomb(actor, &self.grid, &self.explosions, staged, fuse_ms) {
                staged.push(bomb);
            }
        }

        if let Some(dir) = input.movement {
            let outcome = motion::step_player(actor, dir, &self.grid, occupied);
            trace!(?dir, ?outcome, x = actor.sub_tile.x, y = actor.sub_tile.y, "player step");
            if let Some(kind) = motion::collect_power_up(actor, &mut self.power_ups) {
                debug!(?kind, score = actor.score, "player collected power-up");
            }
        }
    }

    fn refresh_status(&mut self) {
        if self.status.is_over() {
            return;
        }

        let next = if let Some(id) = self.player {
            let player_alive = self.actor(id).is_some_and(Actor::is_alive);
            let enemies_spawned = self.actors.iter().any(|a| !a.is_player());
            let enemies_alive = self.actors.iter().any(|a| !a.is_player() && a.is_alive());
            if !player_alive {
                MatchStatus::PlayerLost
            } else if enemies_spawned && !enemies_alive {
                MatchStatus::PlayerWon
            } else {
                MatchStatus::Running
            }
        } else {
            let mut living = self.actors.iter().filter(|a| a.is_alive());
            let first = living.next().map(Actor::id);
            if self.actors.len() > 1 && living.next().is_none() {
                MatchStatus::Finished { survivor: first }
            } else {
                MatchStatus::Running
            }
        };

        if next != self.status {
            info!(tick = self.tick, status = ?next, "match status changed");
            self.status = next;
        }
    }

    // -------------------------------------------------------------------------
    // Observation
    // -------------------------------------------------------------------------

    /// Hazard classification as `id` would see it when planning now.
    #[must_use]
    pub fn hazard_grid(&self, id: ActorId) -> HazardGrid {
        let occupied: Vec<IVec2> = self
            .actors
            .iter()
            .filter(|a| a.is_alive() && a.id() != id)
            .flat_map(Actor::footprint)
            .collect();
        HazardGrid::build(&self.grid, &self.bombs, &self.explosions, &occupied)
    }

    /// Outcome of the match so far.
    #[must_use]
    pub const fn status(&self) -> MatchStatus {
        self.status
    }

    /// The tile grid.
    #[must_use]
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    /// Mutable access to the grid for setting up scenarios before play.
    #[must_use]
    pub fn grid_mut(&mut self) -> &mut GridMap {
        &mut self.grid
    }

    /// Live bombs.
    #[must_use]
    pub fn bombs(&self) -> &[Bomb] {
        &self.bombs
    }

    /// Live explosions.
    #[must_use]
    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    /// Power-ups lying on the grid.
    #[must_use]
    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    /// Drops a power-up on the grid, for scenario setup.
    pub fn add_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    /// Every actor ever spawned, dead ones included, in id order.
    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// The actor with `id`.
    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    /// The player, if one was spawned.
    #[must_use]
    pub fn player(&self) -> Option<&Actor> {
        self.player.and_then(|id| self.actor(id))
    }

    /// Ticks run so far.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Simulated milliseconds elapsed.
    #[must_use]
    pub const fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// The match rules.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Builds a bomb for `actor` on its nearest tile and takes one bomb slot.
///
/// Returns `None` without touching the actor when it is dead, out of bombs,
/// or the tile is not empty floor, lies in a live explosion, or already has a
/// staged bomb. A live explosion resets its cells to `Empty` when it expires,
/// so a bomb under one would lose its grid mark.
fn stage_bomb(
    actor: &mut Actor,
    grid: &GridMap,
    explosions: &[Explosion],
    staged: &[Bomb],
    fuse_ms: i64,
) -> Option<Bomb> {
    if !actor.is_alive() || actor.bomb_limit == 0 {
        return None;
    }
    let tile = actor.nearest_tile();
    if !grid.contains(tile)
        || grid.get(tile) != Tile::Empty
        || explosions.iter().any(|e| e.covers(tile))
        || staged.iter().any(|b| b.position == tile)
    {
        return None;
    }
    actor.bomb_limit -= 1;
    Some(Bomb::new(actor.bomb_range, tile, actor.id(), fuse_ms, grid))
}

/// Tiles held by every living actor except `index`.
fn others(footprints: &[Option<[IVec2; 2]>], index: usize) -> Vec<IVec2> {
    footprints
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .filter_map(|(_, footprint)| *footprint)
        .flatten()
        .collect()
}
