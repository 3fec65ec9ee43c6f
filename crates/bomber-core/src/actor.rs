//! Actors: the human-controlled player and autonomous enemies.
//!
//! Both kinds share one capability set (position, facing, bomb range and
//! capacity, life). Enemies additionally carry an [`Agent`] with their
//! pathfinding strategy and movement queues.
//!
//! Positions are tracked in sub-tile units, [`TILE_SIZE`] per tile, so motion
//! can be animated smoothly. Grid and hazard lookups always use the whole-tile
//! coordinate, which is only meaningful while the actor is aligned on both
//! axes.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use tilegrid::{Direction, TILE_SIZE};

use crate::agent::Agent;
use crate::explosion::Explosion;
use crate::power_up::PowerUpKind;

/// Flat score bonus for any power-up pickup.
pub const PICKUP_BONUS: u32 = 50;

/// Index of an actor in the world's actor arena.
///
/// Bombs hold an `ActorId` rather than a reference so an owner can die, or be
/// borrowed elsewhere, without invalidating the bombs it planted.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates an id from an arena index.
    // An arena holds a handful of actors, far below u32::MAX.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActorId({})", self.0)
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player or enemy, with the enemy's decision state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActorKind {
    /// Driven by external input commands.
    Player,
    /// Driven by a pathfinding agent.
    Enemy(Agent),
}

/// A living (or dead) participant in the arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    /// Player or enemy.
    pub kind: ActorKind,
    /// Position in sub-tile units.
    pub sub_tile: IVec2,
    /// Direction last moved or requested.
    pub facing: Direction,
    /// Blast range of bombs this actor plants.
    pub bomb_range: i32,
    /// Bombs this actor may still plant.
    pub bomb_limit: u32,
    /// Score (only the player earns points).
    pub score: u32,
    alive: bool,
}

impl Actor {
    /// Creates a living actor standing on `tile`.
    #[must_use]
    pub fn new(id: ActorId, kind: ActorKind, tile: IVec2, bomb_range: i32, bomb_limit: u32) -> Self {
        Self {
            id,
            kind,
            sub_tile: tilegrid::sub_tile_of(tile),
            facing: Direction::Down,
            bomb_range,
            bomb_limit,
            score: 0,
            alive: true,
        }
    }

    /// Returns this actor's id.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Returns true while the actor is alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Returns true for the human-controlled actor.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player)
    }

    /// Returns the enemy agent, if this actor is an enemy.
    #[must_use]
    pub fn agent(&self) -> Option<&Agent> {
        match &self.kind {
            ActorKind::Enemy(agent) => Some(agent),
            ActorKind::Player => None,
        }
    }

    /// Mutable access to the enemy agent.
    pub fn agent_mut(&mut self) -> Option<&mut Agent> {
        match &mut self.kind {
            ActorKind::Enemy(agent) => Some(agent),
            ActorKind::Player => None,
        }
    }

    /// Whole-tile coordinate (floor of the sub-tile position).
    #[must_use]
    pub fn tile(&self) -> IVec2 {
        tilegrid::tile_of(self.sub_tile)
    }

    /// Tile nearest to the sub-tile position, rounding halves up.
    ///
    /// Bombs are planted here so a player caught mid-step drops the bomb on
    /// the tile they mostly occupy.
    #[must_use]
    pub fn nearest_tile(&self) -> IVec2 {
        tilegrid::tile_of(self.sub_tile + IVec2::splat(TILE_SIZE / 2))
    }

    /// Returns true when both sub-tile coordinates sit on a tile origin.
    #[must_use]
    pub fn is_aligned(&self) -> bool {
        tilegrid::is_aligned(self.sub_tile)
    }

    /// Tiles the actor's body overlaps.
    ///
    /// Both entries are the actor's tile while it is aligned. Mid-step they
    /// are the tile being left and the tile being entered, which the actor
    /// holds exclusively until the step completes.
    #[must_use]
    pub fn footprint(&self) -> [IVec2; 2] {
        [
            self.tile(),
            tilegrid::tile_of(self.sub_tile + IVec2::splat(TILE_SIZE - 1)),
        ]
    }

    /// Kills the actor if its tile lies in any live explosion.
    ///
    /// Death is permanent: a dead actor never becomes alive again.
    ///
    /// # Returns
    ///
    /// True if the actor died during this call.
    pub fn check_death(&mut self, explosions: &[Explosion]) -> bool {
        if !self.alive {
            return false;
        }
        let tile = self.tile();
        if explosions.iter().any(|e| e.covers(tile)) {
            self.alive = false;
            return true;
        }
        false
    }

    /// Applies a power-up.
    ///
    /// Extra bomb grants capacity, extra range grants range. The player also
    /// scores the kind's points plus [`PICKUP_BONUS`].
    pub fn consume_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::ExtraBomb => self.bomb_limit += 1,
            PowerUpKind::ExtraRange => self.bomb_range += 1,
        }
        if self.is_player() {
            self.score += kind.score() + PICKUP_BONUS;
        }
    }
}
