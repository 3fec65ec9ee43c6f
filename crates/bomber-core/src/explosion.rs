//! Explosions, chain reactions and terrain clearing.
//!
//! An explosion is born the instant a bomb leaves the live set. It adopts the
//! bomb's sectors, destroys every power-up lying in them, and force-detonates
//! every other live bomb whose tile they cover. Chained bombs merge their own
//! sectors into the same explosion, which can reach further bombs in turn.
//!
//! The chain always terminates: each detonation moves one bomb out of the
//! live set, and the live set is the only source of detonations, so no bomb
//! can detonate twice.
//!
//! When the explosion's lifetime runs out it clears its sectors back to
//! `Empty`, rolling a power-up drop for every box it destroys.

use glam::IVec2;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tilegrid::{GridMap, Tile};
use tracing::debug;

use crate::actor::ActorId;
use crate::bomb::Bomb;
use crate::power_up::{PowerUp, PowerUpKind};

/// Lifetime remaining below which the explosion shows animation frame 1.
const FRAME_1_BELOW_MS: i64 = 200;
/// Lifetime remaining below which the explosion shows animation frame 2.
const FRAME_2_BELOW_MS: i64 = 100;

/// A live blast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explosion {
    /// Tile of the bomb that started the blast.
    pub source: IVec2,
    /// Range of the bomb that started the blast.
    pub range: i32,
    /// Milliseconds until the blast is retired.
    pub ttl_ms: i64,
    /// Owner of the bomb that started the blast.
    pub owner: ActorId,
    sectors: Vec<IVec2>,
}

/// Result of detonating one bomb, chain reaction included.
#[derive(Debug, Clone)]
pub struct Detonation {
    /// The merged explosion.
    pub explosion: Explosion,
    /// Owner of every detonated bomb, primary first, one entry per bomb.
    ///
    /// Each entry returns one bomb slot to that actor.
    pub credited: Vec<ActorId>,
    /// Number of power-ups destroyed by the blast.
    pub power_ups_destroyed: usize,
}

impl Explosion {
    /// Creates an explosion that adopts `bomb`'s sectors.
    ///
    /// This does not touch the live sets; use [`Explosion::detonate`] for
    /// that.
    #[must_use]
    pub fn from_bomb(bomb: &Bomb, ttl_ms: i64) -> Self {
        Self {
            source: bomb.position,
            range: bomb.range,
            ttl_ms,
            owner: bomb.owner,
            sectors: bomb.sectors().to_vec(),
        }
    }

    /// Detonates the live bomb at `index`, resolving the full chain reaction.
    ///
    /// For every bomb that goes off (the primary and each chained one):
    /// - the bomb is removed from `bombs`
    /// - its grid cell returns to `Empty`
    /// - its owner is listed in [`Detonation::credited`]
    /// - its sectors merge into the explosion
    ///
    /// After each merge, power-ups in the sector set are removed and live
    /// bombs in the sector set are queued for detonation.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `bombs`.
    pub fn detonate(
        bombs: &mut Vec<Bomb>,
        index: usize,
        grid: &mut GridMap,
        power_ups: &mut Vec<PowerUp>,
        ttl_ms: i64,
    ) -> Detonation {
        let primary = bombs.remove(index);
        let mut explosion = Self {
            source: primary.position,
            range: primary.range,
            ttl_ms,
            owner: primary.owner,
            sectors: Vec::new(),
        };
        let mut credited = Vec::new();
        let mut power_ups_destroyed = 0;
        let mut pending = vec![primary];

        while let Some(bomb) = pending.pop() {
            grid.set(bomb.position, Tile::Empty);
            credited.push(bomb.owner);
            explosion.merge(bomb.sectors());

            let before = power_ups.len();
            power_ups.retain(|p| !explosion.covers(p.position));
            power_ups_destroyed += before - power_ups.len();

            let mut i = 0;
            while i < bombs.len() {
                if explosion.covers(bombs[i].position) {
                    pending.push(bombs.remove(i));
                } else {
                    i += 1;
                }
            }
        }

        debug!(
            x = explosion.source.x,
            y = explosion.source.y,
            chained = credited.len() - 1,
            sectors = explosion.sectors.len(),
            power_ups_destroyed,
            "bomb detonated"
        );

        Detonation {
            explosion,
            credited,
            power_ups_destroyed,
        }
    }

    /// Cells covered by the blast.
    #[must_use]
    pub fn sectors(&self) -> &[IVec2] {
        &self.sectors
    }

    /// Returns true if `tile` is covered by the blast.
    #[must_use]
    pub fn covers(&self, tile: IVec2) -> bool {
        self.sectors.contains(&tile)
    }

    /// Ages the blast by `dt` milliseconds, clearing terrain once it expires.
    ///
    /// On expiry every sector cell is set to `Empty`. A cell that held a
    /// `DestructibleBox` first rolls a power-up drop, which lands on `power_ups`.
    ///
    /// # Returns
    ///
    /// True if the blast expired and should be retired.
    pub fn age_out(
        &mut self,
        dt: u32,
        grid: &mut GridMap,
        power_ups: &mut Vec<PowerUp>,
        rng: &mut dyn RngCore,
    ) -> bool {
        self.ttl_ms -= i64::from(dt);
        if self.ttl_ms > 0 {
            return false;
        }

        for &cell in &self.sectors {
            if grid.get(cell) == Tile::DestructibleBox {
                if let Some(kind) = PowerUpKind::roll(rng) {
                    debug!(x = cell.x, y = cell.y, ?kind, "power-up dropped");
                    power_ups.push(PowerUp::new(cell, kind));
                }
            }
            grid.set(cell, Tile::Empty);
        }
        debug!(x = self.source.x, y = self.source.y, "explosion cleared");
        true
    }

    /// Animation frame derived from the remaining lifetime: 0, then 1 below
    /// 200 ms, then 2 below 100 ms.
    #[must_use]
    pub const fn frame(&self) -> u8 {
        if self.ttl_ms < FRAME_2_BELOW_MS {
            2
        } else if self.ttl_ms < FRAME_1_BELOW_MS {
            1
        } else {
            0
        }
    }

    fn merge(&mut self, sectors: &[IVec2]) {
        for &cell in sectors {
            if !self.sectors.contains(&cell) {
                self.sectors.push(cell);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
