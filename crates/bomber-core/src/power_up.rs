//! Power-up pickups.
//!
//! Power-ups only appear where an explosion clears a destructible box. Each
//! cleared box rolls a ten-sided die: one face drops an extra bomb, one face
//! drops extra range, the other eight drop nothing.

use glam::IVec2;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Number of faces on the drop die.
const DROP_DIE_FACES: u32 = 10;

/// What a power-up grants when consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One more bomb of capacity.
    ExtraBomb,
    /// One more cell of blast range.
    ExtraRange,
}

impl PowerUpKind {
    /// Score awarded to the player for this kind, before the flat pickup bonus.
    #[must_use]
    pub const fn score(self) -> u32 {
        match self {
            PowerUpKind::ExtraBomb => 100,
            PowerUpKind::ExtraRange => 50,
        }
    }

    /// Rolls the drop die for a cleared box.
    pub fn roll(rng: &mut dyn RngCore) -> Option<Self> {
        match rng.gen_range(0..DROP_DIE_FACES) {
            0 => Some(PowerUpKind::ExtraBomb),
            1 => Some(PowerUpKind::ExtraRange),
            _ => None,
        }
    }
}

/// A passive pickup lying on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Tile the pickup lies on.
    pub position: IVec2,
    /// What it grants.
    pub kind: PowerUpKind,
}

impl PowerUp {
    /// Creates a pickup on `position`.
    #[must_use]
    pub const fn new(position: IVec2, kind: PowerUpKind) -> Self {
        Self { position, kind }
    }
}
