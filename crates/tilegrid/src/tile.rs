//! Tile codes.
//!
//! Every component of the simulation speaks in these four integer codes. The
//! numeric values are part of the map-file contract and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    /// Walkable floor.
    #[default]
    Empty = 0,
    /// Wall that blocks movement and stops blasts.
    IndestructibleWall = 1,
    /// Box that blocks movement, absorbs a blast and may drop a power-up.
    DestructibleBox = 2,
    /// Cell currently holding a live bomb.
    BombOccupied = 3,
}

impl Tile {
    /// All tile codes in numeric order.
    pub const ALL: [Tile; 4] = [
        Tile::Empty,
        Tile::IndestructibleWall,
        Tile::DestructibleBox,
        Tile::BombOccupied,
    ];

    /// Returns the integer code of this tile.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parses an integer tile code.
    ///
    /// Returns `None` for codes outside `0..=3`.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Tile::Empty),
            1 => Some(Tile::IndestructibleWall),
            2 => Some(Tile::DestructibleBox),
            3 => Some(Tile::BombOccupied),
            _ => None,
        }
    }
}

impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        tile.code()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
