//! # Tilegrid
//!
//! Square tile-grid substrate for bomb-arena simulations.
//!
//! A [`GridMap`] stores one [`Tile`] code per cell and is mutated in place by
//! the simulation built on top of it. This crate knows nothing about bombs,
//! actors, or timers: it only answers "what is at this cell" and provides the
//! map-construction helpers the simulation needs before its first tick.
//!
//! - **Tiles**: the four integer tile codes shared by every component
//! - **Directions**: the four cardinal steps and their integer codes
//! - **Grid**: validated square storage indexed as `map[x][y]`
//! - **Scatter**: random destructible-box placement that keeps spawn corners clear
//!
//! ## Quick Start
//!
//! ```
//! use glam::IVec2;
//! use tilegrid::{GridMap, Tile};
//!
//! let mut grid = GridMap::classic(13);
//! assert_eq!(grid.get(IVec2::new(0, 5)), Tile::IndestructibleWall);
//! assert_eq!(grid.get(IVec2::new(2, 2)), Tile::IndestructibleWall);
//! assert_eq!(grid.get(IVec2::new(1, 1)), Tile::Empty);
//!
//! grid.set(IVec2::new(1, 2), Tile::DestructibleBox);
//! assert_eq!(grid.get(IVec2::new(1, 2)), Tile::DestructibleBox);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod direction;
pub mod error;
pub mod grid;
pub mod scatter;
pub mod tile;

// Re-exports for convenience
pub use direction::Direction;
pub use error::MapError;
pub use grid::GridMap;
pub use scatter::{is_spawn_corner, scatter_boxes};
pub use tile::Tile;

/// Number of sub-tile units per tile along each axis.
///
/// Actor positions are tracked in sub-tile units so movement can be animated
/// smoothly; whole-tile coordinates are `sub_tile / TILE_SIZE`.
pub const TILE_SIZE: i32 = 4;

/// Converts a sub-tile position to the tile that contains it (floor division).
#[must_use]
pub fn tile_of(sub_tile: glam::IVec2) -> glam::IVec2 {
    glam::IVec2::new(
        sub_tile.x.div_euclid(TILE_SIZE),
        sub_tile.y.div_euclid(TILE_SIZE),
    )
}

/// Converts a tile coordinate to the sub-tile position of its origin.
#[must_use]
pub fn sub_tile_of(tile: glam::IVec2) -> glam::IVec2 {
    tile * TILE_SIZE
}

/// Returns true when a sub-tile position sits exactly on a tile origin.
#[must_use]
pub fn is_aligned(sub_tile: glam::IVec2) -> bool {
    sub_tile.x.rem_euclid(TILE_SIZE) == 0 && sub_tile.y.rem_euclid(TILE_SIZE) == 0
}
