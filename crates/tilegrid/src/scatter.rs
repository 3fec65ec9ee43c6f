//! Random destructible-box placement.
//!
//! A fresh match fills the open floor of an arena with destructible boxes,
//! leaving the four spawn corners clear so every actor starts with room to
//! plant a bomb and step out of its blast.

use glam::IVec2;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::grid::GridMap;
use crate::tile::Tile;

/// Depth of the clear zone kept around each corner, in tiles (wall included).
const SPAWN_CORNER_DEPTH: i32 = 3;

/// Returns true if `pos` lies in one of the four spawn corners of a
/// `size`×`size` grid.
///
/// A cell `(i, j)` is a spawn-corner cell when `i < 3 || i > size - 4` and
/// `j < 3 || j > size - 4`.
#[must_use]
pub fn is_spawn_corner(size: usize, pos: IVec2) -> bool {
    let n = i32::try_from(size).unwrap_or(i32::MAX);
    let near_edge = |v: i32| v < SPAWN_CORNER_DEPTH || v > n - SPAWN_CORNER_DEPTH - 1;
    near_edge(pos.x) && near_edge(pos.y)
}

/// Turns interior empty cells into destructible boxes.
///
/// Every `Empty` cell that is neither on the border nor in a spawn corner
/// becomes a `DestructibleBox` with probability `density` (clamped to
/// `[0, 1]`). Walls and existing boxes are left alone.
///
/// # Returns
///
/// The number of boxes placed.
///
/// # Example
///
/// ```
/// use glam::IVec2;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use tilegrid::{scatter_boxes, GridMap, Tile};
///
/// let mut grid = GridMap::classic(13);
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let placed = scatter_boxes(&mut grid, 1.0, &mut rng);
///
/// assert_eq!(placed, grid.count(Tile::DestructibleBox));
/// assert_eq!(grid.get(IVec2::new(1, 1)), Tile::Empty);
/// ```
pub fn scatter_boxes(grid: &mut GridMap, density: f64, rng: &mut dyn RngCore) -> usize {
    let density = density.clamp(0.0, 1.0);
    let size = grid.size();

    let candidates: Vec<IVec2> = grid
        .iter()
        .filter(|&(pos, tile)| {
            tile == Tile::Empty && !grid.is_border(pos) && !is_spawn_corner(size, pos)
        })
        .map(|(pos, _)| pos)
        .collect();

    let mut placed = 0;
    for pos in candidates {
        if rng.gen_bool(density) {
            grid.set(pos, Tile::DestructibleBox);
            placed += 1;
        }
    }

    debug!(placed, size, density, "scattered destructible boxes");
    placed
}
