//! Bombs and blast-sector ray-casting.
//!
//! A bomb computes its blast sectors once, when it is planted, against the
//! grid as it stands at that moment. The sectors are never refreshed as the
//! terrain changes afterwards; hazard grids cast their own rays instead (see
//! [`crate::hazard`]).
//!
//! # Ray-casting rule
//!
//! From the planting tile a ray is cast along each cardinal axis, up to
//! `range - 1` cells:
//!
//! - `IndestructibleWall`: stop, the cell is excluded
//! - `Empty` or `BombOccupied`: include the cell and keep going
//! - `DestructibleBox`: include the cell and stop
//!
//! The planting tile is always sector zero, followed by the +x, -x, +y and -y
//! rays in that order. Consumers should only rely on set membership.
//!
//! # Example
//!
//! ```
//! use bomber_core::actor::ActorId;
//! use bomber_core::bomb::Bomb;
//! use glam::IVec2;
//! use tilegrid::GridMap;
//!
//! let grid = GridMap::classic(13);
//! let bomb = Bomb::new(3, IVec2::new(1, 1), ActorId::new(0), 3000, &grid);
//!
//! assert_eq!(bomb.sectors().len(), 5);
//! assert!(bomb.covers(IVec2::new(3, 1)));
//! assert!(!bomb.covers(IVec2::new(0, 1)));
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tilegrid::{GridMap, Tile};

use crate::actor::ActorId;

/// Fuse remaining below which the bomb shows animation frame 1.
const FRAME_1_BELOW_MS: i64 = 2000;
/// Fuse remaining below which the bomb shows animation frame 2.
const FRAME_2_BELOW_MS: i64 = 1000;

/// Ray directions in sector insertion order: +x, -x, +y, -y.
const RAY_DIRECTIONS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// A planted bomb counting down to detonation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bomb {
    /// Blast range: the planting tile plus `range - 1` cells per axis.
    pub range: i32,
    /// Tile the bomb sits on.
    pub position: IVec2,
    /// Milliseconds until detonation; detonates at or below zero.
    pub fuse_ms: i64,
    /// Actor whose bomb slot is returned on detonation.
    pub owner: ActorId,
    sectors: Vec<IVec2>,
}

impl Bomb {
    /// Plants a bomb and computes its blast sectors against `grid`.
    #[must_use]
    pub fn new(range: i32, position: IVec2, owner: ActorId, fuse_ms: i64, grid: &GridMap) -> Self {
        Self {
            range,
            position,
            fuse_ms,
            owner,
            sectors: Self::blast_sectors(grid, position, range),
        }
    }

    /// Casts the four blast rays from `origin` against the current grid.
    ///
    /// # Panics
    ///
    /// Panics if a ray leaves the grid, which cannot happen on a map whose
    /// border is indestructible wall.
    #[must_use]
    pub fn blast_sectors(grid: &GridMap, origin: IVec2, range: i32) -> Vec<IVec2> {
        let mut sectors = vec![origin];
        for step in RAY_DIRECTIONS {
            for distance in 1..range {
                let cell = origin + step * distance;
                match grid.get(cell) {
                    Tile::IndestructibleWall => break,
                    Tile::Empty | Tile::BombOccupied => sectors.push(cell),
                    Tile::DestructibleBox => {
                        sectors.push(cell);
                        break;
                    }
                }
            }
        }
        sectors
    }

    /// Blast sectors computed at planting time.
    #[must_use]
    pub fn sectors(&self) -> &[IVec2] {
        &self.sectors
    }

    /// Returns true if `tile` is one of this bomb's sectors.
    #[must_use]
    pub fn covers(&self, tile: IVec2) -> bool {
        self.sectors.contains(&tile)
    }

    /// Burns `dt` milliseconds off the fuse.
    ///
    /// # Returns
    ///
    /// True once the fuse has run out.
    pub fn burn(&mut self, dt: u32) -> bool {
        self.fuse_ms -= i64::from(dt);
        self.is_expired()
    }

    /// Returns true once the fuse has run out.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.fuse_ms <= 0
    }

    /// Animation frame derived from the remaining fuse: 0, then 1 below
    /// 2000 ms, then 2 below 1000 ms.
    #[must_use]
    pub const fn frame(&self) -> u8 {
        if self.fuse_ms < FRAME_2_BELOW_MS {
            2
        } else if self.fuse_ms < FRAME_1_BELOW_MS {
            1
        } else {
            0
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn set(cells: &[(i32, i32)]) -> HashSet<IVec2> {
        cells.iter().map(|&(x, y)| IVec2::new(x, y)).collect()
    }

    fn sector_set(bomb: &Bomb) -> HashSet<IVec2> {
        bomb.sectors().iter().copied().collect()
    }

    mod sector_tests {
        use super::*;

        #[test]
        fn corner_bomb_in_classic_arena() {
            let grid = GridMap::classic(13);
            let bomb = Bomb::new(3, IVec2::new(1, 1), ActorId::new(0), 3000, &grid);

            assert_eq!(
                sector_set(&bomb),
                set(&[(1, 1), (1, 2), (2, 1), (1, 3), (3, 1)])
            );
            assert!(!bomb.covers(IVec2::new(1, 0)));
            assert!(!bomb.covers(IVec2::new(0, 1)));
        }

        #[test]
        fn far_corner_bomb_in_classic_arena() {
            let grid = GridMap::classic(13);
            let bomb = Bomb::new(3, IVec2::new(11, 11), ActorId::new(0), 3000, &grid);

            assert_eq!(
                sector_set(&bomb),
                set(&[(11, 11), (11, 10), (10, 11), (11, 9), (9, 11)])
            );
            assert!(!bomb.covers(IVec2::new(11, 12)));
            assert!(!bomb.covers(IVec2::new(12, 11)));
        }

        #[test]
        fn box_is_included_and_stops_ray() {
            let mut grid = GridMap::bordered(9);
            grid.set(IVec2::new(5, 4), Tile::DestructibleBox);
            let bomb = Bomb::new(4, IVec2::new(4, 4), ActorId::new(0), 3000, &grid);

            assert!(bomb.covers(IVec2::new(5, 4)));
            assert!(!bomb.covers(IVec2::new(6, 4)));
            assert!(bomb.covers(IVec2::new(3, 4)));
            assert!(bomb.covers(IVec2::new(2, 4)));
        }

        #[test]
        fn other_bombs_do_not_block() {
            let mut grid = GridMap::bordered(9);
            grid.set(IVec2::new(4, 5), Tile::BombOccupied);
            let bomb = Bomb::new(4, IVec2::new(4, 4), ActorId::new(0), 3000, &grid);

            assert!(bomb.covers(IVec2::new(4, 5)));
            assert!(bomb.covers(IVec2::new(4, 6)));
            assert!(bomb.covers(IVec2::new(4, 7)));
        }

        #[test]
        fn wall_is_excluded() {
            let mut grid = GridMap::bordered(9);
            grid.set(IVec2::new(4, 3), Tile::IndestructibleWall);
            let bomb = Bomb::new(4, IVec2::new(4, 4), ActorId::new(0), 3000, &grid);

            assert!(!bomb.covers(IVec2::new(4, 3)));
            assert!(!bomb.covers(IVec2::new(4, 2)));
        }

        #[test]
        fn range_one_covers_only_origin() {
            let grid = GridMap::bordered(5);
            let bomb = Bomb::new(1, IVec2::new(2, 2), ActorId::new(0), 3000, &grid);
            assert_eq!(bomb.sectors(), &[IVec2::new(2, 2)]);
        }

        #[test]
        fn origin_is_sector_zero() {
            let grid = GridMap::bordered(9);
            let bomb = Bomb::new(3, IVec2::new(4, 4), ActorId::new(0), 3000, &grid);
            assert_eq!(bomb.sectors()[0], IVec2::new(4, 4));
        }

        #[test]
        fn sectors_are_not_refreshed_after_planting() {
            let mut grid = GridMap::bordered(9);
            let bomb = Bomb::new(3, IVec2::new(4, 4), ActorId::new(0), 3000, &grid);
            grid.set(IVec2::new(5, 4), Tile::IndestructibleWall);
            assert!(bomb.covers(IVec2::new(5, 4)));
        }
    }

    mod fuse_tests {
        use super::*;

        #[test]
        fn burn_counts_down() {
            let grid = GridMap::classic(13);
            let mut bomb = Bomb::new(3, IVec2::new(11, 11), ActorId::new(0), 3000, &grid);

            assert!(!bomb.burn(1490));
            assert!(!bomb.burn(1490));
            assert_eq!(bomb.fuse_ms, 20);
            assert!(bomb.burn(50));
            assert_eq!(bomb.fuse_ms, -30);
        }

        #[test]
        fn expires_at_exactly_zero() {
            let grid = GridMap::bordered(5);
            let mut bomb = Bomb::new(2, IVec2::new(2, 2), ActorId::new(0), 100, &grid);
            assert!(bomb.burn(100));
        }

        #[test]
        fn frame_thresholds() {
            let grid = GridMap::bordered(5);
            let mut bomb = Bomb::new(2, IVec2::new(2, 2), ActorId::new(0), 3000, &grid);
            assert_eq!(bomb.frame(), 0);
            bomb.fuse_ms = 2000;
            assert_eq!(bomb.frame(), 0);
            bomb.fuse_ms = 1999;
            assert_eq!(bomb.frame(), 1);
            bomb.fuse_ms = 1000;
            assert_eq!(bomb.frame(), 1);
            bomb.fuse_ms = 999;
            assert_eq!(bomb.frame(), 2);
        }
    }

    proptest! {
        #[test]
        fn open_field_sector_count(range in 1i32..8) {
            // Wide enough that no ray reaches the border
            let grid = GridMap::bordered(19);
            let bomb = Bomb::new(range, IVec2::new(9, 9), ActorId::new(0), 3000, &grid);
            let expected = usize::try_from(4 * (range - 1) + 1).unwrap();
            prop_assert_eq!(bomb.sectors().len(), expected);
        }

        #[test]
        fn sectors_stay_in_line_with_origin(x in 1i32..12, y in 1i32..12, range in 1i32..6) {
            let grid = GridMap::classic(13);
            prop_assume!(grid.get(IVec2::new(x, y)) == Tile::Empty);
            let origin = IVec2::new(x, y);
            let bomb = Bomb::new(range, origin, ActorId::new(0), 3000, &grid);
            for s in bomb.sectors() {
                prop_assert!(s.x == origin.x || s.y == origin.y);
                prop_assert!((*s - origin).abs().max_element() < range);
                prop_assert_ne!(grid.get(*s), Tile::IndestructibleWall);
            }
        }
    }
}
