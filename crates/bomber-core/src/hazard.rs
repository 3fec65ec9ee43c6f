//! Per-planning hazard classification.
//!
//! A [`HazardGrid`] is rebuilt from scratch before every planning call and
//! before every mid-route validity check. It is a pure function of the grid,
//! the live bombs and explosions, and the tiles other actors stand on; it
//! never writes back into any of them.
//!
//! Bomb footprints are cast fresh against the current grid rather than read
//! from the bombs' stored sectors, so a box cleared since planting widens the
//! danger zone here while the bomb itself keeps the blast it was planted
//! with.
//!
//! When several rules mark the same cell the worst classification wins.

use glam::IVec2;
use serde::{Deserialize, Serialize};
use tilegrid::{GridMap, Tile};

use crate::bomb::Bomb;
use crate::explosion::Explosion;

/// Classification of one cell for pathfinding.
///
/// Ordered from most to least desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Hazard {
    /// Open floor outside every blast radius.
    Safe = 0,
    /// Open floor inside a live bomb's blast radius.
    Unsafe = 1,
    /// A destructible box or a tile held by another actor.
    Obstacle = 2,
    /// Wall, bomb tile or live explosion.
    Unreachable = 3,
}

impl Hazard {
    /// Numeric classification code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns true for cells an actor may walk through.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Hazard::Safe | Hazard::Unsafe)
    }
}

/// Square grid of [`Hazard`] classifications, indexed like [`GridMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardGrid {
    size: usize,
    cells: Vec<Hazard>,
}

impl HazardGrid {
    /// Classifies every cell of `grid`.
    ///
    /// `occupied` lists the tiles held by other living actors; the planning
    /// actor's own tile must not be in it.
    pub fn build<'a>(
        grid: &GridMap,
        bombs: impl IntoIterator<Item = &'a Bomb>,
        explosions: &[Explosion],
        occupied: &[IVec2],
    ) -> Self {
        let mut hazard = Self {
            size: grid.size(),
            cells: vec![Hazard::Safe; grid.size() * grid.size()],
        };

        for (pos, tile) in grid.iter() {
            match tile {
                Tile::IndestructibleWall | Tile::BombOccupied => {
                    hazard.mark(pos, Hazard::Unreachable);
                }
                Tile::DestructibleBox => hazard.mark(pos, Hazard::Obstacle),
                Tile::Empty => {}
            }
        }

        for bomb in bombs {
            for cell in Bomb::blast_sectors(grid, bomb.position, bomb.range) {
                hazard.mark(cell, Hazard::Unsafe);
            }
            hazard.mark(bomb.position, Hazard::Unreachable);
        }

        for explosion in explosions {
            for &cell in explosion.sectors() {
                hazard.mark(cell, Hazard::Unreachable);
            }
        }

        for &tile in occupied {
            hazard.mark(tile, Hazard::Obstacle);
        }

        hazard
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns true if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: IVec2) -> bool {
        self.index(pos).is_some()
    }

    /// Classification at `pos`. Cells outside the grid read as
    /// [`Hazard::Unreachable`].
    #[must_use]
    pub fn get(&self, pos: IVec2) -> Hazard {
        self.index(pos).map_or(Hazard::Unreachable, |i| self.cells[i])
    }

    /// Returns true if any orthogonal neighbour of `pos` is classified `hazard`.
    #[must_use]
    pub fn borders(&self, pos: IVec2, hazard: Hazard) -> bool {
        tilegrid::Direction::ALL
            .iter()
            .any(|d| self.get(pos + d.offset()) == hazard)
    }

    fn mark(&mut self, pos: IVec2, hazard: Hazard) {
        if let Some(i) = self.index(pos) {
            self.cells[i] = self.cells[i].max(hazard);
        }
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size && y < self.size).then_some(x * self.size + y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorId;
    use proptest::prelude::*;

    const NO_BOMBS: &[Bomb] = &[];

    fn bomb_at(grid: &mut GridMap, x: i32, y: i32) -> Bomb {
        let bomb = Bomb::new(3, IVec2::new(x, y), ActorId::new(0), 3000, grid);
        grid.set(bomb.position, Tile::BombOccupied);
        bomb
    }

    #[test]
    fn terrain_classification() {
        let mut grid = GridMap::classic(7);
        grid.set(IVec2::new(3, 1), Tile::DestructibleBox);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[]);

        assert_eq!(hazard.get(IVec2::new(0, 0)), Hazard::Unreachable);
        assert_eq!(hazard.get(IVec2::new(2, 2)), Hazard::Unreachable);
        assert_eq!(hazard.get(IVec2::new(3, 1)), Hazard::Obstacle);
        assert_eq!(hazard.get(IVec2::new(1, 1)), Hazard::Safe);
    }

    #[test]
    fn bomb_tile_is_unreachable_and_footprint_unsafe() {
        let mut grid = GridMap::classic(13);
        let bomb = bomb_at(&mut grid, 1, 1);
        let hazard = HazardGrid::build(&grid, [&bomb], &[], &[]);

        assert_eq!(hazard.get(IVec2::new(1, 1)), Hazard::Unreachable);
        assert_eq!(hazard.get(IVec2::new(1, 3)), Hazard::Unsafe);
        assert_eq!(hazard.get(IVec2::new(3, 1)), Hazard::Unsafe);
        assert_eq!(hazard.get(IVec2::new(1, 4)), Hazard::Safe);
    }

    #[test]
    fn footprint_is_cast_against_current_terrain() {
        let mut grid = GridMap::classic(13);
        grid.set(IVec2::new(2, 1), Tile::DestructibleBox);
        let bomb = bomb_at(&mut grid, 1, 1);
        assert!(!bomb.covers(IVec2::new(3, 1)));

        grid.set(IVec2::new(2, 1), Tile::Empty);
        let hazard = HazardGrid::build(&grid, [&bomb], &[], &[]);

        assert_eq!(hazard.get(IVec2::new(3, 1)), Hazard::Unsafe);
        // The bomb's own sectors are untouched
        assert!(!bomb.covers(IVec2::new(3, 1)));
    }

    #[test]
    fn explosion_sectors_are_unreachable() {
        let mut grid = GridMap::classic(13);
        let mut bombs = vec![bomb_at(&mut grid, 1, 1)];
        let mut power_ups = Vec::new();
        let explosion =
            Explosion::detonate(&mut bombs, 0, &mut grid, &mut power_ups, 300).explosion;
        let hazard = HazardGrid::build(&grid, &bombs, &[explosion], &[]);

        assert_eq!(hazard.get(IVec2::new(1, 1)), Hazard::Unreachable);
        assert_eq!(hazard.get(IVec2::new(1, 3)), Hazard::Unreachable);
    }

    #[test]
    fn other_actors_are_obstacles() {
        let grid = GridMap::classic(13);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[IVec2::new(5, 5)]);
        assert_eq!(hazard.get(IVec2::new(5, 5)), Hazard::Obstacle);
        assert!(hazard.borders(IVec2::new(5, 4), Hazard::Obstacle));
    }

    #[test]
    fn worst_classification_wins() {
        let mut grid = GridMap::bordered(9);
        grid.set(IVec2::new(5, 4), Tile::DestructibleBox);
        let bomb = bomb_at(&mut grid, 4, 4);
        let hazard = HazardGrid::build(&grid, [&bomb], &[], &[IVec2::new(4, 5)]);

        // Box inside the footprint stays an obstacle
        assert_eq!(hazard.get(IVec2::new(5, 4)), Hazard::Obstacle);
        // Actor inside the footprint stays an obstacle
        assert_eq!(hazard.get(IVec2::new(4, 5)), Hazard::Obstacle);
    }

    #[test]
    fn outside_reads_unreachable() {
        let grid = GridMap::bordered(5);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[]);
        assert!(!hazard.contains(IVec2::new(-1, 2)));
        assert_eq!(hazard.get(IVec2::new(-1, 2)), Hazard::Unreachable);
        assert_eq!(hazard.get(IVec2::new(2, 5)), Hazard::Unreachable);
    }

    #[test]
    fn codes_follow_severity() {
        assert_eq!(Hazard::Safe.code(), 0);
        assert_eq!(Hazard::Unsafe.code(), 1);
        assert_eq!(Hazard::Obstacle.code(), 2);
        assert_eq!(Hazard::Unreachable.code(), 3);
        assert!(Hazard::Unsafe.is_walkable());
        assert!(!Hazard::Obstacle.is_walkable());
    }

    proptest! {
        #[test]
        fn build_is_idempotent(
            placements in prop::collection::vec((1i32..12, 1i32..12), 0..6),
            actors in prop::collection::vec((1i32..12, 1i32..12), 0..4),
        ) {
            let mut grid = GridMap::classic(13);
            let mut bombs = Vec::new();
            for (x, y) in placements {
                if grid.get(IVec2::new(x, y)) == Tile::Empty {
                    bombs.push(bomb_at(&mut grid, x, y));
                }
            }
            let occupied: Vec<IVec2> = actors.into_iter().map(|(x, y)| IVec2::new(x, y)).collect();
            let grid_before = grid.clone();
            let bombs_before = bombs.clone();

            let first = HazardGrid::build(&grid, &bombs, &[], &occupied);
            let second = HazardGrid::build(&grid, &bombs, &[], &occupied);

            prop_assert_eq!(first, second);
            prop_assert_eq!(grid, grid_before);
            prop_assert_eq!(bombs, bombs_before);
        }
    }
}
