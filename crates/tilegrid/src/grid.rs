//! Square tile grid.
//!
//! The `GridMap` is the single source of truth for static terrain. It is
//! indexed as `map[x][y]` with `x` the first index, and it is mutated in place
//! by the simulation (bombs mark their cell, explosions clear theirs).
//!
//! # Bounds
//!
//! [`GridMap::get`] and [`GridMap::set`] do not clamp. Callers guarantee that
//! every lookup stays inside the grid, which holds as long as the map keeps a
//! wall margin at least as deep as the largest blast range around every
//! reachable cell. Blast ray-casting stops at the first wall, so a one-cell
//! wall border is enough for any map built by [`GridMap::from_rows`].
//! Out-of-range lookups panic rather than wrap.
//!
//! # Example
//!
//! ```
//! use glam::IVec2;
//! use tilegrid::{GridMap, MapError, Tile};
//!
//! let grid = GridMap::from_rows(vec![
//!     vec![1, 1, 1, 1],
//!     vec![1, 0, 2, 1],
//!     vec![1, 0, 0, 1],
//!     vec![1, 1, 1, 1],
//! ])?;
//! assert_eq!(grid.size(), 4);
//! assert_eq!(grid.get(IVec2::new(1, 2)), Tile::DestructibleBox);
//!
//! let open = GridMap::from_rows(vec![
//!     vec![1, 1, 1],
//!     vec![1, 0, 0],
//!     vec![1, 1, 1],
//! ]);
//! assert_eq!(open.unwrap_err(), MapError::OpenBorder { x: 1, y: 2 });
//! # Ok::<(), MapError>(())
//! ```

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::tile::Tile;

/// Smallest accepted map: a wall ring around a single interior cell.
pub const MIN_SIZE: usize = 3;

/// Square matrix of tile codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct GridMap {
    /// Side length in tiles.
    size: usize,
    /// Cells stored x-major: index `x * size + y`.
    cells: Vec<Tile>,
}

impl GridMap {
    /// Creates a `size`×`size` grid filled with one tile.
    ///
    /// No validation is performed; use [`GridMap::bordered`] or
    /// [`GridMap::from_rows`] for maps the simulation will run on.
    #[must_use]
    pub fn filled(size: usize, tile: Tile) -> Self {
        Self {
            size,
            cells: vec![tile; size * size],
        }
    }

    /// Creates a grid with indestructible walls on the outer ring and an empty
    /// interior.
    ///
    /// # Panics
    ///
    /// Panics if `size` is smaller than [`MIN_SIZE`].
    #[must_use]
    pub fn bordered(size: usize) -> Self {
        assert!(size >= MIN_SIZE, "grid size {size} below minimum {MIN_SIZE}");
        let mut grid = Self::filled(size, Tile::Empty);
        for x in 0..size {
            for y in 0..size {
                if grid.is_border_index(x, y) {
                    grid.cells[x * size + y] = Tile::IndestructibleWall;
                }
            }
        }
        grid
    }

    /// Creates the standard arena layout: a bordered grid with an
    /// indestructible pillar on every cell whose coordinates are both even.
    ///
    /// # Panics
    ///
    /// Panics if `size` is smaller than [`MIN_SIZE`].
    #[must_use]
    pub fn classic(size: usize) -> Self {
        let mut grid = Self::bordered(size);
        for x in (2..size - 1).step_by(2) {
            for y in (2..size - 1).step_by(2) {
                grid.cells[x * size + y] = Tile::IndestructibleWall;
            }
        }
        grid
    }

    /// Builds a grid from a raw matrix of tile codes, `rows[x][y]`.
    ///
    /// # Errors
    ///
    /// Returns a [`MapError`] if the matrix is too small, not square, holds a
    /// value outside `0..=3`, or has a non-wall cell on its outer ring.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, MapError> {
        let size = rows.len();
        if size < MIN_SIZE {
            return Err(MapError::TooSmall {
                size,
                min: MIN_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (x, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(MapError::NotSquare {
                    row: x,
                    len: row.len(),
                    expected: size,
                });
            }
            for (y, &code) in row.iter().enumerate() {
                let tile = Tile::from_code(code).ok_or(MapError::InvalidTile { x, y, code })?;
                cells.push(tile);
            }
        }

        let grid = Self { size, cells };
        grid.check_border()?;
        Ok(grid)
    }

    /// Checks that every cell on the outer ring is an indestructible wall.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OpenBorder`] for the first open border cell.
    pub fn check_border(&self) -> Result<(), MapError> {
        for x in 0..self.size {
            for y in 0..self.size {
                if self.is_border_index(x, y)
                    && self.cells[x * self.size + y] != Tile::IndestructibleWall
                {
                    return Err(MapError::OpenBorder { x, y });
                }
            }
        }
        Ok(())
    }

    /// Exports the grid as a raw matrix of tile codes, `rows[x][y]`.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|column| column.iter().map(|t| t.code()).collect())
            .collect()
    }

    /// Returns the side length in tiles.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns true if `pos` lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: IVec2) -> bool {
        usize::try_from(pos.x).is_ok_and(|x| x < self.size)
            && usize::try_from(pos.y).is_ok_and(|y| y < self.size)
    }

    /// Returns the tile at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    #[must_use]
    pub fn get(&self, pos: IVec2) -> Tile {
        self.cells[self.index(pos)]
    }

    /// Overwrites the tile at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` lies outside the grid.
    pub fn set(&mut self, pos: IVec2, tile: Tile) {
        let index = self.index(pos);
        self.cells[index] = tile;
    }

    /// Returns true if `pos` is on the outer ring.
    #[must_use]
    pub fn is_border(&self, pos: IVec2) -> bool {
        match (usize::try_from(pos.x), usize::try_from(pos.y)) {
            (Ok(x), Ok(y)) if x < self.size && y < self.size => self.is_border_index(x, y),
            _ => false,
        }
    }

    /// Iterates over every cell as `(position, tile)` in x-major order.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, Tile)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().map(move |(i, &tile)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let pos = IVec2::new((i / size) as i32, (i % size) as i32);
            (pos, tile)
        })
    }

    /// Counts cells holding `tile`.
    #[must_use]
    pub fn count(&self, tile: Tile) -> usize {
        self.cells.iter().filter(|&&t| t == tile).count()
    }

    fn is_border_index(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.size - 1 || y == self.size - 1
    }

    #[allow(clippy::cast_sign_loss)]
    fn index(&self, pos: IVec2) -> usize {
        assert!(
            self.contains(pos),
            "tile ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.size,
            self.size
        );
        pos.x as usize * self.size + pos.y as usize
    }
}

impl TryFrom<Vec<Vec<u8>>> for GridMap {
    type Error = MapError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<GridMap> for Vec<Vec<u8>> {
    fn from(grid: GridMap) -> Self {
        grid.rows()
    }
}

// =============================================================================
// Tests
// =============================================================================
