//! Error types for world setup.
//!
//! Only setup can fail. Once the first tick runs, every operation is total:
//! a failed search degrades to "stay put" and planting without capacity is a
//! silent no-op.

use glam::IVec2;
use thiserror::Error;
use tilegrid::MapError;

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A timer that must be positive is zero or negative.
    #[error("{field} must be positive, got {value}")]
    NonPositiveTimer {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
    /// Blast range below one cell.
    #[error("starting_range must be at least 1, got {0}")]
    RangeTooSmall(i32),
    /// Box density outside `[0, 1]`.
    #[error("box_density must lie in [0, 1], got {0}")]
    DensityOutOfRange(f64),
    /// The configuration document could not be parsed.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced while building a world, before the tick loop starts.
#[derive(Debug, Error)]
pub enum GameError {
    /// The map failed validation.
    #[error("invalid map: {0}")]
    Map(#[from] MapError),
    /// The configuration failed validation.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    /// An actor was spawned on a tile that is not empty floor or is taken.
    #[error("cannot spawn on tile ({}, {}): not free", tile.x, tile.y)]
    SpawnBlocked {
        /// The requested spawn tile.
        tile: IVec2,
    },
    /// An actor was spawned outside the grid.
    #[error("cannot spawn on tile ({}, {}): outside the grid", tile.x, tile.y)]
    OutOfBounds {
        /// The requested spawn tile.
        tile: IVec2,
    },
    /// A second player was spawned.
    #[error("a player is already present")]
    DuplicatePlayer,
}
