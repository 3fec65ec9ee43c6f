//! # Bomber Core
//!
//! Tick-driven simulation core for a grid-based bomb arena.
//!
//! This crate advances bombs, explosions, power-ups and actors one frame at a
//! time on top of a [`tilegrid::GridMap`]. It renders nothing and reads no
//! input devices: callers feed it a per-frame time delta and the player's
//! commands, and read back the observable state.
//!
//! ## Architecture
//!
//! - **Entities**: [`bomb::Bomb`], [`explosion::Explosion`],
//!   [`power_up::PowerUp`], [`actor::Actor`]
//! - **Planning**: [`hazard::HazardGrid`] classification feeding the two
//!   [`pathfinding`] strategies
//! - **Motion**: sub-tile stepping, snapping and pickups in [`motion`]
//! - **Orchestration**: [`world::World`] and its five-phase tick
//!
//! ## Usage
//!
//! ```
//! use bomber_core::{GameConfig, PlayerInput, Strategy, World};
//! use glam::IVec2;
//!
//! let mut world = World::generate(13, GameConfig::seeded(42)).unwrap();
//! world.spawn_player(IVec2::new(1, 1)).unwrap();
//! world.spawn_enemy(IVec2::new(11, 11), Strategy::DepthFirst).unwrap();
//!
//! world.tick(16, &PlayerInput::plant());
//! assert_eq!(world.bombs().len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actor;
pub mod agent;
pub mod bomb;
pub mod config;
pub mod error;
pub mod explosion;
pub mod hazard;
pub mod motion;
pub mod pathfinding;
pub mod power_up;
pub mod world;

// Re-exports for convenience
pub use actor::{Actor, ActorId, ActorKind};
pub use bomb::Bomb;
pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use explosion::Explosion;
pub use hazard::{Hazard, HazardGrid};
pub use pathfinding::{PathPlanner, Plan, Strategy};
pub use power_up::{PowerUp, PowerUpKind};
pub use world::{MatchStatus, PlayerInput, World};

#[cfg(test)]
mod tests;
