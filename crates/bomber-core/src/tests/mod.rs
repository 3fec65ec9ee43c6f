//! Whole-match tests driven through [`crate::World`].
//!
//! - **Integration tests**: fuse timing, chain reactions, terrain clearing,
//!   deaths, pickups, match status and spawn validation
//! - **Determinism tests**: same seed and inputs produce the same match
//! - **Helper functions**: world factories and tick drivers
//!
//! # Test Structure
//!
//! - `integration.rs`: end-to-end behaviour of the tick pipeline
//! - `determinism.rs`: replay checks
//! - `helpers.rs`: setup utilities

mod helpers;

// Re-export for convenience
pub use helpers::*;
