//! Match configuration.
//!
//! Every field defaults to the constant the game has always used, so an empty
//! JSON object (`{}`) yields the standard rules.
//!
//! # Example
//!
//! ```
//! use bomber_core::config::GameConfig;
//!
//! let config = GameConfig::from_json_str(r#"{ "seed": 7, "fuse_ms": 2500 }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.fuse_ms, 2500);
//! assert_eq!(config.explosion_ttl_ms, 300);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default bomb fuse in milliseconds.
pub const DEFAULT_FUSE_MS: i64 = 3000;
/// Default explosion lifetime in milliseconds.
pub const DEFAULT_EXPLOSION_TTL_MS: i64 = 300;
/// Default blast range (the planting cell plus `range - 1` cells per axis).
pub const DEFAULT_RANGE: i32 = 3;
/// Default number of bombs an actor may have live at once.
pub const DEFAULT_BOMB_LIMIT: u32 = 1;
/// Default probability that an open interior cell starts as a box.
pub const DEFAULT_BOX_DENSITY: f64 = 0.7;

/// Rules for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the match's random source. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Fuse of a freshly planted bomb, in milliseconds.
    pub fuse_ms: i64,
    /// Lifetime of an explosion, in milliseconds.
    pub explosion_ttl_ms: i64,
    /// Blast range every actor starts with.
    pub starting_range: i32,
    /// Bomb capacity every actor starts with.
    pub starting_bomb_limit: u32,
    /// Box density used when generating a map.
    pub box_density: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fuse_ms: DEFAULT_FUSE_MS,
            explosion_ttl_ms: DEFAULT_EXPLOSION_TTL_MS,
            starting_range: DEFAULT_RANGE,
            starting_bomb_limit: DEFAULT_BOMB_LIMIT,
            box_density: DEFAULT_BOX_DENSITY,
        }
    }
}

impl GameConfig {
    /// Default rules with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// validation error for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fuse_ms <= 0 {
            return Err(ConfigError::NonPositiveTimer {
                field: "fuse_ms",
                value: self.fuse_ms,
            });
        }
        if self.explosion_ttl_ms <= 0 {
            return Err(ConfigError::NonPositiveTimer {
                field: "explosion_ttl_ms",
                value: self.explosion_ttl_ms,
            });
        }
        if self.starting_range < 1 {
            return Err(ConfigError::RangeTooSmall(self.starting_range));
        }
        if !(0.0..=1.0).contains(&self.box_density) {
            return Err(ConfigError::DensityOutOfRange(self.box_density));
        }
        Ok(())
    }
}
