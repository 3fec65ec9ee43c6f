//! Headless match runner.
//!
//! Plays a spectator match between four enemies on a generated 13x13 arena
//! and logs the outcome.
//!
//! Usage: `headless [config.json] [max_ticks]`

use std::env;
use std::fs;

use anyhow::{Context, Result};
use bomber_core::{GameConfig, MatchStatus, PlayerInput, Strategy, World};
use glam::IVec2;
use tracing::{info, Level};

const ARENA_SIZE: usize = 13;
const FRAME_MS: u32 = 16;
const DEFAULT_MAX_TICKS: u64 = 20_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = match args.first() {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config file {path}"))?;
            GameConfig::from_json_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => GameConfig::default(),
    };
    let max_ticks = match args.get(1) {
        Some(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("invalid tick count {raw:?}"))?,
        None => DEFAULT_MAX_TICKS,
    };

    let mut world = World::generate(ARENA_SIZE, config)?;
    let far = i32::try_from(ARENA_SIZE)? - 2;
    let corners = [
        IVec2::new(1, 1),
        IVec2::new(far, 1),
        IVec2::new(1, far),
        IVec2::new(far, far),
    ];
    for (i, corner) in corners.into_iter().enumerate() {
        let strategy = if i % 2 == 0 {
            Strategy::DepthFirst
        } else {
            Strategy::Weighted
        };
        world.spawn_enemy(corner, strategy)?;
    }

    let input = PlayerInput::default();
    while !world.status().is_over() && world.tick_count() < max_ticks {
        world.tick(FRAME_MS, &input);
    }

    let alive = world.actors().iter().filter(|a| a.is_alive()).count();
    match world.status() {
        MatchStatus::Finished { survivor: Some(id) } => {
            info!(ticks = world.tick_count(), ms = world.elapsed_ms(), %id, "match won");
        }
        MatchStatus::Finished { survivor: None } => {
            info!(ticks = world.tick_count(), ms = world.elapsed_ms(), "no survivors");
        }
        status => {
            info!(ticks = world.tick_count(), alive, ?status, "tick budget exhausted");
        }
    }
    Ok(())
}
