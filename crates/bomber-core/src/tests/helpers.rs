//! Test helper functions for building worlds and driving ticks.

use glam::IVec2;
use tilegrid::GridMap;

use crate::actor::{Actor, ActorId};
use crate::bomb::Bomb;
use crate::config::GameConfig;
use crate::pathfinding::Strategy;
use crate::world::{PlayerInput, World};

/// Creates a world on an open walled arena of side `size` with seed 1.
pub fn open_world(size: usize) -> World {
    World::new(GridMap::bordered(size), GameConfig::seeded(1)).unwrap()
}

/// Creates a world on an open arena with a custom config.
pub fn open_world_with(size: usize, config: GameConfig) -> World {
    World::new(GridMap::bordered(size), config).unwrap()
}

/// Generates a 13x13 boxed arena and fills the four corners with enemies,
/// alternating strategies.
pub fn four_corner_match(seed: u64) -> World {
    let mut world = World::generate(13, GameConfig::seeded(seed)).unwrap();
    let corners = [
        IVec2::new(1, 1),
        IVec2::new(11, 1),
        IVec2::new(1, 11),
        IVec2::new(11, 11),
    ];
    for (i, corner) in corners.into_iter().enumerate() {
        let strategy = if i % 2 == 0 {
            Strategy::DepthFirst
        } else {
            Strategy::Weighted
        };
        world.spawn_enemy(corner, strategy).unwrap();
    }
    world
}

/// Places a range-3 bomb owned by `owner` with the given fuse.
pub fn place_bomb(world: &mut World, tile: IVec2, owner: ActorId, fuse_ms: i64) {
    let bomb = Bomb::new(3, tile, owner, fuse_ms, world.grid());
    world.insert_bomb(bomb);
}

/// Runs `ticks` ticks of `dt` milliseconds with the same input.
pub fn run(world: &mut World, ticks: usize, dt: u32, input: &PlayerInput) {
    for _ in 0..ticks {
        world.tick(dt, input);
    }
}

/// Looks up an actor that must exist.
pub fn actor(world: &World, id: ActorId) -> &Actor {
    world.actor(id).unwrap()
}

/// Asserts that no two living actors hold a common tile.
pub fn assert_tiles_exclusive(world: &World) {
    let living: Vec<&Actor> = world.actors().iter().filter(|a| a.is_alive()).collect();
    for (i, a) in living.iter().enumerate() {
        for b in &living[i + 1..] {
            let shared = a.footprint().iter().any(|t| b.footprint().contains(t));
            assert!(
                !shared,
                "tick {}: {} at {} and {} at {} share a tile",
                world.tick_count(),
                a.id(),
                a.sub_tile,
                b.id(),
                b.sub_tile
            );
        }
    }
}
