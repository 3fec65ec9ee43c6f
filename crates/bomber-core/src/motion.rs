//! Sub-tile motion for the player and enemies.
//!
//! Actors move one sub-tile unit per tick. The player steers freely and is
//! kept on the tile lattice by snapping: a request to move along one axis
//! while the actor sits 1 or 3 units off a tile origin on the other axis
//! nudges it one unit toward the nearest origin instead of moving. Enemies
//! only ever walk the straight steps their planner queued, so they never need
//! snapping.
//!
//! Pickups happen on arrival, when the actor is aligned on both axes.

use glam::IVec2;
use tilegrid::{Direction, GridMap, Tile, TILE_SIZE};

use crate::actor::Actor;
use crate::agent::Agent;
use crate::power_up::{PowerUp, PowerUpKind};

/// What a player step request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The actor moved one unit in the requested direction.
    Moved,
    /// The actor was nudged onto the lattice on the other axis.
    Snapped,
    /// Nothing moved.
    Blocked,
}

/// Applies one tick of requested player movement.
///
/// The actor always turns to face `dir`. The tile being entered must be
/// `Empty` on the grid and not in `occupied` (the tiles of other living
/// actors).
pub fn step_player(
    actor: &mut Actor,
    dir: Direction,
    grid: &GridMap,
    occupied: &[IVec2],
) -> StepOutcome {
    actor.facing = dir;

    let cross_axis = if dir.is_horizontal() {
        IVec2::Y
    } else {
        IVec2::X
    };
    let cross_offset = (actor.sub_tile * cross_axis).element_sum().rem_euclid(TILE_SIZE);
    match cross_offset {
        0 => {}
        1 => {
            actor.sub_tile -= cross_axis;
            return StepOutcome::Snapped;
        }
        3 => {
            actor.sub_tile += cross_axis;
            return StepOutcome::Snapped;
        }
        _ => return StepOutcome::Blocked,
    }

    let target = entry_tile(actor.sub_tile, dir);
    let free = grid.contains(target)
        && grid.get(target) == Tile::Empty
        && !occupied.contains(&target);
    if free {
        actor.sub_tile += dir.offset();
        StepOutcome::Moved
    } else {
        StepOutcome::Blocked
    }
}

/// Tile an actor at `sub_tile` enters by moving toward `dir`.
///
/// Moving toward increasing coordinates enters the tile after the floor
/// tile; moving toward decreasing ones enters the tile before the ceiling
/// tile, which is the floor tile itself while mid-step.
#[must_use]
pub fn entry_tile(sub_tile: IVec2, dir: Direction) -> IVec2 {
    let floor = tilegrid::tile_of(sub_tile);
    let ceil = tilegrid::tile_of(sub_tile + IVec2::splat(TILE_SIZE - 1));
    match dir {
        Direction::Right => IVec2::new(floor.x + 1, floor.y),
        Direction::Left => IVec2::new(ceil.x - 1, floor.y),
        Direction::Down => IVec2::new(floor.x, floor.y + 1),
        Direction::Up => IVec2::new(floor.x, ceil.y - 1),
    }
}

/// Moves an enemy one unit along its queued step.
///
/// On reaching the next tile both agent queues advance.
///
/// # Returns
///
/// True if the enemy arrived on a tile this tick.
pub fn advance_enemy(actor: &mut Actor) -> bool {
    let Some(dir) = actor.agent().and_then(Agent::next_move) else {
        return false;
    };
    actor.facing = dir;
    actor.sub_tile += dir.offset();
    if !actor.is_aligned() {
        return false;
    }
    if let Some(agent) = actor.agent_mut() {
        agent.advance();
    }
    true
}

/// Consumes the power-up under an aligned actor.
///
/// # Returns
///
/// The kind consumed, if any.
pub fn collect_power_up(actor: &mut Actor, power_ups: &mut Vec<PowerUp>) -> Option<PowerUpKind> {
    if !actor.is_aligned() {
        return None;
    }
    let tile = actor.tile();
    let index = power_ups.iter().position(|p| p.position == tile)?;
    let kind = power_ups.remove(index).kind;
    actor.consume_power_up(kind);
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorId, ActorKind};
    use crate::pathfinding::{Plan, Strategy};

    fn player_at(x: i32, y: i32) -> Actor {
        Actor::new(ActorId::new(0), ActorKind::Player, IVec2::new(x, y), 3, 1)
    }

    mod player_step_tests {
        use super::*;

        #[test]
        fn moves_one_unit_into_free_tile() {
            let grid = GridMap::classic(13);
            let mut actor = player_at(1, 1);

            assert_eq!(step_player(&mut actor, Direction::Right, &grid, &[]), StepOutcome::Moved);
            assert_eq!(actor.sub_tile, IVec2::new(5, 4));
            assert_eq!(actor.facing, Direction::Right);
        }

        #[test]
        fn four_steps_cross_a_tile() {
            let grid = GridMap::classic(13);
            let mut actor = player_at(1, 1);
            for _ in 0..4 {
                step_player(&mut actor, Direction::Down, &grid, &[]);
            }
            assert_eq!(actor.tile(), IVec2::new(1, 2));
            assert!(actor.is_aligned());
        }

        #[test]
        fn walls_block_and_still_turn() {
            let grid = GridMap::classic(13);
            let mut actor = player_at(1, 1);

            assert_eq!(step_player(&mut actor, Direction::Up, &grid, &[]), StepOutcome::Blocked);
            assert_eq!(actor.sub_tile, IVec2::new(4, 4));
            assert_eq!(actor.facing, Direction::Up);
        }

        #[test]
        fn boxes_bombs_and_actors_block() {
            let mut grid = GridMap::bordered(9);
            grid.set(IVec2::new(5, 4), Tile::DestructibleBox);
            grid.set(IVec2::new(4, 5), Tile::BombOccupied);
            let mut actor = player_at(4, 4);

            assert_eq!(step_player(&mut actor, Direction::Right, &grid, &[]), StepOutcome::Blocked);
            assert_eq!(step_player(&mut actor, Direction::Down, &grid, &[]), StepOutcome::Blocked);
            assert_eq!(
                step_player(&mut actor, Direction::Left, &grid, &[IVec2::new(3, 4)]),
                StepOutcome::Blocked
            );
            assert_eq!(step_player(&mut actor, Direction::Up, &grid, &[]), StepOutcome::Moved);
        }

        #[test]
        fn snaps_toward_nearest_origin() {
            let grid = GridMap::bordered(9);
            let mut actor = player_at(2, 2);

            actor.sub_tile = IVec2::new(9, 8);
            assert_eq!(step_player(&mut actor, Direction::Down, &grid, &[]), StepOutcome::Snapped);
            assert_eq!(actor.sub_tile, IVec2::new(8, 8));

            actor.sub_tile = IVec2::new(8, 11);
            assert_eq!(step_player(&mut actor, Direction::Left, &grid, &[]), StepOutcome::Snapped);
            assert_eq!(actor.sub_tile, IVec2::new(8, 12));
        }

        #[test]
        fn half_way_across_cannot_turn() {
            let grid = GridMap::bordered(9);
            let mut actor = player_at(2, 2);
            actor.sub_tile = IVec2::new(10, 8);

            assert_eq!(step_player(&mut actor, Direction::Up, &grid, &[]), StepOutcome::Blocked);
            assert_eq!(actor.sub_tile, IVec2::new(10, 8));
            assert_eq!(step_player(&mut actor, Direction::Right, &grid, &[]), StepOutcome::Moved);
        }

        #[test]
        fn reversing_mid_step_re_enters_current_tile() {
            let grid = GridMap::bordered(9);
            let mut actor = player_at(2, 2);
            actor.sub_tile = IVec2::new(9, 8);

            assert_eq!(entry_tile(actor.sub_tile, Direction::Left), IVec2::new(2, 2));
            assert_eq!(entry_tile(actor.sub_tile, Direction::Right), IVec2::new(3, 2));
            assert_eq!(step_player(&mut actor, Direction::Left, &grid, &[]), StepOutcome::Moved);
            assert_eq!(actor.sub_tile, IVec2::new(8, 8));
        }
    }

    mod enemy_step_tests {
        use super::*;

        fn enemy_with(plan: Plan) -> Actor {
            let mut agent = Agent::new(Strategy::DepthFirst);
            agent.adopt(plan);
            Actor::new(ActorId::new(1), ActorKind::Enemy(agent), IVec2::new(1, 1), 3, 1)
        }

        #[test]
        fn walks_queue_and_advances_on_arrival() {
            let mut enemy = enemy_with(Plan::from_path(
                vec![IVec2::new(1, 1), IVec2::new(2, 1), IVec2::new(2, 2)],
                false,
            ));

            for _ in 0..3 {
                assert!(!advance_enemy(&mut enemy));
            }
            assert!(advance_enemy(&mut enemy));
            assert_eq!(enemy.tile(), IVec2::new(2, 1));
            assert_eq!(enemy.facing, Direction::Right);

            let agent = enemy.agent().unwrap();
            assert_eq!(agent.next_move(), Some(Direction::Down));
            assert_eq!(agent.path().front(), Some(&IVec2::new(2, 1)));
        }

        #[test]
        fn idle_enemy_does_not_move() {
            let mut enemy = enemy_with(Plan::stay(IVec2::new(1, 1)));
            assert!(!advance_enemy(&mut enemy));
            assert_eq!(enemy.sub_tile, IVec2::new(4, 4));
        }
    }

    mod pickup_tests {
        use super::*;

        #[test]
        fn aligned_actor_collects() {
            let mut actor = player_at(3, 3);
            let mut power_ups = vec![
                PowerUp::new(IVec2::new(3, 3), PowerUpKind::ExtraRange),
                PowerUp::new(IVec2::new(5, 5), PowerUpKind::ExtraBomb),
            ];

            assert_eq!(
                collect_power_up(&mut actor, &mut power_ups),
                Some(PowerUpKind::ExtraRange)
            );
            assert_eq!(power_ups.len(), 1);
            assert_eq!(actor.bomb_range, 4);
            assert_eq!(actor.score, 100);
        }

        #[test]
        fn mid_step_actor_does_not_collect() {
            let mut actor = player_at(3, 3);
            actor.sub_tile.x += 1;
            let mut power_ups = vec![PowerUp::new(IVec2::new(3, 3), PowerUpKind::ExtraBomb)];

            assert_eq!(collect_power_up(&mut actor, &mut power_ups), None);
            assert_eq!(power_ups.len(), 1);
        }
    }
}
