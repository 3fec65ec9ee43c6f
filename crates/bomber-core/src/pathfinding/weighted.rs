//! Best-first weighted route planner.
//!
//! A uniform-cost search over a [`NodeGrid`]: expand the cheapest open node,
//! relax its neighbours with `weight = parent.weight + neighbour.base_weight`,
//! and stop as soon as the expanded node meets the goal. Entering a cell in a
//! bomb's blast radius costs [`WeightedPlanner::unsafe_cost`] instead of 1, so
//! routes skirt danger when a detour is cheap enough.
//!
//! Direction order is shuffled per expansion, which only affects ties. Among
//! open nodes of equal weight the one opened first is expanded first.

use rand::RngCore;

use super::{shuffled_directions, Goal, NodeGrid, PathPlanner, Plan, PlanRequest};

/// Entry cost of an unsafe cell used by [`WeightedPlanner::default`].
pub const DEFAULT_UNSAFE_COST: f32 = 5.0;

/// Best-first planner with a configurable danger penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPlanner {
    /// Cost of entering a cell inside a blast radius.
    pub unsafe_cost: f32,
}

impl Default for WeightedPlanner {
    fn default() -> Self {
        Self {
            unsafe_cost: DEFAULT_UNSAFE_COST,
        }
    }
}

impl PathPlanner for WeightedPlanner {
    fn plan(&self, request: &PlanRequest<'_>, rng: &mut dyn RngCore) -> Plan {
        let hazard = request.hazard;
        let mut nodes = NodeGrid::from_hazard(hazard, self.unsafe_cost);
        let Some(root) = nodes.index_of(request.origin) else {
            return Plan::stay(request.origin);
        };
        nodes[root].weight = nodes[root].base_weight;

        let mut visited = vec![false; nodes.len()];
        let mut open: Vec<usize> = Vec::new();
        let mut current = root;

        loop {
            visited[current] = true;
            let dirs = shuffled_directions(rng);
            let position = nodes[current].position;

            if request.goal.is_met(hazard, position) {
                let path = nodes.route_to(current);
                let wants_to_plant = request.goal == Goal::SeekTarget && path.len() == 1;
                return Plan::from_path(path, wants_to_plant);
            }

            for dir in dirs {
                let Some(next) = nodes.index_of(position + dir.offset()) else {
                    continue;
                };
                if !nodes[next].reachable || visited[next] {
                    continue;
                }
                let weight = nodes[current].weight + nodes[next].base_weight;
                if open.contains(&next) {
                    if nodes[next].weight > weight {
                        nodes[next].parent = Some(current);
                        nodes[next].weight = weight;
                    }
                } else {
                    nodes[next].parent = Some(current);
                    nodes[next].weight = weight;
                    open.push(next);
                }
            }

            // First strictly cheaper node wins, so equal weights expand in
            // the order they were opened
            let mut best = None;
            for (slot, &index) in open.iter().enumerate() {
                match best {
                    Some((_, lowest)) if nodes[index].weight >= lowest => {}
                    _ => best = Some((slot, nodes[index].weight)),
                }
            }
            let Some((slot, _)) = best else {
                return Plan::stay(request.origin);
            };
            current = open.remove(slot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ActorId;
    use crate::bomb::Bomb;
    use crate::hazard::{Hazard, HazardGrid};
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use tilegrid::{GridMap, Tile};

    const NO_BOMBS: &[Bomb] = &[];

    fn plan_on(hazard: &HazardGrid, origin: IVec2, goal: Goal, seed: u64) -> Plan {
        let request = PlanRequest::new(hazard, origin, goal);
        WeightedPlanner::default().plan(&request, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn finds_shortest_route_to_box() {
        let mut grid = GridMap::bordered(9);
        grid.set(IVec2::new(5, 1), Tile::DestructibleBox);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[]);

        for seed in 0..8 {
            let plan = plan_on(&hazard, IVec2::new(1, 1), Goal::SeekTarget, seed);
            // Nearest cell next to the box is (4, 1), three steps away
            assert_eq!(plan.moves.len(), 3, "seed {seed}");
            assert!(hazard.borders(plan.destination().unwrap(), Hazard::Obstacle));
            assert!(!plan.wants_to_plant);
        }
    }

    #[test]
    fn plants_only_when_already_in_position() {
        let mut grid = GridMap::bordered(9);
        grid.set(IVec2::new(2, 1), Tile::DestructibleBox);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[]);
        let plan = plan_on(&hazard, IVec2::new(1, 1), Goal::SeekTarget, 0);

        assert_eq!(plan.path, vec![IVec2::new(1, 1)]);
        assert!(plan.wants_to_plant);
    }

    #[test]
    fn other_actors_count_as_targets() {
        let grid = GridMap::bordered(9);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[IVec2::new(1, 4)]);
        let plan = plan_on(&hazard, IVec2::new(1, 1), Goal::SeekTarget, 0);

        assert_eq!(plan.destination(), Some(IVec2::new(1, 3)));
        assert_eq!(plan.moves.len(), 2);
    }

    #[test]
    fn escapes_to_nearest_safe_cell() {
        let mut grid = GridMap::classic(13);
        let bomb = Bomb::new(3, IVec2::new(1, 1), ActorId::new(0), 3000, &grid);
        grid.set(bomb.position, Tile::BombOccupied);
        let hazard = HazardGrid::build(&grid, [&bomb], &[], &[]);

        for seed in 0..8 {
            let plan = plan_on(&hazard, IVec2::new(1, 1), Goal::FindCover, seed);
            let end = plan.destination().unwrap();
            assert_eq!(hazard.get(end), Hazard::Safe);
            // (1, 4) or (4, 1): three unsafe-free steps away
            assert_eq!(plan.moves.len(), 3, "seed {seed}");
            assert!(!plan.wants_to_plant);
        }
    }

    #[test]
    fn detours_around_blast_radius_when_cheaper() {
        // Bomb at (3, 4) blocks the direct line; crossing its radius costs 5
        // while the detour through row 2 costs 8 in safe steps.
        let mut grid = GridMap::bordered(9);
        grid.set(IVec2::new(6, 4), Tile::DestructibleBox);
        let bomb = Bomb::new(2, IVec2::new(3, 4), ActorId::new(1), 3000, &grid);
        grid.set(bomb.position, Tile::BombOccupied);
        let hazard = HazardGrid::build(&grid, [&bomb], &[], &[]);

        for seed in 0..8 {
            let plan = plan_on(&hazard, IVec2::new(1, 4), Goal::SeekTarget, seed);
            assert_eq!(plan.moves.len(), 8, "seed {seed}");
            for cell in &plan.path[1..] {
                assert_eq!(hazard.get(*cell), Hazard::Safe, "seed {seed}: {cell}");
            }
        }
    }

    #[test]
    fn crosses_blast_radius_when_danger_is_free() {
        let mut grid = GridMap::bordered(9);
        grid.set(IVec2::new(6, 4), Tile::DestructibleBox);
        let bomb = Bomb::new(2, IVec2::new(3, 4), ActorId::new(1), 3000, &grid);
        grid.set(bomb.position, Tile::BombOccupied);
        let hazard = HazardGrid::build(&grid, [&bomb], &[], &[]);

        let planner = WeightedPlanner { unsafe_cost: 1.0 };
        let request = PlanRequest::new(&hazard, IVec2::new(1, 4), Goal::SeekTarget);
        let plan = planner.plan(&request, &mut ChaCha8Rng::seed_from_u64(0));
        assert_eq!(plan.moves.len(), 6);
    }

    #[test]
    fn unreachable_goal_stays_put() {
        let grid = GridMap::bordered(9);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[]);
        let plan = plan_on(&hazard, IVec2::new(4, 4), Goal::SeekTarget, 0);
        assert_eq!(plan, Plan::stay(IVec2::new(4, 4)));
    }

    #[test]
    fn origin_outside_grid_stays_put() {
        let grid = GridMap::bordered(5);
        let hazard = HazardGrid::build(&grid, NO_BOMBS, &[], &[]);
        let plan = plan_on(&hazard, IVec2::new(-3, 0), Goal::FindCover, 0);
        assert_eq!(plan, Plan::stay(IVec2::new(-3, 0)));
    }
}
