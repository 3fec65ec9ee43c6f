//! Randomized depth-first route planner.
//!
//! The walk keeps a stack of tiles seeded with the origin. At each step it
//! shuffles the four directions, marks the current tile visited, and pushes
//! the first unvisited safe neighbour, or failing that the first unvisited
//! unsafe one. With neither available it backtracks one tile.
//!
//! The walk is not a shortest-path search: it wanders, and the route it
//! returns is whatever stack it holds when the goal is met.
//!
//! It gives up after [`DepthFirstPlanner::max_depth`] steps and returns the
//! partial route accumulated so far, without a plant intent.

use rand::RngCore;
use tracing::trace;

use super::{shuffled_directions, Goal, PathPlanner, Plan, PlanRequest};
use crate::hazard::Hazard;

/// Step bound used by [`DepthFirstPlanner::default`].
pub const DEFAULT_MAX_DEPTH: u32 = 200;

/// Depth-first planner with a step bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFirstPlanner {
    /// Steps taken before the search gives up.
    pub max_depth: u32,
}

impl Default for DepthFirstPlanner {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl PathPlanner for DepthFirstPlanner {
    fn plan(&self, request: &PlanRequest<'_>, rng: &mut dyn RngCore) -> Plan {
        let hazard = request.hazard;
        let side = hazard.size();
        let slot = |pos: glam::IVec2| -> Option<usize> {
            let x = usize::try_from(pos.x).ok()?;
            let y = usize::try_from(pos.y).ok()?;
            (x < side && y < side).then_some(x * side + y)
        };

        let mut visited = vec![false; side * side];
        let mut path = vec![request.origin];
        let mut moves = Vec::new();
        let mut depth = 0;

        while let Some(&last) = path.last() {
            if depth > self.max_depth {
                trace!(depth, "depth-first search gave up");
                break;
            }
            if request.goal.is_met(hazard, last) {
                return Plan {
                    path,
                    moves,
                    wants_to_plant: request.goal == Goal::SeekTarget,
                };
            }

            if let Some(i) = slot(last) {
                visited[i] = true;
            }

            let dirs = shuffled_directions(rng);
            let open = |wanted: Hazard| {
                dirs.into_iter().find(|d| {
                    let next = last + d.offset();
                    hazard.get(next) == wanted && slot(next).is_some_and(|i| !visited[i])
                })
            };

            if let Some(dir) = open(Hazard::Safe).or_else(|| open(Hazard::Unsafe)) {
                path.push(last + dir.offset());
                moves.push(dir);
            } else if moves.pop().is_some() {
                path.pop();
            } else {
                // Boxed in at the origin
                break;
            }
            depth += 1;
        }

        Plan {
            path,
            moves,
            wants_to_plant: false,
        }
    }
}
