//! Enemy route planning.
//!
//! Two interchangeable strategies share the [`PathPlanner`] interface:
//!
//! - [`DepthFirstPlanner`]: a randomized depth-first walk that prefers safe
//!   cells and backtracks out of dead ends, bounded to a fixed depth.
//! - [`WeightedPlanner`]: a best-first search over per-cell costs that finds
//!   the cheapest route, treating blast-radius cells as expensive.
//!
//! Both read a [`HazardGrid`] and return a [`Plan`]: the tile route, the
//! direction for each step along it, and whether the enemy should plant a
//! bomb once it gets there.
//!
//! # Goals
//!
//! The goal depends on bomb capacity (see [`Goal::for_capacity`]):
//! - no bomb left: reach any safe cell ([`Goal::FindCover`])
//! - otherwise: reach a cell next to a box or another actor
//!   ([`Goal::SeekTarget`])
//!
//! # Randomness
//!
//! Both strategies shuffle the four directions at every expansion. All
//! randomness comes from the `rng` argument, so a fixed-seed generator yields
//! a fixed plan.
//!
//! # Example
//!
//! ```
//! use bomber_core::hazard::HazardGrid;
//! use bomber_core::pathfinding::{Goal, PathPlanner, PlanRequest, Strategy};
//! use bomber_core::bomb::Bomb;
//! use glam::IVec2;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use tilegrid::GridMap;
//!
//! let grid = GridMap::classic(13);
//! let hazard = HazardGrid::build(&grid, &[] as &[Bomb], &[], &[]);
//! let request = PlanRequest::new(&hazard, IVec2::new(1, 1), Goal::FindCover);
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(1);
//! let plan = Strategy::Weighted.plan(&request, &mut rng);
//!
//! // Already safe: stay put
//! assert_eq!(plan.path, vec![IVec2::new(1, 1)]);
//! assert!(plan.moves.is_empty());
//! ```

mod depth_first;
mod node;
mod weighted;

pub use depth_first::DepthFirstPlanner;
pub use node::{Node, NodeGrid};
pub use weighted::WeightedPlanner;

use glam::IVec2;
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tilegrid::Direction;

use crate::hazard::{Hazard, HazardGrid};

/// What the enemy is trying to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// Any cell outside every blast radius.
    FindCover,
    /// Any cell next to a box or another actor, to plant a bomb there.
    SeekTarget,
}

impl Goal {
    /// Picks the goal for an enemy with `bomb_limit` bombs left.
    #[must_use]
    pub const fn for_capacity(bomb_limit: u32) -> Self {
        if bomb_limit == 0 {
            Goal::FindCover
        } else {
            Goal::SeekTarget
        }
    }

    /// Returns true if standing on `pos` satisfies the goal.
    #[must_use]
    pub fn is_met(self, hazard: &HazardGrid, pos: IVec2) -> bool {
        match self {
            Goal::FindCover => hazard.get(pos) == Hazard::Safe,
            Goal::SeekTarget => hazard.borders(pos, Hazard::Obstacle),
        }
    }
}

/// Inputs for one planning call.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    /// Freshly built hazard classification.
    pub hazard: &'a HazardGrid,
    /// Tile the enemy stands on.
    pub origin: IVec2,
    /// What to reach.
    pub goal: Goal,
}

impl<'a> PlanRequest<'a> {
    /// Bundles a planning request.
    #[must_use]
    pub const fn new(hazard: &'a HazardGrid, origin: IVec2, goal: Goal) -> Self {
        Self {
            hazard,
            origin,
            goal,
        }
    }
}

/// A planned route.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Tiles from the origin (inclusive) to the destination.
    pub path: Vec<IVec2>,
    /// One direction per step; always `path.len() - 1` long.
    pub moves: Vec<Direction>,
    /// Plant a bomb once the route is walked.
    pub wants_to_plant: bool,
}

impl Plan {
    /// The trivial plan: stand on `origin` this tick.
    #[must_use]
    pub fn stay(origin: IVec2) -> Self {
        Self {
            path: vec![origin],
            moves: Vec::new(),
            wants_to_plant: false,
        }
    }

    /// Builds a plan from a tile route, deriving one direction per step.
    ///
    /// Consecutive tiles must be orthogonal neighbours.
    #[must_use]
    pub fn from_path(path: Vec<IVec2>, wants_to_plant: bool) -> Self {
        let moves = path
            .windows(2)
            .filter_map(|pair| Direction::from_offset(pair[1] - pair[0]))
            .collect();
        Self {
            path,
            moves,
            wants_to_plant,
        }
    }

    /// Last tile of the route.
    #[must_use]
    pub fn destination(&self) -> Option<IVec2> {
        self.path.last().copied()
    }
}

/// A route-planning strategy.
pub trait PathPlanner {
    /// Plans a route from `request.origin` toward `request.goal`.
    ///
    /// Failing to find a route is not an error; the plan then keeps the
    /// enemy where it is.
    fn plan(&self, request: &PlanRequest<'_>, rng: &mut dyn RngCore) -> Plan;
}

/// Which planner an enemy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Randomized depth-first exploration.
    DepthFirst,
    /// Best-first search over cell costs.
    Weighted,
}

impl PathPlanner for Strategy {
    fn plan(&self, request: &PlanRequest<'_>, rng: &mut dyn RngCore) -> Plan {
        match self {
            Strategy::DepthFirst => DepthFirstPlanner::default().plan(request, rng),
            Strategy::Weighted => WeightedPlanner::default().plan(request, rng),
        }
    }
}

/// The four directions in a fresh random order.
fn shuffled_directions(rng: &mut dyn RngCore) -> [Direction; 4] {
    let mut dirs = Direction::ALL;
    dirs.shuffle(rng);
    dirs
}
