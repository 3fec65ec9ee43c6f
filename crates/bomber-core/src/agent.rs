//! Enemy decision state.
//!
//! An [`Agent`] holds the enemy's planning strategy, its queued route and the
//! direction queue that walks it. The two queues move in lockstep: the tile
//! route always starts with the tile the enemy is leaving, and each direction
//! leads from one route tile to the next.

use std::collections::VecDeque;

use glam::IVec2;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tilegrid::Direction;

use crate::pathfinding::{PathPlanner, Plan, PlanRequest, Strategy};

/// Planning strategy plus the route currently being walked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    strategy: Strategy,
    path: VecDeque<IVec2>,
    moves: VecDeque<Direction>,
    wants_to_plant: bool,
}

impl Agent {
    /// Creates an idle agent.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            path: VecDeque::new(),
            moves: VecDeque::new(),
            wants_to_plant: false,
        }
    }

    /// The planning strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Remaining route, starting with the tile being left.
    #[must_use]
    pub fn path(&self) -> &VecDeque<IVec2> {
        &self.path
    }

    /// Remaining directions.
    #[must_use]
    pub fn moves(&self) -> &VecDeque<Direction> {
        &self.moves
    }

    /// Returns true when no direction is queued and the agent must replan.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns true if the agent will plant a bomb when it next goes idle.
    #[must_use]
    pub const fn wants_to_plant(&self) -> bool {
        self.wants_to_plant
    }

    /// Plans with the agent's strategy and adopts the result.
    pub fn replan(&mut self, request: &PlanRequest<'_>, rng: &mut dyn RngCore) {
        let plan = self.strategy.plan(request, rng);
        self.adopt(plan);
    }

    /// Replaces the queues with `plan`.
    pub fn adopt(&mut self, plan: Plan) {
        self.path = plan.path.into();
        self.moves = plan.moves.into();
        self.wants_to_plant = plan.wants_to_plant;
    }

    /// Drops the route and any plant intent, forcing a replan.
    pub fn clear(&mut self) {
        self.path.clear();
        self.moves.clear();
        self.wants_to_plant = false;
    }

    /// Direction of the step in progress.
    #[must_use]
    pub fn next_move(&self) -> Option<Direction> {
        self.moves.front().copied()
    }

    /// Pops the finished step from both queues.
    pub fn advance(&mut self) {
        self.moves.pop_front();
        self.path.pop_front();
    }

    /// Tile after the one the agent now stands on, if the route continues.
    #[must_use]
    pub fn next_waypoint(&self) -> Option<IVec2> {
        self.path.get(1).copied()
    }

    /// Consumes the plant intent.
    pub fn take_plant_intent(&mut self) -> bool {
        std::mem::take(&mut self.wants_to_plant)
    }
}
