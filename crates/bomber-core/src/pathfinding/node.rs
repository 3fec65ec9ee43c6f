//! Search vertices for the weighted planner.
//!
//! A [`NodeGrid`] lives for one planning call. Parents are indices into the
//! same grid, so a route is recovered by following them back to the root.

use std::ops::{Index, IndexMut};

use glam::IVec2;

use crate::hazard::{Hazard, HazardGrid};

/// One cell of a weighted search.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Tile this node stands for.
    pub position: IVec2,
    /// Index of the node this one was reached from.
    pub parent: Option<usize>,
    /// Best known cost from the root, infinite until reached.
    pub weight: f32,
    /// Cost of entering this cell.
    pub base_weight: f32,
    /// Whether the search may enter this cell.
    pub reachable: bool,
    /// Hazard classification the node was built from.
    pub classification: Hazard,
}

/// Square grid of [`Node`]s mirroring a [`HazardGrid`].
#[derive(Debug, Clone)]
pub struct NodeGrid {
    size: usize,
    nodes: Vec<Node>,
}

impl NodeGrid {
    /// Builds one node per hazard cell.
    ///
    /// Safe cells cost 1 to enter and unsafe cells cost `unsafe_cost`. Only
    /// safe and unsafe cells are reachable.
    #[must_use]
    pub fn from_hazard(hazard: &HazardGrid, unsafe_cost: f32) -> Self {
        let size = hazard.size();
        let mut nodes = Vec::with_capacity(size * size);
        let side = i32::try_from(size).unwrap_or(i32::MAX);
        // x-major to match the hazard grid's layout
        for x in 0..side {
            for y in 0..side {
                let position = IVec2::new(x, y);
                let classification = hazard.get(position);
                nodes.push(Node {
                    position,
                    parent: None,
                    weight: f32::INFINITY,
                    base_weight: if classification == Hazard::Unsafe {
                        unsafe_cost
                    } else {
                        1.0
                    },
                    reachable: classification.is_walkable(),
                    classification,
                });
            }
        }
        Self { size, nodes }
    }

    /// Index of the node at `pos`, if it lies inside the grid.
    #[must_use]
    pub fn index_of(&self, pos: IVec2) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size && y < self.size).then_some(x * self.size + y)
    }

    /// Tiles from the root to `index`, following parent links.
    #[must_use]
    pub fn route_to(&self, index: usize) -> Vec<IVec2> {
        let mut route = vec![self.nodes[index].position];
        let mut cursor = self.nodes[index].parent;
        while let Some(i) = cursor {
            route.push(self.nodes[i].position);
            cursor = self.nodes[i].parent;
        }
        route.reverse();
        route
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the grid has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Index<usize> for NodeGrid {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.nodes[index]
    }
}

impl IndexMut<usize> for NodeGrid {
    fn index_mut(&mut self, index: usize) -> &mut Node {
        &mut self.nodes[index]
    }
}
