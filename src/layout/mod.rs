//! Hierarchy layout.
//!
//! Two phases over the visible forest:
//! 1. **Placement** (`placement`): depth-first preorder; with the default
//!    stacked policy every node gets its own row and depth becomes
//!    indentation.
//! 2. **Collision resolution** (`collision`): bounded relaxation that pushes
//!    overlapping boxes apart, then enforces spacing within each row.
//!
//! The solver only reads nodes and returns positions; applying them is the
//! engine's job.

mod collision;
mod placement;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::LayoutConfig;
use crate::graph::{Edge, Node, NodeId, Position};
use crate::heights::HeightTable;
use crate::tree::build_relationships;

pub use collision::Resolution;

/// Positions computed for one layout pass.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// Top-left corner per placed node.
    pub positions: HashMap<NodeId, Position>,
    /// Placed node ids in placement (preorder) order.
    pub order: Vec<NodeId>,
    /// Collision-resolution passes performed.
    pub iterations: u32,
    /// False if collision resolution ran out of budget.
    pub converged: bool,
}

impl Layout {
    /// Position of `id`, if it was placed.
    pub fn get(&self, id: &str) -> Option<Position> {
        self.positions.get(id).copied()
    }

    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Compute positions for the visible nodes.
///
/// Deterministic for a fixed node/edge order and fixed heights. Dangling
/// edges and orphans never fail: unreachable nodes are simply not placed.
pub fn compute_layout(
    nodes: &[Node],
    edges: &[Edge],
    heights: &HeightTable,
    config: &LayoutConfig,
) -> Layout {
    let rel = build_relationships(nodes, edges);
    let mut boxes = placement::place(&rel, heights, config);
    let resolution = collision::resolve(&mut boxes, config);

    if !resolution.converged {
        warn!(
            nodes = boxes.len(),
            iterations = resolution.iterations,
            "collision resolution hit its iteration budget"
        );
    }
    debug!(
        nodes = boxes.len(),
        roots = rel.roots.len(),
        iterations = resolution.iterations,
        "layout computed"
    );

    let mut layout = Layout {
        positions: HashMap::with_capacity(boxes.len()),
        order: Vec::with_capacity(boxes.len()),
        iterations: resolution.iterations,
        converged: resolution.converged,
    };
    for placed in &boxes {
        let id = NodeId::from(placed.id);
        layout
            .positions
            .insert(id.clone(), Position::new(placed.x, placed.y));
        layout.order.push(id);
    }
    layout
}
