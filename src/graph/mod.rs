//! Hierarchy data structures and the mutation engine.
//!
//! Nodes and edges live in plain vectors owned by [`HierarchyEngine`]; their
//! order is meaningful (root order and sibling order for layout). petgraph's
//! StableGraph is used only to check snapshots for the forest invariant.

mod edge;
mod engine;
mod forest;
mod ids;
mod node;

pub use edge::{Edge, EdgeId};
pub use engine::{Frame, HierarchyEngine, INITIAL_ROOT_ID, ROOT_LABEL};
pub use forest::{is_forest, validate_forest};
pub use ids::{ClockIds, IdSource, SequentialIds};
pub use node::{Node, NodeData, NodeId, NodeKind, Position};
