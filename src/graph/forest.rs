//! Forest invariant checks for externally supplied snapshots.
//!
//! The mutation engine cannot create cycles or second parents, but a
//! snapshot handed in from outside (a restored session) can contain
//! anything. It is loaded into a petgraph `StableGraph` and checked before
//! the engine adopts it.

use std::collections::HashMap;

use petgraph::algo::is_cyclic_directed;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::{Directed, Direction};

use super::edge::Edge;
use super::node::{Node, NodeId, NodeKind};
use crate::error::ForestError;

/// Build the topology graph of a snapshot.
///
/// Node weights are the node ids. Fails on non-hierarchy nodes (the
/// empty-state placeholder is display-only), duplicate ids and edges with
/// an unknown endpoint.
fn topology<'a>(
    nodes: &'a [Node],
    edges: &[Edge],
) -> Result<StableGraph<&'a str, (), Directed>, ForestError> {
    let mut graph = StableGraph::with_capacity(nodes.len(), edges.len());
    let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        let id = node.id.as_str();
        if node.kind != NodeKind::Hierarchy {
            return Err(ForestError::NotHierarchy(node.id.clone()));
        }
        if index.contains_key(id) {
            return Err(ForestError::DuplicateNode(node.id.clone()));
        }
        index.insert(id, graph.add_node(id));
    }

    for edge in edges {
        let (Some(&source), Some(&target)) = (
            index.get(edge.source.as_str()),
            index.get(edge.target.as_str()),
        ) else {
            return Err(ForestError::DanglingEdge {
                parent: edge.source.clone(),
                child: edge.target.clone(),
            });
        };
        if source == target {
            return Err(ForestError::SelfLoop(edge.source.clone()));
        }
        graph.add_edge(source, target, ());
    }

    Ok(graph)
}

/// Check that `nodes`/`edges` form a forest: unique ids, no dangling or
/// self-referencing edges, at most one parent per node, no cycles.
pub fn validate_forest(nodes: &[Node], edges: &[Edge]) -> Result<(), ForestError> {
    let graph = topology(nodes, edges)?;

    for index in graph.node_indices() {
        if graph.neighbors_directed(index, Direction::Incoming).count() > 1 {
            let id = graph.node_weight(index).copied().unwrap_or_default();
            return Err(ForestError::MultipleParents(NodeId::from(id)));
        }
    }

    if is_cyclic_directed(&graph) {
        return Err(ForestError::Cycle);
    }

    Ok(())
}

/// True if `nodes`/`edges` satisfy the forest invariant.
pub fn is_forest(nodes: &[Node], edges: &[Edge]) -> bool {
    validate_forest(nodes, edges).is_ok()
}
