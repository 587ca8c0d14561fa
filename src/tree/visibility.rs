//! Collapse closure and visible subset computation.

use std::collections::{HashMap, HashSet};

use crate::graph::{Edge, Node, NodeId};

/// Result of [`filter_visible`].
#[derive(Debug, Clone, Default)]
pub struct Visibility {
    /// Nodes not hidden by a collapsed ancestor, in input order.
    pub visible_nodes: Vec<Node>,
    /// Edges that are drawn: source not collapsed, neither endpoint hidden.
    pub visible_edges: Vec<Edge>,
    /// Union of the descendant sets of every collapsed node.
    pub hidden_ids: HashSet<NodeId>,
}

/// Source → targets adjacency over an edge slice.
fn outgoing(edges: &[Edge]) -> HashMap<&str, Vec<&str>> {
    let mut map: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        map.entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }
    map
}

fn collect_descendants<'a>(
    start: &'a str,
    adjacency: &HashMap<&'a str, Vec<&'a str>>,
    into: &mut HashSet<&'a str>,
) {
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        let Some(children) = adjacency.get(current) else {
            continue;
        };
        for &child in children {
            // `start` is never its own descendant, even on malformed cycles.
            if child != start && into.insert(child) {
                stack.push(child);
            }
        }
    }
}

/// All ids reachable from `node_id` along `source → target` edges.
///
/// Guarded by a visited set, so malformed cyclic input terminates. The
/// start node itself is never included.
pub fn descendants_of(node_id: &NodeId, edges: &[Edge]) -> HashSet<NodeId> {
    let adjacency = outgoing(edges);
    let mut found = HashSet::new();
    collect_descendants(node_id.as_str(), &adjacency, &mut found);
    found.into_iter().map(NodeId::from).collect()
}

/// Split nodes and edges into the subset currently eligible for layout.
///
/// A collapsed node stays visible; only its descendants are hidden, and
/// the edges leaving it are dropped.
pub fn filter_visible(nodes: &[Node], edges: &[Edge]) -> Visibility {
    let adjacency = outgoing(edges);

    let mut collapsed: HashSet<&str> = HashSet::new();
    let mut hidden: HashSet<&str> = HashSet::new();
    for node in nodes.iter().filter(|n| n.is_collapsed()) {
        let id = node.id.as_str();
        collapsed.insert(id);
        collect_descendants(id, &adjacency, &mut hidden);
    }

    let visible_nodes = nodes
        .iter()
        .filter(|n| !hidden.contains(n.id.as_str()))
        .cloned()
        .collect();

    let visible_edges = edges
        .iter()
        .filter(|e| {
            let source = e.source.as_str();
            let target = e.target.as_str();
            !collapsed.contains(source) && !hidden.contains(source) && !hidden.contains(target)
        })
        .cloned()
        .collect();

    Visibility {
        visible_nodes,
        visible_edges,
        hidden_ids: hidden.into_iter().map(NodeId::from).collect(),
    }
}
