//! Parent/child relationship maps derived from flat node and edge arrays.

use std::collections::{HashMap, HashSet};

use crate::graph::{Edge, Node};

/// Relationship maps for one snapshot of the hierarchy.
///
/// Borrowed from the node/edge slices; rebuilt on every layout pass because
/// mutations can reshape the forest arbitrarily.
#[derive(Debug, Default)]
pub struct Relationships<'a> {
    /// Ordered children per node (edge order). Every node id is a key.
    pub children_of: HashMap<&'a str, Vec<&'a str>>,
    /// Parent per node. Roots are absent.
    pub parent_of: HashMap<&'a str, &'a str>,
    /// Node lookup by id.
    pub by_id: HashMap<&'a str, &'a Node>,
    /// Nodes with no incoming edge, in node array order.
    pub roots: Vec<&'a str>,
}

impl<'a> Relationships<'a> {
    /// Children of `id`, or an empty slice for unknown ids.
    pub fn children(&self, id: &str) -> &[&'a str] {
        self.children_of.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parent of `id`, if it has one.
    pub fn parent(&self, id: &str) -> Option<&'a str> {
        self.parent_of.get(id).copied()
    }
}

/// Build child lists, parent lookup, id lookup and roots.
///
/// Edges with an endpoint outside `nodes` are skipped for children/parent
/// maps but still count as incoming edges when picking roots, so a node
/// whose only parent is missing is never placed.
pub fn build_relationships<'a>(nodes: &'a [Node], edges: &'a [Edge]) -> Relationships<'a> {
    let mut rel = Relationships {
        children_of: HashMap::with_capacity(nodes.len()),
        parent_of: HashMap::with_capacity(edges.len()),
        by_id: HashMap::with_capacity(nodes.len()),
        roots: Vec::new(),
    };

    for node in nodes {
        let id = node.id.as_str();
        rel.children_of.entry(id).or_default();
        rel.by_id.entry(id).or_insert(node);
    }

    let mut has_parent: HashSet<&str> = HashSet::with_capacity(edges.len());
    for edge in edges {
        let source = edge.source.as_str();
        let target = edge.target.as_str();
        has_parent.insert(target);

        if !rel.by_id.contains_key(source) || !rel.by_id.contains_key(target) {
            continue;
        }
        if let Some(children) = rel.children_of.get_mut(source) {
            children.push(target);
        }
        rel.parent_of.entry(target).or_insert(source);
    }

    let mut seen_roots: HashSet<&str> = HashSet::new();
    for node in nodes {
        let id = node.id.as_str();
        if !has_parent.contains(id) && seen_roots.insert(id) {
            rel.roots.push(id);
        }
    }

    rel
}
