//! HierarchyEngine - owner of the node/edge collections.
//!
//! The engine is the single writer of the hierarchy. Its mutators are the
//! only legal way to change node identity or topology, and every effective
//! change runs the same relayout path before returning:
//!
//! visibility filter → layout solver → positions and derived fields
//! written back onto the nodes.
//!
//! Mutations that reference unknown ids are no-ops, so event handlers that
//! race with a deletion can call them speculatively.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, trace};

use super::edge::Edge;
use super::forest::{is_forest, validate_forest};
use super::ids::{ClockIds, IdSource};
use super::node::{Node, NodeId, Position};
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::heights::HeightTable;
use crate::layout::compute_layout;
use crate::tree::{descendants_of, filter_visible};

/// Label given to a fresh root.
pub const ROOT_LABEL: &str = "Root";

/// Id of the root a fresh canvas opens with.
pub const INITIAL_ROOT_ID: &str = "root";

/// Snapshot handed to the rendering layer after a relayout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    /// Every node, with current positions and derived fields.
    pub nodes: Vec<Node>,
    /// Every edge.
    pub edges: Vec<Edge>,
    /// Nodes not hidden by a collapsed ancestor.
    pub visible_nodes: Vec<Node>,
    /// Edges that should be drawn.
    pub visible_edges: Vec<Edge>,
}

/// The hierarchy model and its controller.
///
/// This struct manages:
/// - The node and edge collections (forest invariant maintained here)
/// - Measured heights fed back by the rendering layer
/// - The derived state of the last relayout (hidden set, visible edges)
pub struct HierarchyEngine {
    /// All nodes, in creation order (the root order for layout).
    nodes: Vec<Node>,

    /// All edges, in creation order (the sibling order for layout).
    edges: Vec<Edge>,

    /// Last-known rendered heights.
    heights: HeightTable,

    /// Layout constants.
    config: LayoutConfig,

    /// Fresh id generator.
    ids: Box<dyn IdSource>,

    /// Ids hidden by a collapsed ancestor as of the last relayout.
    hidden: HashSet<NodeId>,

    /// Edges drawn as of the last relayout.
    visible_edges: Vec<Edge>,

    /// Bumped on every relayout.
    generation: u64,

    /// Whether the last collision pass converged.
    converged: bool,
}

impl HierarchyEngine {
    /// Create an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::build(LayoutConfig::default(), Box::new(ClockIds::new()))
    }

    /// Create an empty engine with a custom configuration.
    pub fn with_config(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, Box::new(ClockIds::new())))
    }

    /// Create an empty engine with a custom configuration and id source.
    pub fn with_id_source(config: LayoutConfig, ids: Box<dyn IdSource>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, ids))
    }

    /// Create an engine holding a single `Root` node with id
    /// [`INITIAL_ROOT_ID`], the state a fresh canvas opens with.
    pub fn with_initial_root(config: LayoutConfig) -> Result<Self> {
        let mut engine = Self::with_config(config)?;
        engine.nodes.push(Node::new(INITIAL_ROOT_ID, ROOT_LABEL));
        engine.relayout();
        Ok(engine)
    }

    fn build(config: LayoutConfig, ids: Box<dyn IdSource>) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            heights: HeightTable::from_config(&config),
            config,
            ids,
            hidden: HashSet::new(),
            visible_edges: Vec::new(),
            generation: 0,
            converged: true,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Discard everything and start over with a single root.
    pub fn add_root(&mut self) -> NodeId {
        let id = self.ids.next_id("root");

        self.nodes.clear();
        self.edges.clear();
        self.heights.clear();
        self.nodes.push(Node::new(id.clone(), ROOT_LABEL));

        debug!(root = %id, "created root");
        self.relayout();
        id
    }

    /// Append a child under `parent_id`.
    ///
    /// The label is `Child N` where N is one more than the parent's current
    /// number of children, so numbers can repeat after a deletion.
    /// Returns `None` (and changes nothing) if the parent does not exist.
    pub fn add_child(&mut self, parent_id: &NodeId) -> Option<NodeId> {
        if !self.contains(parent_id) {
            trace!(parent = %parent_id, "add_child ignored: unknown parent");
            return None;
        }

        let siblings = self.edges.iter().filter(|e| e.source == *parent_id).count();
        let id = self.ids.next_id("node");

        self.nodes
            .push(Node::new(id.clone(), format!("Child {}", siblings + 1)));
        self.edges.push(Edge::new(parent_id.clone(), id.clone()));

        debug!(parent = %parent_id, child = %id, "added child");
        self.relayout();
        Some(id)
    }

    /// Remove `node_id` together with all of its descendants and every edge
    /// touching them. Returns false if the node does not exist.
    pub fn remove_subtree(&mut self, node_id: &NodeId) -> bool {
        if !self.contains(node_id) {
            trace!(node = %node_id, "remove_subtree ignored: unknown node");
            return false;
        }

        let mut doomed = descendants_of(node_id, &self.edges);
        doomed.insert(node_id.clone());

        self.nodes.retain(|n| !doomed.contains(&n.id));
        self.edges
            .retain(|e| !doomed.contains(&e.source) && !doomed.contains(&e.target));
        for id in &doomed {
            self.heights.remove(id);
        }

        debug!(node = %node_id, removed = doomed.len(), remaining = self.nodes.len(), "removed subtree");
        self.relayout();
        true
    }

    /// Flip the collapse flag of exactly `node_id`. Descendants keep their
    /// own flags, which take effect again once this node is expanded.
    pub fn toggle_collapse(&mut self, node_id: &NodeId) -> bool {
        let Some(node) = self.node_mut(node_id) else {
            trace!(node = %node_id, "toggle_collapse ignored: unknown node");
            return false;
        };
        node.data.is_collapsed = !node.data.is_collapsed;
        let collapsed = node.data.is_collapsed;

        debug!(node = %node_id, collapsed, "toggled collapse");
        self.relayout();
        true
    }

    /// Set the label of `node_id` to the trimmed `label`.
    ///
    /// Empty (after trimming) or unchanged labels are ignored.
    pub fn relabel(&mut self, node_id: &NodeId, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        let Some(node) = self.node_mut(node_id) else {
            trace!(node = %node_id, "relabel ignored: unknown node");
            return false;
        };
        if node.data.label == label {
            return false;
        }
        node.data.label = label.to_owned();

        debug!(node = %node_id, label, "relabeled");
        self.relayout();
        true
    }

    /// Feed one measured height back. Relayouts if the table changed.
    pub fn record_height(&mut self, node_id: &NodeId, height: f32) -> bool {
        self.record_heights([(node_id, height)])
    }

    /// Feed a burst of measured heights back, relaying out at most once.
    ///
    /// Measurements for ids that no longer exist are dropped.
    pub fn record_heights<'a, I>(&mut self, batch: I) -> bool
    where
        I: IntoIterator<Item = (&'a NodeId, f32)>,
    {
        let live: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        let known = batch
            .into_iter()
            .filter(|(id, _)| live.contains(id.as_str()));
        let changed = self.heights.record_batch(known);

        if changed {
            trace!(generation = self.heights.generation(), "heights changed");
            self.relayout();
        }
        changed
    }

    /// Replace the whole hierarchy with a snapshot.
    ///
    /// The snapshot must be a forest of hierarchy nodes (the empty-state
    /// placeholder is display-only); otherwise the engine is left as it
    /// was. Heights of nodes absent from the snapshot are forgotten.
    pub fn load(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<()> {
        validate_forest(&nodes, &edges)?;

        self.nodes = nodes;
        self.edges = edges;
        let live: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        self.heights.retain(&live);

        debug!(nodes = self.nodes.len(), edges = self.edges.len(), "loaded snapshot");
        self.relayout();
        Ok(())
    }

    // =========================================================================
    // Relayout
    // =========================================================================

    /// Recompute visibility and layout, and write positions and derived
    /// fields back onto the nodes. Hidden nodes keep their last position.
    fn relayout(&mut self) {
        debug_assert!(is_forest(&self.nodes, &self.edges), "forest invariant broken");

        let visibility = filter_visible(&self.nodes, &self.edges);
        let layout = compute_layout(
            &visibility.visible_nodes,
            &visibility.visible_edges,
            &self.heights,
            &self.config,
        );

        let mut child_counts: HashMap<&str, u32> = HashMap::with_capacity(self.nodes.len());
        for edge in &self.edges {
            *child_counts.entry(edge.source.as_str()).or_default() += 1;
        }

        for node in &mut self.nodes {
            if let Some(position) = layout.get(node.id.as_str()) {
                node.position = position;
            }
            node.data.children_count = child_counts.get(node.id.as_str()).copied().unwrap_or(0);
        }

        self.hidden = visibility.hidden_ids;
        self.visible_edges = visibility.visible_edges;
        self.converged = layout.converged;
        self.generation += 1;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == *id)
    }

    /// All nodes, annotated by the last relayout.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    /// True if `id` exists.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when there are no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if `id` is hidden under a collapsed ancestor.
    pub fn is_hidden(&self, id: &NodeId) -> bool {
        self.hidden.contains(id)
    }

    /// Nodes not hidden under a collapsed ancestor, in node order.
    pub fn visible_nodes(&self) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|n| !self.hidden.contains(&n.id))
            .cloned()
            .collect()
    }

    /// Edges to draw.
    pub fn visible_edges(&self) -> &[Edge] {
        &self.visible_edges
    }

    /// What the canvas shows: the visible nodes, or the empty-state
    /// placeholder when there are none.
    pub fn display_nodes(&self) -> Vec<Node> {
        if self.nodes.is_empty() {
            let at = Position::new(self.config.placeholder_x, self.config.placeholder_y);
            return vec![Node::placeholder(at)];
        }
        self.visible_nodes()
    }

    /// Everything the rendering layer needs after a relayout.
    pub fn frame(&self) -> Frame {
        Frame {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
            visible_nodes: self.visible_nodes(),
            visible_edges: self.visible_edges.clone(),
        }
    }

    /// Measured heights.
    pub fn heights(&self) -> &HeightTable {
        &self.heights
    }

    /// Layout constants.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of relayouts performed so far.
    pub fn layout_generation(&self) -> u64 {
        self.generation
    }

    /// Whether the last collision pass converged within its budget.
    pub fn layout_converged(&self) -> bool {
        self.converged
    }
}

impl Default for HierarchyEngine {
    fn default() -> Self {
        Self::new()
    }
}
