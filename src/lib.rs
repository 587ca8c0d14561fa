//! Hierarchy Canvas - WASM Module
//!
//! This module provides the model and layout core for an interactive
//! hierarchy editor: a forest of labeled boxes that the user grows, prunes,
//! collapses and relabels, laid out automatically as an indented tree. It is
//! compiled to WebAssembly and exposes a JavaScript-friendly API via
//! wasm-bindgen. Rendering, hit testing and DOM measurement stay in JS.
//!
//! # Architecture
//!
//! - `graph`: Nodes, edges, id generation and the mutation engine
//! - `tree`: Relationship builder and collapse visibility filter
//! - `layout`: Preorder placement plus bounded collision resolution
//! - `spatial`: R-tree index used by the collision pass
//! - `heights`: Measured node heights fed back from the renderer
//! - `config`: Layout constants
//! - `error`: Typed errors for the fallible entry points

use std::collections::HashMap;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod graph;
pub mod heights;
pub mod layout;
pub mod spatial;
pub mod tree;

use config::LayoutConfig;
use graph::{Edge, HierarchyEngine, Node, NodeId};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Missing (`undefined`/`null`) config means all defaults.
fn parse_config(config: JsValue) -> Result<LayoutConfig, JsError> {
    if config.is_undefined() || config.is_null() {
        return Ok(LayoutConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(config)?)
}

/// Main entry point for the hierarchy engine.
///
/// This struct wraps the internal HierarchyEngine and provides the public
/// API exposed to JavaScript. Ids cross the boundary as plain strings;
/// nodes and edges as plain objects in the rendering layer's shape.
#[wasm_bindgen]
pub struct HierarchyWasm {
    engine: HierarchyEngine,
}

#[wasm_bindgen]
impl HierarchyWasm {
    /// Create an empty engine.
    ///
    /// # Arguments
    ///
    /// * `config` - Optional partial `LayoutConfig` (camelCase keys);
    ///   omitted keys keep their defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<HierarchyWasm, JsError> {
        Ok(Self {
            engine: HierarchyEngine::with_config(parse_config(config)?)?,
        })
    }

    /// Create an engine holding the single `Root` node a fresh canvas
    /// opens with.
    #[wasm_bindgen(js_name = withInitialRoot)]
    pub fn with_initial_root(config: JsValue) -> Result<HierarchyWasm, JsError> {
        Ok(Self {
            engine: HierarchyEngine::with_initial_root(parse_config(config)?)?,
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Discard everything and create a single root. Returns its id.
    #[wasm_bindgen(js_name = addRoot)]
    pub fn add_root(&mut self) -> String {
        self.engine.add_root().0
    }

    /// Append a child under `parent_id`. Returns the new id, or undefined
    /// if the parent does not exist.
    #[wasm_bindgen(js_name = addChild)]
    pub fn add_child(&mut self, parent_id: &str) -> Option<String> {
        self.engine.add_child(&NodeId::from(parent_id)).map(|id| id.0)
    }

    /// Remove a node and all of its descendants.
    #[wasm_bindgen(js_name = removeSubtree)]
    pub fn remove_subtree(&mut self, node_id: &str) -> bool {
        self.engine.remove_subtree(&NodeId::from(node_id))
    }

    /// Flip a node's collapse flag.
    #[wasm_bindgen(js_name = toggleCollapse)]
    pub fn toggle_collapse(&mut self, node_id: &str) -> bool {
        self.engine.toggle_collapse(&NodeId::from(node_id))
    }

    /// Commit an edited label. Empty or unchanged labels are ignored.
    pub fn relabel(&mut self, node_id: &str, label: &str) -> bool {
        self.engine.relabel(&NodeId::from(node_id), label)
    }

    /// Report one measured node height.
    #[wasm_bindgen(js_name = recordHeight)]
    pub fn record_height(&mut self, node_id: &str, height: f32) -> bool {
        self.engine.record_height(&NodeId::from(node_id), height)
    }

    /// Report a batch of measured heights as `{ [id]: height }` (an object
    /// or a `Map`). Relayouts at most once. Returns true if anything changed.
    #[wasm_bindgen(js_name = recordHeights)]
    pub fn record_heights(&mut self, heights: JsValue) -> Result<bool, JsError> {
        let heights: HashMap<NodeId, f32> = serde_wasm_bindgen::from_value(heights)?;
        Ok(self
            .engine
            .record_heights(heights.iter().map(|(id, &h)| (id, h))))
    }

    /// Replace the hierarchy with a snapshot of nodes and edges.
    ///
    /// Throws if the snapshot is not a forest; the engine is then unchanged.
    pub fn load(&mut self, nodes: JsValue, edges: JsValue) -> Result<(), JsError> {
        let nodes: Vec<Node> = serde_wasm_bindgen::from_value(nodes)?;
        let edges: Vec<Edge> = serde_wasm_bindgen::from_value(edges)?;
        self.engine.load(nodes, edges)?;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// All nodes with current positions and derived fields.
    pub fn nodes(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.nodes())?)
    }

    /// All edges.
    pub fn edges(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.edges())?)
    }

    /// Nodes not hidden under a collapsed ancestor.
    #[wasm_bindgen(js_name = visibleNodes)]
    pub fn visible_nodes(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.visible_nodes())?)
    }

    /// Edges to draw.
    #[wasm_bindgen(js_name = visibleEdges)]
    pub fn visible_edges(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.visible_edges())?)
    }

    /// What the canvas should show; the empty-state placeholder when there
    /// are no nodes.
    #[wasm_bindgen(js_name = displayNodes)]
    pub fn display_nodes(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.display_nodes())?)
    }

    /// `{ nodes, edges, visibleNodes, visibleEdges }` in one call.
    pub fn frame(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.engine.frame())?)
    }

    /// The effective layout configuration.
    pub fn config(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(self.engine.config())?)
    }

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.node_count() as u32
    }

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.engine.edge_count() as u32
    }

    /// Number of relayouts so far. Changes whenever positions may have.
    #[wasm_bindgen(js_name = layoutGeneration)]
    pub fn layout_generation(&self) -> f64 {
        self.engine.layout_generation() as f64
    }
}
