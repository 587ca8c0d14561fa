//! Node type and related structures.
//!
//! Nodes are the boxes of the hierarchy. Each node has:
//! - A stable unique string identifier
//! - Position (x, y) in layout space, written by the layout pass
//! - A label and a collapse flag
//! - A derived child count (recomputed from edges on every layout pass)
//! - A kind discriminator (hierarchy box or empty-state placeholder)

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier.
///
/// Opaque to the engine; generated ids look like `node-<millis>-<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new NodeId from anything string-like.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw string value.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    #[inline]
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    #[inline]
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Position of a node's top-left corner in layout space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// What a node renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeKind {
    /// A regular box in the hierarchy.
    #[default]
    #[serde(rename = "hierarchy")]
    Hierarchy,
    /// The "create root" affordance shown while the model is empty.
    #[serde(rename = "emptyState")]
    EmptyPlaceholder,
}

/// Per-node payload.
///
/// `children_count` is derived: the engine overwrites it on every layout
/// pass, so values supplied from outside are never trusted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeData {
    pub label: String,
    pub is_collapsed: bool,
    pub children_count: u32,
}

/// A node of the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    /// Create a hierarchy node with the given label at the origin.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Hierarchy,
            position: Position::default(),
            data: NodeData {
                label: label.into(),
                ..NodeData::default()
            },
        }
    }

    /// The placeholder node shown in place of an empty hierarchy.
    pub fn placeholder(position: Position) -> Self {
        Self {
            id: NodeId::new(Self::PLACEHOLDER_ID),
            kind: NodeKind::EmptyPlaceholder,
            position,
            data: NodeData::default(),
        }
    }

    /// Id used by [`Node::placeholder`].
    pub const PLACEHOLDER_ID: &'static str = "empty-state";

    #[inline]
    pub fn label(&self) -> &str {
        &self.data.label
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.data.is_collapsed
    }
}
