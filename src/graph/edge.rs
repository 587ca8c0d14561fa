//! Edge type and related structures.
//!
//! Edges are the parent→child connections between nodes. Each edge has:
//! - An identifier derived from its endpoints (`e-{source}-{target}`)
//! - Source (parent) and target (child) node IDs

use std::fmt;

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Edge identifier.
///
/// Derived deterministically from the endpoints, so two edges between the
/// same pair share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Derive the id of the edge `source → target`.
    pub fn between(source: &NodeId, target: &NodeId) -> Self {
        Self(format!("e-{source}-{target}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A directed parent→child edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    /// Create the edge `source → target` with its derived id.
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
        }
    }
}
