//! Error types for the fallible entry points.
//!
//! Mutations never fail (unknown ids are no-ops), so errors only arise when
//! adopting outside input: a layout configuration or a node/edge snapshot.

use thiserror::Error;

use crate::graph::NodeId;

/// Invalid [`LayoutConfig`](crate::config::LayoutConfig) values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
}

/// Reasons a node/edge snapshot is not a forest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForestError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("edge {parent} -> {child} references an unknown node")]
    DanglingEdge { parent: NodeId, child: NodeId },

    #[error("node {0} is not a hierarchy node")]
    NotHierarchy(NodeId),

    #[error("self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("node {0} has more than one parent")]
    MultipleParents(NodeId),

    #[error("cycle detected in hierarchy")]
    Cycle,
}

/// Top-level error for the hierarchy engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HierarchyError {
    #[error("invalid layout configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid hierarchy snapshot: {0}")]
    Forest(#[from] ForestError),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
