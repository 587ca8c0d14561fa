//! Spatial indexing for the collision pass.
//!
//! This module provides an R-tree based rectangle index so that overlap
//! candidates are found without testing every pair of boxes.

mod rtree;

pub use rtree::{RectIndex, SlotRect};
