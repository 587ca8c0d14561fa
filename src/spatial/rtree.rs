//! R-tree based rectangle index using the rstar crate.
//!
//! Provides O(log n) candidate lookup for the collision pass:
//! - Rectangles intersecting a query envelope
//! - Bulk rebuild from the current placement

use rstar::{RTree, RTreeObject, AABB};

/// An axis-aligned box in the index, tagged with its placement slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotRect {
    /// Index into the solver's placement order.
    pub slot: usize,
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl SlotRect {
    /// Create a new SlotRect.
    pub fn new(slot: usize, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            slot,
            x,
            y,
            width,
            height,
        }
    }
}

impl RTreeObject for SlotRect {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.x, self.y], [self.x + self.width, self.y + self.height])
    }
}

/// Spatial index over placed boxes.
///
/// Uses an R*-tree; rebuilt in bulk once per resolution pass.
pub struct RectIndex {
    tree: RTree<SlotRect>,
}

impl RectIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Slots whose rectangle intersects the given box grown by `margin` on
    /// every side, sorted ascending so callers iterate deterministically.
    pub fn near(&self, x: f32, y: f32, width: f32, height: f32, margin: f32) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [x - margin, y - margin],
            [x + width + margin, y + height + margin],
        );
        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|rect| rect.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Replace the contents with `rects`, bulk-loaded.
    pub fn rebuild(&mut self, rects: Vec<SlotRect>) {
        self.tree = RTree::bulk_load(rects);
    }
}

impl Default for RectIndex {
    fn default() -> Self {
        Self::new()
    }
}
