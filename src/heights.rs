//! Measured node heights fed back from the rendering layer.
//!
//! Node height depends on label length, so the rendering layer measures
//! each box after paint and reports it here. The table filters out
//! sub-pixel jitter and coalesces bursts into a single change signal.

use std::collections::{HashMap, HashSet};

use crate::config::LayoutConfig;
use crate::graph::NodeId;

/// Last-known rendered height per node.
#[derive(Debug, Clone)]
pub struct HeightTable {
    heights: HashMap<NodeId, f32>,
    default_height: f32,
    change_threshold: f32,
    generation: u64,
}

impl HeightTable {
    /// Create an empty table.
    pub fn new(default_height: f32, change_threshold: f32) -> Self {
        Self {
            heights: HashMap::new(),
            default_height,
            change_threshold,
            generation: 0,
        }
    }

    /// Create an empty table using the config's default height and threshold.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.default_node_height, config.height_change_threshold)
    }

    /// Height of `id`, or the default if it has not been measured.
    #[inline]
    pub fn height(&self, id: &str) -> f32 {
        self.heights
            .get(id)
            .copied()
            .filter(|h| *h > 0.0)
            .unwrap_or(self.default_height)
    }

    /// The height used for unmeasured nodes.
    #[inline]
    pub fn default_height(&self) -> f32 {
        self.default_height
    }

    /// Record one measurement. Returns true if the table changed.
    ///
    /// Non-finite and non-positive measurements are ignored. A measurement
    /// is accepted for a node seen for the first time, or when it differs
    /// from the stored height by more than the change threshold. Accepted
    /// values never go below the default height.
    pub fn record(&mut self, id: &NodeId, measured: f32) -> bool {
        let changed = self.apply(id, measured);
        if changed {
            self.generation += 1;
        }
        changed
    }

    /// Record a burst of measurements as one change.
    ///
    /// The generation advances at most once, so callers relayout once per
    /// batch rather than once per measurement.
    pub fn record_batch<'a, I>(&mut self, batch: I) -> bool
    where
        I: IntoIterator<Item = (&'a NodeId, f32)>,
    {
        let mut changed = false;
        for (id, measured) in batch {
            changed |= self.apply(id, measured);
        }
        if changed {
            self.generation += 1;
        }
        changed
    }

    fn apply(&mut self, id: &NodeId, measured: f32) -> bool {
        if !measured.is_finite() || measured <= 0.0 {
            return false;
        }
        let accepted = measured.max(self.default_height);
        match self.heights.get(id) {
            Some(&current) if (measured - current).abs() <= self.change_threshold => false,
            Some(&current) if accepted == current => false,
            _ => {
                self.heights.insert(id.clone(), accepted);
                true
            }
        }
    }

    /// Drop heights of nodes that no longer exist.
    pub fn retain(&mut self, live: &HashSet<&str>) {
        self.heights.retain(|id, _| live.contains(id.as_str()));
    }

    /// Forget one node's height.
    pub fn remove(&mut self, id: &NodeId) -> bool {
        self.heights.remove(id).is_some()
    }

    /// Forget every measured height.
    pub fn clear(&mut self) {
        self.heights.clear();
    }

    /// Counter bumped on every effective change.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of measured nodes.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

impl Default for HeightTable {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}
