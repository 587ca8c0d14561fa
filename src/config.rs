//! Layout configuration.
//!
//! Defaults match the card proportions of the rendering layer: 280px wide,
//! 141px nominal height, 32px (2rem) row gap and indentation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the children of a node are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SiblingArrangement {
    /// One row per node in preorder; depth is encoded as indentation.
    #[default]
    Stacked,
    /// Siblings share a row below their parent; overlaps are resolved by
    /// the collision pass.
    SideBySide,
}

/// Configuration for the hierarchy layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Fixed width of every box.
    pub node_width: f32,
    /// Height used for nodes that have not been measured yet.
    pub default_node_height: f32,
    /// Vertical gap added after each placed row.
    pub vertical_offset: f32,
    /// Horizontal indentation per depth level.
    pub indent_offset: f32,
    /// Minimum horizontal gap between neighbours on the same row.
    pub min_sibling_spacing: f32,
    /// Minimum gap between any two boxes.
    pub min_node_spacing: f32,
    /// Y coordinate of the first row.
    pub start_y: f32,
    /// X coordinate of depth 0.
    pub base_x: f32,
    /// Sibling arrangement policy.
    pub arrangement: SiblingArrangement,
    /// Maximum number of collision-resolution passes.
    pub max_iterations: u32,
    /// Two nodes whose y differs by less than this share a row.
    pub row_tolerance: f32,
    /// Measured heights within this distance of the stored one are ignored.
    pub height_change_threshold: f32,
    /// Where the empty-state placeholder is shown.
    pub placeholder_x: f32,
    pub placeholder_y: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 280.0,
            default_node_height: 141.0,
            vertical_offset: 32.0,
            indent_offset: 32.0,
            min_sibling_spacing: 40.0,
            min_node_spacing: 30.0,
            start_y: 50.0,
            base_x: 100.0,
            arrangement: SiblingArrangement::Stacked,
            max_iterations: 50,
            row_tolerance: 1.0,
            height_change_threshold: 1.0,
            placeholder_x: 400.0,
            placeholder_y: 300.0,
        }
    }
}

impl LayoutConfig {
    /// Check that every value is usable by the solver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("nodeWidth", self.node_width),
            ("defaultNodeHeight", self.default_node_height),
        ];
        let non_negative = [
            ("verticalOffset", self.vertical_offset),
            ("indentOffset", self.indent_offset),
            ("minSiblingSpacing", self.min_sibling_spacing),
            ("minNodeSpacing", self.min_node_spacing),
            ("rowTolerance", self.row_tolerance),
            ("heightChangeThreshold", self.height_change_threshold),
        ];
        let finite = [
            ("startY", self.start_y),
            ("baseX", self.base_x),
            ("placeholderX", self.placeholder_x),
            ("placeholderY", self.placeholder_y),
        ];

        for &(field, value) in positive.iter().chain(&non_negative).chain(&finite) {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        Ok(())
    }
}
