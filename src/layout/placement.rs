//! Initial placement of visible nodes.
//!
//! Both policies walk the forest depth-first in preorder (roots in node
//! array order, children in edge order), so the placement order is also the
//! priority order used by the collision pass.

use std::collections::HashSet;

use crate::config::{LayoutConfig, SiblingArrangement};
use crate::heights::HeightTable;
use crate::tree::Relationships;

/// A placed box. `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBox<'a> {
    pub id: &'a str,
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

/// Place every node reachable from a root.
///
/// Nodes reached a second time (malformed multi-parent input) keep their
/// first placement; nodes unreachable from any root are not placed.
pub fn place<'a>(
    rel: &Relationships<'a>,
    heights: &HeightTable,
    config: &LayoutConfig,
) -> Vec<PlacedBox<'a>> {
    match config.arrangement {
        SiblingArrangement::Stacked => place_stacked(rel, heights, config),
        SiblingArrangement::SideBySide => place_side_by_side(rel, heights, config),
    }
}

/// Children to descend into. A collapsed node contributes none, even when
/// the caller passed unfiltered edges.
fn expanded_children<'r, 'a>(rel: &'r Relationships<'a>, id: &str) -> &'r [&'a str] {
    match rel.by_id.get(id) {
        Some(node) if !node.is_collapsed() => rel.children(id),
        _ => &[],
    }
}

/// One row per node: `x = base_x + depth * indent`, y from a global cursor.
fn place_stacked<'a>(
    rel: &Relationships<'a>,
    heights: &HeightTable,
    config: &LayoutConfig,
) -> Vec<PlacedBox<'a>> {
    let mut placed = Vec::with_capacity(rel.by_id.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(rel.by_id.len());
    let mut cursor = config.start_y;

    for &root in &rel.roots {
        let mut stack: Vec<(&str, u32)> = vec![(root, 0)];
        while let Some((id, depth)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let height = heights.height(id);
            placed.push(PlacedBox {
                id,
                x: config.base_x + depth as f32 * config.indent_offset,
                y: cursor,
                height,
            });
            cursor += height + config.vertical_offset;

            // Reverse so the first child is popped first.
            for &child in expanded_children(rel, id).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }

    placed
}

/// Siblings share a row under their parent, spaced by box width plus the
/// sibling gap. Each root starts below everything placed before it.
fn place_side_by_side<'a>(
    rel: &Relationships<'a>,
    heights: &HeightTable,
    config: &LayoutConfig,
) -> Vec<PlacedBox<'a>> {
    let mut placed = Vec::with_capacity(rel.by_id.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(rel.by_id.len());
    let column = config.node_width + config.min_sibling_spacing;
    let mut next_root_y = config.start_y;

    for &root in &rel.roots {
        let mut bottom = next_root_y;
        let mut stack: Vec<(&str, f32, f32)> = vec![(root, config.base_x, next_root_y)];
        while let Some((id, x, y)) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let height = heights.height(id);
            placed.push(PlacedBox {
                id,
                x,
                y,
                height,
            });
            bottom = bottom.max(y + height);

            let child_y = y + height + config.vertical_offset;
            let children = expanded_children(rel, id);
            for (k, &child) in children.iter().enumerate().rev() {
                let child_x = x + config.indent_offset + k as f32 * column;
                stack.push((child, child_x, child_y));
            }
        }
        next_root_y = bottom + config.vertical_offset;
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};
    use crate::tree::build_relationships;

    fn tree() -> (Vec<Node>, Vec<Edge>) {
        // r → a → a1, r → b
        let nodes = ["r", "a", "a1", "b"]
            .iter()
            .map(|id| Node::new(*id, *id))
            .collect();
        let edges = vec![Edge::new("r", "a"), Edge::new("a", "a1"), Edge::new("r", "b")];
        (nodes, edges)
    }

    #[test]
    fn test_stacked_preorder() {
        let (nodes, edges) = tree();
        let rel = build_relationships(&nodes, &edges);
        let placed = place(&rel, &HeightTable::default(), &LayoutConfig::default());

        let order: Vec<&str> = placed.iter().map(|p| p.id).collect();
        assert_eq!(order, vec!["r", "a", "a1", "b"]);

        let ys: Vec<f32> = placed.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![50.0, 223.0, 396.0, 569.0]);

        let xs: Vec<f32> = placed.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![100.0, 132.0, 164.0, 132.0]);
    }

    #[test]
    fn test_stacked_uses_measured_heights() {
        let (nodes, edges) = tree();
        let rel = build_relationships(&nodes, &edges);
        let mut heights = HeightTable::default();
        heights.record(&"a".into(), 200.0);

        let placed = place(&rel, &heights, &LayoutConfig::default());
        // a1 sits 200 + 32 below a.
        assert_eq!(placed[2].y - placed[1].y, 232.0);
        assert_eq!(placed[2].height, 141.0);
    }

    #[test]
    fn test_stacked_skips_collapsed_children() {
        let (mut nodes, edges) = tree();
        nodes[1].data.is_collapsed = true;
        let rel = build_relationships(&nodes, &edges);
        let placed = place(&rel, &HeightTable::default(), &LayoutConfig::default());

        let order: Vec<&str> = placed.iter().map(|p| p.id).collect();
        assert_eq!(order, vec!["r", "a", "b"]);
    }

    #[test]
    fn test_multiple_roots_in_array_order() {
        let nodes = vec![Node::new("r2", "r2"), Node::new("r1", "r1")];
        let rel = build_relationships(&nodes, &[]);
        let placed = place(&rel, &HeightTable::default(), &LayoutConfig::default());

        let order: Vec<&str> = placed.iter().map(|p| p.id).collect();
        assert_eq!(order, vec!["r2", "r1"]);
        assert!(placed.iter().all(|p| p.x == 100.0));
    }

    #[test]
    fn test_duplicate_parent_placed_once() {
        let nodes = ["r", "a", "b", "c"].iter().map(|id| Node::new(*id, *id)).collect::<Vec<_>>();
        let edges = vec![
            Edge::new("r", "a"),
            Edge::new("r", "b"),
            Edge::new("a", "c"),
            Edge::new("b", "c"),
        ];
        let rel = build_relationships(&nodes, &edges);
        let placed = place(&rel, &HeightTable::default(), &LayoutConfig::default());

        let order: Vec<&str> = placed.iter().map(|p| p.id).collect();
        assert_eq!(order, vec!["r", "a", "c", "b"]);
    }

    #[test]
    fn test_side_by_side_rows() {
        let (nodes, edges) = tree();
        let rel = build_relationships(&nodes, &edges);
        let config = LayoutConfig {
            arrangement: SiblingArrangement::SideBySide,
            ..Default::default()
        };
        let placed = place(&rel, &HeightTable::default(), &config);

        let find = |id: &str| placed.iter().find(|p| p.id == id).copied().unwrap();
        assert_eq!((find("r").x, find("r").y), (100.0, 50.0));
        assert_eq!((find("a").x, find("a").y), (132.0, 223.0));
        assert_eq!((find("b").x, find("b").y), (452.0, 223.0));
        assert_eq!((find("a1").x, find("a1").y), (164.0, 396.0));
    }

    #[test]
    fn test_side_by_side_second_root_below_first_tree() {
        let nodes = vec![Node::new("r1", "r1"), Node::new("c", "c"), Node::new("r2", "r2")];
        let edges = vec![Edge::new("r1", "c")];
        let rel = build_relationships(&nodes, &edges);
        let config = LayoutConfig {
            arrangement: SiblingArrangement::SideBySide,
            ..Default::default()
        };
        let placed = place(&rel, &HeightTable::default(), &config);

        let r2 = placed.iter().find(|p| p.id == "r2").unwrap();
        // c occupies 223..364, so r2 starts at 364 + 32.
        assert_eq!(r2.y, 396.0);
        assert_eq!(r2.x, 100.0);
    }
}
