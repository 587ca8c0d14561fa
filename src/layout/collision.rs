//! Bounded collision resolution over placed boxes.
//!
//! Relaxation repeatedly scans pairs of boxes (candidates come from an
//! R-tree rebuilt each pass) and pushes the later box of an overlapping
//! pair: right when both share a row, otherwise the lower box down. A
//! same-row pass then enforces sibling spacing; if it moves anything,
//! relaxation resumes. Everything shares one iteration budget, and the
//! best positions so far are kept when the budget runs out.

use std::cmp::Ordering;

use super::placement::PlacedBox;
use crate::config::LayoutConfig;
use crate::spatial::{RectIndex, SlotRect};

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Relaxation passes performed.
    pub iterations: u32,
    /// False if the budget ran out before every overlap was removed.
    pub converged: bool,
}

/// True if `a` and `b`, with the fixed width, are closer than `gap` on
/// both axes.
#[inline]
pub fn overlaps(a: &PlacedBox<'_>, b: &PlacedBox<'_>, width: f32, gap: f32) -> bool {
    a.x < b.x + width + gap
        && b.x < a.x + width + gap
        && a.y < b.y + b.height + gap
        && b.y < a.y + a.height + gap
}

/// Resolve overlaps in place.
pub fn resolve(boxes: &mut [PlacedBox<'_>], config: &LayoutConfig) -> Resolution {
    let mut index = RectIndex::new();
    let mut iterations = 0;

    loop {
        let mut settled = false;
        while iterations < config.max_iterations {
            iterations += 1;
            if !relax_pass(boxes, &mut index, config) {
                settled = true;
                break;
            }
        }

        if !settled {
            return Resolution {
                iterations,
                converged: false,
            };
        }
        if !space_rows(boxes, config) {
            return Resolution {
                iterations,
                converged: true,
            };
        }
    }
}

/// One scan over all overlapping pairs. Returns true if anything moved.
fn relax_pass(boxes: &mut [PlacedBox<'_>], index: &mut RectIndex, config: &LayoutConfig) -> bool {
    let width = config.node_width;
    let gap = config.min_node_spacing;

    index.rebuild(
        boxes
            .iter()
            .enumerate()
            .map(|(slot, b)| SlotRect::new(slot, b.x, b.y, width, b.height))
            .collect(),
    );

    let mut moved = false;
    for i in 0..boxes.len() {
        let current = boxes[i];
        for j in index.near(current.x, current.y, width, current.height, gap) {
            if j <= i {
                continue;
            }
            let (a, b) = (boxes[i], boxes[j]);
            if !overlaps(&a, &b, width, gap) {
                continue;
            }

            if (a.y - b.y).abs() < config.row_tolerance {
                boxes[j].x = a.x + width + gap;
            } else if a.y < b.y {
                boxes[j].y = a.y + a.height + gap;
            } else {
                boxes[i].y = b.y + b.height + gap;
            }
            moved = true;
        }
    }

    moved
}

/// Enforce `node_width + min_sibling_spacing` between consecutive boxes of
/// each row. Returns true if anything moved.
fn space_rows(boxes: &mut [PlacedBox<'_>], config: &LayoutConfig) -> bool {
    let mut by_y: Vec<usize> = (0..boxes.len()).collect();
    by_y.sort_by(|&a, &b| boxes[a].y.total_cmp(&boxes[b].y).then(a.cmp(&b)));

    let pitch = config.node_width + config.min_sibling_spacing;
    let mut moved = false;
    let mut start = 0;
    while start < by_y.len() {
        let anchor = boxes[by_y[start]].y;
        let mut end = start + 1;
        while end < by_y.len() && (boxes[by_y[end]].y - anchor).abs() < config.row_tolerance {
            end += 1;
        }

        let row = &mut by_y[start..end];
        row.sort_by(|&a, &b| match boxes[a].x.total_cmp(&boxes[b].x) {
            Ordering::Equal => a.cmp(&b),
            other => other,
        });
        for pair in 0..row.len().saturating_sub(1) {
            let (left, right) = (row[pair], row[pair + 1]);
            let min_x = boxes[left].x + pitch;
            if boxes[right].x < min_x {
                boxes[right].x = min_x;
                moved = true;
            }
        }

        start = end;
    }

    moved
}
