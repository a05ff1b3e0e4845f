//! Smart-snap alignment between item nodes, plus background grid snapping.
//!
//! `find_snap` is pure: it reads the candidate rectangle of the node being
//! dragged and the other nodes, and returns an adjusted origin together with
//! the guide lines to draw. Callers decide whether to apply the result.
//!
//! Each axis is solved independently. Against every other item the candidate
//! alignments are tried in priority order (start/start, end/end,
//! center/center, start/end, end/start) and the first within threshold is that
//! item's match. Across items the nearest match wins; exact ties keep the item
//! seen first.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::camera::Point;
use crate::doc::{NodeRef, RenderNode, Size};

/// Adjusted origin and active guide lines for one drag frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub position: Point,
    /// World x of the vertical guide line, when the x axis aligned.
    pub guide_x: Option<f64>,
    /// World y of the horizontal guide line, when the y axis aligned.
    pub guide_y: Option<f64>,
}

/// One axis match: the new start coordinate, the guide, and how far we moved.
#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    start: f64,
    guide: f64,
    distance: f64,
}

/// Find alignment snaps for `moving`, whose candidate rectangle is
/// `candidate` + `size`, against `others`.
///
/// The moving node itself and every group node are ignored.
pub fn find_snap<'a, I>(moving: NodeRef, candidate: Point, size: Size, others: I, threshold: f64) -> SnapResult
where
    I: IntoIterator<Item = &'a RenderNode>,
{
    let mut best_x: Option<AxisMatch> = None;
    let mut best_y: Option<AxisMatch> = None;

    for other in others {
        if other.node == moving || other.node.is_group() {
            continue;
        }
        let rect = other.rect();
        if let Some(m) = align_axis(candidate.x, size.width, rect.x, rect.width, threshold) {
            best_x = nearer(best_x, m);
        }
        if let Some(m) = align_axis(candidate.y, size.height, rect.y, rect.height, threshold) {
            best_y = nearer(best_y, m);
        }
    }

    SnapResult {
        position: Point::new(
            best_x.map_or(candidate.x, |m| m.start),
            best_y.map_or(candidate.y, |m| m.start),
        ),
        guide_x: best_x.map(|m| m.guide),
        guide_y: best_y.map(|m| m.guide),
    }
}

fn nearer(current: Option<AxisMatch>, candidate: AxisMatch) -> Option<AxisMatch> {
    match current {
        Some(cur) if cur.distance <= candidate.distance => Some(cur),
        _ => Some(candidate),
    }
}

/// Try the five alignments of a moving span against a fixed span on one axis.
fn align_axis(start: f64, len: f64, other_start: f64, other_len: f64, threshold: f64) -> Option<AxisMatch> {
    let end = start + len;
    let center = start + len / 2.0;
    let other_end = other_start + other_len;
    let other_center = other_start + other_len / 2.0;

    // (moving edge, fixed edge, resulting start)
    let candidates = [
        (start, other_start, other_start),
        (end, other_end, other_end - len),
        (center, other_center, other_center - len / 2.0),
        (start, other_end, other_end),
        (end, other_start, other_start - len),
    ];

    candidates.into_iter().find_map(|(edge, target, new_start)| {
        let distance = (edge - target).abs();
        (distance < threshold).then_some(AxisMatch { start: new_start, guide: target, distance })
    })
}

/// Round `value` to the nearest multiple of `grid`. A non-positive grid is a no-op.
#[must_use]
pub fn snap_to_grid(value: f64, grid: f64) -> f64 {
    if grid > 0.0 { (value / grid).round() * grid } else { value }
}

/// Compose alignment with grid snapping: axes that aligned keep their aligned
/// coordinate, the rest are rounded to `grid` when one is configured.
#[must_use]
pub fn apply_grid(result: &SnapResult, grid: Option<f64>) -> Point {
    let Some(grid) = grid else {
        return result.position;
    };
    Point::new(
        if result.guide_x.is_some() { result.position.x } else { snap_to_grid(result.position.x, grid) },
        if result.guide_y.is_some() { result.position.y } else { snap_to_grid(result.position.y, grid) },
    )
}
