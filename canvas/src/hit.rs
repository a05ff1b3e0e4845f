#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{NodeKind, NodeRef, NodeStore, Rect, RenderNode, Size};

/// Which part of a node was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    /// Corner resize handle; only exposed on the selected group.
    GroupHandle(Corner),
}

/// Corner of a rectangle, used for group resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    Nw,
    Ne,
    Se,
    Sw,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::Nw, Corner::Ne, Corner::Se, Corner::Sw];

    /// World position of this corner on `rect`.
    #[must_use]
    pub fn point(self, rect: &Rect) -> Point {
        match self {
            Self::Nw => Point::new(rect.x, rect.y),
            Self::Ne => Point::new(rect.right(), rect.y),
            Self::Se => Point::new(rect.right(), rect.bottom()),
            Self::Sw => Point::new(rect.x, rect.bottom()),
        }
    }

    /// Resize `start` by dragging this corner `(dx, dy)` world units. The
    /// opposite corner stays fixed and the size is clamped to `kind`'s bounds.
    #[must_use]
    pub fn resize(self, start: &Rect, dx: f64, dy: f64, kind: NodeKind) -> Rect {
        let (raw_w, raw_h) = match self {
            Self::Nw => (start.width - dx, start.height - dy),
            Self::Ne => (start.width + dx, start.height - dy),
            Self::Se => (start.width + dx, start.height + dy),
            Self::Sw => (start.width - dx, start.height + dy),
        };
        let size = kind.clamp(Size::new(raw_w, raw_h));
        let x = match self {
            Self::Nw | Self::Sw => start.right() - size.width,
            Self::Ne | Self::Se => start.x,
        };
        let y = match self {
            Self::Nw | Self::Ne => start.bottom() - size.height,
            Self::Se | Self::Sw => start.y,
        };
        Rect::new(x, y, size.width, size.height)
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub node: NodeRef,
    pub part: HitPart,
}

/// Test which node (if any) is under `world_pt`.
///
/// Handles of the selected group win first. Items are checked before groups
/// because they are drawn on top; within a layer the last drawn wins.
#[must_use]
pub fn hit_test(world_pt: Point, nodes: &NodeStore, camera: &Camera, selected: Option<NodeRef>) -> Option<Hit> {
    let slop = camera.screen_dist_to_world(HANDLE_RADIUS_PX);

    if let Some(group) = selected.filter(|n| n.is_group()).and_then(|n| nodes.get(n)) {
        let rect = group.rect();
        if let Some(corner) = Corner::ALL.into_iter().find(|c| c.point(&rect).distance(world_pt) <= slop) {
            return Some(Hit { node: group.node, part: HitPart::GroupHandle(corner) });
        }
    }

    let inside = |n: &&RenderNode| n.rect().contains(world_pt);
    nodes
        .items()
        .filter(inside)
        .last()
        .or_else(|| nodes.groups().filter(inside).last())
        .map(|n| Hit { node: n.node, part: HitPart::Body })
}
