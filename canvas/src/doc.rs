//! Spatial model: node identities, sizes, upstream entities, and the node store.
//!
//! Entities (`ItemEntity`, `GroupEntity`) arrive from the data-loading
//! collaborator as plain serde records. The reconciler turns them into
//! `RenderNode`s, which carry the effective position and size the renderer and
//! input engine work with. `NodeStore` owns the current render list in draw
//! order: groups first, items after.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{
    DEFAULT_CARD_HEIGHT, DEFAULT_CARD_WIDTH, DEFAULT_GROUP_HEIGHT, DEFAULT_GROUP_WIDTH, MAX_CARD_HEIGHT,
    MAX_CARD_WIDTH, MAX_GROUP_HEIGHT, MAX_GROUP_WIDTH, MIN_CARD_HEIGHT, MIN_CARD_WIDTH, MIN_GROUP_HEIGHT,
    MIN_GROUP_WIDTH,
};

/// Identifier of an upstream entity (character or group record).
pub type EntityId = Uuid;

/// The kind of a canvas node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A character card.
    Item,
    /// A backdrop region drawn behind items.
    Group,
}

impl NodeKind {
    /// Size used when neither the cache nor the entity has a usable one.
    #[must_use]
    pub fn default_size(self) -> Size {
        match self {
            Self::Item => Size::new(DEFAULT_CARD_WIDTH, DEFAULT_CARD_HEIGHT),
            Self::Group => Size::new(DEFAULT_GROUP_WIDTH, DEFAULT_GROUP_HEIGHT),
        }
    }

    #[must_use]
    pub fn min_size(self) -> Size {
        match self {
            Self::Item => Size::new(MIN_CARD_WIDTH, MIN_CARD_HEIGHT),
            Self::Group => Size::new(MIN_GROUP_WIDTH, MIN_GROUP_HEIGHT),
        }
    }

    #[must_use]
    pub fn max_size(self) -> Size {
        match self {
            Self::Item => Size::new(MAX_CARD_WIDTH, MAX_CARD_HEIGHT),
            Self::Group => Size::new(MAX_GROUP_WIDTH, MAX_GROUP_HEIGHT),
        }
    }

    /// Clamp `size` into this kind's `[min, max]` box.
    #[must_use]
    pub fn clamp(self, size: Size) -> Size {
        let min = self.min_size();
        let max = self.max_size();
        Size::new(size.width.clamp(min.width, max.width), size.height.clamp(min.height, max.height))
    }
}

/// Tagged node identity. Routing between the item and group persistence paths
/// is decided by the variant, never by inspecting the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeRef {
    Item(EntityId),
    Group(EntityId),
}

impl NodeRef {
    /// The underlying entity id, without the kind tag.
    #[must_use]
    pub fn id(self) -> EntityId {
        match self {
            Self::Item(id) | Self::Group(id) => id,
        }
    }

    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Item(_) => NodeKind::Item,
            Self::Group(_) => NodeKind::Group,
        }
    }

    #[must_use]
    pub fn is_group(self) -> bool {
        matches!(self, Self::Group(_))
    }
}

/// Width and height in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a size from optional stored dimensions. Both must be usable.
    #[must_use]
    pub fn from_parts(width: Option<f64>, height: Option<f64>) -> Option<Self> {
        match (usable(width), usable(height)) {
            (Some(w), Some(h)) => Some(Self::new(w, h)),
            _ => None,
        }
    }
}

/// A stored dimension is usable when present, finite, and positive.
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Whether `pt` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }
}

// =============================================================
// Upstream entities
// =============================================================

/// A character record as supplied by the data-loading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntity {
    pub id: EntityId,
    pub position_x: f64,
    pub position_y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<f64>,
    /// Display label; empty when the record carries none.
    #[serde(default)]
    pub name: String,
}

impl ItemEntity {
    /// Server-stored card size, if both dimensions are usable.
    #[must_use]
    pub fn stored_size(&self) -> Option<Size> {
        Size::from_parts(self.canvas_width, self.canvas_height)
    }
}

/// A group record as supplied by the data-loading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntity {
    pub id: EntityId,
    pub position_x: f64,
    pub position_y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl GroupEntity {
    #[must_use]
    pub fn stored_size(&self) -> Option<Size> {
        Size::from_parts(Some(self.width), Some(self.height))
    }
}

/// Optional stored dimensions, as found in a client-side size snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSize {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
}

/// One-time `{id → {width?, height?}}` snapshot of last known card sizes.
pub type SizeSnapshot = HashMap<EntityId, PartialSize>;

/// Parse a size snapshot from its persisted JSON form.
///
/// # Errors
///
/// Returns the underlying `serde_json` error if `json` is not a valid snapshot.
pub fn parse_size_snapshot(json: &str) -> Result<SizeSnapshot, serde_json::Error> {
    serde_json::from_str(json)
}

/// Live bulk-resize preview sizes for items, keyed by entity id.
pub type SizeOverrides = HashMap<EntityId, Size>;

// =============================================================
// Render nodes
// =============================================================

/// A node as it is drawn and hit-tested: effective position and size.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    pub node: NodeRef,
    pub position: Point,
    pub size: Size,
    /// Recomputed on every reconciliation from the externally owned selection.
    pub is_selected: bool,
    pub label: String,
    /// CSS color for group backdrops; `None` for items and uncolored groups.
    pub color: Option<String>,
}

impl RenderNode {
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }
}

/// The current render list, in draw order (groups before items).
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: Vec<RenderNode>,
    index: HashMap<NodeRef, usize>,
}

impl NodeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list. Duplicate ids resolve to the last occurrence.
    pub fn replace_all(&mut self, nodes: Vec<RenderNode>) {
        self.index = nodes.iter().enumerate().map(|(i, n)| (n.node, i)).collect();
        self.nodes = nodes;
    }

    #[must_use]
    pub fn get(&self, node: NodeRef) -> Option<&RenderNode> {
        self.index.get(&node).and_then(|&i| self.nodes.get(i))
    }

    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut RenderNode> {
        let i = *self.index.get(&node)?;
        self.nodes.get_mut(i)
    }

    /// All nodes in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter()
    }

    /// Item nodes only, in draw order.
    pub fn items(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(|n| !n.node.is_group())
    }

    /// Group nodes only, in draw order.
    pub fn groups(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.iter().filter(|n| n.node.is_group())
    }

    /// Bounding box of every node, or `None` for an empty canvas.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes.iter().map(RenderNode::rect).reduce(|acc, r| acc.union(&r))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
