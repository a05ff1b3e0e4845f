//! Render reconciliation: rebuild the node list from fresh upstream entities.
//!
//! Runs on every upstream change. Sizes resolve as
//! `override > cache > stored > default` for items and
//! `cache > stored > default` for groups, each clamped to the kind's bounds.
//! Positions come from the entity unless the engine supplies a local position
//! (an active drag or a write that has not been echoed back yet).

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod reconcile_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::doc::{GroupEntity, ItemEntity, NodeKind, NodeRef, RenderNode, Size, SizeOverrides};
use crate::sizes::SizeStore;

/// Local state consulted while rebuilding nodes.
pub struct ReconcileContext<'a> {
    pub sizes: &'a dyn SizeStore,
    pub overrides: &'a SizeOverrides,
    /// Positions that take precedence over the entity's stored position.
    pub positions: &'a HashMap<NodeRef, Point>,
    pub selected: Option<NodeRef>,
}

/// Effective size of an item card.
#[must_use]
pub fn item_size(entity: &ItemEntity, ctx: &ReconcileContext<'_>) -> Size {
    let node = NodeRef::Item(entity.id);
    let size = ctx
        .overrides
        .get(&entity.id)
        .copied()
        .or_else(|| ctx.sizes.get(node))
        .or_else(|| entity.stored_size())
        .unwrap_or_else(|| NodeKind::Item.default_size());
    NodeKind::Item.clamp(size)
}

/// Effective size of a group backdrop.
#[must_use]
pub fn group_size(entity: &GroupEntity, ctx: &ReconcileContext<'_>) -> Size {
    let size = ctx
        .sizes
        .get(NodeRef::Group(entity.id))
        .or_else(|| entity.stored_size())
        .unwrap_or_else(|| NodeKind::Group.default_size());
    NodeKind::Group.clamp(size)
}

/// Build the render list: groups first (drawn behind), then items, each in
/// upstream order. Never fails; empty input yields an empty list.
#[must_use]
pub fn reconcile(items: &[ItemEntity], groups: &[GroupEntity], ctx: &ReconcileContext<'_>) -> Vec<RenderNode> {
    let mut nodes = Vec::with_capacity(items.len() + groups.len());

    for group in groups {
        let node = NodeRef::Group(group.id);
        nodes.push(RenderNode {
            node,
            position: position_for(node, group.position_x, group.position_y, ctx),
            size: group_size(group, ctx),
            is_selected: ctx.selected == Some(node),
            label: group.name.clone(),
            color: group.color.clone(),
        });
    }

    for item in items {
        let node = NodeRef::Item(item.id);
        nodes.push(RenderNode {
            node,
            position: position_for(node, item.position_x, item.position_y, ctx),
            size: item_size(item, ctx),
            is_selected: ctx.selected == Some(node),
            label: item.name.clone(),
            color: None,
        });
    }

    nodes
}

fn position_for(node: NodeRef, x: f64, y: f64, ctx: &ReconcileContext<'_>) -> Point {
    ctx.positions.get(&node).copied().unwrap_or(Point::new(x, y))
}
