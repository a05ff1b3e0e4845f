#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

// =============================================================
// Helpers
// =============================================================

fn node(node: NodeRef, x: f64, y: f64, w: f64, h: f64) -> RenderNode {
    RenderNode {
        node,
        position: Point::new(x, y),
        size: Size::new(w, h),
        is_selected: false,
        label: String::new(),
        color: None,
    }
}

// =============================================================
// NodeKind
// =============================================================

#[test]
fn item_defaults_match_card_constants() {
    assert_eq!(NodeKind::Item.default_size(), Size::new(320.0, 280.0));
    assert_eq!(NodeKind::Item.min_size(), Size::new(280.0, 200.0));
    assert_eq!(NodeKind::Item.max_size(), Size::new(600.0, 800.0));
}

#[test]
fn group_minimum_is_larger_than_item_minimum() {
    let group = NodeKind::Group.min_size();
    let item = NodeKind::Item.min_size();
    assert!(group.width > item.width);
    assert_eq!(group, Size::new(300.0, 200.0));
}

#[test]
fn clamp_bounds_each_axis_independently() {
    assert_eq!(NodeKind::Item.clamp(Size::new(100.0, 1000.0)), Size::new(280.0, 800.0));
    assert_eq!(NodeKind::Item.clamp(Size::new(450.0, 350.0)), Size::new(450.0, 350.0));
    assert_eq!(NodeKind::Group.clamp(Size::new(10.0, 9000.0)), Size::new(300.0, 4000.0));
}

// =============================================================
// NodeRef
// =============================================================

#[test]
fn node_ref_exposes_id_and_kind() {
    let id = Uuid::new_v4();
    assert_eq!(NodeRef::Item(id).id(), id);
    assert_eq!(NodeRef::Group(id).id(), id);
    assert_eq!(NodeRef::Item(id).kind(), NodeKind::Item);
    assert!(NodeRef::Group(id).is_group());
    assert!(!NodeRef::Item(id).is_group());
}

#[test]
fn item_and_group_with_same_uuid_are_distinct() {
    let id = Uuid::new_v4();
    assert_ne!(NodeRef::Item(id), NodeRef::Group(id));
}

#[test]
fn node_ref_serializes_as_tagged_object() {
    let id = Uuid::nil();
    let value = serde_json::to_value(NodeRef::Group(id)).unwrap();
    assert_eq!(value, json!({ "kind": "group", "id": id.to_string() }));
    let back: NodeRef = serde_json::from_value(value).unwrap();
    assert_eq!(back, NodeRef::Group(id));
}

// =============================================================
// Size / Rect
// =============================================================

#[test]
fn size_from_parts_requires_both_dimensions() {
    assert_eq!(Size::from_parts(Some(300.0), Some(200.0)), Some(Size::new(300.0, 200.0)));
    assert_eq!(Size::from_parts(Some(300.0), None), None);
    assert_eq!(Size::from_parts(None, Some(200.0)), None);
}

#[test]
fn size_from_parts_rejects_zero_negative_and_nan() {
    assert_eq!(Size::from_parts(Some(0.0), Some(200.0)), None);
    assert_eq!(Size::from_parts(Some(-5.0), Some(200.0)), None);
    assert_eq!(Size::from_parts(Some(f64::NAN), Some(200.0)), None);
}

#[test]
fn rect_edges_and_centers() {
    let r = Rect::new(10.0, 20.0, 100.0, 50.0);
    assert_eq!(r.right(), 110.0);
    assert_eq!(r.bottom(), 70.0);
    assert_eq!(r.center_x(), 60.0);
    assert_eq!(r.center_y(), 45.0);
}

#[test]
fn rect_contains_includes_border() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
}

#[test]
fn rect_union_covers_both() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(20.0, -5.0, 10.0, 10.0);
    assert_eq!(a.union(&b), Rect::new(0.0, -5.0, 30.0, 15.0));
}

// =============================================================
// Entities
// =============================================================

#[test]
fn item_entity_deserializes_without_sizes() {
    let id = Uuid::new_v4();
    let item: ItemEntity = serde_json::from_value(json!({
        "id": id,
        "position_x": 10.0,
        "position_y": 20.0,
    }))
    .unwrap();
    assert_eq!(item.id, id);
    assert!(item.stored_size().is_none());
    assert!(item.name.is_empty());
}

#[test]
fn item_entity_stored_size_uses_canvas_fields() {
    let item: ItemEntity = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "position_x": 0.0,
        "position_y": 0.0,
        "canvas_width": 300.0,
        "canvas_height": 280.0,
        "name": "Mira",
    }))
    .unwrap();
    assert_eq!(item.stored_size(), Some(Size::new(300.0, 280.0)));
    assert_eq!(item.name, "Mira");
}

#[test]
fn group_entity_deserializes_optional_style() {
    let group: GroupEntity = serde_json::from_value(json!({
        "id": Uuid::new_v4(),
        "position_x": -100.0,
        "position_y": 50.0,
        "width": 600.0,
        "height": 400.0,
        "name": "The Guild",
    }))
    .unwrap();
    assert!(group.color.is_none());
    assert!(group.icon.is_none());
    assert_eq!(group.stored_size(), Some(Size::new(600.0, 400.0)));
}

#[test]
fn parse_size_snapshot_accepts_partial_entries() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let json = format!(r#"{{"{a}": {{"width": 400, "height": 300}}, "{b}": {{"width": 350}}}}"#);
    let snapshot = parse_size_snapshot(&json).unwrap();
    assert_eq!(snapshot[&a], PartialSize { width: Some(400.0), height: Some(300.0) });
    assert_eq!(snapshot[&b], PartialSize { width: Some(350.0), height: None });
}

#[test]
fn parse_size_snapshot_rejects_garbage() {
    assert!(parse_size_snapshot("not json").is_err());
}

// =============================================================
// NodeStore
// =============================================================

#[test]
fn store_starts_empty() {
    let store = NodeStore::new();
    assert!(store.is_empty());
    assert!(store.bounds().is_none());
}

#[test]
fn store_lookup_by_node_ref() {
    let item = NodeRef::Item(Uuid::new_v4());
    let group = NodeRef::Group(Uuid::new_v4());
    let mut store = NodeStore::new();
    store.replace_all(vec![node(group, 0.0, 0.0, 500.0, 400.0), node(item, 10.0, 10.0, 320.0, 280.0)]);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(item).map(|n| n.position), Some(Point::new(10.0, 10.0)));
    assert_eq!(store.items().count(), 1);
    assert_eq!(store.groups().count(), 1);
}

#[test]
fn store_get_mut_edits_in_place() {
    let item = NodeRef::Item(Uuid::new_v4());
    let mut store = NodeStore::new();
    store.replace_all(vec![node(item, 0.0, 0.0, 320.0, 280.0)]);
    if let Some(n) = store.get_mut(item) {
        n.position = Point::new(40.0, 60.0);
    }
    assert_eq!(store.get(item).map(|n| n.position), Some(Point::new(40.0, 60.0)));
}

#[test]
fn store_replace_all_drops_old_nodes() {
    let a = NodeRef::Item(Uuid::new_v4());
    let b = NodeRef::Item(Uuid::new_v4());
    let mut store = NodeStore::new();
    store.replace_all(vec![node(a, 0.0, 0.0, 10.0, 10.0)]);
    store.replace_all(vec![node(b, 0.0, 0.0, 10.0, 10.0)]);
    assert!(store.get(a).is_none());
    assert!(store.get(b).is_some());
}

#[test]
fn store_bounds_cover_all_nodes() {
    let mut store = NodeStore::new();
    store.replace_all(vec![
        node(NodeRef::Item(Uuid::new_v4()), 0.0, 0.0, 100.0, 100.0),
        node(NodeRef::Group(Uuid::new_v4()), -50.0, 200.0, 300.0, 200.0),
    ]);
    assert_eq!(store.bounds(), Some(Rect::new(-50.0, 0.0, 300.0, 400.0)));
}
