#![allow(clippy::float_cmp)]

use std::sync::Arc;

use canvas::engine::EngineConfig;
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::services::store::{MemoryStore, StoreWrite};

// =============================================================
// Helpers
// =============================================================

fn host() -> (HostState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let engine = EngineCore::with_config(EngineConfig { grid: None, ..EngineConfig::default() });
    (HostState::new(engine, store.clone()), store)
}

fn scenario(value: serde_json::Value) -> Scenario {
    serde_json::from_value(value).unwrap()
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn empty_document_uses_defaults() {
    let s = scenario(json!({}));
    assert_eq!(s.screen.width, 1280.0);
    assert!(s.items.is_empty() && s.groups.is_empty() && s.steps.is_empty());
    assert!(s.viewport.is_none());
}

#[test]
fn steps_parse_with_flattened_event_tag() {
    let id = Uuid::new_v4();
    let s = scenario(json!({
        "steps": [
            { "at_ms": 10, "event": "pointer_down", "x": 1.0, "y": 2.0, "modifiers": { "shift": true } },
            { "event": "pointer_up", "x": 1.0, "y": 2.0, "button": "middle" },
            { "event": "enter_resize", "id": id },
            { "event": "confirm_resize" },
            { "event": "select", "node": { "kind": "item", "id": id } },
            { "event": "select", "node": null },
        ]
    }));
    assert_eq!(s.steps.len(), 6);
    assert_eq!(s.steps[0].at_ms, 10);
    assert!(matches!(s.steps[0].event, Event::PointerDown { modifiers: ModifierSet { shift: true, .. }, .. }));
    assert_eq!(s.steps[1].at_ms, 0);
    assert!(matches!(s.steps[1].event, Event::PointerUp { button: ButtonName::Middle, .. }));
    assert!(matches!(s.steps[3].event, Event::ConfirmResize));
    assert!(matches!(s.steps[4].event, Event::Select { node: Some(NodeRef::Item(n)) } if n == id));
    assert!(matches!(s.steps[5].event, Event::Select { node: None }));
}

#[test]
fn unknown_event_is_rejected() {
    let result: Result<Scenario, _> = serde_json::from_value(json!({ "steps": [{ "event": "teleport" }] }));
    assert!(result.is_err());
}

#[test]
fn load_reports_missing_file() {
    let err = Scenario::load(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, HostError::ReadScenario { .. }));
}

#[test]
fn bundled_demo_parses() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/drag-and-resize.json");
    let s = Scenario::load(&path).unwrap();
    assert_eq!(s.items.len(), 2);
    assert_eq!(s.groups.len(), 1);
    assert!(!s.steps.is_empty());
}

// =============================================================
// Replay
// =============================================================

#[tokio::test(start_paused = true)]
async fn confirm_is_written_immediately_and_cancel_never() {
    let (state, store) = host();
    let id = Uuid::new_v4();
    let s = scenario(json!({
        "items": [{ "id": id, "position_x": 0.0, "position_y": 0.0, "canvas_width": 320.0, "canvas_height": 280.0 }],
        "steps": [
            { "at_ms": 0, "event": "enter_resize", "id": id },
            { "at_ms": 10, "event": "resize_item", "width": 450.0, "height": 350.0 },
            { "at_ms": 20, "event": "cancel_resize" },
            { "at_ms": 30, "event": "enter_resize", "id": id },
            { "at_ms": 40, "event": "resize_item", "width": 500.0, "height": 400.0 },
            { "at_ms": 50, "event": "key", "key": "Enter" },
        ]
    }));

    let summary = run(&state, &s).await;
    assert_eq!(summary.steps, 6);
    assert_eq!(summary.failed_writes, 0);
    assert_eq!(store.writes().await, vec![StoreWrite::ItemSize { id, width: 500.0, height: 400.0 }]);
}

#[tokio::test(start_paused = true)]
async fn steps_fire_at_their_scheduled_time() {
    let (state, _store) = host();
    let s = scenario(json!({ "steps": [{ "at_ms": 250, "event": "fit_view" }] }));
    run(&state, &s).await;
    assert_eq!(state.now_ms(), 250);
}

#[tokio::test(start_paused = true)]
async fn drag_write_waits_for_flush() {
    let (state, store) = host();
    let id = Uuid::new_v4();
    let s = scenario(json!({
        "items": [{ "id": id, "position_x": 0.0, "position_y": 0.0 }],
        "steps": [
            { "event": "pointer_down", "x": 10.0, "y": 10.0 },
            { "event": "pointer_move", "x": 210.0, "y": 110.0 },
            { "event": "pointer_up", "x": 210.0, "y": 110.0 },
        ]
    }));

    run(&state, &s).await;
    assert!(store.writes().await.is_empty());
    assert_eq!(persistence::flush_remaining(&state).await, 0);
    assert_eq!(store.writes().await, vec![StoreWrite::ItemPosition { id, x: 200.0, y: 100.0 }]);
}

#[tokio::test(start_paused = true)]
async fn delete_key_removes_selected_groups() {
    let (state, store) = host();
    let group = Uuid::new_v4();
    let s = scenario(json!({
        "groups": [{ "id": group, "position_x": 0.0, "position_y": 0.0, "width": 600.0, "height": 400.0, "name": "Crew" }],
        "steps": [
            { "event": "select", "node": { "kind": "group", "id": group } },
            { "event": "key", "key": "Delete" },
        ]
    }));

    run(&state, &s).await;
    assert_eq!(store.writes().await, vec![StoreWrite::GroupDelete { id: group }]);
    assert!(state.engine.lock().await.node(NodeRef::Group(group)).is_none());
}

#[tokio::test(start_paused = true)]
async fn live_group_resize_writes_every_frame() {
    let (state, store) = host();
    let group = Uuid::new_v4();
    let s = scenario(json!({
        "groups": [{ "id": group, "position_x": 0.0, "position_y": 0.0, "width": 600.0, "height": 400.0, "name": "Crew" }],
        "steps": [
            { "event": "select", "node": { "kind": "group", "id": group } },
            { "event": "pointer_down", "x": 600.0, "y": 400.0 },
            { "event": "pointer_move", "x": 650.0, "y": 420.0 },
            { "event": "pointer_move", "x": 700.0, "y": 450.0 },
            { "event": "pointer_up", "x": 700.0, "y": 450.0 },
        ]
    }));

    run(&state, &s).await;
    let writes = store.writes().await;
    assert_eq!(writes.len(), 2);
    assert!(matches!(
        writes[1],
        StoreWrite::GroupUpdate { update: canvas::engine::GroupUpdate { width: Some(w), .. }, .. } if w == 700.0
    ));
}

#[tokio::test(start_paused = true)]
async fn seeded_sizes_apply_before_first_refresh() {
    let (state, _store) = host();
    let id = Uuid::new_v4();
    let s = scenario(json!({
        "sizes": { id.to_string(): { "width": 400.0, "height": 300.0 } },
        "items": [{ "id": id, "position_x": 0.0, "position_y": 0.0 }],
    }));

    run(&state, &s).await;
    let engine = state.engine.lock().await;
    assert_eq!(engine.node(NodeRef::Item(id)).map(|n| n.size), Some(Size::new(400.0, 300.0)));
}

#[tokio::test(start_paused = true)]
async fn failed_writes_are_counted() {
    let (state, store) = host();
    store.set_failing(true);
    let s = scenario(json!({ "steps": [{ "event": "wheel", "x": 100.0, "y": 100.0, "dy": -120.0 }] }));
    let summary = run(&state, &s).await;
    assert_eq!(summary.failed_writes, 1);
}
