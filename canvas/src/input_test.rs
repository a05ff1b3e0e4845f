use uuid::Uuid;

use super::*;

// =============================================================
// Modifiers / Key
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift && !m.ctrl && !m.alt && !m.meta);
    assert!(!m.command());
    assert!(!m.extends_selection());
}

#[test]
fn command_is_ctrl_or_meta() {
    assert!(Modifiers { ctrl: true, ..Modifiers::default() }.command());
    assert!(Modifiers { meta: true, ..Modifiers::default() }.command());
    assert!(!Modifiers { shift: true, ..Modifiers::default() }.command());
}

#[test]
fn alt_does_not_extend_selection() {
    assert!(Modifiers { shift: true, ..Modifiers::default() }.extends_selection());
    assert!(!Modifiers { alt: true, ..Modifiers::default() }.extends_selection());
}

#[test]
fn key_comparison_ignores_case() {
    let key = Key("Escape".into());
    assert!(key.is("escape"));
    assert!(Key("a".into()).is("A"));
    assert!(!key.is("Enter"));
}

// =============================================================
// Guides / UiState
// =============================================================

#[test]
fn guides_default_empty() {
    assert!(Guides::default().is_empty());
    assert!(!Guides { x: Some(1.0), y: None }.is_empty());
}

#[test]
fn select_only_replaces_selection() {
    let a = NodeRef::Item(Uuid::new_v4());
    let b = NodeRef::Group(Uuid::new_v4());
    let mut ui = UiState::default();
    ui.selection.insert(a);
    ui.selection.insert(b);

    ui.select_only(Some(b));
    assert_eq!(ui.selected, Some(b));
    assert_eq!(ui.selection.len(), 1);
    assert!(ui.selection.contains(&b));
}

#[test]
fn select_only_none_clears() {
    let mut ui = UiState::default();
    ui.select_only(Some(NodeRef::Item(Uuid::new_v4())));
    ui.select_only(None);
    assert!(ui.selected.is_none());
    assert!(ui.selection.is_empty());
}

// =============================================================
// DragTransaction / InputState
// =============================================================

#[test]
fn drag_transaction_starts_at_rest() {
    let node = NodeRef::Group(Uuid::new_v4());
    let rect = Rect::new(0.0, 0.0, 400.0, 300.0);
    let tx = DragTransaction::new(node, rect);
    assert_eq!(tx.start_rect, tx.current_rect);
    assert!(tx.is_group());
}

#[test]
fn input_state_default_is_idle() {
    assert!(matches!(InputState::default(), InputState::Idle));
    assert!(InputState::default().active_node().is_none());
}

#[test]
fn active_node_per_variant() {
    let node = NodeRef::Item(Uuid::new_v4());
    let origin = Point::new(0.0, 0.0);
    let rect = Rect::new(0.0, 0.0, 320.0, 280.0);

    let pressed = InputState::Pressed { node, start_screen: origin, grab_offset: origin };
    let dragging = InputState::Dragging { tx: DragTransaction::new(node, rect), grab_offset: origin };
    let resizing = InputState::ResizingGroup { node, corner: Corner::Se, start_world: origin, start_rect: rect };
    let panning = InputState::Panning { start_screen: origin, last_screen: origin };

    assert_eq!(pressed.active_node(), Some(node));
    assert_eq!(dragging.active_node(), Some(node));
    assert_eq!(resizing.active_node(), Some(node));
    assert!(panning.active_node().is_none());
}
