//! Input model: modifier keys, mouse buttons, and the drag gesture state machine.
//!
//! `InputState` is the gesture being tracked between pointer-down and
//! pointer-up. A press on a node only becomes a drag once the pointer travels
//! past the drag threshold, so plain clicks select without moving anything.
//! Item resizing is not tracked here: it is an explicit mode with its own
//! machine in [`crate::resize`]. Group corner resizing is a pointer gesture
//! and lives here.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::collections::BTreeSet;

use crate::camera::Point;
use crate::doc::{NodeRef, Rect};
use crate::hit::Corner;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on Linux/Windows or Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }

    /// Any of the keys that extend the selection instead of replacing it.
    #[must_use]
    pub fn extends_selection(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, zooms out).
    pub dy: f64,
}

/// Guide lines currently shown over the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Guides {
    /// World x of the vertical guide.
    pub x: Option<f64>,
    /// World y of the horizontal guide.
    pub y: Option<f64>,
}

impl Guides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The single externally visible selection (drives `is_selected`).
    pub selected: Option<NodeRef>,
    /// Nodes targeted by keyboard commands such as delete.
    pub selection: BTreeSet<NodeRef>,
    /// Active alignment guides; only non-empty mid-drag.
    pub guides: Guides,
}

impl UiState {
    /// Replace the selection with a single node (or nothing).
    pub fn select_only(&mut self, node: Option<NodeRef>) {
        self.selected = node;
        self.selection.clear();
        self.selection.extend(node);
    }
}

/// One drag gesture, from the first move past the threshold to release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTransaction {
    pub node: NodeRef,
    /// Rectangle at gesture start.
    pub start_rect: Rect,
    /// Rectangle after the latest (possibly snapped) move.
    pub current_rect: Rect,
}

impl DragTransaction {
    #[must_use]
    pub fn new(node: NodeRef, rect: Rect) -> Self {
        Self { node, start_rect: rect, current_rect: rect }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        self.node.is_group()
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// emit final actions on pointer-up.
#[derive(Debug, Clone, Copy, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Pointer is down on a node but has not yet moved past the drag threshold.
    Pressed {
        node: NodeRef,
        /// Screen-space position of the press.
        start_screen: Point,
        /// Pointer position minus node origin, in world units.
        grab_offset: Point,
    },
    /// The user is dragging a node.
    Dragging {
        tx: DragTransaction,
        /// Pointer position minus node origin, in world units.
        grab_offset: Point,
    },
    /// The user is panning the canvas by dragging empty space.
    Panning {
        /// Screen-space position of the press; a release near it is a click.
        start_screen: Point,
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is live-resizing a group by one of its corner handles.
    ResizingGroup {
        node: NodeRef,
        corner: Corner,
        /// World-space pointer position at the start of the resize.
        start_world: Point,
        /// Group rectangle at the start of the resize.
        start_rect: Rect,
    },
}

impl InputState {
    /// The node this gesture is moving or resizing, if any.
    #[must_use]
    pub fn active_node(&self) -> Option<NodeRef> {
        match self {
            Self::Pressed { node, .. } | Self::ResizingGroup { node, .. } => Some(*node),
            Self::Dragging { tx, .. } => Some(tx.node),
            Self::Idle | Self::Panning { .. } => None,
        }
    }
}
