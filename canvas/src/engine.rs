use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{
    DEBOUNCE_MS, DRAG_THRESHOLD_PX, ECHO_TOLERANCE, FIT_VIEW_PADDING, SNAP_GRID, SNAP_THRESHOLD, UNACKED_REFRESH_LIMIT,
    WHEEL_ZOOM_STEP,
};
use crate::debounce::Debouncer;
use crate::doc::{
    EntityId, GroupEntity, ItemEntity, NodeKind, NodeRef, NodeStore, Rect, RenderNode, Size, SizeOverrides,
    SizeSnapshot,
};
use crate::hit::{self, Hit, HitPart};
use crate::input::{Button, DragTransaction, Guides, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::reconcile::{ReconcileContext, reconcile};
use crate::render;
use crate::resize::{ItemResize, ResizeOutcome};
use crate::sizes::{SizeCache, SizeStore};
use crate::snap::{self, SnapResult};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Debounced item move settled; persist the position.
    PositionChanged { id: EntityId, x: f64, y: f64 },
    /// Debounced group move settled; persist the position.
    GroupPositionChanged { id: EntityId, x: f64, y: f64 },
    /// Item resize confirmed; persist the size now.
    SizeChanged { id: EntityId, width: f64, height: f64 },
    /// One frame of a live group resize.
    GroupUpdated { id: EntityId, update: GroupUpdate },
    GroupDeleted { id: EntityId },
    Select(Option<NodeRef>),
    SelectionChanged { items: Vec<EntityId>, groups: Vec<EntityId> },
    DeleteSelected { items: Vec<EntityId>, groups: Vec<EntityId> },
    DoubleClick { id: EntityId },
    EditGroup { id: EntityId },
    ViewportChanged(Viewport),
    RenderNeeded,
}

/// Sparse group update. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl GroupUpdate {
    /// Full geometry update for `rect`.
    #[must_use]
    pub fn from_rect(rect: &Rect) -> Self {
        Self { x: Some(rect.x), y: Some(rect.y), width: Some(rect.width), height: Some(rect.height) }
    }
}

/// Tunables for snapping, debouncing, and drag detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Alignment match distance in world units.
    pub snap_threshold: f64,
    /// Background grid spacing; `None` disables grid snapping.
    pub grid: Option<f64>,
    /// Quiet period before a position write flushes.
    pub debounce_ms: u64,
    /// Pointer travel in screen pixels before a press becomes a drag.
    pub drag_threshold_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            snap_threshold: SNAP_THRESHOLD,
            grid: Some(SNAP_GRID),
            debounce_ms: DEBOUNCE_MS,
            drag_threshold_px: DRAG_THRESHOLD_PX,
        }
    }
}

/// A position handed to the host that upstream has not echoed back yet.
#[derive(Debug, Clone, Copy)]
struct Unacked {
    position: Point,
    stale_refreshes: u32,
}

impl Unacked {
    fn new(position: Point) -> Self {
        Self { position, stale_refreshes: 0 }
    }
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: EngineConfig,
    pub nodes: NodeStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub resize: ItemResize,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
    sizes: Box<dyn SizeStore>,
    overrides: SizeOverrides,
    items: Vec<ItemEntity>,
    groups: Vec<GroupEntity>,
    pending: Debouncer<NodeRef, Point>,
    /// Positions already handed to the host but not yet seen in a refresh.
    unacked: HashMap<NodeRef, Unacked>,
    reconciled: bool,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_size_store(config, Box::new(SizeCache::new()))
    }

    /// Build an engine around a caller-owned size store.
    #[must_use]
    pub fn with_size_store(config: EngineConfig, sizes: Box<dyn SizeStore>) -> Self {
        Self {
            config,
            nodes: NodeStore::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            resize: ItemResize::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            sizes,
            overrides: SizeOverrides::new(),
            items: Vec::new(),
            groups: Vec::new(),
            pending: Debouncer::new(config.debounce_ms),
            unacked: HashMap::new(),
            reconciled: false,
        }
    }

    // --- Data inputs ---

    /// Seed the size cache from a persisted snapshot. Only honoured once, and
    /// only before the first reconciliation.
    pub fn seed_sizes(&mut self, snapshot: &SizeSnapshot) -> bool {
        if self.reconciled {
            warn!(entries = snapshot.len(), "size snapshot arrived after first reconciliation; ignored");
            return false;
        }
        self.sizes.seed(snapshot)
    }

    /// Replace upstream entities and rebuild the render list.
    ///
    /// Writes still waiting in the debouncer keep overriding the incoming
    /// positions. A flushed position stays in the local overlay until a
    /// refresh echoes it, or until `UNACKED_REFRESH_LIMIT` refreshes in a row
    /// disagree with it.
    pub fn load_entities(&mut self, items: Vec<ItemEntity>, groups: Vec<GroupEntity>) -> Vec<Action> {
        self.items = items;
        self.groups = groups;
        self.acknowledge_writes();
        if let Some(id) = self.resize.active() {
            if !self.items.iter().any(|i| i.id == id) {
                debug!(%id, "item in resize mode disappeared; leaving resize mode");
                self.resize = ItemResize::Browsing;
            }
        }
        self.rebuild();
        let nodes = &self.nodes;
        self.ui.selection.retain(|n| nodes.get(*n).is_some());
        vec![Action::RenderNeeded]
    }

    /// Apply the externally owned selection.
    pub fn set_selected(&mut self, selected: Option<NodeRef>) -> Vec<Action> {
        self.ui.select_only(selected);
        self.refresh_selection_flags();
        vec![Action::RenderNeeded]
    }

    /// Install bulk-resize preview sizes; they win over every other size source.
    pub fn set_size_overrides(&mut self, overrides: SizeOverrides) -> Vec<Action> {
        self.overrides = overrides;
        self.rebuild();
        vec![Action::RenderNeeded]
    }

    /// Remove a group locally, drop its pending writes, and tell the host.
    pub fn delete_group(&mut self, id: EntityId) -> Vec<Action> {
        let node = NodeRef::Group(id);
        if self.nodes.get(node).is_none() {
            warn!(%id, "delete requested for unknown group");
            return Vec::new();
        }
        self.pending.cancel(&node);
        self.unacked.remove(&node);
        self.sizes.remove(node);
        self.ui.selection.remove(&node);
        if self.ui.selected == Some(node) {
            self.ui.selected = None;
        }
        if self.input.active_node() == Some(node) {
            self.input = InputState::Idle;
            self.ui.guides = Guides::default();
        }
        self.groups.retain(|g| g.id != id);
        self.rebuild();
        vec![Action::GroupDeleted { id }, Action::RenderNeeded]
    }

    fn acknowledge_writes(&mut self) {
        let upstream: HashMap<NodeRef, Point> = self
            .items
            .iter()
            .map(|i| (NodeRef::Item(i.id), Point::new(i.position_x, i.position_y)))
            .chain(self.groups.iter().map(|g| (NodeRef::Group(g.id), Point::new(g.position_x, g.position_y))))
            .collect();

        self.unacked.retain(|node, entry| {
            let Some(incoming) = upstream.get(node) else {
                return false;
            };
            let echoed = (incoming.x - entry.position.x).abs() <= ECHO_TOLERANCE
                && (incoming.y - entry.position.y).abs() <= ECHO_TOLERANCE;
            if echoed {
                debug!(?node, "position write echoed by refresh");
                return false;
            }
            entry.stale_refreshes += 1;
            if entry.stale_refreshes > UNACKED_REFRESH_LIMIT {
                warn!(?node, x = incoming.x, y = incoming.y, "upstream kept a different position; accepting it");
                return false;
            }
            true
        });
    }

    fn rebuild(&mut self) {
        let mut positions: HashMap<NodeRef, Point> =
            self.unacked.iter().map(|(node, entry)| (*node, entry.position)).collect();
        positions.extend(self.pending.iter().map(|(node, pos)| (*node, *pos)));
        if let Some(active) = self.input.active_node() {
            if let Some(node) = self.nodes.get(active) {
                positions.insert(active, node.position);
            }
        }

        let ctx = ReconcileContext {
            sizes: self.sizes.as_ref(),
            overrides: &self.overrides,
            positions: &positions,
            selected: self.ui.selected,
        };
        let mut nodes = reconcile(&self.items, &self.groups, &ctx);

        if let (Some(id), Some(size)) = (self.resize.active(), self.resize.current()) {
            if let Some(node) = nodes.iter_mut().find(|n| n.node == NodeRef::Item(id)) {
                node.size = size;
            }
        }

        self.nodes.replace_all(nodes);
        self.reconciled = true;
    }

    fn refresh_selection_flags(&mut self) {
        let selected = self.ui.selected;
        let ids: Vec<NodeRef> = self.nodes.iter().map(|n| n.node).collect();
        for id in ids {
            if let Some(node) = self.nodes.get_mut(id) {
                node.is_selected = selected == Some(id);
            }
        }
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary {
            self.input = InputState::Panning { start_screen: screen_pt, last_screen: screen_pt };
            return Vec::new();
        }

        let world = self.camera.screen_to_world(screen_pt);
        match hit::hit_test(world, &self.nodes, &self.camera, self.ui.selected) {
            Some(Hit { node, part: HitPart::GroupHandle(corner) }) => {
                if let Some(start_rect) = self.nodes.get(node).map(RenderNode::rect) {
                    self.input = InputState::ResizingGroup { node, corner, start_world: world, start_rect };
                }
                Vec::new()
            }
            Some(Hit { node, part: HitPart::Body }) => {
                let origin = self.nodes.get(node).map_or(world, |n| n.position);
                let actions = self.select_node(node, modifiers);
                self.input = InputState::Pressed {
                    node,
                    start_screen: screen_pt,
                    grab_offset: Point::new(world.x - origin.x, world.y - origin.y),
                };
                actions
            }
            None => {
                self.input = InputState::Panning { start_screen: screen_pt, last_screen: screen_pt };
                Vec::new()
            }
        }
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Pressed { node, start_screen, grab_offset } => {
                if start_screen.distance(screen_pt) <= self.config.drag_threshold_px {
                    return Vec::new();
                }
                let Some(rect) = self.nodes.get(node).map(RenderNode::rect) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                self.input = InputState::Dragging { tx: DragTransaction::new(node, rect), grab_offset };
                self.drag_to(screen_pt)
            }
            InputState::Dragging { .. } => self.drag_to(screen_pt),
            InputState::Panning { start_screen, last_screen } => {
                self.camera.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { start_screen, last_screen: screen_pt };
                vec![Action::RenderNeeded]
            }
            InputState::ResizingGroup { node, corner, start_world, start_rect } => {
                let world = self.camera.screen_to_world(screen_pt);
                let rect =
                    corner.resize(&start_rect, world.x - start_world.x, world.y - start_world.y, NodeKind::Group);
                self.resize_group_live(node, rect)
            }
        }
    }

    /// Release the pointer. `now_ms` is the host clock used for debouncing.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, _modifiers: Modifiers, now_ms: u64) -> Vec<Action> {
        let state = std::mem::take(&mut self.input);
        match state {
            InputState::Dragging { tx, .. } => {
                self.ui.guides = Guides::default();
                let origin = tx.current_rect.origin();
                let collapsed = self.pending.schedule(tx.node, origin, now_ms);
                debug!(node = ?tx.node, x = origin.x, y = origin.y, collapsed, "drag committed; position write scheduled");
                vec![Action::RenderNeeded]
            }
            InputState::Panning { start_screen, .. } => {
                if start_screen.distance(screen_pt) > self.config.drag_threshold_px {
                    vec![Action::ViewportChanged(self.camera.viewport())]
                } else if button == Button::Primary {
                    self.clear_selection()
                } else {
                    Vec::new()
                }
            }
            InputState::ResizingGroup { .. } => vec![Action::RenderNeeded],
            InputState::Pressed { .. } | InputState::Idle => Vec::new(),
        }
    }

    /// Double-click opens an item's detail view or a group's editor.
    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.camera.screen_to_world(screen_pt);
        match hit::hit_test(world, &self.nodes, &self.camera, None) {
            Some(Hit { node: NodeRef::Item(id), .. }) => vec![Action::DoubleClick { id }],
            Some(Hit { node: NodeRef::Group(id), .. }) => vec![Action::EditGroup { id }],
            None => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        let before = self.camera.viewport();
        let factor = (-delta.dy * WHEEL_ZOOM_STEP).exp();
        self.camera.zoom_at(screen_pt, self.camera.zoom * factor);
        let after = self.camera.viewport();
        if after == before {
            return Vec::new();
        }
        vec![Action::ViewportChanged(after), Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is("Escape") {
            if self.resize.active().is_some() {
                return self.cancel_resize();
            }
            return self.clear_selection();
        }
        if key.is("Enter") && self.resize.active().is_some() {
            return self.confirm_resize();
        }
        if key.is("Delete") || key.is("Backspace") {
            if self.ui.selection.is_empty() {
                return Vec::new();
            }
            let (items, groups) = self.split_selection();
            return vec![Action::DeleteSelected { items, groups }];
        }
        if modifiers.command() && key.is("a") {
            self.ui.selection = self.nodes.iter().map(|n| n.node).collect();
            return vec![self.selection_changed(), Action::RenderNeeded];
        }
        Vec::new()
    }

    fn drag_to(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { mut tx, grab_offset } = self.input else {
            return Vec::new();
        };
        let world = self.camera.screen_to_world(screen_pt);
        let candidate = Point::new(world.x - grab_offset.x, world.y - grab_offset.y);
        let size = tx.current_rect.size();

        // Groups are never aligned, only grid-snapped.
        let result = if tx.is_group() {
            SnapResult { position: candidate, guide_x: None, guide_y: None }
        } else {
            snap::find_snap(tx.node, candidate, size, self.nodes.iter(), self.config.snap_threshold)
        };
        let position = snap::apply_grid(&result, self.config.grid);

        tx.current_rect = Rect::from_parts(position, size);
        if let Some(node) = self.nodes.get_mut(tx.node) {
            node.position = position;
        }
        self.ui.guides = Guides { x: result.guide_x, y: result.guide_y };
        self.input = InputState::Dragging { tx, grab_offset };
        vec![Action::RenderNeeded]
    }

    fn resize_group_live(&mut self, node: NodeRef, rect: Rect) -> Vec<Action> {
        self.sizes.set(node, rect.size());
        // The update below carries the origin; an older queued drag must not follow it.
        if self.pending.cancel(&node).is_some() {
            debug!(?node, "live resize superseded a queued position write");
        }
        self.unacked.insert(node, Unacked::new(rect.origin()));
        if let Some(n) = self.nodes.get_mut(node) {
            n.position = rect.origin();
            n.size = rect.size();
        }
        vec![Action::GroupUpdated { id: node.id(), update: GroupUpdate::from_rect(&rect) }, Action::RenderNeeded]
    }

    // --- Selection ---

    fn select_node(&mut self, node: NodeRef, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.extends_selection() {
            if !self.ui.selection.remove(&node) {
                self.ui.selection.insert(node);
            }
            self.ui.selected = if self.ui.selection.contains(&node) {
                Some(node)
            } else {
                self.ui.selection.iter().next_back().copied()
            };
        } else {
            if self.ui.selected == Some(node) && self.ui.selection.len() == 1 {
                return Vec::new();
            }
            self.ui.select_only(Some(node));
        }
        self.refresh_selection_flags();
        vec![Action::Select(self.ui.selected), self.selection_changed(), Action::RenderNeeded]
    }

    fn clear_selection(&mut self) -> Vec<Action> {
        if self.ui.selected.is_none() && self.ui.selection.is_empty() {
            return Vec::new();
        }
        self.ui.select_only(None);
        self.refresh_selection_flags();
        vec![Action::Select(None), self.selection_changed(), Action::RenderNeeded]
    }

    fn split_selection(&self) -> (Vec<EntityId>, Vec<EntityId>) {
        let mut items = Vec::new();
        let mut groups = Vec::new();
        for node in &self.ui.selection {
            match node {
                NodeRef::Item(id) => items.push(*id),
                NodeRef::Group(id) => groups.push(*id),
            }
        }
        (items, groups)
    }

    fn selection_changed(&self) -> Action {
        let (items, groups) = self.split_selection();
        Action::SelectionChanged { items, groups }
    }

    // --- Item resize mode ---

    /// Show resize handles on `id`, capturing its current size as the rollback
    /// baseline. A card already in resize mode is cancelled first.
    pub fn enter_resize(&mut self, id: EntityId) -> Vec<Action> {
        let Some(size) = self.nodes.get(NodeRef::Item(id)).map(|n| n.size) else {
            warn!(%id, "resize requested for unknown item");
            return Vec::new();
        };
        if self.resize.active().is_some() {
            self.cancel_resize();
        }
        self.resize.enter(id, size);
        vec![Action::RenderNeeded]
    }

    /// Follow the resize handles. Nothing is persisted until confirm.
    pub fn resize_item(&mut self, size: Size) -> Vec<Action> {
        let (Some(id), Some(shown)) = (self.resize.active(), self.resize.resize_to(size)) else {
            return Vec::new();
        };
        self.show_item_size(id, shown);
        vec![Action::RenderNeeded]
    }

    /// Jump to the default card size; the user still has to confirm or cancel.
    pub fn reset_resize(&mut self) -> Vec<Action> {
        let (Some(id), Some(shown)) = (self.resize.active(), self.resize.reset()) else {
            return Vec::new();
        };
        self.show_item_size(id, shown);
        vec![Action::RenderNeeded]
    }

    /// Keep the current size: cache it, then ask the host to persist it now.
    pub fn confirm_resize(&mut self) -> Vec<Action> {
        let Some(ResizeOutcome::Confirmed { id, size }) = self.resize.confirm() else {
            return Vec::new();
        };
        // Cache before the action leaves: a refresh racing the server write
        // must still see this size.
        self.sizes.set(NodeRef::Item(id), size);
        self.show_item_size(id, size);
        debug!(%id, width = size.width, height = size.height, "resize confirmed");
        vec![Action::SizeChanged { id, width: size.width, height: size.height }, Action::RenderNeeded]
    }

    /// Restore the size captured when resize mode was entered.
    pub fn cancel_resize(&mut self) -> Vec<Action> {
        let Some(ResizeOutcome::Cancelled { id, size }) = self.resize.cancel() else {
            return Vec::new();
        };
        self.show_item_size(id, size);
        vec![Action::RenderNeeded]
    }

    fn show_item_size(&mut self, id: EntityId, size: Size) {
        if let Some(node) = self.nodes.get_mut(NodeRef::Item(id)) {
            node.size = size;
        }
    }

    // --- Persistence ---

    /// Flush every position write whose quiet period has elapsed by `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Action> {
        let due = self.pending.drain_due(now_ms);
        self.commit_writes(due)
    }

    /// Flush every pending position write immediately (host shutdown).
    pub fn flush_pending(&mut self) -> Vec<Action> {
        let all = self.pending.flush_all();
        self.commit_writes(all)
    }

    fn commit_writes(&mut self, writes: Vec<(NodeRef, Point)>) -> Vec<Action> {
        writes
            .into_iter()
            .map(|(node, pos)| {
                self.unacked.insert(node, Unacked::new(pos));
                debug!(?node, x = pos.x, y = pos.y, "flushing position write");
                match node {
                    NodeRef::Item(id) => Action::PositionChanged { id, x: pos.x, y: pos.y },
                    NodeRef::Group(id) => Action::GroupPositionChanged { id, x: pos.x, y: pos.y },
                }
            })
            .collect()
    }

    /// When the next debounced write falls due, on the host clock.
    #[must_use]
    pub fn next_flush_deadline(&self) -> Option<u64> {
        self.pending.next_deadline()
    }

    /// Number of position writes waiting out their quiet period.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    // --- Viewport ---

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css.max(0.0);
        self.viewport_height = height_css.max(0.0);
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
    }

    /// Restore pan/zoom from the host's viewport store.
    pub fn restore_viewport(&mut self, viewport: Viewport) {
        self.camera = Camera::from_viewport(viewport);
    }

    /// Frame every node in the viewport.
    pub fn fit_view(&mut self) -> Vec<Action> {
        let Some(bounds) = self.nodes.bounds() else {
            return Vec::new();
        };
        self.camera.fit(bounds, self.viewport_width, self.viewport_height, FIT_VIEW_PADDING);
        vec![Action::ViewportChanged(self.camera.viewport()), Action::RenderNeeded]
    }

    // --- Queries ---

    /// The currently selected node, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NodeRef> {
        self.ui.selected
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn node(&self, node: NodeRef) -> Option<&RenderNode> {
        self.nodes.get(node)
    }

    #[must_use]
    pub fn guides(&self) -> Guides {
        self.ui.guides
    }

    /// Read access to the size cache.
    #[must_use]
    pub fn size_store(&self) -> &dyn SizeStore {
        self.sizes.as_ref()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, config: EngineConfig) -> Self {
        Self { canvas, core: EngineCore::with_config(config) }
    }

    // --- Delegated data inputs ---

    pub fn seed_sizes(&mut self, snapshot: &SizeSnapshot) -> bool {
        self.core.seed_sizes(snapshot)
    }

    pub fn load_entities(&mut self, items: Vec<ItemEntity>, groups: Vec<GroupEntity>) -> Vec<Action> {
        self.core.load_entities(items, groups)
    }

    pub fn set_selected(&mut self, selected: Option<NodeRef>) -> Vec<Action> {
        self.core.set_selected(selected)
    }

    pub fn set_size_overrides(&mut self, overrides: SizeOverrides) -> Vec<Action> {
        self.core.set_size_overrides(overrides)
    }

    pub fn delete_group(&mut self, id: EntityId) -> Vec<Action> {
        self.core.delete_group(id)
    }

    // --- Viewport ---

    /// Update viewport dimensions and size the backing store to match.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width((self.core.viewport_width * self.core.dpr).round() as u32);
        self.canvas.set_height((self.core.viewport_height * self.core.dpr).round() as u32);
    }

    pub fn restore_viewport(&mut self, viewport: Viewport) {
        self.core.restore_viewport(viewport);
    }

    pub fn fit_view(&mut self) -> Vec<Action> {
        self.core.fit_view()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button, modifiers, now_ms())
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_double_click(screen_pt)
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_wheel(screen_pt, delta, modifiers)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Resize mode ---

    pub fn enter_resize(&mut self, id: EntityId) -> Vec<Action> {
        self.core.enter_resize(id)
    }

    pub fn resize_item(&mut self, size: Size) -> Vec<Action> {
        self.core.resize_item(size)
    }

    pub fn reset_resize(&mut self) -> Vec<Action> {
        self.core.reset_resize()
    }

    pub fn confirm_resize(&mut self) -> Vec<Action> {
        self.core.confirm_resize()
    }

    pub fn cancel_resize(&mut self) -> Vec<Action> {
        self.core.cancel_resize()
    }

    // --- Persistence ---

    /// Flush due position writes using the browser clock. Call from a timer.
    pub fn tick(&mut self) -> Vec<Action> {
        self.core.tick(now_ms())
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(
            &ctx,
            &self.core.nodes,
            &self.core.camera,
            &self.core.ui,
            &self.core.resize,
            (self.core.viewport_width, self.core.viewport_height),
            self.core.dpr,
        )
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<NodeRef> {
        self.core.selection()
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }

    #[must_use]
    pub fn node(&self, node: NodeRef) -> Option<&RenderNode> {
        self.core.node(node)
    }
}

/// Browser wall clock in whole milliseconds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}
