//! Scenario replay: a scripted session of user input and upstream refreshes.
//!
//! A scenario is a JSON document holding the initial entities and a list of
//! timed steps. Each step fires at `at_ms` on the host clock, is applied to
//! the engine under the lock, and its persistence actions are dispatched to
//! the store. Debounced position writes are left to the flush task.

#[cfg(test)]
#[path = "scenario_test.rs"]
mod tests;

use std::path::Path;

use canvas::camera::{Point, Viewport};
use canvas::doc::{EntityId, GroupEntity, ItemEntity, NodeRef, Size, SizeOverrides, SizeSnapshot};
use canvas::engine::{Action, EngineCore};
use canvas::input::{Button, Key, Modifiers, WheelDelta};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::HostError;
use crate::services::persistence;
use crate::state::HostState;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub screen: Screen,
    /// Saved pan/zoom to restore before the first step.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Client-side size snapshot from an earlier session.
    #[serde(default)]
    pub sizes: SizeSnapshot,
    #[serde(default)]
    pub items: Vec<ItemEntity>,
    #[serde(default)]
    pub groups: Vec<GroupEntity>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Canvas element dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Screen {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_dpr")]
    pub dpr: f64,
}

impl Default for Screen {
    fn default() -> Self {
        Self { width: 1280.0, height: 800.0, dpr: 1.0 }
    }
}

fn default_dpr() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Host clock time the step fires at.
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: Event,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ButtonName,
        #[serde(default)]
        modifiers: ModifierSet,
    },
    PointerMove {
        x: f64,
        y: f64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ButtonName,
    },
    DoubleClick {
        x: f64,
        y: f64,
    },
    Wheel {
        x: f64,
        y: f64,
        dy: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: ModifierSet,
    },
    /// Upstream data refresh.
    Refresh {
        #[serde(default)]
        items: Vec<ItemEntity>,
        #[serde(default)]
        groups: Vec<GroupEntity>,
    },
    Select {
        node: Option<NodeRef>,
    },
    EnterResize {
        id: EntityId,
    },
    ResizeItem {
        width: f64,
        height: f64,
    },
    ResetResize,
    ConfirmResize,
    CancelResize,
    /// Bulk-resize preview from the toolbar; an empty map clears it.
    BulkResize {
        #[serde(default)]
        sizes: SizeOverrides,
    },
    DeleteGroup {
        id: EntityId,
    },
    FitView,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonName {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ButtonName> for Button {
    fn from(name: ButtonName) -> Self {
        match name {
            ButtonName::Primary => Button::Primary,
            ButtonName::Middle => Button::Middle,
            ButtonName::Secondary => Button::Secondary,
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ModifierSet {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl From<ModifierSet> for Modifiers {
    fn from(m: ModifierSet) -> Self {
        Modifiers { shift: m.shift, ctrl: m.ctrl, alt: m.alt, meta: m.meta }
    }
}

/// Counts reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub actions: usize,
    pub failed_writes: usize,
}

impl Scenario {
    /// Read and parse a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::ReadScenario`] or [`HostError::ParseScenario`].
    pub fn load(path: &Path) -> Result<Self, HostError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| HostError::ReadScenario { path: path.to_path_buf(), source })?;
        serde_json::from_str(&raw).map_err(|source| HostError::ParseScenario { path: path.to_path_buf(), source })
    }
}

/// Install the scenario's initial state into the engine.
fn prepare(engine: &mut EngineCore, scenario: &Scenario) {
    engine.set_viewport(scenario.screen.width, scenario.screen.height, scenario.screen.dpr);
    if let Some(viewport) = scenario.viewport {
        engine.restore_viewport(viewport);
    }
    if !scenario.sizes.is_empty() {
        engine.seed_sizes(&scenario.sizes);
    }
    engine.load_entities(scenario.items.clone(), scenario.groups.clone());
}

/// Replay every step in order, waiting for each step's time on the host clock.
pub async fn run(state: &HostState, scenario: &Scenario) -> RunSummary {
    prepare(&mut *state.engine.lock().await, scenario);
    info!(
        items = scenario.items.len(),
        groups = scenario.groups.len(),
        steps = scenario.steps.len(),
        "scenario loaded"
    );

    let mut summary = RunSummary::default();
    for step in &scenario.steps {
        tokio::time::sleep_until(state.instant_at(step.at_ms)).await;
        let now = state.now_ms();
        let actions = {
            let mut engine = state.engine.lock().await;
            let mut actions = apply(&mut engine, &step.event, now);
            actions.extend(delete_selected_groups(&mut engine, &actions));
            actions
        };
        debug!(at_ms = step.at_ms, event = ?step.event, actions = actions.len(), "step applied");

        summary.steps += 1;
        summary.actions += actions.len();
        summary.failed_writes += persistence::dispatch(state.store.as_ref(), &actions).await;
        state.wake.notify_one();
    }
    summary
}

fn apply(engine: &mut EngineCore, event: &Event, now_ms: u64) -> Vec<Action> {
    match event {
        Event::PointerDown { x, y, button, modifiers } => {
            engine.on_pointer_down(Point::new(*x, *y), (*button).into(), (*modifiers).into())
        }
        Event::PointerMove { x, y } => engine.on_pointer_move(Point::new(*x, *y), Modifiers::default()),
        Event::PointerUp { x, y, button } => {
            engine.on_pointer_up(Point::new(*x, *y), (*button).into(), Modifiers::default(), now_ms)
        }
        Event::DoubleClick { x, y } => engine.on_double_click(Point::new(*x, *y)),
        Event::Wheel { x, y, dy } => {
            engine.on_wheel(Point::new(*x, *y), WheelDelta { dx: 0.0, dy: *dy }, Modifiers::default())
        }
        Event::Key { key, modifiers } => engine.on_key_down(&Key(key.clone()), (*modifiers).into()),
        Event::Refresh { items, groups } => engine.load_entities(items.clone(), groups.clone()),
        Event::Select { node } => engine.set_selected(*node),
        Event::EnterResize { id } => engine.enter_resize(*id),
        Event::ResizeItem { width, height } => engine.resize_item(Size::new(*width, *height)),
        Event::ResetResize => engine.reset_resize(),
        Event::ConfirmResize => engine.confirm_resize(),
        Event::CancelResize => engine.cancel_resize(),
        Event::BulkResize { sizes } => engine.set_size_overrides(sizes.clone()),
        Event::DeleteGroup { id } => engine.delete_group(*id),
        Event::FitView => engine.fit_view(),
    }
}

/// The host answers a delete request for groups directly; item deletion
/// belongs to the campaign service and is only logged.
fn delete_selected_groups(engine: &mut EngineCore, actions: &[Action]) -> Vec<Action> {
    let mut follow_up = Vec::new();
    for action in actions {
        if let Action::DeleteSelected { items, groups } = action {
            if !items.is_empty() {
                info!(count = items.len(), "item deletion requested; left to the campaign service");
            }
            for id in groups {
                follow_up.extend(engine.delete_group(*id));
            }
        }
    }
    follow_up
}
