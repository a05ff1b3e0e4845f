//! Shared numeric constants for the canvas crate.

// ── Item cards ──────────────────────────────────────────────────

/// Width of a character card that has never been resized.
pub const DEFAULT_CARD_WIDTH: f64 = 320.0;
/// Height of a character card that has never been resized.
pub const DEFAULT_CARD_HEIGHT: f64 = 280.0;
pub const MIN_CARD_WIDTH: f64 = 280.0;
pub const MIN_CARD_HEIGHT: f64 = 200.0;
pub const MAX_CARD_WIDTH: f64 = 600.0;
pub const MAX_CARD_HEIGHT: f64 = 800.0;

// ── Groups ──────────────────────────────────────────────────────

/// Size given to a group whose stored dimensions are unusable.
pub const DEFAULT_GROUP_WIDTH: f64 = 400.0;
pub const DEFAULT_GROUP_HEIGHT: f64 = 300.0;
pub const MIN_GROUP_WIDTH: f64 = 300.0;
pub const MIN_GROUP_HEIGHT: f64 = 200.0;
pub const MAX_GROUP_WIDTH: f64 = 4000.0;
pub const MAX_GROUP_HEIGHT: f64 = 4000.0;

// ── Snapping ────────────────────────────────────────────────────

/// Maximum distance in world units at which an edge or center alignment matches.
pub const SNAP_THRESHOLD: f64 = 10.0;

/// Spacing of the background grid that unaligned axes snap to.
pub const SNAP_GRID: f64 = 20.0;

// ── Interaction ─────────────────────────────────────────────────

/// Pointer travel in screen pixels before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Screen-space hit slop in pixels for group resize handles.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Quiet period before a debounced position write is flushed.
pub const DEBOUNCE_MS: u64 = 500;

/// Stale refreshes a flushed position outlives before upstream's value wins.
pub const UNACKED_REFRESH_LIMIT: u32 = 3;

/// Coordinate tolerance when matching a refresh against a flushed position.
/// Upstream may round stored coordinates.
pub const ECHO_TOLERANCE: f64 = 0.5;

// ── Viewport ────────────────────────────────────────────────────

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 2.0;

/// Zoom multiplier per pixel of wheel delta.
pub const WHEEL_ZOOM_STEP: f64 = 0.0015;

/// Fraction of the viewport left empty around content by `fit_view`.
pub const FIT_VIEW_PADDING: f64 = 0.2;
