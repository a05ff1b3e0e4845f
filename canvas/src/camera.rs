#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::doc::Rect;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Pan/zoom state as handed to the host's viewport store.
///
/// Mirrors [`Camera`] field-for-field; kept separate so the stored shape does
/// not change when the camera grows runtime-only state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), always within `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Build a camera from a stored viewport, clamping an out-of-range zoom.
    #[must_use]
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self { pan_x: viewport.x, pan_y: viewport.y, zoom: clamp_zoom(viewport.zoom) }
    }

    /// Snapshot for the external viewport store.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport { x: self.pan_x, y: self.pan_y, zoom: self.zoom }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.pan_x,
            y: world.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the camera by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Set a new zoom while keeping the world point under `anchor` fixed on screen.
    pub fn zoom_at(&mut self, anchor: Point, zoom: f64) {
        let world = self.screen_to_world(anchor);
        self.zoom = clamp_zoom(zoom);
        self.pan_x = anchor.x - world.x * self.zoom;
        self.pan_y = anchor.y - world.y * self.zoom;
    }

    /// Frame `bounds` inside a `width` × `height` viewport, leaving `padding`
    /// (a fraction of the viewport) empty around it.
    ///
    /// Degenerate viewports or bounds leave the camera unchanged.
    pub fn fit(&mut self, bounds: Rect, width: f64, height: f64, padding: f64) {
        if width <= 0.0 || height <= 0.0 || bounds.width <= 0.0 || bounds.height <= 0.0 {
            return;
        }
        let usable = (1.0 - padding).clamp(0.1, 1.0);
        let zoom = clamp_zoom((width * usable / bounds.width).min(height * usable / bounds.height));
        self.zoom = zoom;
        self.pan_x = width * 0.5 - bounds.center_x() * zoom;
        self.pan_y = height * 0.5 - bounds.center_y() * zoom;
    }
}

/// Clamp a zoom factor into the supported range. Infinities clamp like any
/// other out-of-range value; NaN resets to 1.0.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() { 1.0 } else { zoom.clamp(MIN_ZOOM, MAX_ZOOM) }
}
