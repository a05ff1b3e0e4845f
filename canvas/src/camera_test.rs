#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
    assert_eq!(cam.zoom, 1.0);
}

// --- screen_to_world / world_to_screen ---

#[test]
fn screen_to_world_identity() {
    let cam = Camera::default();
    let world = cam.screen_to_world(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_world_with_pan_and_zoom() {
    let cam = Camera { pan_x: 100.0, pan_y: 50.0, zoom: 2.0 };
    let world = cam.screen_to_world(Point::new(300.0, 250.0));
    assert!(point_approx_eq(world, Point::new(100.0, 100.0)));
}

#[test]
fn world_to_screen_inverts_screen_to_world() {
    let cam = Camera { pan_x: -37.0, pan_y: 12.5, zoom: 0.75 };
    let screen = Point::new(123.0, 456.0);
    let back = cam.world_to_screen(cam.screen_to_world(screen));
    assert!(point_approx_eq(back, screen));
}

#[test]
fn screen_dist_scales_with_zoom() {
    let cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 0.5 };
    assert!(approx_eq(cam.screen_dist_to_world(10.0), 20.0));
}

// --- pan / zoom ---

#[test]
fn pan_by_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(10.0, -5.0);
    cam.pan_by(2.0, 3.0);
    assert_eq!(cam.pan_x, 12.0);
    assert_eq!(cam.pan_y, -2.0);
}

#[test]
fn zoom_at_keeps_anchor_fixed() {
    let mut cam = Camera { pan_x: 40.0, pan_y: 20.0, zoom: 1.0 };
    let anchor = Point::new(200.0, 150.0);
    let before = cam.screen_to_world(anchor);
    cam.zoom_at(anchor, 1.5);
    let after = cam.screen_to_world(anchor);
    assert!(point_approx_eq(before, after));
    assert_eq!(cam.zoom, 1.5);
}

#[test]
fn zoom_at_clamps_to_limits() {
    let mut cam = Camera::default();
    cam.zoom_at(Point::new(0.0, 0.0), 50.0);
    assert_eq!(cam.zoom, MAX_ZOOM);
    cam.zoom_at(Point::new(0.0, 0.0), 0.0001);
    assert_eq!(cam.zoom, MIN_ZOOM);
}

#[test]
fn clamp_zoom_resets_nan() {
    assert_eq!(clamp_zoom(f64::NAN), 1.0);
}

#[test]
fn clamp_zoom_pins_infinities_to_limits() {
    assert_eq!(clamp_zoom(f64::INFINITY), MAX_ZOOM);
    assert_eq!(clamp_zoom(f64::NEG_INFINITY), MIN_ZOOM);
}

#[test]
fn overflowing_zoom_factor_stops_at_max() {
    let mut cam = Camera { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 };
    cam.zoom_at(Point::new(100.0, 100.0), f64::INFINITY);
    assert_eq!(cam.zoom, MAX_ZOOM);
}

// --- Viewport ---

#[test]
fn viewport_round_trips_through_camera() {
    let vp = Viewport { x: 15.0, y: -30.0, zoom: 0.8 };
    assert_eq!(Camera::from_viewport(vp).viewport(), vp);
}

#[test]
fn from_viewport_clamps_stored_zoom() {
    let cam = Camera::from_viewport(Viewport { x: 0.0, y: 0.0, zoom: 9.0 });
    assert_eq!(cam.zoom, MAX_ZOOM);
}

#[test]
fn viewport_serializes_as_flat_object() {
    let json = serde_json::to_value(Viewport { x: 1.0, y: 2.0, zoom: 0.5 }).unwrap();
    assert_eq!(json, serde_json::json!({ "x": 1.0, "y": 2.0, "zoom": 0.5 }));
}

// --- fit ---

#[test]
fn fit_centers_bounds() {
    let mut cam = Camera::default();
    cam.fit(Rect::new(0.0, 0.0, 400.0, 200.0), 1000.0, 500.0, 0.2);
    // usable area is 800x400; both ratios give zoom 2.0 (the max).
    assert_eq!(cam.zoom, 2.0);
    let center = cam.world_to_screen(Point::new(200.0, 100.0));
    assert!(point_approx_eq(center, Point::new(500.0, 250.0)));
}

#[test]
fn fit_uses_the_tighter_axis() {
    let mut cam = Camera::default();
    cam.fit(Rect::new(-500.0, 0.0, 2000.0, 100.0), 1000.0, 1000.0, 0.2);
    assert!(approx_eq(cam.zoom, 0.4));
}

#[test]
fn fit_ignores_degenerate_viewport() {
    let mut cam = Camera { pan_x: 5.0, pan_y: 6.0, zoom: 1.2 };
    cam.fit(Rect::new(0.0, 0.0, 100.0, 100.0), 0.0, 0.0, 0.2);
    assert_eq!(cam.pan_x, 5.0);
    assert_eq!(cam.zoom, 1.2);
}
