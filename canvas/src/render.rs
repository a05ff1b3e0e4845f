//! Rendering: draws the canvas scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives read-only views of node, camera, and UI state and produces
//! pixels; it does not mutate any engine state. Card styling belongs to the
//! host; this draws geometry only: group backdrops, item frames, handles, and
//! alignment guides.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{NodeRef, NodeStore, Rect, RenderNode};
use crate::hit::Corner;
use crate::input::{Guides, UiState};
use crate::resize::ItemResize;

const GROUP_FILL: &str = "rgba(120, 120, 140, 0.08)";
const GROUP_STROKE: &str = "#4A4A5A";
const ITEM_FILL: &str = "#1A1A24";
const ITEM_STROKE: &str = "#3A3A4A";
const SELECTED_STROKE: &str = "#8B5CF6";
const GUIDE_STROKE: &str = "#F472B6";
const LABEL_FILL: &str = "#E5E5F0";

/// Group border dash segment length in world units.
const GROUP_DASH: f64 = 8.0;

/// Draw the full scene.
///
/// `viewport` is `(width, height)` in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    nodes: &NodeStore,
    camera: &Camera,
    ui: &UiState,
    resize: &ItemResize,
    viewport: (f64, f64),
    dpr: f64,
) -> Result<(), JsValue> {
    let (viewport_w, viewport_h) = viewport;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    // Layer 2: group backdrops, always beneath items.
    for group in nodes.groups() {
        draw_group(ctx, group)?;
    }

    // Layer 3: item cards.
    for item in nodes.items() {
        draw_item(ctx, item, camera.zoom)?;
    }

    // Layer 4: resize handles.
    let handle_size = HANDLE_RADIUS_PX / camera.zoom;
    if let Some(group) = ui.selected.filter(|n| n.is_group()).and_then(|n| nodes.get(n)) {
        draw_handles(ctx, &group.rect(), handle_size);
    }
    if let Some(item) = resize.active().and_then(|id| nodes.get(NodeRef::Item(id))) {
        draw_handles(ctx, &item.rect(), handle_size);
    }

    // Layer 5: guides in screen space so they span the whole viewport.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    draw_guides(ctx, ui.guides, camera, viewport_w, viewport_h);

    Ok(())
}

fn draw_group(ctx: &CanvasRenderingContext2d, group: &RenderNode) -> Result<(), JsValue> {
    let r = group.rect();
    ctx.save();
    ctx.set_fill_style_str(GROUP_FILL);
    ctx.fill_rect(r.x, r.y, r.width, r.height);

    let dash = js_sys::Array::of2(&JsValue::from_f64(GROUP_DASH), &JsValue::from_f64(GROUP_DASH));
    ctx.set_line_dash(&dash)?;
    ctx.set_line_width(2.0);
    ctx.set_stroke_style_str(group.color.as_deref().unwrap_or(if group.is_selected {
        SELECTED_STROKE
    } else {
        GROUP_STROKE
    }));
    ctx.stroke_rect(r.x, r.y, r.width, r.height);
    ctx.set_line_dash(&js_sys::Array::new())?;

    draw_label(ctx, &group.label, Point::new(r.x + 16.0, r.y + 28.0), 20.0)?;
    ctx.restore();
    Ok(())
}

fn draw_item(ctx: &CanvasRenderingContext2d, item: &RenderNode, zoom: f64) -> Result<(), JsValue> {
    let r = item.rect();
    ctx.save();
    ctx.set_fill_style_str(ITEM_FILL);
    ctx.fill_rect(r.x, r.y, r.width, r.height);
    if item.is_selected {
        ctx.set_line_width(2.0 / zoom);
        ctx.set_stroke_style_str(SELECTED_STROKE);
    } else {
        ctx.set_line_width(1.0 / zoom);
        ctx.set_stroke_style_str(ITEM_STROKE);
    }
    ctx.stroke_rect(r.x, r.y, r.width, r.height);
    draw_label(ctx, &item.label, Point::new(r.x + 12.0, r.y + 24.0), 16.0)?;
    ctx.restore();
    Ok(())
}

fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, at: Point, size_px: f64) -> Result<(), JsValue> {
    if text.is_empty() {
        return Ok(());
    }
    ctx.set_fill_style_str(LABEL_FILL);
    ctx.set_font(&format!("600 {size_px}px sans-serif"));
    ctx.fill_text(text, at.x, at.y)
}

fn draw_handles(ctx: &CanvasRenderingContext2d, rect: &Rect, size: f64) {
    ctx.save();
    ctx.set_fill_style_str(SELECTED_STROKE);
    for corner in Corner::ALL {
        let p = corner.point(rect);
        ctx.fill_rect(p.x - size / 2.0, p.y - size / 2.0, size, size);
    }
    ctx.restore();
}

fn draw_guides(ctx: &CanvasRenderingContext2d, guides: Guides, camera: &Camera, viewport_w: f64, viewport_h: f64) {
    if guides.is_empty() {
        return;
    }
    ctx.save();
    ctx.set_stroke_style_str(GUIDE_STROKE);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    if let Some(x) = guides.x {
        let sx = camera.world_to_screen(Point::new(x, 0.0)).x;
        ctx.move_to(sx, 0.0);
        ctx.line_to(sx, viewport_h);
    }
    if let Some(y) = guides.y {
        let sy = camera.world_to_screen(Point::new(0.0, y)).y;
        ctx.move_to(0.0, sy);
        ctx.line_to(viewport_w, sy);
    }
    ctx.stroke();
    ctx.restore();
}
