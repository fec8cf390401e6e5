//! Rendering: draws the mandala scene to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only view of the engine and produces pixels. It never
//! mutates application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Camera, Point};
use crate::doc::{Mandala, Postit};
use crate::engine::EngineCore;
use crate::hit::Rect;
use crate::radial::{ring_radii, sector_angles};
use crate::zorder::{ItemKind, OrderedItem};

/// Opacity of the sector tint.
const SECTOR_ALPHA: f64 = 0.18;

/// Opacity of post-its excluded by the active filters.
const DIMMED_ALPHA: f64 = 0.25;

/// Post-it paper color.
const POSTIT_FILL: &str = "#FFE27A";

/// Outline color for post-its, images, and rings.
const INK: &str = "#1F1A17";

/// Selection dash segment length in screen pixels.
const SELECTION_DASH_PX: f64 = 4.0;

/// Label font size in mandala pixels.
const LABEL_FONT_PX: f64 = 12.0;

/// Draw the full scene: mandala backdrop, items in z-order, orbits, selection.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, core: &EngineCore, now_ms: f64) -> Result<(), JsValue> {
    // Layer 1: clear and set up transforms.
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, core.viewport_width, core.viewport_height);
    ctx.translate(core.camera.pan_x, core.camera.pan_y)?;
    ctx.scale(core.camera.zoom, core.camera.zoom)?;

    let Some(mandala) = core.mandala.as_ref() else {
        return Ok(());
    };

    // Layer 2: sectors, rings, labels.
    draw_backdrop(ctx, mandala)?;

    // Layer 3: items in z-order (bottom first). Hidden children have no rect.
    for item in core.zorder.items() {
        let Some(rect) = core.item_rect(*item) else {
            continue;
        };
        match item.kind {
            ItemKind::Postit => {
                if let Some(postit) = core.doc.postit(&item.id) {
                    let alpha = if core.is_dimmed(&item.id) { DIMMED_ALPHA } else { 1.0 };
                    draw_postit(ctx, postit, rect, alpha)?;
                }
            }
            ItemKind::Image => draw_image_frame(ctx, rect)?,
        }
    }

    // Layer 4: children fading out of a collapsed orbit.
    let child_size = core.settings.orbit_params().child_size();
    for (id, pos, progress) in core.expansion.exiting(now_ms) {
        if let Some(postit) = core.doc.postit(&id) {
            let rect = Rect::new(pos.x, pos.y, child_size, child_size);
            draw_postit(ctx, postit, rect, 1.0 - progress)?;
        }
    }

    // Layer 5: selection outline.
    if let Some(rect) = core.ui.selected.and_then(|item: OrderedItem| core.item_rect(item)) {
        draw_selection(ctx, rect, &core.camera)?;
    }

    Ok(())
}

// =============================================================
// Backdrop
// =============================================================

/// Screen-space point on the mandala for a logical polar coordinate.
///
/// Logical `+y` is up, so the angle is negated for the canvas.
fn polar(mandala: &Mandala, angle: f64, distance: f64) -> Point {
    let r = mandala.radius;
    Point::new(r + angle.cos() * distance * r, r - angle.sin() * distance * r)
}

fn draw_backdrop(ctx: &CanvasRenderingContext2d, mandala: &Mandala) -> Result<(), JsValue> {
    let config = &mandala.configuration;
    let r = mandala.radius;
    let dims = config.dimension_count();
    let scales = config.scale_count();

    // Sector tints. Canvas angles run clockwise, so the wedge is swept from
    // -end to -start to cover the same counter-clockwise sector.
    ctx.save();
    ctx.set_global_alpha(SECTOR_ALPHA);
    for (i, dimension) in config.dimensions().iter().enumerate() {
        let (start, end) = sector_angles(i, dims);
        ctx.begin_path();
        ctx.move_to(r, r);
        ctx.arc(r, r, r, -end, -start)?;
        ctx.close_path();
        ctx.set_fill_style_str(&dimension.color);
        ctx.fill();
    }
    ctx.restore();

    // Rings, outermost first.
    ctx.save();
    ctx.set_stroke_style_str(INK);
    ctx.set_line_width(1.0);
    for i in (0..scales.get()).rev() {
        let (_, outer) = ring_radii(i, scales);
        ctx.begin_path();
        ctx.arc(r, r, outer * r, 0.0, TAU)?;
        ctx.stroke();
    }

    // Sector dividers.
    for i in 0..dims.get() {
        let (start, _) = sector_angles(i, dims);
        let edge = polar(mandala, start, 1.0);
        ctx.begin_path();
        ctx.move_to(r, r);
        ctx.line_to(edge.x, edge.y);
        ctx.stroke();
    }

    // Labels: dimensions near the rim, scales up the vertical axis.
    ctx.set_fill_style_str(INK);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{LABEL_FONT_PX:.0}px sans-serif"));
    for (i, dimension) in config.dimensions().iter().enumerate() {
        let (start, end) = sector_angles(i, dims);
        let at = polar(mandala, (start + end) / 2.0, 0.93);
        ctx.fill_text(&dimension.name, at.x, at.y)?;
    }
    for (i, scale) in config.scales().iter().enumerate() {
        let (inner, outer) = ring_radii(i, scales);
        let at = polar(mandala, TAU / 4.0, (inner + outer) / 2.0);
        ctx.fill_text(scale, at.x, at.y)?;
    }
    ctx.restore();
    Ok(())
}

// =============================================================
// Items
// =============================================================

fn draw_postit(ctx: &CanvasRenderingContext2d, postit: &Postit, rect: Rect, alpha: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_global_alpha(alpha.clamp(0.0, 1.0));
    ctx.set_fill_style_str(POSTIT_FILL);
    ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_stroke_style_str(INK);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);

    // Tag swatches along the top edge.
    let swatch = (rect.width / 8.0).max(2.0);
    for (i, tag) in postit.tags.iter().take(6).enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let x = rect.x + 2.0 + i as f64 * (swatch + 2.0);
        ctx.set_fill_style_str(&tag.color);
        ctx.fill_rect(x, rect.y + 2.0, swatch, swatch / 2.0);
    }

    let font_px = (rect.height / 7.0).max(6.0);
    ctx.set_fill_style_str(INK);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{font_px:.0}px sans-serif"));
    let label = fit_text(ctx, &postit.content, rect.width - 8.0);
    let center = rect.center();
    ctx.fill_text(&label, center.x, center.y)?;
    ctx.restore();
    Ok(())
}

fn draw_image_frame(ctx: &CanvasRenderingContext2d, rect: Rect) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("#FFFFFF");
    ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.set_stroke_style_str(INK);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
    ctx.begin_path();
    ctx.move_to(rect.x, rect.y);
    ctx.line_to(rect.x + rect.width, rect.y + rect.height);
    ctx.move_to(rect.x + rect.width, rect.y);
    ctx.line_to(rect.x, rect.y + rect.height);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

fn draw_selection(ctx: &CanvasRenderingContext2d, rect: Rect, camera: &Camera) -> Result<(), JsValue> {
    ctx.save();
    let dash_world = camera.screen_dist_to_world(SELECTION_DASH_PX);
    let dash_array = js_sys::Array::new();
    dash_array.push(&dash_world.into());
    dash_array.push(&dash_world.into());
    ctx.set_line_dash(&dash_array)?;
    ctx.set_stroke_style_str("#1E90FF");
    ctx.set_line_width(camera.screen_dist_to_world(1.5));
    let pad = camera.screen_dist_to_world(3.0);
    ctx.stroke_rect(rect.x - pad, rect.y - pad, rect.width + pad * 2.0, rect.height + pad * 2.0);
    ctx.set_line_dash(&js_sys::Array::new())?;
    ctx.restore();
    Ok(())
}

// =============================================================
// Helpers
// =============================================================

/// Truncate `text` with an ellipsis so it fits within `max_width`.
fn fit_text(ctx: &CanvasRenderingContext2d, text: &str, max_width: f64) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let fits = |s: &str| ctx.measure_text(s).map_or(true, |m| m.width() <= max_width);
    if fits(first_line) {
        return first_line.to_owned();
    }
    let mut chars: Vec<char> = first_line.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + "…";
        if fits(&candidate) {
            return candidate;
        }
    }
    String::new()
}
