//! Drag boundary constraint: keep elements inside the mandala circle.
//!
//! Positions are absolute scene pixels, where the mandala is a circle of
//! `radius` centered at `(radius, radius)`. Points outside the allowed disk
//! are projected radially onto its edge; points inside are returned as-is.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::camera::Point;

/// Clamp an element center so its scaled bounding circle stays inside the mandala.
///
/// The bounding circle radius is `max(elem_w, elem_h) / 2 * scale`. When the
/// element is at least as large as the mandala the result is the center.
#[must_use]
pub fn clamp_to_mandala(pos: Point, radius: f64, elem_w: f64, elem_h: f64, scale: f64) -> Point {
    let effective_radius = elem_w.max(elem_h) / 2.0 * scale;
    clamp_with_margin(pos, radius, effective_radius)
}

/// Clamp a point to the mandala disk, ignoring element size.
#[must_use]
pub fn clamp_to_disk(pos: Point, radius: f64) -> Point {
    clamp_with_margin(pos, radius, 0.0)
}

/// Pull a logical point back inside the unit disk.
#[must_use]
pub fn clamp_logical(logical: Point) -> Point {
    let distance = logical.x.hypot(logical.y);
    if distance <= 1.0 {
        return logical;
    }
    Point::new(logical.x / distance, logical.y / distance)
}

fn clamp_with_margin(pos: Point, radius: f64, margin: f64) -> Point {
    let center = Point::new(radius, radius);
    if radius <= 0.0 {
        return center;
    }

    let max_relative = 1.0 - margin / radius;
    if max_relative <= 0.0 {
        return center;
    }

    let rel_x = (pos.x - radius) / radius;
    let rel_y = (pos.y - radius) / radius;
    if rel_x.hypot(rel_y) <= max_relative {
        return pos;
    }

    let angle = rel_y.atan2(rel_x);
    Point::new(
        radius + angle.cos() * max_relative * radius,
        radius + angle.sin() * max_relative * radius,
    )
}
