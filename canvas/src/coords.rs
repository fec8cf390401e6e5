//! Mapping between logical mandala coordinates and absolute scene pixels.
//!
//! Logical space is the square `[-1, 1] × [-1, 1]` with the origin at the
//! mandala center and `+y` pointing up. Absolute space is the scene square
//! `[0, 2r] × [0, 2r]` with `+y` pointing down. An element anchored by its
//! top-left corner loses its own footprint from the usable span so that its
//! visual bounds stay inside the scene.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use crate::camera::Point;

/// Paired logical ↔ absolute conversion for one element footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransform {
    pub scene_w: f64,
    pub scene_h: f64,
    pub elem_w: f64,
    pub elem_h: f64,
}

impl SceneTransform {
    /// Transform for an element of `elem_w × elem_h` anchored by its top-left corner
    /// inside a mandala of the given pixel `radius`.
    #[must_use]
    pub fn for_element(radius: f64, elem_w: f64, elem_h: f64) -> Self {
        Self { scene_w: radius * 2.0, scene_h: radius * 2.0, elem_w, elem_h }
    }

    /// Transform mapping the full logical square onto the full scene square.
    ///
    /// Used when the consumer anchors elements by their center.
    #[must_use]
    pub fn centered(radius: f64) -> Self {
        Self::for_element(radius, 0.0, 0.0)
    }

    fn span_x(&self) -> f64 {
        self.scene_w - self.elem_w
    }

    fn span_y(&self) -> f64 {
        self.scene_h - self.elem_h
    }

    /// Logical `(rx, ry)` to absolute scene pixels.
    #[must_use]
    pub fn to_absolute(&self, logical: Point) -> Point {
        Point {
            x: (logical.x + 1.0) / 2.0 * self.span_x(),
            y: (1.0 - logical.y) / 2.0 * self.span_y(),
        }
    }

    /// Absolute scene pixels to logical `(rx, ry)`.
    ///
    /// An axis with no usable span (element as large as the scene) maps to 0.
    #[must_use]
    pub fn to_relative(&self, absolute: Point) -> Point {
        let span_x = self.span_x();
        let span_y = self.span_y();
        Point {
            x: if span_x > 0.0 { absolute.x / span_x * 2.0 - 1.0 } else { 0.0 },
            y: if span_y > 0.0 { 1.0 - absolute.y / span_y * 2.0 } else { 0.0 },
        }
    }

    /// Absolute center of an element whose logical anchor is `logical`.
    #[must_use]
    pub fn center_of(&self, logical: Point) -> Point {
        self.to_absolute(logical).offset(self.elem_w / 2.0, self.elem_h / 2.0)
    }
}
