//! Classification of logical points into dimension sectors and scale rings.
//!
//! Sector 0 starts on the positive x-axis and sectors run counter-clockwise
//! in configuration order. Ring 0 is the innermost ring.

#[cfg(test)]
#[path = "radial_test.rs"]
mod radial_test;

use std::f64::consts::TAU;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::MandalaConfig;

/// Sector and ring indices for a classified point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorIndex {
    pub dimension: usize,
    pub scale: usize,
}

/// Named classification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub dimension: String,
    pub section: String,
    #[serde(skip)]
    pub index: Option<SectorIndex>,
}

/// Angle of `logical` around the origin, normalized to `[0, 2π)`.
#[must_use]
pub fn angle_of(logical: Point) -> f64 {
    let angle = logical.y.atan2(logical.x);
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Distance of `logical` from the origin, capped at the outer edge.
#[must_use]
pub fn distance_of(logical: Point) -> f64 {
    logical.x.hypot(logical.y).min(1.0)
}

/// Classify a logical point into `(dimension, scale)` indices.
///
/// Points on or beyond the outer edge land in the outermost ring.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn classify_index(logical: Point, dimensions: NonZeroUsize, scales: NonZeroUsize) -> SectorIndex {
    let dims = dimensions.get();
    let rings = scales.get();

    let dimension = ((angle_of(logical) / TAU * dims as f64).floor() as usize).min(dims - 1);
    let scale = ((distance_of(logical) * rings as f64).floor() as usize).min(rings - 1);

    SectorIndex { dimension, scale }
}

/// Classify a logical point against a mandala configuration.
#[must_use]
pub fn classify(logical: Point, config: &MandalaConfig) -> Placement {
    let index = classify_index(logical, config.dimension_count(), config.scale_count());
    Placement {
        dimension: config.dimensions()[index.dimension].name.clone(),
        section: config.scales()[index.scale].clone(),
        index: Some(index),
    }
}

/// Start and end angle (radians, counter-clockwise from +x) of sector `index`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sector_angles(index: usize, count: NonZeroUsize) -> (f64, f64) {
    let step = TAU / count.get() as f64;
    (step * index as f64, step * (index + 1) as f64)
}

/// Inner and outer radius (logical units) of ring `index`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn ring_radii(index: usize, count: NonZeroUsize) -> (f64, f64) {
    let step = 1.0 / count.get() as f64;
    (step * index as f64, step * (index + 1) as f64)
}
