//! Orbit layout: children of an expanded post-it arranged on a circle
//! around their parent.

#[cfg(test)]
#[path = "orbit_test.rs"]
mod orbit_test;

use std::collections::HashMap;
use std::f64::consts::TAU;

use crate::camera::Point;
use crate::consts::MIN_ORBIT_RADIUS;
use crate::doc::PostitId;

/// Sizing inputs for an orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitParams {
    /// Unscaled post-it width.
    pub postit_w: f64,
    /// Scale applied to orbiting children.
    pub child_scale: f64,
    /// Gap between neighbouring children.
    pub spacing: f64,
}

impl OrbitParams {
    /// Half the scaled child width.
    #[must_use]
    pub fn child_radius(&self) -> f64 {
        self.postit_w * self.child_scale / 2.0
    }

    /// Scaled child side length.
    #[must_use]
    pub fn child_size(&self) -> f64 {
        self.postit_w * self.child_scale
    }
}

/// Radius of the orbit for `count` children.
///
/// Large enough that the circumference holds every child plus `spacing`,
/// never smaller than [`MIN_ORBIT_RADIUS`].
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn orbit_radius(count: usize, params: &OrbitParams) -> f64 {
    let per_child = 2.0 * params.child_radius() + params.spacing;
    (count as f64 * per_child / TAU).max(MIN_ORBIT_RADIUS)
}

/// Top-left positions for `children` placed evenly around `parent_center`.
///
/// Child `i` of `n` sits at angle `2π·i/n`; its center lies on the orbit.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn layout(parent_center: Point, children: &[PostitId], params: &OrbitParams) -> HashMap<PostitId, Point> {
    let count = children.len();
    if count == 0 {
        return HashMap::new();
    }

    let radius = orbit_radius(count, params);
    let half = params.child_radius();

    children
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let angle = TAU * i as f64 / count as f64;
            let pos = Point::new(
                parent_center.x + radius * angle.cos() - half,
                parent_center.y + radius * angle.sin() - half,
            );
            (*id, pos)
        })
        .collect()
}
