//! Sizing knobs shared by layout, hit-testing, and rendering.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use crate::consts::{CHILD_SCALE, EXIT_ANIMATION_MS, IMAGE_SIZE, ORBIT_SPACING, POSTIT_SIZE};
use crate::coords::SceneTransform;
use crate::orbit::OrbitParams;

/// Element footprints and animation timing used by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Post-it width in mandala pixels.
    pub postit_w: f64,
    /// Post-it height in mandala pixels.
    pub postit_h: f64,
    /// Image width in mandala pixels.
    pub image_w: f64,
    /// Image height in mandala pixels.
    pub image_h: f64,
    /// Scale applied to children drawn in an orbit.
    pub child_scale: f64,
    /// Gap between neighbouring orbit children.
    pub orbit_spacing: f64,
    /// Lifetime of an exiting orbit child, in milliseconds.
    pub exit_animation_ms: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            postit_w: POSTIT_SIZE,
            postit_h: POSTIT_SIZE,
            image_w: IMAGE_SIZE,
            image_h: IMAGE_SIZE,
            child_scale: CHILD_SCALE,
            orbit_spacing: ORBIT_SPACING,
            exit_animation_ms: EXIT_ANIMATION_MS,
        }
    }
}

impl LayoutSettings {
    #[must_use]
    pub fn orbit_params(&self) -> OrbitParams {
        OrbitParams { postit_w: self.postit_w, child_scale: self.child_scale, spacing: self.orbit_spacing }
    }

    /// Transform for post-its anchored by their top-left corner.
    #[must_use]
    pub fn postit_transform(&self, radius: f64) -> SceneTransform {
        SceneTransform::for_element(radius, self.postit_w, self.postit_h)
    }

    /// Transform for images anchored by their top-left corner.
    #[must_use]
    pub fn image_transform(&self, radius: f64) -> SceneTransform {
        SceneTransform::for_element(radius, self.image_w, self.image_h)
    }
}
