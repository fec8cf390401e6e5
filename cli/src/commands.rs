//! Offline layout operations over a mandala snapshot.
//!
//! Every function here is pure: it takes parsed input and returns the value
//! the binary prints. Reading files and writing output stays in `main.rs`.

#[cfg(test)]
#[path = "commands_test.rs"]
mod commands_test;

use canvas::bounds::{clamp_logical, clamp_to_mandala};
use canvas::camera::Point;
use canvas::doc::{DocStore, MandalaSnapshot};
use canvas::orbit::layout;
use canvas::radial::{self, Placement};
use canvas::settings::LayoutSettings;
use serde::Serialize;
use uuid::Uuid;

use crate::error::CliError;

/// Top-left position of one orbiting child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitSlot {
    pub id: Uuid,
    pub x: f64,
    pub y: f64,
}

/// What `place` changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlaceReport {
    pub clamped: usize,
    pub relabeled: usize,
}

/// Reject non-positive sizes before they reach the layout math.
///
/// # Errors
///
/// Returns [`CliError::InvalidSetting`] naming the first offending field.
pub fn validate_settings(settings: &LayoutSettings) -> Result<(), CliError> {
    let fields = [
        ("postit-width", settings.postit_w),
        ("postit-height", settings.postit_h),
        ("image-width", settings.image_w),
        ("image-height", settings.image_h),
        ("child-scale", settings.child_scale),
    ];
    for (name, value) in fields {
        if value.is_nan() || value <= 0.0 {
            return Err(CliError::InvalidSetting { name, value });
        }
    }
    Ok(())
}

/// Classify a logical point against the snapshot's configuration.
#[must_use]
pub fn classify(snapshot: &MandalaSnapshot, logical: Point) -> Placement {
    radial::classify(logical, &snapshot.mandala.configuration)
}

/// Clamp an absolute element center into a mandala of `radius` pixels.
#[must_use]
pub fn clamp(center: Point, radius: f64, width: f64, height: f64, scale: f64) -> Point {
    clamp_to_mandala(center, radius, width, height, scale)
}

/// Orbit positions for the children of `parent`, in child order.
///
/// # Errors
///
/// Fails when the snapshot has a parent cycle, when `parent` is missing,
/// or when `parent` is itself an orbiting child.
pub fn orbit(snapshot: &MandalaSnapshot, parent: Uuid, settings: &LayoutSettings) -> Result<Vec<OrbitSlot>, CliError> {
    let mut doc = DocStore::new();
    doc.load_snapshot(snapshot.postits.clone(), Vec::new(), Vec::new())?;

    let postit = doc.postit(&parent).ok_or(CliError::UnknownPostit(parent))?;
    if !doc.is_root(postit) {
        return Err(CliError::NotARoot(parent));
    }
    let center = settings
        .postit_transform(snapshot.mandala.radius)
        .center_of(postit.coordinates);
    let children = doc.children_of(&parent);
    let positions = layout(center, &children, &settings.orbit_params());

    Ok(children
        .iter()
        .filter_map(|id| positions.get(id).map(|p| OrbitSlot { id: *id, x: p.x, y: p.y }))
        .collect())
}

/// Pull every post-it and image back inside the unit disk and re-derive each
/// post-it's dimension and section from its position.
///
/// # Errors
///
/// Returns [`CliError::Doc`] if the post-its contain a parent cycle.
pub fn place(snapshot: &mut MandalaSnapshot) -> Result<PlaceReport, CliError> {
    DocStore::new().load_snapshot(snapshot.postits.clone(), Vec::new(), Vec::new())?;

    let mut report = PlaceReport::default();
    let config = &snapshot.mandala.configuration;
    for postit in &mut snapshot.postits {
        let clamped = clamp_logical(postit.coordinates);
        if clamped != postit.coordinates {
            tracing::debug!(id = %postit.id, "post-it pulled inside the mandala");
            postit.coordinates = clamped;
            report.clamped += 1;
        }
        let placement = radial::classify(postit.coordinates, config);
        if placement.dimension != postit.dimension || placement.section != postit.section {
            tracing::debug!(
                id = %postit.id,
                from = %format_args!("{}/{}", postit.dimension, postit.section),
                to = %format_args!("{}/{}", placement.dimension, placement.section),
                "post-it relabeled"
            );
            postit.dimension = placement.dimension;
            postit.section = placement.section;
            report.relabeled += 1;
        }
    }
    for image in &mut snapshot.images {
        let clamped = clamp_logical(image.coordinates);
        if clamped != image.coordinates {
            image.coordinates = clamped;
            report.clamped += 1;
        }
    }
    Ok(report)
}
