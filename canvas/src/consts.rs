//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.1;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 8.0;

/// Multiplicative zoom step applied per wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

// ── Elements ────────────────────────────────────────────────────

/// Default post-it footprint in mandala pixels.
pub const POSTIT_SIZE: f64 = 80.0;

/// Default image footprint in mandala pixels.
pub const IMAGE_SIZE: f64 = 100.0;

/// Scale applied to post-its shown in a parent's orbit.
pub const CHILD_SCALE: f64 = 0.8;

// ── Orbit ───────────────────────────────────────────────────────

/// Gap left between neighbouring children on an orbit.
pub const ORBIT_SPACING: f64 = 10.0;

/// Floor for the orbit radius so a lone child never sits on its parent.
pub const MIN_ORBIT_RADIUS: f64 = 60.0;

/// How long an exiting orbit child stays around for its fade-out.
pub const EXIT_ANIMATION_MS: f64 = 300.0;

// ── Interaction ─────────────────────────────────────────────────

/// Pointer travel (screen pixels) before a press on an item becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;
