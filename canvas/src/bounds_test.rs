#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn dist_from_center(p: Point, radius: f64) -> f64 {
    p.distance_to(Point::new(radius, radius))
}

fn sample_points(radius: f64) -> Vec<Point> {
    let mut out = Vec::new();
    for i in -8..=8 {
        for j in -8..=8 {
            let scale = radius / 4.0;
            out.push(Point::new(radius + f64::from(i) * scale, radius + f64::from(j) * scale));
        }
    }
    out
}

// =============================================================
// clamp_to_disk
// =============================================================

#[test]
fn outside_point_projects_to_rim_on_same_angle() {
    let out = clamp_to_disk(Point::new(650.0, 300.0), 300.0);
    assert!((out.x - 600.0).abs() < EPSILON);
    assert!((out.y - 300.0).abs() < EPSILON);
}

#[test]
fn inside_point_is_unchanged() {
    let p = Point::new(320.0, 410.0);
    assert_eq!(clamp_to_disk(p, 300.0), p);
}

#[test]
fn point_on_rim_is_unchanged() {
    let p = Point::new(300.0, 0.0);
    assert_eq!(clamp_to_disk(p, 300.0), p);
}

#[test]
fn diagonal_projection_keeps_direction() {
    let out = clamp_to_disk(Point::new(1000.0, 1000.0), 100.0);
    let expected = 100.0 + 100.0 / 2f64.sqrt();
    assert!((out.x - expected).abs() < EPSILON);
    assert!((out.y - expected).abs() < EPSILON);
}

// =============================================================
// clamp_to_mandala
// =============================================================

#[test]
fn element_on_allowed_boundary_is_unchanged() {
    // 80×80 at scale 1 leaves 260 px of travel on a 300 px mandala.
    for p in [Point::new(560.0, 300.0), Point::new(300.0, 40.0)] {
        let out = clamp_to_mandala(p, 300.0, 80.0, 80.0, 1.0);
        assert!((out.x - p.x).abs() < EPSILON);
        assert!((out.y - p.y).abs() < EPSILON);
    }
}

#[test]
fn element_size_shrinks_the_allowed_disk() {
    // 80×60 at scale 1 has a bounding radius of 40.
    let out = clamp_to_mandala(Point::new(650.0, 300.0), 300.0, 80.0, 60.0, 1.0);
    assert!((out.x - 560.0).abs() < EPSILON);
    assert!((out.y - 300.0).abs() < EPSILON);
}

#[test]
fn scale_multiplies_the_bounding_radius() {
    let out = clamp_to_mandala(Point::new(300.0, 0.0), 300.0, 80.0, 80.0, 0.5);
    assert!((dist_from_center(out, 300.0) - 280.0).abs() < EPSILON);
}

#[test]
fn oversized_element_collapses_to_center() {
    let out = clamp_to_mandala(Point::new(10.0, 500.0), 100.0, 300.0, 300.0, 1.0);
    assert_eq!(out, Point::new(100.0, 100.0));
}

#[test]
fn zero_radius_mandala_returns_center() {
    assert_eq!(clamp_to_disk(Point::new(5.0, 5.0), 0.0), Point::new(0.0, 0.0));
}

// =============================================================
// Properties
// =============================================================

#[test]
fn clamp_is_idempotent() {
    let radius = 300.0;
    for p in sample_points(radius) {
        let once = clamp_to_mandala(p, radius, 80.0, 80.0, 1.0);
        let twice = clamp_to_mandala(once, radius, 80.0, 80.0, 1.0);
        assert!(once.distance_to(twice) < EPSILON, "{p:?}: {once:?} vs {twice:?}");
    }
}

#[test]
fn clamp_never_moves_points_outward() {
    let radius = 300.0;
    for p in sample_points(radius) {
        let out = clamp_to_mandala(p, radius, 80.0, 80.0, 1.0);
        assert!(dist_from_center(out, radius) <= dist_from_center(p, radius) + EPSILON);
    }
}

#[test]
fn clamp_respects_bound() {
    let radius = 300.0;
    for p in sample_points(radius) {
        let out = clamp_to_mandala(p, radius, 80.0, 80.0, 1.0);
        assert!(dist_from_center(out, radius) <= 260.0 + EPSILON);
    }
}

// =============================================================
// clamp_logical
// =============================================================

#[test]
fn logical_inside_unit_disk_is_unchanged() {
    let p = Point::new(0.6, -0.7);
    assert_eq!(clamp_logical(p), p);
}

#[test]
fn logical_corner_is_pulled_onto_unit_circle() {
    let out = clamp_logical(Point::new(1.0, 1.0));
    assert!((out.x.hypot(out.y) - 1.0).abs() < EPSILON);
    assert!((out.x - out.y).abs() < EPSILON);
}
