#![allow(clippy::float_cmp)]

use std::f64::consts::PI;

use uuid::Uuid;

use super::*;

const EPSILON: f64 = 1e-9;

/// Children of radius 32 with spacing 10.
fn params() -> OrbitParams {
    OrbitParams { postit_w: 80.0, child_scale: 0.8, spacing: 10.0 }
}

fn ids(n: usize) -> Vec<PostitId> {
    (0..n).map(|_| Uuid::new_v4()).collect()
}

fn center_of(top_left: Point, p: &OrbitParams) -> Point {
    top_left.offset(p.child_radius(), p.child_radius())
}

// =============================================================
// orbit_radius
// =============================================================

#[test]
fn radius_for_eight_children() {
    let r = orbit_radius(8, &params());
    assert!((r - 8.0 * 74.0 / (2.0 * PI)).abs() < EPSILON);
    assert!((r - 94.2).abs() < 0.05);
}

#[test]
fn radius_has_floor_for_few_children() {
    assert_eq!(orbit_radius(1, &params()), MIN_ORBIT_RADIUS);
    assert_eq!(orbit_radius(2, &params()), MIN_ORBIT_RADIUS);
}

#[test]
fn radius_grows_with_child_count() {
    assert!(orbit_radius(20, &params()) > orbit_radius(10, &params()));
}

// =============================================================
// layout
// =============================================================

#[test]
fn empty_children_yield_empty_layout() {
    assert!(layout(Point::new(0.0, 0.0), &[], &params()).is_empty());
}

#[test]
fn single_child_sits_on_floor_radius_at_angle_zero() {
    let p = params();
    let children = ids(1);
    let parent = Point::new(300.0, 300.0);
    let positions = layout(parent, &children, &p);
    let center = center_of(positions[&children[0]], &p);
    assert!((center.x - 360.0).abs() < EPSILON);
    assert!((center.y - 300.0).abs() < EPSILON);
}

#[test]
fn every_child_center_lies_on_the_orbit() {
    let p = params();
    let children = ids(8);
    let parent = Point::new(100.0, -50.0);
    let positions = layout(parent, &children, &p);
    let r = orbit_radius(8, &p);
    assert_eq!(positions.len(), 8);
    for id in &children {
        let c = center_of(positions[id], &p);
        assert!((c.distance_to(parent) - r).abs() < EPSILON);
    }
}

#[test]
fn children_are_evenly_spaced_without_overlap() {
    let p = params();
    let children = ids(8);
    let parent = Point::new(0.0, 0.0);
    let positions = layout(parent, &children, &p);
    let r = orbit_radius(8, &p);
    let arc = 2.0 * PI * r / 8.0;
    // Arc length between neighbours equals one child plus the spacing.
    assert!((arc - (2.0 * p.child_radius() + p.spacing)).abs() < EPSILON);

    let chord = 2.0 * r * (PI / 8.0).sin();
    for i in 0..children.len() {
        let a = center_of(positions[&children[i]], &p);
        let b = center_of(positions[&children[(i + 1) % children.len()]], &p);
        let d = a.distance_to(b);
        assert!((d - chord).abs() < 1e-6);
        assert!(d > 2.0 * p.child_radius());
    }
}

#[test]
fn second_of_four_children_is_a_quarter_turn_away() {
    let p = params();
    let children = ids(4);
    let positions = layout(Point::new(0.0, 0.0), &children, &p);
    let second = center_of(positions[&children[1]], &p);
    // Angle π/2 in screen space points down (+y).
    assert!(second.x.abs() < EPSILON);
    assert!(second.y > 0.0);
}
