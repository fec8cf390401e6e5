use serde_json::json;

use super::*;

const EPSILON: f64 = 1e-9;

fn snapshot(postits: serde_json::Value, images: serde_json::Value) -> MandalaSnapshot {
    serde_json::from_value(json!({
        "mandala": {
            "id": Uuid::new_v4(),
            "name": "Barrio",
            "radius": 300.0,
            "configuration": {
                "dimensions": [
                    { "name": "Economía", "color": "#f00" },
                    { "name": "Política", "color": "#0f0" },
                    { "name": "Cultura", "color": "#00f" },
                    { "name": "Ambiente", "color": "#ff0" },
                    { "name": "Social", "color": "#0ff" },
                    { "name": "Tecnología", "color": "#f0f" }
                ],
                "scales": ["Persona", "Comunidad", "Institución", "País"]
            }
        },
        "postits": postits,
        "images": images
    }))
    .unwrap()
}

fn postit(id: Uuid, parent: Option<Uuid>, x: f64, y: f64) -> serde_json::Value {
    let mut value = json!({
        "id": id,
        "dimension": "Economía",
        "section": "Persona",
        "content": "",
        "coordinates": { "x": x, "y": y }
    });
    if let Some(parent) = parent {
        value["parentId"] = json!(parent);
    }
    value
}

// =============================================================
// Settings
// =============================================================

#[test]
fn default_settings_are_valid() {
    assert!(validate_settings(&LayoutSettings::default()).is_ok());
}

#[test]
fn non_positive_sizes_are_rejected() {
    let settings = LayoutSettings { child_scale: 0.0, ..LayoutSettings::default() };
    let err = validate_settings(&settings).unwrap_err();
    assert!(matches!(err, CliError::InvalidSetting { name: "child-scale", .. }));
    assert_eq!(err.error_code(), "E_INVALID_SETTING");
}

// =============================================================
// classify / clamp
// =============================================================

#[test]
fn classify_uses_snapshot_names() {
    let snap = snapshot(json!([]), json!([]));
    let placement = classify(&snap, Point::new(-0.99, 0.0));
    assert_eq!(placement.dimension, "Ambiente");
    assert_eq!(placement.section, "País");

    let center = classify(&snap, Point::new(0.0, 0.0));
    assert_eq!(center.dimension, "Economía");
    assert_eq!(center.section, "Persona");
}

#[test]
fn clamp_projects_onto_the_rim() {
    let p = clamp(Point::new(650.0, 300.0), 300.0, 0.0, 0.0, 1.0);
    assert!((p.x - 600.0).abs() < EPSILON);
    assert!((p.y - 300.0).abs() < EPSILON);
}

// =============================================================
// orbit
// =============================================================

#[test]
fn orbit_lists_children_in_order() {
    let root = Uuid::new_v4();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let snap = snapshot(
        json!([postit(root, None, 0.0, 0.0), postit(a, Some(root), 0.0, 0.0), postit(b, Some(root), 0.0, 0.0)]),
        json!([]),
    );
    let slots = orbit(&snap, root, &LayoutSettings::default()).unwrap();
    assert_eq!(slots.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
    // Parent center (300, 300), floor orbit of 60, child half-size 32.
    assert!((slots[0].x - 328.0).abs() < EPSILON);
    assert!((slots[0].y - 268.0).abs() < EPSILON);
    assert!((slots[1].x - 208.0).abs() < EPSILON);
}

#[test]
fn orbit_of_leaf_is_empty() {
    let root = Uuid::new_v4();
    let snap = snapshot(json!([postit(root, None, 0.5, 0.5)]), json!([]));
    assert!(orbit(&snap, root, &LayoutSettings::default()).unwrap().is_empty());
}

#[test]
fn orbit_rejects_unknown_and_child_parents() {
    let root = Uuid::new_v4();
    let child = Uuid::new_v4();
    let snap = snapshot(json!([postit(root, None, 0.0, 0.0), postit(child, Some(root), 0.0, 0.0)]), json!([]));

    let missing = Uuid::new_v4();
    assert!(matches!(
        orbit(&snap, missing, &LayoutSettings::default()),
        Err(CliError::UnknownPostit(id)) if id == missing
    ));
    assert!(matches!(orbit(&snap, child, &LayoutSettings::default()), Err(CliError::NotARoot(_))));
}

#[test]
fn orbit_rejects_cyclic_snapshot() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let snap = snapshot(json!([postit(a, Some(b), 0.0, 0.0), postit(b, Some(a), 0.0, 0.0)]), json!([]));
    let err = orbit(&snap, a, &LayoutSettings::default()).unwrap_err();
    assert_eq!(err.error_code(), "E_POSTIT_CYCLE");
}

// =============================================================
// place
// =============================================================

#[test]
fn place_clamps_and_relabels() {
    let far = Uuid::new_v4();
    let inside = Uuid::new_v4();
    let mut snap = snapshot(
        json!([postit(far, None, -3.0, 0.0), postit(inside, None, 0.1, 0.1)]),
        json!([{ "id": Uuid::new_v4(), "url": "u", "coordinates": { "x": 0.0, "y": 2.0 } }]),
    );

    let report = place(&mut snap).unwrap();
    assert_eq!(report, PlaceReport { clamped: 2, relabeled: 1 });

    let moved = &snap.postits[0];
    assert!((moved.coordinates.x + 1.0).abs() < EPSILON);
    assert_eq!(moved.dimension, "Ambiente");
    assert_eq!(moved.section, "País");

    let untouched = &snap.postits[1];
    assert_eq!(untouched.coordinates, Point::new(0.1, 0.1));
    assert_eq!(untouched.dimension, "Economía");
    assert_eq!(untouched.section, "Persona");

    assert!((snap.images[0].coordinates.y - 1.0).abs() < EPSILON);
}

#[test]
fn place_is_idempotent() {
    let mut snap = snapshot(json!([postit(Uuid::new_v4(), None, 0.1, 0.6)]), json!([]));
    assert_eq!(place(&mut snap).unwrap().relabeled, 1);
    assert_eq!(snap.postits[0].dimension, "Política");
    assert_eq!(snap.postits[0].section, "Institución");
    let again = place(&mut snap).unwrap();
    assert_eq!(again, PlaceReport::default());
}
