#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn params() -> OrbitParams {
    OrbitParams { postit_w: 80.0, child_scale: 0.8, spacing: 10.0 }
}

fn postit(parent: Option<PostitId>) -> Postit {
    Postit {
        id: Uuid::new_v4(),
        parent_id: parent,
        dimension: "A".into(),
        section: "S".into(),
        content: String::new(),
        tags: Vec::new(),
        coordinates: Point::new(0.0, 0.0),
    }
}

/// One root with `n` children.
fn family(n: usize) -> (DocStore, PostitId, Vec<PostitId>) {
    let mut doc = DocStore::new();
    let root = postit(None);
    let root_id = root.id;
    doc.insert_postit(root).unwrap();
    let mut children = Vec::new();
    for _ in 0..n {
        let child = postit(Some(root_id));
        children.push(child.id);
        doc.insert_postit(child).unwrap();
    }
    (doc, root_id, children)
}

fn center(_: &Postit) -> Option<Point> {
    Some(Point::new(300.0, 300.0))
}

// =============================================================
// Toggle
// =============================================================

#[test]
fn parents_start_collapsed() {
    let (_, root, _) = family(2);
    let exp = Expansion::new(300.0);
    assert!(!exp.is_expanded(&root));
    assert_eq!(exp.visible().count(), 0);
}

#[test]
fn expanding_shows_children_immediately() {
    let (doc, root, children) = family(3);
    let mut exp = Expansion::new(300.0);
    let timers = exp.toggle(root, 0.0, &doc, &params(), center);
    assert!(timers.is_empty());
    assert!(exp.is_expanded(&root));
    let visible: Vec<PostitId> = exp.visible().map(|(id, _)| id).collect();
    assert_eq!(visible, children);
}

#[test]
fn collapsing_moves_children_to_exiting_with_last_position() {
    let (doc, root, children) = family(2);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    let last = exp.visible_position(&children[0]).unwrap();

    let timers = exp.toggle(root, 1000.0, &doc, &params(), center);
    assert_eq!(timers.len(), 2);
    assert_eq!(timers[0].deadline_ms, 1300.0);
    assert_eq!(exp.visible().count(), 0);

    let exiting: Vec<_> = exp.exiting(1150.0).collect();
    assert_eq!(exiting.len(), 2);
    assert_eq!(exiting[0].1, last);
    assert!((exiting[0].2 - 0.5).abs() < 1e-9);
}

#[test]
fn expire_purges_matching_token() {
    let (doc, root, children) = family(1);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    let timers = exp.toggle(root, 10.0, &doc, &params(), center);

    assert_eq!(exp.expire(timers[0].token), Some(children[0]));
    assert!(!exp.is_exiting(&children[0]));
    assert_eq!(exp.expire(timers[0].token), None);
}

#[test]
fn reexpanding_cancels_pending_exit() {
    let (doc, root, children) = family(1);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    let timers = exp.toggle(root, 10.0, &doc, &params(), center);
    exp.toggle(root, 20.0, &doc, &params(), center);

    assert!(!exp.is_exiting(&children[0]));
    // The stale timer fires after the child came back; nothing is purged.
    assert_eq!(exp.expire(timers[0].token), None);
    assert!(exp.visible_position(&children[0]).is_some());
}

#[test]
fn each_exit_gets_a_fresh_token() {
    let (doc, root, _) = family(1);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    let first = exp.toggle(root, 10.0, &doc, &params(), center);
    exp.toggle(root, 20.0, &doc, &params(), center);
    let second = exp.toggle(root, 30.0, &doc, &params(), center);
    assert_ne!(first[0].token, second[0].token);
    assert!(exp.expire(first[0].token).is_none());
    assert!(exp.expire(second[0].token).is_some());
}

// =============================================================
// Recompute
// =============================================================

#[test]
fn visible_is_union_over_expanded_parents() {
    let mut doc = DocStore::new();
    let a = postit(None);
    let b = postit(None);
    let a_child = postit(Some(a.id));
    let b_child = postit(Some(b.id));
    let (a_id, b_id, ac, bc) = (a.id, b.id, a_child.id, b_child.id);
    for p in [a, b, a_child, b_child] {
        doc.insert_postit(p).unwrap();
    }

    let mut exp = Expansion::new(300.0);
    exp.toggle(a_id, 0.0, &doc, &params(), center);
    exp.toggle(b_id, 0.0, &doc, &params(), center);
    let visible: Vec<PostitId> = exp.visible().map(|(id, _)| id).collect();
    assert_eq!(visible, vec![ac, bc]);

    let timers = exp.toggle(a_id, 5.0, &doc, &params(), center);
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].child, ac);
    assert!(exp.visible_position(&bc).is_some());
}

#[test]
fn deleted_parent_is_forgotten() {
    let (mut doc, root, children) = family(1);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    doc.remove_postit(&root);

    let timers = exp.recompute(50.0, &doc, &params(), center);
    assert!(!exp.is_expanded(&root));
    assert_eq!(timers.len(), 1);
    assert!(exp.is_exiting(&children[0]));
}

#[test]
fn deleted_child_skips_exit_animation() {
    let (mut doc, root, children) = family(2);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    doc.remove_postit(&children[0]);

    let timers = exp.recompute(50.0, &doc, &params(), center);
    assert!(timers.is_empty());
    assert_eq!(exp.visible().count(), 1);
}

#[test]
fn parent_without_anchor_shows_nothing() {
    let (doc, root, _) = family(2);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), |_| None);
    assert!(exp.is_expanded(&root));
    assert_eq!(exp.visible().count(), 0);
}

#[test]
fn purge_due_removes_finished_exits_only() {
    let (doc, root, _) = family(2);
    let mut exp = Expansion::new(300.0);
    exp.toggle(root, 0.0, &doc, &params(), center);
    exp.toggle(root, 100.0, &doc, &params(), center);
    assert!(exp.purge_due(399.0).is_empty());
    assert_eq!(exp.purge_due(400.0).len(), 2);
    assert_eq!(exp.exiting(400.0).count(), 0);
}
