use uuid::Uuid;

use super::*;

fn crumb(name: &str) -> Crumb {
    Crumb { id: Uuid::new_v4(), name: name.into(), path: format!("/mandala/{name}") }
}

#[test]
fn new_context_is_empty() {
    let nav = NavigationContext::new();
    assert!(nav.scope().is_none());
    assert!(nav.crumbs().is_empty());
    assert!(nav.current().is_none());
}

#[test]
fn push_and_pop() {
    let mut nav = NavigationContext::new();
    nav.push(crumb("a"));
    nav.push(crumb("b"));
    assert_eq!(nav.current().map(|c| c.name.as_str()), Some("b"));
    assert_eq!(nav.pop().map(|c| c.name), Some("b".to_owned()));
    assert_eq!(nav.crumbs().len(), 1);
}

#[test]
fn revisiting_a_crumb_truncates_back_to_it() {
    let mut nav = NavigationContext::new();
    let a = crumb("a");
    nav.push(a.clone());
    nav.push(crumb("b"));
    nav.push(crumb("c"));
    nav.push(a.clone());
    assert_eq!(nav.crumbs(), &[a]);
}

#[test]
fn entering_new_scope_resets_trail() {
    let mut nav = NavigationContext::new();
    let project = Uuid::new_v4();
    assert!(nav.enter_scope(project));
    nav.push(crumb("a"));

    assert!(!nav.enter_scope(project));
    assert_eq!(nav.crumbs().len(), 1);

    assert!(nav.enter_scope(Uuid::new_v4()));
    assert!(nav.crumbs().is_empty());
}

#[test]
fn clear_keeps_scope() {
    let mut nav = NavigationContext::new();
    let project = Uuid::new_v4();
    nav.enter_scope(project);
    nav.push(crumb("a"));
    nav.clear();
    assert!(nav.crumbs().is_empty());
    assert_eq!(nav.scope(), Some(project));
}

#[test]
fn context_survives_session_storage_round_trip() {
    let mut nav = NavigationContext::new();
    nav.enter_scope(Uuid::new_v4());
    nav.push(crumb("a"));
    let stored = serde_json::to_string(&nav).unwrap();
    let restored: NavigationContext = serde_json::from_str(&stored).unwrap();
    assert_eq!(restored, nav);
}
