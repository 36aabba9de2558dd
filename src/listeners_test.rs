use super::*;

#[test]
fn new_registry_is_empty() {
    let registry: ListenerRegistry<&str, u32> = ListenerRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn track_and_get() {
    let mut registry = ListenerRegistry::new();
    assert_eq!(registry.track("document", 1), None);
    assert!(registry.is_tracked(&"document"));
    assert_eq!(registry.get(&"document"), Some(&1));
    assert_eq!(registry.get(&"sidebar"), None);
}

#[test]
fn retracking_replaces_and_returns_old_listener() {
    let mut registry = ListenerRegistry::new();
    registry.track("document", 1);
    assert_eq!(registry.track("document", 2), Some(1));
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&"document"), Some(&2));
}

#[test]
fn untrack_hands_back_listener() {
    let mut registry = ListenerRegistry::new();
    registry.track("a", 1);
    registry.track("b", 2);
    assert_eq!(registry.untrack(&"a"), Some(1));
    assert_eq!(registry.untrack(&"a"), None);
    assert!(!registry.is_tracked(&"a"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn roots_keep_tracking_order() {
    let mut registry = ListenerRegistry::new();
    registry.track("b", 2);
    registry.track("a", 1);
    assert_eq!(registry.roots().copied().collect::<Vec<_>>(), vec!["b", "a"]);
}

#[test]
fn drain_empties_registry() {
    let mut registry = ListenerRegistry::new();
    registry.track("a", 1);
    registry.track("b", 2);
    let drained: Vec<_> = registry.drain().collect();
    assert_eq!(drained, vec![("a", 1), ("b", 2)]);
    assert!(registry.is_empty());
}
