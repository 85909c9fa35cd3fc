use rookdb::LRUReplacer;

#[test]
fn test_victims_in_access_order() {
    let mut replacer = LRUReplacer::new(8);

    for frame_id in [5, 1, 3] {
        replacer.record_access(frame_id);
    }

    assert_eq!(replacer.victim(), Some(5));
    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(3));
    assert_eq!(replacer.victim(), None);
}

#[test]
fn test_reaccess_refreshes_position() {
    let mut replacer = LRUReplacer::new(8);

    for frame_id in [1, 2, 3] {
        replacer.record_access(frame_id);
    }
    replacer.record_access(1);

    assert_eq!(replacer.victim(), Some(2));
    assert_eq!(replacer.victim(), Some(3));
    assert_eq!(replacer.victim(), Some(1));
}

#[test]
fn test_remove_drops_frame() {
    let mut replacer = LRUReplacer::new(8);

    for frame_id in [1, 2, 3] {
        replacer.record_access(frame_id);
    }
    replacer.remove(2);

    // Removing an untracked frame is a silent no-op
    replacer.remove(7);

    assert_eq!(replacer.victim(), Some(1));
    assert_eq!(replacer.victim(), Some(3));
    assert_eq!(replacer.victim(), None);
}
