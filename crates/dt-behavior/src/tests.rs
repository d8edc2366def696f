//! Unit tests for `RouteChangeDetector`.

use dt_core::Coord;

use crate::RouteChangeDetector;

#[test]
fn not_warm_until_two_samples() {
    let mut det = RouteChangeDetector::new(5);
    assert!(!det.is_warm());
    assert!(!det.has_changed(Coord::new(0, 0), Coord::new(1, 0), 10.0));
    assert!(!det.is_warm());
}

#[test]
fn stays_false_while_direction_agrees() {
    let mut det = RouteChangeDetector::new(5);
    let mut pos = Coord::ZERO;
    for _ in 0..6 {
        let next = Coord::new(pos.x + 1, pos.y);
        assert!(!det.has_changed(pos, next, 10.0));
        pos = next;
    }
}

#[test]
fn ninety_degree_turn_detected_within_two_samples() {
    let mut det = RouteChangeDetector::new(5);
    let mut pos = Coord::ZERO;
    // Establish a stable +x heading.
    for _ in 0..3 {
        let next = Coord::new(pos.x + 1, pos.y);
        det.has_changed(pos, next, 10.0);
        pos = next;
    }

    // Turn 90 degrees to +y. The first post-turn sample may still average
    // out under the old heading, but within two samples the mean itself has
    // swung far enough to register.
    let mut changed_within_two = false;
    for _ in 0..2 {
        let next = Coord::new(pos.x, pos.y + 1);
        if det.has_changed(pos, next, 10.0) {
            changed_within_two = true;
        }
        pos = next;
    }
    assert!(changed_within_two);
}

#[test]
fn stationary_step_is_ignored() {
    let mut det = RouteChangeDetector::new(5);
    assert!(!det.has_changed(Coord::new(3, 3), Coord::new(3, 3), 10.0));
    assert!(!det.is_warm());
}

#[test]
fn history_window_is_bounded() {
    let mut det = RouteChangeDetector::new(3);
    let mut pos = Coord::ZERO;
    for _ in 0..20 {
        let next = Coord::new(pos.x + 1, pos.y);
        det.has_changed(pos, next, 10.0);
        pos = next;
    }
    // A late 90-degree turn should still register promptly: if the window
    // were unbounded and full of +x history, a single +y turn would be
    // diluted into irrelevance instead.
    let mut turned = false;
    for _ in 0..2 {
        let next = Coord::new(pos.x, pos.y + 1);
        if det.has_changed(pos, next, 10.0) {
            turned = true;
        }
        pos = next;
    }
    assert!(turned);
}

#[test]
fn clear_resets_history() {
    let mut det = RouteChangeDetector::new(5);
    det.has_changed(Coord::new(0, 0), Coord::new(1, 0), 10.0);
    det.has_changed(Coord::new(1, 0), Coord::new(2, 0), 10.0);
    assert!(det.is_warm());
    det.clear();
    assert!(!det.is_warm());
}

#[test]
fn default_history_size_is_five() {
    let det = RouteChangeDetector::default();
    assert!(!det.is_warm());
}
