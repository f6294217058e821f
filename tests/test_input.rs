use gopher_jump::input::*;

// ── InputSnapshot ─────────────────────────────────────────────────────────────

#[test]
fn is_pressed_requires_every_key() {
    let s = InputSnapshot::new().hold(Key::A).hold(Key::D);
    assert!(s.is_pressed(&[Key::A]));
    assert!(s.is_pressed(&[Key::A, Key::D]));
    assert!(!s.is_pressed(&[Key::A, Key::W]));
}

#[test]
fn empty_key_set_is_trivially_pressed() {
    assert!(InputSnapshot::new().is_pressed(&[]));
}

#[test]
fn held_key_is_not_an_edge() {
    let s = InputSnapshot::new().hold(Key::Space);
    assert!(!s.is_just_pressed(Action::Jump));
    assert!(!s.is_just_pressed(Action::Start));
}

#[test]
fn space_press_fires_start_and_jump() {
    let s = InputSnapshot::new().press(Key::Space);
    assert!(s.is_just_pressed(Action::Start));
    assert!(s.is_just_pressed(Action::Jump));
    assert!(!s.is_just_pressed(Action::Fire));
    assert!(s.is_pressed(&[Key::Space]));
}

#[test]
fn alternative_bindings() {
    assert!(InputSnapshot::new().press(Key::Enter).is_just_pressed(Action::Start));
    assert!(InputSnapshot::new().press(Key::ArrowUp).is_just_pressed(Action::Jump));
    assert!(InputSnapshot::new().press(Key::W).is_just_pressed(Action::Jump));
    assert!(InputSnapshot::new().press(Key::J).is_just_pressed(Action::Fire));
    assert!(InputSnapshot::new().press(Key::F).is_just_pressed(Action::Fire));
}

#[test]
fn restart_needs_control_held_and_r_pressed() {
    let r_only = InputSnapshot::new().press(Key::R);
    assert!(!r_only.is_just_pressed(Action::Restart));

    let combo = InputSnapshot::new().hold(Key::ControlLeft).press(Key::R);
    assert!(combo.is_just_pressed(Action::Restart));

    let r_held = InputSnapshot::new().press(Key::ControlLeft).hold(Key::R);
    assert!(!r_held.is_just_pressed(Action::Restart));
}

// ── KeyTracker ────────────────────────────────────────────────────────────────

#[test]
fn first_press_is_an_edge_once() {
    let mut t = KeyTracker::new(HoldPolicy::Window(4));
    t.press(Key::Space, 1);
    let s1 = t.take_snapshot(1);
    assert!(s1.is_just_pressed(Action::Jump));
    let s2 = t.take_snapshot(2);
    assert!(!s2.is_just_pressed(Action::Jump));
    assert!(s2.is_pressed(&[Key::Space]));
}

#[test]
fn auto_repeat_press_is_not_an_edge() {
    let mut t = KeyTracker::new(HoldPolicy::Window(4));
    t.press(Key::Space, 1);
    t.take_snapshot(1);
    t.press(Key::Space, 3);
    assert!(!t.take_snapshot(3).is_just_pressed(Action::Jump));
}

#[test]
fn key_expires_after_the_window() {
    let mut t = KeyTracker::new(HoldPolicy::Window(4));
    t.press(Key::D, 3);
    assert!(t.take_snapshot(7).is_pressed(&[Key::D]));
    assert!(!t.take_snapshot(8).is_pressed(&[Key::D]));

    t.press(Key::D, 9);
    let s = t.take_snapshot(9);
    assert!(s.is_pressed(&[Key::D]));
}

#[test]
fn press_after_expiry_is_a_new_edge() {
    let mut t = KeyTracker::new(HoldPolicy::Window(4));
    t.press(Key::F, 1);
    t.take_snapshot(1);
    t.press(Key::F, 10);
    assert!(t.take_snapshot(10).is_just_pressed(Action::Fire));
}

#[test]
fn until_release_holds_indefinitely() {
    let mut t = KeyTracker::new(HoldPolicy::UntilRelease);
    t.press(Key::A, 1);
    assert!(t.take_snapshot(1000).is_pressed(&[Key::A]));
    t.release(Key::A);
    assert!(!t.take_snapshot(1001).is_pressed(&[Key::A]));
}

#[test]
fn press_after_release_is_a_new_edge() {
    let mut t = KeyTracker::new(HoldPolicy::UntilRelease);
    t.press(Key::Space, 1);
    t.take_snapshot(1);
    t.press(Key::Space, 2);
    assert!(!t.take_snapshot(2).is_just_pressed(Action::Jump));
    t.release(Key::Space);
    t.press(Key::Space, 3);
    assert!(t.take_snapshot(3).is_just_pressed(Action::Jump));
}

#[test]
fn repeat_refreshes_without_an_edge() {
    let mut t = KeyTracker::new(HoldPolicy::Window(4));
    t.repeat(Key::A, 1);
    let s = t.take_snapshot(1);
    assert!(s.is_pressed(&[Key::A]));
    assert_eq!(s, InputSnapshot::new().hold(Key::A));
}
