//! End-to-end gesture scenarios against the public recognizer API.
//!
//! Every test drives a [`Recognizer`] over a [`SettingsEnvironment`] on a
//! 1080x1920 surface at density 1.0, so dp thresholds equal pixels: 72 px
//! corners, 24 px drift and edge bands, 150 ms pairing window.

use std::time::Duration;

use careframe_gesture::{
    DisplayMetrics, GestureListener, GestureSettings, GestureState, GestureVariant, PendingStep,
    Rect, Recognizer, ResetReason, SettingsEnvironment, TouchKind,
};
use tracing_subscriber::EnvFilter;

const HEADER: Rect = Rect::new(0.0, 0.0, 1080.0, 160.0);

#[derive(Debug, Default)]
struct Hits {
    triggered: usize,
    pulses: Vec<Duration>,
}

impl GestureListener for Hits {
    fn on_triggered(&mut self) {
        self.triggered += 1;
    }

    fn on_hold_feedback(&mut self, held: Duration) {
        self.pulses.push(held);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn recognizer(variant: GestureVariant) -> Recognizer<SettingsEnvironment, Hits> {
    init_tracing();
    let settings =
        GestureSettings { exit_gesture_type: variant.value(), ..GestureSettings::default() };
    let env = SettingsEnvironment::new(settings, DisplayMetrics::new(1.0, 1080, 1920))
        .with_header_bounds(HEADER);
    Recognizer::new(env, Hits::default()).unwrap()
}

/// Report both corner pointers at their landing spots every 100 ms.
fn hold_corners(r: &mut Recognizer<SettingsEnvironment, Hits>, from_ms: u64, to_ms: u64) {
    for t in (from_ms..=to_ms).step_by(100) {
        r.process(TouchKind::Move, 0, 10.0, 10.0, t);
        r.process(TouchKind::Move, 1, 1070.0, 1910.0, t);
    }
}

#[test]
fn opposite_corners_hold_triggers_once() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    assert!(!r.process(TouchKind::Down, 0, 10.0, 10.0, 0));
    assert_eq!(r.pending_step(), Some(PendingStep::AwaitingSecondPointer));
    assert!(r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100));
    assert_eq!(r.state(), GestureState::Active);

    hold_corners(&mut r, 200, 3000);

    assert_eq!(r.listener().triggered, 1);
    assert_eq!(r.state(), GestureState::Idle);

    r.process(TouchKind::PointerUp, 1, 1070.0, 1910.0, 3100);
    r.process(TouchKind::Up, 0, 10.0, 10.0, 3100);
    assert_eq!(r.listener().triggered, 1);
}

#[test]
fn hold_feedback_pulses_every_interval() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100);
    hold_corners(&mut r, 200, 2600);

    let pulses: Vec<_> = r.listener().pulses.iter().map(Duration::as_millis).collect();
    assert_eq!(pulses, vec![500, 1000, 1500, 2000]);
    assert_eq!(r.listener().triggered, 1);
}

#[test]
fn pointers_in_same_side_corners_never_trigger() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    assert!(!r.process(TouchKind::PointerDown, 1, 1070.0, 10.0, 100));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::InvalidPairing));

    for t in (200..=3000).step_by(100) {
        assert!(!r.process(TouchKind::Move, 0, 10.0, 10.0, t));
        assert!(!r.process(TouchKind::Move, 1, 1070.0, 10.0, t));
    }
    assert_eq!(r.listener().triggered, 0);
}

#[test]
fn pairing_window_boundary() {
    for (gap_ms, expected) in
        [(149, GestureState::Active), (150, GestureState::Active), (151, GestureState::Pending)]
    {
        let mut r = recognizer(GestureVariant::OppositeCornersHold);

        r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
        r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, gap_ms);

        assert_eq!(r.state(), expected, "gap {gap_ms}ms");
    }
}

#[test]
fn late_second_pointer_cannot_pair_with_a_third() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 151);

    assert_eq!(r.pending_step(), Some(PendingStep::AwaitingSecondPointer));
    assert_eq!(r.tracked_pointers(), vec![1]);

    // Finger 0 is still down, so a third finger makes three on the surface.
    assert!(!r.process(TouchKind::PointerDown, 2, 20.0, 20.0, 200));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::ExtraPointer));
    assert_eq!(r.pointers_on_surface(), 3);

    for t in (300..=2800).step_by(100) {
        r.process(TouchKind::Move, 0, 10.0, 10.0, t);
        r.process(TouchKind::Move, 1, 1070.0, 1910.0, t);
        r.process(TouchKind::Move, 2, 20.0, 20.0, t);
    }
    assert!(!r.tick(2800));
    assert_eq!(r.listener().triggered, 0);
}

#[test]
fn fingers_left_after_invalid_pairing_block_new_pairs() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    r.process(TouchKind::PointerDown, 1, 1070.0, 10.0, 50);
    assert_eq!(r.last_reset(), Some(ResetReason::InvalidPairing));

    assert!(!r.process(TouchKind::PointerDown, 2, 20.0, 20.0, 100));
    assert!(!r.process(TouchKind::PointerDown, 3, 1070.0, 1910.0, 150));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.pointers_on_surface(), 4);

    assert!(!r.tick(3000));
    assert_eq!(r.listener().triggered, 0);

    // Once everything lifts, a clean pair works again.
    r.process(TouchKind::Up, 0, 10.0, 10.0, 3100);
    assert_eq!(r.pointers_on_surface(), 0);
    r.process(TouchKind::Down, 0, 10.0, 10.0, 4000);
    assert!(r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 4050));
    assert!(r.tick(6550));
}

#[test]
fn second_pair_after_one_finger_lifts() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 500.0, 500.0, 0);
    r.process(TouchKind::PointerDown, 1, 10.0, 10.0, 400);
    r.process(TouchKind::PointerUp, 0, 500.0, 500.0, 450);
    assert_eq!(r.pointers_on_surface(), 1);

    // Two fingers on the surface again, both in opposite corners.
    r.process(TouchKind::PointerDown, 2, 1070.0, 1910.0, 500);
    assert_eq!(r.state(), GestureState::Active);
}

#[test]
fn unpaired_first_pointer_expires_on_tick() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    assert!(!r.tick(150));
    assert_eq!(r.state(), GestureState::Pending);

    assert!(!r.tick(151));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::PairingTimeout));

    // Idle again, so a settings change can be applied with the finger down.
    let settings = GestureSettings {
        exit_gesture_type: GestureVariant::TripleTapDebug.value(),
        ..r.env().settings().clone()
    };
    r.env_mut().set_settings(settings);
    assert_eq!(r.reload_config(), Ok(()));
    assert_eq!(r.config().variant, GestureVariant::TripleTapDebug);
}

#[test]
fn drift_boundary() {
    for (drift, expected_triggers) in [(23.0, 1), (25.0, 0)] {
        let mut r = recognizer(GestureVariant::OppositeCornersHold);

        r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
        r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100);
        for t in (200..=2600).step_by(100) {
            r.process(TouchKind::Move, 0, 10.0 + drift, 10.0, t);
            r.process(TouchKind::Move, 1, 1070.0, 1910.0, t);
        }

        assert_eq!(r.listener().triggered, expected_triggers, "drift {drift}px");
    }
}

#[test]
fn third_pointer_cancels_pair() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100);
    assert!(!r.process(TouchKind::PointerDown, 2, 540.0, 960.0, 500));

    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::ExtraPointer));
}

#[test]
fn lifting_a_pointer_cancels_hold() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100);
    r.process(TouchKind::PointerUp, 1, 1070.0, 1910.0, 1500);

    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::PointerLifted));
    assert!(!r.tick(5000));
}

#[test]
fn header_hold_uses_current_header_bounds() {
    let mut r = recognizer(GestureVariant::TwoFingerHeaderHold);

    r.process(TouchKind::Down, 0, 300.0, 80.0, 0);
    assert!(r.process(TouchKind::PointerDown, 1, 700.0, 90.0, 50));
    assert!(r.tick(2550));
    assert_eq!(r.listener().triggered, 1);
    r.process(TouchKind::Up, 0, 300.0, 80.0, 2600);

    // Toolbar moved to the bottom: the old spot no longer qualifies.
    r.env_mut().set_header_bounds(Rect::new(0.0, 1760.0, 1080.0, 1920.0));
    r.process(TouchKind::Down, 0, 300.0, 80.0, 3000);
    r.process(TouchKind::PointerDown, 1, 700.0, 90.0, 3050);
    assert_eq!(r.last_reset(), Some(ResetReason::InvalidPairing));

    r.process(TouchKind::Down, 0, 300.0, 1800.0, 4000);
    assert!(r.process(TouchKind::PointerDown, 1, 700.0, 1850.0, 4050));
}

#[test]
fn edge_drag_hold_triggers() {
    let mut r = recognizer(GestureVariant::SingleFingerEdgeDragHold);

    assert!(!r.process(TouchKind::Down, 0, 540.0, 960.0, 0));
    assert!(!r.process(TouchKind::Move, 0, 541.0, 960.0, 300));
    assert_eq!(r.pending_step(), Some(PendingStep::AwaitingLongPress));
    assert!(r.process(TouchKind::Move, 0, 540.0, 960.0, 500));
    assert_eq!(r.pending_step(), Some(PendingStep::AwaitingEdge));

    // The drag toward the edge is part of the gesture, not a UI scroll.
    assert!(r.process(TouchKind::Move, 0, 400.0, 960.0, 600));
    assert!(r.process(TouchKind::Move, 0, 200.0, 960.0, 700));
    assert!(r.process(TouchKind::Move, 0, 10.0, 960.0, 800));
    assert_eq!(r.state(), GestureState::Active);

    for t in (900..=3300).step_by(100) {
        r.process(TouchKind::Move, 0, 12.0, 962.0, t);
    }
    assert_eq!(r.listener().triggered, 1);
}

#[test]
fn leaving_the_edge_abandons_the_hold() {
    let mut r = recognizer(GestureVariant::SingleFingerEdgeDragHold);

    r.process(TouchKind::Down, 0, 540.0, 960.0, 0);
    r.process(TouchKind::Move, 0, 540.0, 960.0, 500);
    r.process(TouchKind::Move, 0, 10.0, 960.0, 800);
    for t in (900..=1800).step_by(100) {
        r.process(TouchKind::Move, 0, 10.0, 960.0, t);
    }

    // 50 dp away from the edge, then back for longer than the remainder.
    assert!(!r.process(TouchKind::Move, 0, 60.0, 960.0, 1900));
    assert_eq!(r.last_reset(), Some(ResetReason::LeftEdge));
    for t in (2000..=5000).step_by(100) {
        assert!(!r.process(TouchKind::Move, 0, 10.0, 960.0, t));
    }

    assert!(!r.tick(6000));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.listener().triggered, 0);
}

#[test]
fn early_drag_is_not_an_edge_drag() {
    let mut r = recognizer(GestureVariant::SingleFingerEdgeDragHold);

    r.process(TouchKind::Down, 0, 540.0, 960.0, 0);
    r.process(TouchKind::Move, 0, 300.0, 960.0, 200);

    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::Drift));
}

#[test]
fn second_finger_cancels_edge_drag() {
    let mut r = recognizer(GestureVariant::SingleFingerEdgeDragHold);

    r.process(TouchKind::Down, 0, 540.0, 960.0, 0);
    r.process(TouchKind::PointerDown, 1, 600.0, 960.0, 100);

    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::ExtraPointer));
}

#[test]
fn lost_up_restarts_stream() {
    let mut r = recognizer(GestureVariant::SingleFingerEdgeDragHold);

    r.process(TouchKind::Down, 0, 540.0, 960.0, 0);
    r.process(TouchKind::Down, 5, 100.0, 100.0, 400);

    assert_eq!(r.last_reset(), Some(ResetReason::StreamRestarted));
    assert_eq!(r.tracked_pointers(), vec![5]);
    assert_eq!(r.pending_step(), Some(PendingStep::AwaitingLongPress));
}

#[test]
fn triple_tap_fires_on_third_up() {
    let mut r = recognizer(GestureVariant::TripleTapDebug);

    for tap in 0..3u64 {
        let t = tap * 100;
        assert!(!r.process(TouchKind::Down, 0, 100.0, 100.0, t));
        let consumed = r.process(TouchKind::Up, 0, 100.0, 100.0, t + 20);
        assert_eq!(consumed, tap == 2);
    }

    assert_eq!(r.listener().triggered, 1);
    assert_eq!(r.state(), GestureState::Idle);
}

#[test]
fn stale_tap_window_expires_on_tick() {
    let mut r = recognizer(GestureVariant::TripleTapDebug);

    r.process(TouchKind::Down, 0, 100.0, 100.0, 0);
    r.process(TouchKind::Up, 0, 100.0, 100.0, 20);
    assert!(!r.tick(600));
    assert_eq!(r.state(), GestureState::Pending);

    assert!(!r.tick(601));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::TapTimeout));
}

#[test]
fn touch_exploration_passes_everything_through() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);
    let exploration = r.env().touch_exploration();
    exploration.set(true);

    assert!(!r.process(TouchKind::Down, 0, 10.0, 10.0, 0));
    assert!(!r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100));
    for t in (200..=3000).step_by(100) {
        assert!(!r.process(TouchKind::Move, 0, 10.0, 10.0, t));
    }
    assert!(!r.tick(4000));
    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.listener().triggered, 0);

    exploration.set(false);
    r.process(TouchKind::Down, 0, 10.0, 10.0, 5000);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 5100);
    hold_corners(&mut r, 5200, 7600);
    assert_eq!(r.listener().triggered, 1);
}

#[test]
fn explicit_reset_matches_fresh_recognizer() {
    let mut r = recognizer(GestureVariant::OppositeCornersHold);

    r.process(TouchKind::Down, 0, 10.0, 10.0, 0);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 100);
    r.reset();

    assert_eq!(r.state(), GestureState::Idle);
    assert_eq!(r.last_reset(), Some(ResetReason::Requested));
    assert!(r.tracked_pointers().is_empty());

    r.process(TouchKind::Down, 0, 10.0, 10.0, 200);
    r.process(TouchKind::PointerDown, 1, 1070.0, 1910.0, 300);
    hold_corners(&mut r, 400, 2800);
    assert_eq!(r.listener().triggered, 1);
}

#[test]
fn require_pin_is_passed_through() {
    let settings = GestureSettings { exit_gesture_require_pin: true, ..GestureSettings::default() };
    let env = SettingsEnvironment::new(settings, DisplayMetrics::new(2.0, 1080, 1920));
    let r = Recognizer::new(env, || {}).unwrap();

    assert!(r.config().require_pin);
    assert_eq!(r.config().corner_size_px, 144.0);
}

#[test]
fn variant_labels() {
    let labels: Vec<_> = GestureVariant::ALL
        .iter()
        .map(|v| format!("{} = {}", v.value(), v.display_name()))
        .collect();

    insta::assert_snapshot!(labels.join("\n"), @r"
    0 = Opposite corners hold (strict)
    1 = Two-finger header hold
    2 = Single-finger edge drag hold (easier)
    3 = Triple tap (debug)
    ");
}
