//! Triple tap, intended for debug builds and automated tests.
//!
//! Three discrete taps at effectively the same spot. Each tap's down must
//! land within the tap timeout of the previous tap's down and within the
//! drift tolerance of the first tap. Fires on the third tap's up.

use super::{Context, GestureState, PendingStep, ResetReason, Step, Track};
use crate::{
    config::millis,
    event::{PointerId, PointerSample, TouchEvent},
    geometry::Point,
};

const TAPS_REQUIRED: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Tapping {
        anchor: Point,
        last_down_ms: u64,
        completed: u8,
        pressed: Option<PointerSample>,
    },
}

#[derive(Debug, Default)]
pub(crate) struct TripleTapTracker {
    phase: Phase,
}

impl TripleTapTracker {
    fn start(&mut self, event: &TouchEvent) {
        self.phase = Phase::Tapping {
            anchor: event.position(),
            last_down_ms: event.timestamp_ms,
            completed: 0,
            pressed: Some(PointerSample::from_event(event)),
        };
    }
}

impl Track for TripleTapTracker {
    fn handle(&mut self, event: &TouchEvent, ctx: &Context<'_>) -> Step {
        let Phase::Tapping { anchor, last_down_ms, completed, pressed } = self.phase else {
            if event.kind.is_down() {
                self.start(event);
            }
            return Step::Continue { consumed: false };
        };

        let timeout_ms = millis(ctx.config.tap_timeout);
        let tolerance = ctx.config.drift_tolerance_px;

        if event.kind.is_down() {
            if pressed.is_some() {
                return Step::Reset(ResetReason::ExtraPointer);
            }

            let gap_ms = event.timestamp_ms.saturating_sub(last_down_ms);
            if gap_ms > timeout_ms || anchor.distance_to(event.position()) > tolerance {
                self.start(event);
            } else {
                self.phase = Phase::Tapping {
                    anchor,
                    last_down_ms: event.timestamp_ms,
                    completed,
                    pressed: Some(PointerSample::from_event(event)),
                };
            }
            return Step::Continue { consumed: false };
        }

        let Some(press) = pressed.filter(|p| p.pointer_id == event.pointer_id) else {
            return Step::Continue { consumed: false };
        };

        if event.kind.is_up() {
            if event.timestamp_ms.saturating_sub(press.down_time_ms) > timeout_ms {
                return Step::Reset(ResetReason::TapTimeout);
            }

            let completed = completed + 1;
            if completed >= TAPS_REQUIRED {
                return Step::Trigger;
            }

            self.phase = Phase::Tapping { anchor, last_down_ms, completed, pressed: None };
            return Step::Continue { consumed: false };
        }

        if press.drift_to(event) > tolerance {
            return Step::Reset(ResetReason::Drift);
        }
        Step::Continue { consumed: false }
    }

    fn tick(&mut self, now_ms: u64, ctx: &Context<'_>) -> Step {
        match self.phase {
            Phase::Tapping { last_down_ms, .. }
                if now_ms.saturating_sub(last_down_ms) > millis(ctx.config.tap_timeout) =>
            {
                Step::Reset(ResetReason::TapTimeout)
            },
            _ => Step::Continue { consumed: false },
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle => GestureState::Idle,
            Phase::Tapping { .. } => GestureState::Pending,
        }
    }

    fn pending_step(&self) -> Option<PendingStep> {
        match self.phase {
            Phase::Idle => None,
            Phase::Tapping { completed, .. } => Some(PendingStep::Tapping { completed }),
        }
    }

    fn tracked_pointers(&self) -> Vec<PointerId> {
        match self.phase {
            Phase::Tapping { pressed: Some(press), .. } => vec![press.pointer_id],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{GestureConfig, GestureVariant},
        event::TouchKind,
        geometry::{Geometry, Rect},
    };

    fn send(tracker: &mut TripleTapTracker, kind: TouchKind, x: f32, t: u64) -> Step {
        let config = GestureConfig::for_screen(GestureVariant::TripleTapDebug, 1080, 1920);
        let geometry = Geometry::new(&config);
        let header_bounds = Rect::default;
        let ctx = Context { config: &config, geometry: &geometry, header_bounds: &header_bounds };
        tracker.handle(&TouchEvent::new(kind, 0, x, 100.0, t), &ctx)
    }

    #[test]
    fn counts_completed_taps() {
        let mut tracker = TripleTapTracker::default();

        send(&mut tracker, TouchKind::Down, 100.0, 0);
        assert_eq!(tracker.pending_step(), Some(PendingStep::Tapping { completed: 0 }));
        send(&mut tracker, TouchKind::Up, 100.0, 20);
        assert_eq!(tracker.pending_step(), Some(PendingStep::Tapping { completed: 1 }));
        send(&mut tracker, TouchKind::Down, 100.0, 100);
        send(&mut tracker, TouchKind::Up, 100.0, 120);
        send(&mut tracker, TouchKind::Down, 100.0, 200);

        assert_eq!(send(&mut tracker, TouchKind::Up, 100.0, 220), Step::Trigger);
    }

    #[test]
    fn distant_tap_restarts_count() {
        let mut tracker = TripleTapTracker::default();

        send(&mut tracker, TouchKind::Down, 100.0, 0);
        send(&mut tracker, TouchKind::Up, 100.0, 20);
        send(&mut tracker, TouchKind::Down, 400.0, 100);
        send(&mut tracker, TouchKind::Up, 400.0, 120);

        assert_eq!(tracker.pending_step(), Some(PendingStep::Tapping { completed: 1 }));
    }

    #[test]
    fn slow_tap_restarts_count() {
        let mut tracker = TripleTapTracker::default();

        send(&mut tracker, TouchKind::Down, 100.0, 0);
        send(&mut tracker, TouchKind::Up, 100.0, 20);
        send(&mut tracker, TouchKind::Down, 100.0, 601);
        send(&mut tracker, TouchKind::Up, 100.0, 620);

        assert_eq!(tracker.pending_step(), Some(PendingStep::Tapping { completed: 1 }));
    }

    #[test]
    fn long_press_is_not_a_tap() {
        let mut tracker = TripleTapTracker::default();

        send(&mut tracker, TouchKind::Down, 100.0, 0);
        assert_eq!(send(&mut tracker, TouchKind::Up, 100.0, 700), Step::Reset(ResetReason::TapTimeout));
    }
}
