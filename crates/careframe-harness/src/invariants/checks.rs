//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific gestures.

use std::collections::BTreeSet;

use careframe_gesture::{GestureState, PendingStep, PointerId, TouchKind};

use super::{Invariant, InvariantResult, Violation};
use crate::trace::{Trace, TraceStep};

fn violation(invariant: &'static str, index: usize, step: &TraceStep, what: &str) -> Violation {
    Violation {
        invariant,
        message: format!(
            "event {index} ({:?} #{} at {}ms): {what}",
            step.event.kind, step.event.pointer_id, step.event.timestamp_ms
        ),
    }
}

/// At most one trigger per touch stream.
///
/// A stream starts at a [`TouchKind::Down`] and ends after the matching
/// [`TouchKind::Up`] or a [`TouchKind::Cancel`]. Pointers left on the surface
/// after a trigger must never complete the gesture a second time.
pub struct AtMostOneTriggerPerStream;

impl Invariant for AtMostOneTriggerPerStream {
    fn name(&self) -> &'static str {
        "at_most_one_trigger_per_stream"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let mut fired_in_stream = false;

        for (index, step) in trace.steps().iter().enumerate() {
            if step.event.kind == TouchKind::Down {
                fired_in_stream = false;
            }

            if step.triggered {
                if fired_in_stream {
                    return Err(violation(self.name(), index, step, "second trigger in one stream"));
                }
                fired_in_stream = true;
            }

            if matches!(step.event.kind, TouchKind::Up | TouchKind::Cancel) {
                fired_in_stream = false;
            }
        }
        Ok(())
    }
}

/// Touch exploration owns the input.
///
/// While exploration is active no event is consumed, nothing fires, and the
/// state does not change.
pub struct AccessibilityDeference;

impl Invariant for AccessibilityDeference {
    fn name(&self) -> &'static str {
        "accessibility_deference"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let mut previous = trace.initial_state();

        for (index, step) in trace.steps().iter().enumerate() {
            if step.exploration_active {
                if step.consumed {
                    return Err(violation(self.name(), index, step, "consumed during exploration"));
                }
                if step.triggered {
                    return Err(violation(self.name(), index, step, "fired during exploration"));
                }
                if step.state != previous {
                    return Err(violation(
                        self.name(),
                        index,
                        step,
                        &format!("state changed {previous:?} -> {:?} during exploration", step.state),
                    ));
                }
            }
            previous = step.state;
        }
        Ok(())
    }
}

/// Only a committed gesture hides touches from the UI.
///
/// An event may be consumed only if the recognizer is active afterwards,
/// is dragging a long-pressed pointer toward an edge, or the event completed
/// the gesture.
pub struct ConsumedOnlyWhenEngaged;

impl Invariant for ConsumedOnlyWhenEngaged {
    fn name(&self) -> &'static str {
        "consumed_only_when_engaged"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        for (index, step) in trace.steps().iter().enumerate() {
            let engaged = step.state == GestureState::Active
                || step.pending == Some(PendingStep::AwaitingEdge)
                || step.triggered;
            if step.consumed && !engaged {
                return Err(violation(
                    self.name(),
                    index,
                    step,
                    &format!("consumed while {:?}", step.state),
                ));
            }
        }
        Ok(())
    }
}

/// The gesture never fires with more pointers down than the variant uses.
///
/// Pointers are counted from the event stream itself: a
/// [`TouchKind::Down`] starts a fresh count, lifts remove their pointer, and
/// [`TouchKind::Up`] or [`TouchKind::Cancel`] empty the surface. A pointer
/// lifting on the triggering event still counts as down for that event.
/// Traces without a variant are held to the two-finger limit.
pub struct NoTriggerWithExtraPointers;

impl Invariant for NoTriggerWithExtraPointers {
    fn name(&self) -> &'static str {
        "no_trigger_with_extra_pointers"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        let limit = match trace.variant() {
            Some(variant) if !variant.is_two_finger() => 1,
            _ => 2,
        };
        let mut down: BTreeSet<PointerId> = BTreeSet::new();

        for (index, step) in trace.steps().iter().enumerate() {
            match step.event.kind {
                TouchKind::Down => {
                    down.clear();
                    down.insert(step.event.pointer_id);
                },
                TouchKind::PointerDown => {
                    down.insert(step.event.pointer_id);
                },
                _ => {},
            }

            if step.triggered && down.len() > limit {
                return Err(violation(
                    self.name(),
                    index,
                    step,
                    &format!("fired with {} pointers down (limit {limit})", down.len()),
                ));
            }

            match step.event.kind {
                TouchKind::PointerUp => {
                    down.remove(&step.event.pointer_id);
                },
                TouchKind::Up | TouchKind::Cancel => down.clear(),
                _ => {},
            }
        }
        Ok(())
    }
}

/// A platform cancel always returns the recognizer to idle.
pub struct IdleAfterCancel;

impl Invariant for IdleAfterCancel {
    fn name(&self) -> &'static str {
        "idle_after_cancel"
    }

    fn check(&self, trace: &Trace) -> InvariantResult {
        for (index, step) in trace.steps().iter().enumerate() {
            if step.event.kind != TouchKind::Cancel || step.exploration_active {
                continue;
            }
            if step.consumed || step.state != GestureState::Idle {
                return Err(violation(
                    self.name(),
                    index,
                    step,
                    &format!("cancel left state {:?} (consumed: {})", step.state, step.consumed),
                ));
            }
        }
        Ok(())
    }
}
