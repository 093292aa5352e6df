//! Single-finger edge drag hold.
//!
//! Press and hold in place past the long-press threshold, drag to any screen
//! edge without lifting, then hold against that edge. The hold anchor is the
//! position where the edge was reached; leaving the edge abandons the
//! attempt and the pointer stays untracked until it lifts.

use super::{Context, GestureState, HoldTimer, PendingStep, ResetReason, Step, Track};
use crate::{
    config::millis,
    event::{PointerId, PointerSample, TouchEvent},
    geometry::Point,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Phase {
    #[default]
    Idle,
    Pressed { pointer: PointerSample, last: Point },
    Dragging { pointer_id: PointerId },
    Holding { pointer_id: PointerId, anchor: Point, timer: HoldTimer },
}

#[derive(Debug, Default)]
pub(crate) struct EdgeDragTracker {
    phase: Phase,
}

impl EdgeDragTracker {
    /// Long-press reached at `position`: start holding if already at an edge.
    fn promote(&mut self, pointer_id: PointerId, position: Point, now_ms: u64, ctx: &Context<'_>) {
        self.phase = Phase::Dragging { pointer_id };
        self.arrive(pointer_id, position, now_ms, ctx);
    }

    fn arrive(&mut self, pointer_id: PointerId, position: Point, now_ms: u64, ctx: &Context<'_>) {
        if ctx.geometry.is_at_edge(position) {
            self.phase =
                Phase::Holding { pointer_id, anchor: position, timer: HoldTimer::start(now_ms) };
        }
    }

    /// Once the long press is recognised the drag belongs to the gesture.
    fn consumed(&self) -> Step {
        Step::Continue {
            consumed: matches!(self.phase, Phase::Dragging { .. } | Phase::Holding { .. }),
        }
    }

    fn on_move(&mut self, event: &TouchEvent, ctx: &Context<'_>) -> Step {
        let position = event.position();

        match self.phase {
            Phase::Pressed { pointer, .. } => {
                let pressed_ms = event.timestamp_ms.saturating_sub(pointer.down_time_ms);
                if pressed_ms >= millis(ctx.config.long_press_duration) {
                    self.promote(pointer.pointer_id, position, event.timestamp_ms, ctx);
                } else if pointer.drift_to(event) > ctx.config.drift_tolerance_px {
                    return Step::Reset(ResetReason::Drift);
                } else {
                    self.phase = Phase::Pressed { pointer, last: position };
                }
                self.consumed()
            },
            Phase::Dragging { pointer_id } => {
                self.arrive(pointer_id, position, event.timestamp_ms, ctx);
                self.consumed()
            },
            Phase::Holding { pointer_id, anchor, mut timer } => {
                if !ctx.geometry.is_at_edge(position) {
                    return Step::Reset(ResetReason::LeftEdge);
                }
                if anchor.distance_to(position) > ctx.config.drift_tolerance_px {
                    return Step::Reset(ResetReason::Drift);
                }

                let step = timer.advance(event.timestamp_ms, ctx.config);
                self.phase = Phase::Holding { pointer_id, anchor, timer };
                step
            },
            Phase::Idle => Step::Continue { consumed: false },
        }
    }

    fn tracked(&self) -> Option<PointerId> {
        match self.phase {
            Phase::Idle => None,
            Phase::Pressed { pointer, .. } => Some(pointer.pointer_id),
            Phase::Dragging { pointer_id } | Phase::Holding { pointer_id, .. } => Some(pointer_id),
        }
    }
}

impl Track for EdgeDragTracker {
    fn handle(&mut self, event: &TouchEvent, ctx: &Context<'_>) -> Step {
        let tracked = self.tracked();

        if event.kind.is_down() {
            if tracked.is_some() {
                return Step::Reset(ResetReason::ExtraPointer);
            }
            let pointer = PointerSample::from_event(event);
            self.phase = Phase::Pressed { pointer, last: pointer.position() };
            return Step::Continue { consumed: false };
        }

        if tracked != Some(event.pointer_id) {
            return self.consumed();
        }

        if event.kind.is_up() {
            return Step::Reset(ResetReason::PointerLifted);
        }

        self.on_move(event, ctx)
    }

    fn tick(&mut self, now_ms: u64, ctx: &Context<'_>) -> Step {
        match self.phase {
            Phase::Pressed { pointer, last } => {
                let pressed_ms = now_ms.saturating_sub(pointer.down_time_ms);
                if pressed_ms >= millis(ctx.config.long_press_duration) {
                    self.promote(pointer.pointer_id, last, now_ms, ctx);
                }
                self.consumed()
            },
            Phase::Holding { pointer_id, anchor, mut timer } => {
                let step = timer.advance(now_ms, ctx.config);
                self.phase = Phase::Holding { pointer_id, anchor, timer };
                step
            },
            Phase::Idle | Phase::Dragging { .. } => self.consumed(),
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle => GestureState::Idle,
            Phase::Pressed { .. } | Phase::Dragging { .. } => GestureState::Pending,
            Phase::Holding { .. } => GestureState::Active,
        }
    }

    fn pending_step(&self) -> Option<PendingStep> {
        match self.phase {
            Phase::Pressed { .. } => Some(PendingStep::AwaitingLongPress),
            Phase::Dragging { .. } => Some(PendingStep::AwaitingEdge),
            Phase::Idle | Phase::Holding { .. } => None,
        }
    }

    fn tracked_pointers(&self) -> Vec<PointerId> {
        self.tracked().into_iter().collect()
    }
}
