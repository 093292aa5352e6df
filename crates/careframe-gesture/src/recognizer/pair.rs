//! Two-pointer hold variants.
//!
//! Both variants share one shape: a first pointer lands, a second lands
//! within the pairing window, the pair is checked against a region, then
//! both pointers hold still for the hold duration. Only the region check
//! differs.

use tracing::debug;

use super::{Context, GestureState, HoldTimer, PendingStep, ResetReason, Step, Track};
use crate::{
    config::millis,
    event::{PointerId, PointerSample, TouchEvent, TouchKind},
};

/// Where a valid pair must land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairRegion {
    /// Top-left and bottom-right corners, far enough apart.
    OppositeCorners,
    /// Both inside the host's header region.
    Header,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    AwaitingSecond { first: PointerSample },
    Holding { first: PointerSample, second: PointerSample, timer: HoldTimer },
}

#[derive(Debug)]
pub(crate) struct PairTracker {
    region: PairRegion,
    phase: Phase,
}

impl PairTracker {
    pub(crate) fn new(region: PairRegion) -> Self {
        Self { region, phase: Phase::Idle }
    }

    fn is_valid_pair(&self, a: &PointerSample, b: &PointerSample, ctx: &Context<'_>) -> bool {
        match self.region {
            PairRegion::OppositeCorners => {
                ctx.geometry.is_opposite_corner_pair(a.position(), b.position())
            },
            PairRegion::Header => {
                let header = (ctx.header_bounds)();
                header.contains(a.position()) && header.contains(b.position())
            },
        }
    }

    /// The first pointer has waited longer than the pairing window allows.
    fn pairing_expired(first: &PointerSample, now_ms: u64, ctx: &Context<'_>) -> bool {
        now_ms.saturating_sub(first.down_time_ms) > millis(ctx.config.pointer_pair_timeout)
    }

    fn on_second_down(
        &mut self,
        first: PointerSample,
        event: &TouchEvent,
        ctx: &Context<'_>,
    ) -> Step {
        let second = PointerSample::from_event(event);
        let gap_ms = second.down_time_ms.saturating_sub(first.down_time_ms);

        // A repeated down for the same id, or a partner that arrived too
        // late, starts a fresh attempt from the newest contact.
        if second.pointer_id == first.pointer_id || gap_ms > millis(ctx.config.pointer_pair_timeout)
        {
            debug!(gap_ms, "second pointer outside pairing window");
            self.phase = Phase::AwaitingSecond { first: second };
            return Step::Continue { consumed: false };
        }

        if !self.is_valid_pair(&first, &second, ctx) {
            return Step::Reset(ResetReason::InvalidPairing);
        }

        self.phase =
            Phase::Holding { first, second, timer: HoldTimer::start(event.timestamp_ms) };
        Step::Continue { consumed: true }
    }
}

impl Track for PairTracker {
    fn handle(&mut self, event: &TouchEvent, ctx: &Context<'_>) -> Step {
        let tolerance = ctx.config.drift_tolerance_px;

        match (self.phase, event.kind) {
            (Phase::Idle, kind) if kind.is_down() => {
                self.phase = Phase::AwaitingSecond { first: PointerSample::from_event(event) };
                Step::Continue { consumed: false }
            },
            (Phase::Idle, _) => Step::Continue { consumed: false },

            (Phase::AwaitingSecond { first }, kind) if kind.is_down() => {
                self.on_second_down(first, event, ctx)
            },
            (Phase::AwaitingSecond { first }, TouchKind::Move) => {
                if event.pointer_id != first.pointer_id {
                    Step::Continue { consumed: false }
                } else if Self::pairing_expired(&first, event.timestamp_ms, ctx) {
                    Step::Reset(ResetReason::PairingTimeout)
                } else if first.drift_to(event) > tolerance {
                    Step::Reset(ResetReason::Drift)
                } else {
                    Step::Continue { consumed: false }
                }
            },
            (Phase::AwaitingSecond { first }, _) => {
                if event.pointer_id == first.pointer_id {
                    Step::Reset(ResetReason::PointerLifted)
                } else {
                    Step::Continue { consumed: false }
                }
            },

            (Phase::Holding { .. }, kind) if kind.is_down() => {
                Step::Reset(ResetReason::ExtraPointer)
            },
            (Phase::Holding { first, second, mut timer }, TouchKind::Move) => {
                let anchor = [first, second].into_iter().find(|p| p.pointer_id == event.pointer_id);
                if anchor.is_some_and(|anchor| anchor.drift_to(event) > tolerance) {
                    return Step::Reset(ResetReason::Drift);
                }

                let step = timer.advance(event.timestamp_ms, ctx.config);
                self.phase = Phase::Holding { first, second, timer };
                step
            },
            (Phase::Holding { first, second, .. }, _) => {
                if event.pointer_id == first.pointer_id || event.pointer_id == second.pointer_id {
                    Step::Reset(ResetReason::PointerLifted)
                } else {
                    Step::Continue { consumed: true }
                }
            },
        }
    }

    fn tick(&mut self, now_ms: u64, ctx: &Context<'_>) -> Step {
        match &mut self.phase {
            Phase::Holding { timer, .. } => timer.advance(now_ms, ctx.config),
            Phase::AwaitingSecond { first } if Self::pairing_expired(first, now_ms, ctx) => {
                Step::Reset(ResetReason::PairingTimeout)
            },
            Phase::Idle | Phase::AwaitingSecond { .. } => Step::Continue { consumed: false },
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
    }

    fn state(&self) -> GestureState {
        match self.phase {
            Phase::Idle => GestureState::Idle,
            Phase::AwaitingSecond { .. } => GestureState::Pending,
            Phase::Holding { .. } => GestureState::Active,
        }
    }

    fn pending_step(&self) -> Option<PendingStep> {
        match self.phase {
            Phase::AwaitingSecond { .. } => Some(PendingStep::AwaitingSecondPointer),
            Phase::Idle | Phase::Holding { .. } => None,
        }
    }

    fn tracked_pointers(&self) -> Vec<PointerId> {
        match self.phase {
            Phase::Idle => Vec::new(),
            Phase::AwaitingSecond { first } => vec![first.pointer_id],
            Phase::Holding { first, second, .. } => vec![first.pointer_id, second.pointer_id],
        }
    }
}
