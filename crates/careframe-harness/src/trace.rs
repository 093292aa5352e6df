//! Replay of event streams with per-event observations.

use std::fmt::Write as _;

use careframe_gesture::{
    GestureEnvironment, GestureListener, GestureState, GestureVariant, PendingStep, Recognizer,
    TouchEvent,
};

/// What the recognizer reported for one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStep {
    /// The event fed to the recognizer.
    pub event: TouchEvent,
    /// Return value of `process_event`.
    pub consumed: bool,
    /// State after the event.
    pub state: GestureState,
    /// Pending detail after the event.
    pub pending: Option<PendingStep>,
    /// Whether this event completed the gesture.
    pub triggered: bool,
    /// Whether touch exploration was active when the event arrived.
    pub exploration_active: bool,
}

/// Ordered observations from one replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    initial: Option<GestureState>,
    variant: Option<GestureVariant>,
    steps: Vec<TraceStep>,
}

impl Trace {
    /// Trace assembled by hand from an idle start, e.g. to exercise an
    /// invariant.
    pub fn from_steps(steps: Vec<TraceStep>) -> Self {
        Self { initial: Some(GestureState::Idle), variant: None, steps }
    }

    /// Record which variant produced the trace.
    pub fn with_variant(mut self, variant: GestureVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Variant the recognizer was configured for. `None` for hand-built
    /// traces that did not say.
    pub fn variant(&self) -> Option<GestureVariant> {
        self.variant
    }

    /// State before the first event.
    pub fn initial_state(&self) -> GestureState {
        self.initial.unwrap_or(GestureState::Idle)
    }

    /// Every observation in delivery order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Number of events that completed the gesture.
    pub fn trigger_count(&self) -> usize {
        self.steps.iter().filter(|s| s.triggered).count()
    }

    /// State after the last event.
    pub fn final_state(&self) -> GestureState {
        self.steps.last().map_or(self.initial_state(), |s| s.state)
    }

    /// Human-readable list of state changes and triggers, one per line.
    ///
    /// Events that neither changed state nor fired are omitted, which keeps
    /// snapshots of long holds short.
    pub fn transitions(&self) -> String {
        let mut out = String::new();
        let mut previous = self.initial_state();

        for step in &self.steps {
            if step.state == previous && !step.triggered {
                continue;
            }
            previous = step.state;

            let suffix = if step.triggered { " triggered" } else { "" };
            let _ = writeln!(
                out,
                "{}ms {:?} #{} -> {:?}{suffix}",
                step.event.timestamp_ms, step.event.kind, step.event.pointer_id, step.state
            );
        }
        out
    }
}

/// Feed `events` to `recognizer` in order, recording each outcome.
pub fn replay<E, L>(recognizer: &mut Recognizer<E, L>, events: &[TouchEvent]) -> Trace
where
    E: GestureEnvironment,
    L: GestureListener,
{
    let mut trace = Trace {
        initial: Some(recognizer.state()),
        variant: Some(recognizer.config().variant),
        steps: Vec::with_capacity(events.len()),
    };

    for &event in events {
        let exploration_active = recognizer.env().is_touch_exploration_active();
        let triggers_before = recognizer.trigger_count();
        let consumed = recognizer.process_event(event);

        trace.steps.push(TraceStep {
            event,
            consumed,
            state: recognizer.state(),
            pending: recognizer.pending_step(),
            triggered: recognizer.trigger_count() > triggers_before,
            exploration_active,
        });
    }

    trace
}
