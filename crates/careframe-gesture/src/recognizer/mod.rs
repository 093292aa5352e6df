//! Exit-gesture recognition state machine.
//!
//! The host forwards every raw pointer event to [`Recognizer::process_event`].
//! The recognizer classifies the stream against the configured
//! [`GestureVariant`] and calls [`GestureListener::on_triggered`] exactly
//! once when the variant completes, then drops straight back to idle.
//!
//! # State Machine
//!
//! ```text
//! ┌──────┐ first down ┌─────────┐  validated   ┌────────┐ hold elapsed ┌───────────┐
//! │ Idle │───────────>│ Pending │─────────────>│ Active │─────────────>│ Triggered │
//! └──────┘            └─────────┘              └────────┘              └───────────┘
//!    ^                     │                        │                        │
//!    │   up / drift / extra pointer / cancel /      │                        │
//!    └──────────────────── timeout ─────────────────┘<───── immediately ─────┘
//! ```
//!
//! Timing is evaluated lazily from event timestamps. Hosts that can deliver
//! a periodic callback may call [`Recognizer::tick`] so a perfectly still
//! hold completes without waiting for the next move.

mod edge_drag;
mod pair;
mod triple_tap;

use std::{collections::BTreeSet, time::Duration};

use tracing::{debug, info, warn};

use crate::{
    config::{GestureConfig, GestureVariant, millis},
    env::GestureEnvironment,
    error::ConfigError,
    event::{PointerId, TouchEvent, TouchKind},
    geometry::{Geometry, Rect},
};

/// Coarse recognizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    /// Nothing tracked.
    Idle,
    /// First contact recorded, variant-specific condition outstanding.
    Pending,
    /// Gesture validated, hold in progress.
    Active,
}

/// What a [`GestureState::Pending`] recognizer is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingStep {
    /// First pointer down, waiting for its partner.
    AwaitingSecondPointer,
    /// Single pointer down, waiting for the long-press threshold.
    AwaitingLongPress,
    /// Long-press reached, waiting for the pointer to reach an edge.
    AwaitingEdge,
    /// Counting taps.
    Tapping {
        /// Taps completed so far.
        completed: u8,
    },
}

/// Why the last attempt was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Platform cancelled the stream.
    Cancelled,
    /// Host called [`Recognizer::reset`].
    Requested,
    /// A tracked pointer lifted before completion.
    PointerLifted,
    /// A tracked pointer moved beyond the drift tolerance.
    Drift,
    /// More pointers than the variant allows.
    ExtraPointer,
    /// Second pointer landed outside the required region.
    InvalidPairing,
    /// Edge-held pointer left the edge band.
    LeftEdge,
    /// Tap window or tap press length exceeded.
    TapTimeout,
    /// A new stream began while the previous one was still tracked.
    StreamRestarted,
    /// First pointer was left alone past the pairing window.
    PairingTimeout,
}

/// Receives recognizer notifications.
///
/// Any `FnMut()` closure is a listener that only cares about the trigger.
pub trait GestureListener {
    /// The exit gesture completed. Called at most once per gesture sequence.
    fn on_triggered(&mut self);

    /// Periodic acknowledgement while a hold is in progress.
    ///
    /// Purely informational (e.g. haptics); the recognizer does not depend
    /// on anything happening here.
    fn on_hold_feedback(&mut self, held: Duration) {
        let _ = held;
    }
}

impl<F: FnMut()> GestureListener for F {
    fn on_triggered(&mut self) {
        self();
    }
}

/// Outcome of feeding one event (or tick) to a variant tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Step {
    /// Attempt continues (or nothing is tracked).
    Continue {
        /// Whether the host UI should skip this event.
        consumed: bool,
    },
    /// Hold continues and a feedback pulse is due.
    Feedback {
        /// Time held so far.
        held: Duration,
    },
    /// Attempt failed.
    Reset(ResetReason),
    /// Gesture complete.
    Trigger,
}

/// Read-only inputs shared by all trackers for one event.
pub(crate) struct Context<'a> {
    pub(crate) config: &'a GestureConfig,
    pub(crate) geometry: &'a Geometry,
    pub(crate) header_bounds: &'a dyn Fn() -> Rect,
}

/// Hold progress for one validated attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HoldTimer {
    since_ms: u64,
    last_feedback_ms: u64,
}

impl HoldTimer {
    pub(crate) fn start(now_ms: u64) -> Self {
        Self { since_ms: now_ms, last_feedback_ms: now_ms }
    }

    /// Complete, pulse, or keep holding.
    pub(crate) fn advance(&mut self, now_ms: u64, config: &GestureConfig) -> Step {
        let held = now_ms.saturating_sub(self.since_ms);
        if held >= millis(config.hold_duration) {
            return Step::Trigger;
        }

        if now_ms.saturating_sub(self.last_feedback_ms) >= millis(config.haptic_interval) {
            self.last_feedback_ms = now_ms;
            return Step::Feedback { held: Duration::from_millis(held) };
        }

        Step::Continue { consumed: true }
    }
}

/// Per-variant interpretation of the event stream.
pub(crate) trait Track: std::fmt::Debug {
    /// Interpret one non-cancel event.
    fn handle(&mut self, event: &TouchEvent, ctx: &Context<'_>) -> Step;

    /// Re-evaluate timing without a new event.
    fn tick(&mut self, now_ms: u64, ctx: &Context<'_>) -> Step;

    /// Forget the current attempt.
    fn reset(&mut self);

    /// Coarse state.
    fn state(&self) -> GestureState;

    /// Detail of the pending state. `None` unless pending.
    fn pending_step(&self) -> Option<PendingStep>;

    /// Pointers currently tracked as down.
    fn tracked_pointers(&self) -> Vec<PointerId>;
}

fn tracker_for(variant: GestureVariant) -> Box<dyn Track> {
    match variant {
        GestureVariant::OppositeCornersHold => {
            Box::new(pair::PairTracker::new(pair::PairRegion::OppositeCorners))
        },
        GestureVariant::TwoFingerHeaderHold => {
            Box::new(pair::PairTracker::new(pair::PairRegion::Header))
        },
        GestureVariant::SingleFingerEdgeDragHold => Box::new(edge_drag::EdgeDragTracker::default()),
        GestureVariant::TripleTapDebug => Box::new(triple_tap::TripleTapTracker::default()),
    }
}

fn load_config<E: GestureEnvironment>(env: &E) -> Result<GestureConfig, ConfigError> {
    let config = env.gesture_config()?;
    config.validate()?;

    if config.variant == GestureVariant::TwoFingerHeaderHold {
        let header = env.header_bounds();
        if header.is_empty() {
            return Err(ConfigError::EmptyHeaderRegion(header));
        }
    }

    Ok(config)
}

/// Exit-gesture recognizer bound to one input surface.
///
/// Pure state machine: no threads, no timers, no I/O. Every method completes
/// without blocking. Mutating methods take `&mut self`, so concurrent use
/// from several threads cannot compile.
pub struct Recognizer<E, L> {
    env: E,
    listener: L,
    config: GestureConfig,
    geometry: Geometry,
    tracker: Box<dyn Track>,
    /// Every pointer currently down in this stream, tracked or not.
    on_surface: BTreeSet<PointerId>,
    /// Set after a trigger until the triggering stream ends.
    awaiting_release: bool,
    last_reset: Option<ResetReason>,
    trigger_count: u64,
}

impl<E, L> Recognizer<E, L>
where
    E: GestureEnvironment,
    L: GestureListener,
{
    /// Create an idle recognizer from the environment's configuration.
    ///
    /// # Errors
    ///
    /// - Any `ConfigError` from the environment or validation
    /// - `ConfigError::EmptyHeaderRegion` if the header variant is selected
    ///   and the header region has no area
    pub fn new(env: E, listener: L) -> Result<Self, ConfigError> {
        let config = load_config(&env)?;
        let geometry = Geometry::new(&config);
        let tracker = tracker_for(config.variant);

        debug!(variant = ?config.variant, "exit gesture recognizer ready");

        Ok(Self {
            env,
            listener,
            config,
            geometry,
            tracker,
            on_surface: BTreeSet::new(),
            awaiting_release: false,
            last_reset: None,
            trigger_count: 0,
        })
    }

    /// Process one event given as its parts.
    ///
    /// See [`Recognizer::process_event`].
    pub fn process(
        &mut self,
        kind: TouchKind,
        pointer_id: PointerId,
        x: f32,
        y: f32,
        timestamp_ms: u64,
    ) -> bool {
        self.process_event(TouchEvent::new(kind, pointer_id, x, y, timestamp_ms))
    }

    /// Process one pointer event.
    ///
    /// Returns `true` if the event belongs to a gesture being validated and
    /// the host UI should not also react to it. Never fails: events that do
    /// not fit the current attempt are ignored or reset it.
    ///
    /// While touch exploration is active every event is passed through
    /// untouched and the recognizer stays idle.
    ///
    /// A down that leaves more pointers on the surface than the variant
    /// uses abandons the attempt, even if earlier pointers were never part
    /// of it.
    pub fn process_event(&mut self, event: TouchEvent) -> bool {
        self.track_surface(&event);

        if self.env.is_touch_exploration_active() {
            return false;
        }

        if self.awaiting_release {
            match event.kind {
                TouchKind::Down => self.awaiting_release = false,
                TouchKind::Up | TouchKind::Cancel => {
                    self.awaiting_release = false;
                    return false;
                },
                _ => return false,
            }
        }

        if event.kind == TouchKind::Cancel {
            self.reset_with(ResetReason::Cancelled);
            return false;
        }

        if event.kind == TouchKind::Down && !self.tracker.tracked_pointers().is_empty() {
            self.reset_with(ResetReason::StreamRestarted);
        }

        if event.kind.is_down() && self.on_surface.len() > self.max_pointers() {
            debug!(on_surface = self.on_surface.len(), "too many pointers for exit gesture");
            self.reset_with(ResetReason::ExtraPointer);
            return false;
        }

        let before = self.tracker.state();
        let step = self.drive(|tracker, ctx| tracker.handle(&event, ctx));
        let consumed = self.apply(step, event.kind == TouchKind::Up);
        self.log_transition(before, event.timestamp_ms);

        consumed
    }

    /// Re-evaluate timeouts and hold completion at `now_ms`.
    ///
    /// Optional: lets a perfectly still hold complete even when the platform
    /// delivers no move events. Returns `true` if the gesture fired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.awaiting_release || self.env.is_touch_exploration_active() {
            return false;
        }

        let before = self.tracker.state();
        let step = self.drive(|tracker, ctx| tracker.tick(now_ms, ctx));
        let triggered = step == Step::Trigger;
        self.apply(step, false);
        self.log_transition(before, now_ms);

        triggered
    }

    /// Abandon any attempt in progress.
    pub fn reset(&mut self) {
        self.awaiting_release = false;
        self.on_surface.clear();
        self.reset_with(ResetReason::Requested);
    }

    /// Re-read configuration from the environment.
    ///
    /// Only allowed while idle so thresholds never change mid-gesture. On
    /// error the previous configuration stays in effect.
    ///
    /// # Errors
    ///
    /// - `ConfigError::GestureInProgress` if an attempt is being tracked
    /// - Any error from the environment or validation
    pub fn reload_config(&mut self) -> Result<(), ConfigError> {
        if self.tracker.state() != GestureState::Idle {
            warn!(state = ?self.tracker.state(), "configuration reload refused");
            return Err(ConfigError::GestureInProgress);
        }

        let config = load_config(&self.env)
            .inspect_err(|err| warn!(%err, "configuration reload failed"))?;

        if config.variant != self.config.variant {
            self.tracker = tracker_for(config.variant);
        }
        self.geometry = Geometry::new(&config);
        self.config = config;

        debug!(variant = ?self.config.variant, "configuration reloaded");
        Ok(())
    }

    /// Current coarse state.
    pub fn state(&self) -> GestureState {
        self.tracker.state()
    }

    /// What a pending recognizer is waiting for. `None` unless pending.
    pub fn pending_step(&self) -> Option<PendingStep> {
        self.tracker.pending_step()
    }

    /// Pointers tracked by the current attempt.
    pub fn tracked_pointers(&self) -> Vec<PointerId> {
        self.tracker.tracked_pointers()
    }

    /// Number of pointers currently down, including ones no attempt tracks.
    pub fn pointers_on_surface(&self) -> usize {
        self.on_surface.len()
    }

    /// Why the most recent attempt was abandoned. `None` if none was.
    pub fn last_reset(&self) -> Option<ResetReason> {
        self.last_reset
    }

    /// Number of times the gesture has fired.
    pub fn trigger_count(&self) -> u64 {
        self.trigger_count
    }

    /// Active configuration snapshot.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Geometry derived from the active configuration.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Mutable access to the environment, e.g. to move the header region.
    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// The listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Mutable access to the listener.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    fn max_pointers(&self) -> usize {
        if self.config.variant.is_two_finger() { 2 } else { 1 }
    }

    fn track_surface(&mut self, event: &TouchEvent) {
        match event.kind {
            TouchKind::Down => {
                self.on_surface.clear();
                self.on_surface.insert(event.pointer_id);
            },
            TouchKind::PointerDown => {
                self.on_surface.insert(event.pointer_id);
            },
            TouchKind::PointerUp => {
                self.on_surface.remove(&event.pointer_id);
            },
            TouchKind::Up | TouchKind::Cancel => self.on_surface.clear(),
            TouchKind::Move => {},
        }
    }

    fn drive(&mut self, f: impl FnOnce(&mut dyn Track, &Context<'_>) -> Step) -> Step {
        let env = &self.env;
        let header_bounds = || env.header_bounds();
        let ctx =
            Context { config: &self.config, geometry: &self.geometry, header_bounds: &header_bounds };

        f(self.tracker.as_mut(), &ctx)
    }

    fn apply(&mut self, step: Step, ends_stream: bool) -> bool {
        match step {
            Step::Continue { consumed } => consumed,
            Step::Feedback { held } => {
                self.listener.on_hold_feedback(held);
                true
            },
            Step::Reset(reason) => {
                self.reset_with(reason);
                false
            },
            Step::Trigger => {
                self.fire(ends_stream);
                true
            },
        }
    }

    fn fire(&mut self, ends_stream: bool) {
        self.trigger_count += 1;
        info!(variant = ?self.config.variant, "exit gesture triggered");
        self.listener.on_triggered();

        // Residual events from the triggering stream must not start over.
        self.tracker.reset();
        self.awaiting_release = !ends_stream;
    }

    fn reset_with(&mut self, reason: ResetReason) {
        if self.tracker.state() != GestureState::Idle {
            debug!(?reason, "gesture reset");
            self.last_reset = Some(reason);
        }
        self.tracker.reset();
    }

    fn log_transition(&self, before: GestureState, now_ms: u64) {
        let after = self.tracker.state();
        if before != after {
            debug!(from = ?before, to = ?after, now_ms, "gesture state changed");
        }
    }
}
