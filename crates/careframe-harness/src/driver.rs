//! Recognizer driver with optional invariant checking.

use careframe_gesture::{ConfigError, GestureVariant, Recognizer, TouchEvent};
use tracing::debug;

use crate::{
    invariants::InvariantRegistry,
    recorder::Recorder,
    sim_env::SimEnv,
    trace::{Trace, replay},
};

/// Owns a recognizer over a [`SimEnv`] and replays scripts through it.
pub struct GestureDriver {
    recognizer: Recognizer<SimEnv, Recorder>,
    invariants: Option<InvariantRegistry>,
}

impl GestureDriver {
    /// Create a driver over `env`.
    ///
    /// # Errors
    ///
    /// Any `ConfigError` from recognizer construction.
    pub fn new(env: SimEnv) -> Result<Self, ConfigError> {
        Ok(Self { recognizer: Recognizer::new(env, Recorder::default())?, invariants: None })
    }

    /// Driver over a phone-sized [`SimEnv`] for `variant`.
    ///
    /// # Errors
    ///
    /// Any `ConfigError` from recognizer construction.
    pub fn for_variant(variant: GestureVariant) -> Result<Self, ConfigError> {
        Self::new(SimEnv::for_variant(variant))
    }

    /// Enable invariant checking after every replay.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Replay `events`, then check invariants if enabled.
    pub fn run(&mut self, events: &[TouchEvent]) -> Trace {
        let trace = replay(&mut self.recognizer, events);
        debug!(events = events.len(), triggers = trace.trigger_count(), "replayed script");

        if let Some(ref registry) = self.invariants {
            registry.assert_all(&trace, "after replay");
        }
        trace
    }

    /// Forward a tick. Returns `true` if the gesture fired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.recognizer.tick(now_ms)
    }

    /// The recognizer under test.
    pub fn recognizer(&self) -> &Recognizer<SimEnv, Recorder> {
        &self.recognizer
    }

    /// Mutable access to the recognizer under test.
    pub fn recognizer_mut(&mut self) -> &mut Recognizer<SimEnv, Recorder> {
        &mut self.recognizer
    }

    /// Notifications received so far.
    pub fn recorder(&self) -> &Recorder {
        self.recognizer.listener()
    }
}
