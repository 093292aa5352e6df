//! Invariant checking for gesture replays.
//!
//! Invariants are properties that must hold for every event stream, however
//! malformed. Unlike scenario tests that check one gesture, invariants are
//! run against replays of arbitrary streams.
//!
//! # Usage
//!
//! ```
//! use careframe_gesture::GestureVariant;
//! use careframe_harness::{GestureDriver, InvariantRegistry, TouchScript};
//!
//! let mut driver = GestureDriver::for_variant(GestureVariant::OppositeCornersHold)?;
//! let events = TouchScript::new().down(0, 10.0, 10.0).cancel().build();
//! let trace = driver.run(&events);
//!
//! assert!(InvariantRegistry::standard().check_all(&trace).is_ok());
//! # Ok::<(), careframe_gesture::ConfigError>(())
//! ```

mod checks;

pub use checks::{
    AccessibilityDeference, AtMostOneTriggerPerStream, ConsumedOnlyWhenEngaged, IdleAfterCancel,
    NoTriggerWithExtraPointers,
};

use crate::trace::Trace;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property checked against a replayed trace.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against `trace`.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing the first offending event.
    fn check(&self, trace: &Trace) -> InvariantResult;
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the recognizer's core guarantees.
    ///
    /// Includes:
    /// - [`AtMostOneTriggerPerStream`]: one exit per touch stream
    /// - [`AccessibilityDeference`]: exploration passes everything through
    /// - [`ConsumedOnlyWhenEngaged`]: ordinary touches reach the UI
    /// - [`IdleAfterCancel`]: cancel always returns to idle
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(AtMostOneTriggerPerStream);
        registry.add(AccessibilityDeference);
        registry.add(ConsumedOnlyWhenEngaged);
        registry.add(IdleAfterCancel);
        registry.add(NoTriggerWithExtraPointers);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against `trace`.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, trace: &Trace) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(trace).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "Test-only fail-fast helper")]
    pub fn assert_all(&self, trace: &Trace, context: &str) {
        if let Err(violations) = self.check_all(trace) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
