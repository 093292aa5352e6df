//! Deterministic test harness for the exit-gesture recognizer.
//!
//! Virtual-clock touch scripting and replay for reproducible gesture tests.
//! Nothing here reads a real clock: every event carries the timestamp the
//! script assigned it.
//!
//! # Scripting
//!
//! [`TouchScript`] builds event streams the way a finger would produce them.
//! Down/up kinds are chosen from the set of pointers currently on the
//! surface, so scripts read as "finger 0 down, finger 1 down, hold".
//!
//! # Invariant Testing
//!
//! The `invariants` module checks behavioral properties of a replayed
//! [`Trace`]. Invariants verify WHAT must be true across all event streams,
//! not specific scenarios. Use [`InvariantRegistry::standard()`] for the
//! recognizer's core guarantees.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod driver;
pub mod invariants;
pub mod recorder;
pub mod script;
pub mod sim_env;
pub mod trace;

pub use driver::GestureDriver;
pub use invariants::{
    AccessibilityDeference, AtMostOneTriggerPerStream, ConsumedOnlyWhenEngaged, IdleAfterCancel,
    Invariant, InvariantRegistry, InvariantResult, NoTriggerWithExtraPointers, Violation,
};
pub use recorder::Recorder;
pub use script::TouchScript;
pub use sim_env::SimEnv;
pub use trace::{Trace, TraceStep, replay};
