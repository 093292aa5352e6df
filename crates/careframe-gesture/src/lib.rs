//! Exit-gesture recognition for Accessibility Mode.
//!
//! Accessibility Mode reduces the app to a single conversation for users who
//! need a simplified interface. Leaving that mode must be hard to do by
//! accident, so it is gated behind a deliberate touch gesture. This crate
//! interprets the raw pointer stream and reports when the configured gesture
//! completes.
//!
//! # Architecture
//!
//! Sans-IO: the [`Recognizer`] owns no threads or timers and never reads a
//! clock. The host forwards [`TouchEvent`]s with their timestamps, optionally
//! calls [`Recognizer::tick`], and receives [`GestureListener::on_triggered`]
//! exactly once per completed gesture. Thresholds and platform state come
//! from an injected [`GestureEnvironment`].
//!
//! # Variants
//!
//! - [`GestureVariant::OppositeCornersHold`]: two fingers in opposite corners
//! - [`GestureVariant::TwoFingerHeaderHold`]: two fingers on the header
//! - [`GestureVariant::SingleFingerEdgeDragHold`]: long-press, drag to an
//!   edge, hold (default)
//! - [`GestureVariant::TripleTapDebug`]: three quick taps
//!
//! # Example
//!
//! ```
//! use careframe_gesture::{
//!     DisplayMetrics, GestureSettings, GestureVariant, Recognizer, SettingsEnvironment, TouchKind,
//! };
//!
//! let settings = GestureSettings {
//!     exit_gesture_type: GestureVariant::TripleTapDebug.value(),
//!     ..GestureSettings::default()
//! };
//! let env = SettingsEnvironment::new(settings, DisplayMetrics::new(1.0, 1080, 1920));
//!
//! let mut exits = 0;
//! let mut recognizer = Recognizer::new(env, || exits += 1)?;
//! for tap in 0..3 {
//!     let t = tap * 100;
//!     recognizer.process(TouchKind::Down, 0, 100.0, 100.0, t);
//!     recognizer.process(TouchKind::Up, 0, 100.0, 100.0, t + 20);
//! }
//! drop(recognizer);
//!
//! assert_eq!(exits, 1);
//! # Ok::<(), careframe_gesture::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod geometry;
pub mod recognizer;

pub use config::{
    DEFAULT_CORNER_DP, DEFAULT_DRIFT_DP, DEFAULT_EDGE_DP, DEFAULT_HAPTIC_INTERVAL,
    DEFAULT_HOLD_DURATION, DEFAULT_LONG_PRESS_DURATION, DEFAULT_POINTER_PAIR_TIMEOUT,
    DEFAULT_TAP_TIMEOUT, DisplayMetrics, GestureConfig, GestureSettings, GestureVariant,
    MIN_PAIR_DISTANCE_RATIO,
};
pub use env::{GestureEnvironment, SettingsEnvironment, TouchExplorationFlag};
pub use error::ConfigError;
pub use event::{PointerId, PointerSample, TouchEvent, TouchKind};
pub use geometry::{Corner, Geometry, Point, Rect};
pub use recognizer::{GestureListener, GestureState, PendingStep, Recognizer, ResetReason};
