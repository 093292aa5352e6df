//! Platform-agnostic touch input.
//!
//! Decouples gesture recognition from the host toolkit's motion events. The
//! host translates each raw pointer action into a [`TouchEvent`] and forwards
//! it to the recognizer in delivery order.

use crate::geometry::Point;

/// Stable identifier of one contact for the duration of that contact.
pub type PointerId = i32;

/// Kind of pointer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchKind {
    /// First pointer of a stream touched the surface.
    Down,
    /// An additional pointer touched while others are still down.
    PointerDown,
    /// A pointer moved.
    Move,
    /// Last pointer of a stream left the surface.
    Up,
    /// A pointer left while others are still down.
    PointerUp,
    /// The stream was aborted by the platform.
    Cancel,
}

impl TouchKind {
    /// True for [`TouchKind::Down`] and [`TouchKind::PointerDown`].
    pub fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::PointerDown)
    }

    /// True for [`TouchKind::Up`] and [`TouchKind::PointerUp`].
    pub fn is_up(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp)
    }
}

/// One pointer action delivered by the host surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    /// Action kind.
    pub kind: TouchKind,
    /// Pointer the action applies to.
    pub pointer_id: PointerId,
    /// Horizontal position in surface pixels.
    pub x: f32,
    /// Vertical position in surface pixels.
    pub y: f32,
    /// Event time in milliseconds. Non-decreasing within a stream.
    pub timestamp_ms: u64,
}

impl TouchEvent {
    /// Create an event.
    pub const fn new(kind: TouchKind, pointer_id: PointerId, x: f32, y: f32, timestamp_ms: u64) -> Self {
        Self { kind, pointer_id, x, y, timestamp_ms }
    }

    /// Position of the pointer.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Pointer state captured at the moment of contact.
///
/// Drift is always measured against this sample, never the previous move,
/// so resampling noise cannot accumulate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer the sample belongs to.
    pub pointer_id: PointerId,
    /// Horizontal contact position.
    pub x: f32,
    /// Vertical contact position.
    pub y: f32,
    /// Contact time in milliseconds.
    pub down_time_ms: u64,
}

impl PointerSample {
    /// Capture a sample from a down event.
    pub fn from_event(event: &TouchEvent) -> Self {
        Self { pointer_id: event.pointer_id, x: event.x, y: event.y, down_time_ms: event.timestamp_ms }
    }

    /// Contact position.
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Distance between the contact position and `event`'s position.
    pub fn drift_to(&self, event: &TouchEvent) -> f32 {
        self.position().distance_to(event.position())
    }
}
