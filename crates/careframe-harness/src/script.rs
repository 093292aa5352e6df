//! Virtual-clock touch scripting.
//!
//! A [`TouchScript`] tracks which pointers are on the surface and where, and
//! emits the event kinds a platform would: the first contact is a
//! [`TouchKind::Down`], later ones are [`TouchKind::PointerDown`], and the
//! last lift is a [`TouchKind::Up`].

use std::collections::BTreeMap;

use careframe_gesture::{Point, PointerId, TouchEvent, TouchKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Builder for a timed touch event stream.
#[derive(Debug, Clone, Default)]
pub struct TouchScript {
    now_ms: u64,
    events: Vec<TouchEvent>,
    active: BTreeMap<PointerId, Point>,
}

impl TouchScript {
    /// Empty script starting at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty script starting at `now_ms`.
    pub fn starting_at(now_ms: u64) -> Self {
        Self { now_ms, ..Self::default() }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[TouchEvent] {
        &self.events
    }

    /// Finish the script.
    pub fn build(self) -> Vec<TouchEvent> {
        self.events
    }

    /// Advance the virtual clock without emitting anything.
    #[must_use]
    pub fn advance(mut self, ms: u64) -> Self {
        self.now_ms += ms;
        self
    }

    /// Put pointer `id` down at `(x, y)`.
    #[must_use]
    pub fn down(mut self, id: PointerId, x: f32, y: f32) -> Self {
        let kind = if self.active.is_empty() { TouchKind::Down } else { TouchKind::PointerDown };
        self.active.insert(id, Point::new(x, y));
        self.emit(kind, id, Point::new(x, y))
    }

    /// Move pointer `id` to `(x, y)` at the current time.
    #[must_use]
    pub fn move_to(mut self, id: PointerId, x: f32, y: f32) -> Self {
        let position = Point::new(x, y);
        if let Some(current) = self.active.get_mut(&id) {
            *current = position;
        }
        self.emit(TouchKind::Move, id, position)
    }

    /// Drag pointer `id` in a straight line to `(x, y)` over `duration_ms`,
    /// emitting `steps` evenly spaced moves.
    #[must_use]
    pub fn drag(mut self, id: PointerId, x: f32, y: f32, duration_ms: u64, steps: u32) -> Self {
        let from = self.active.get(&id).copied().unwrap_or_default();
        let steps = steps.max(1);
        let start_ms = self.now_ms;

        for step in 1..=steps {
            let fraction = step as f32 / steps as f32;
            self.now_ms = start_ms + duration_ms * u64::from(step) / u64::from(steps);
            self = self.move_to(
                id,
                from.x + (x - from.x) * fraction,
                from.y + (y - from.y) * fraction,
            );
        }
        self
    }

    /// Keep every pointer still for `duration_ms`, reporting their positions
    /// every `step_ms`.
    #[must_use]
    pub fn hold(self, duration_ms: u64, step_ms: u64) -> Self {
        self.hold_with(duration_ms, step_ms, |_| (0.0, 0.0))
    }

    /// Like [`TouchScript::hold`] but each reported position is offset by up
    /// to `amplitude` pixels on each axis, seeded for reproducibility. The
    /// stored anchor does not move, so displacement never exceeds
    /// `amplitude * sqrt(2)`.
    #[must_use]
    pub fn hold_jittered(self, duration_ms: u64, step_ms: u64, amplitude: f32, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let amplitude = amplitude.abs();
        self.hold_with(duration_ms, step_ms, move |_| {
            (rng.gen_range(-amplitude..=amplitude), rng.gen_range(-amplitude..=amplitude))
        })
    }

    /// Lift pointer `id`.
    #[must_use]
    pub fn up(mut self, id: PointerId) -> Self {
        let position = self.active.remove(&id).unwrap_or_default();
        let kind = if self.active.is_empty() { TouchKind::Up } else { TouchKind::PointerUp };
        self.emit(kind, id, position)
    }

    /// Lift every pointer, last one with [`TouchKind::Up`].
    #[must_use]
    pub fn release_all(mut self) -> Self {
        let ids: Vec<_> = self.active.keys().copied().collect();
        for id in ids {
            self = self.up(id);
        }
        self
    }

    /// Platform cancel of the whole stream.
    #[must_use]
    pub fn cancel(mut self) -> Self {
        let (id, position) = self.active.first_key_value().map(|(&id, &p)| (id, p)).unwrap_or_default();
        self.active.clear();
        self.emit(TouchKind::Cancel, id, position)
    }

    /// Down then up at `(x, y)`, `press_ms` apart.
    #[must_use]
    pub fn tap(self, id: PointerId, x: f32, y: f32, press_ms: u64) -> Self {
        self.down(id, x, y).advance(press_ms).up(id)
    }

    fn hold_with(
        mut self,
        duration_ms: u64,
        step_ms: u64,
        mut offset: impl FnMut(PointerId) -> (f32, f32),
    ) -> Self {
        let step_ms = step_ms.max(1);
        let end_ms = self.now_ms + duration_ms;

        while self.now_ms < end_ms {
            self.now_ms = (self.now_ms + step_ms).min(end_ms);
            let pointers: Vec<_> = self.active.iter().map(|(&id, &p)| (id, p)).collect();
            for (id, anchor) in pointers {
                let (dx, dy) = offset(id);
                self = self.emit(TouchKind::Move, id, Point::new(anchor.x + dx, anchor.y + dy));
            }
        }
        self
    }

    fn emit(mut self, kind: TouchKind, id: PointerId, position: Point) -> Self {
        self.events.push(TouchEvent::new(kind, id, position.x, position.y, self.now_ms));
        self
    }
}
