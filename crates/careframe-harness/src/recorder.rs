//! Listener that records notifications.

use std::time::Duration;

use careframe_gesture::GestureListener;
use tracing::trace;

/// Records every trigger and feedback pulse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    triggers: usize,
    feedback: Vec<Duration>,
}

impl Recorder {
    /// Number of triggers received.
    pub fn triggers(&self) -> usize {
        self.triggers
    }

    /// Held time reported by each feedback pulse, in order.
    pub fn feedback(&self) -> &[Duration] {
        &self.feedback
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.triggers = 0;
        self.feedback.clear();
    }
}

impl GestureListener for Recorder {
    fn on_triggered(&mut self) {
        self.triggers += 1;
    }

    fn on_hold_feedback(&mut self, held: Duration) {
        trace!(?held, "hold feedback");
        self.feedback.push(held);
    }
}
