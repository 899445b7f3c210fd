//! Debounce filter for the raw presence sample.
//!
//! Every change of the raw sample (re)starts the window, including a change
//! back towards the value already confirmed.  The confirmed value only moves
//! once the raw sample has stayed put for the whole window, so a signal that
//! keeps flipping never commits, and an A→B→A blip inside the window never
//! produces a notification.

use crate::deadline::{Deadline, Millis};

#[derive(Debug, Clone)]
pub struct PresenceDebouncer {
    /// Raw value seen on the previous update.
    previous_raw: bool,
    /// Last value delivered to the listener.
    confirmed: bool,
    window: Deadline,
    window_ms: Millis,
}

impl PresenceDebouncer {
    pub fn new(window_ms: Millis) -> Self {
        Self {
            previous_raw: false,
            confirmed: false,
            window: Deadline::Never,
            window_ms,
        }
    }

    /// Feed the current raw sample.  Returns the new confirmed value when
    /// this call commits a transition.
    pub fn update(&mut self, raw: bool, now: Millis) -> Option<bool> {
        if raw != self.previous_raw {
            self.previous_raw = raw;
            self.window.arm(now, self.window_ms);
        }

        if !self.window.expired(now) {
            return None;
        }
        self.window.cancel();

        if raw == self.confirmed {
            return None;
        }
        self.confirmed = raw;
        Some(raw)
    }

    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// True while a window is running.
    pub fn is_settling(&self, now: Millis) -> bool {
        self.window.is_pending(now)
    }

    /// Milliseconds until the running window closes, 0 when none is running.
    pub fn settle_remaining(&self, now: Millis) -> Millis {
        self.window.remaining(now).unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.previous_raw = false;
        self.confirmed = false;
        self.window.cancel();
    }
}
