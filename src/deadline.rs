//! Software deadline timer.
//!
//! A [`Deadline`] is armed against a free-running millisecond counter and
//! polled from the main loop.  The counter is a `u32` that wraps roughly
//! every 49.7 days, so expiry is decided by signed wrapping subtraction
//! rather than a plain `>=` on the raw values.  As a consequence an armed
//! duration must stay below 2^31 ms.
//!
//! ```text
//!            arm(now, d)               now >= at
//!   Never ───────────────▶ At(at) ─────────────────▶ expired() == true
//!     ▲                      │
//!     └──── cancel() ────────┘
//! ```

/// Milliseconds on the wrapping monotonic counter.
pub type Millis = u32;

/// Largest duration that still compares correctly across wraparound.
pub const MAX_DURATION_MS: Millis = i32::MAX as u32;

/// One-shot deadline with explicit "unset" and "already expired" states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deadline {
    /// Not armed.  Never reports expired.
    #[default]
    Never,
    /// Reports expired until re-armed or cancelled.
    Expired,
    /// Expires once the counter reaches this instant.
    At(Millis),
}

impl Deadline {
    /// Arm the deadline `duration_ms` after `now`.
    pub fn arm(&mut self, now: Millis, duration_ms: Millis) {
        debug_assert!(duration_ms <= MAX_DURATION_MS);
        *self = Self::At(now.wrapping_add(duration_ms));
    }

    /// Disarm; `expired()` stays false until the next `arm`.
    pub fn cancel(&mut self) {
        *self = Self::Never;
    }

    pub fn expired(&self, now: Millis) -> bool {
        match *self {
            Self::Never => false,
            Self::Expired => true,
            Self::At(at) => now.wrapping_sub(at) as i32 >= 0,
        }
    }

    /// True while armed and not yet reached.
    pub fn is_pending(&self, now: Millis) -> bool {
        matches!(self, Self::At(_)) && !self.expired(now)
    }

    /// Milliseconds left before expiry, `None` when not armed.
    pub fn remaining(&self, now: Millis) -> Option<Millis> {
        match *self {
            Self::Never => None,
            Self::Expired => Some(0),
            Self::At(at) => Some((at.wrapping_sub(now) as i32).max(0) as Millis),
        }
    }
}
