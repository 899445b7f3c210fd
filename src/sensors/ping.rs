//! Ping cycle state shared across the interrupt boundary.
//!
//! The main loop starts a ping; two interrupts finish it:
//!
//! ```text
//!   work()                 input-edge ISR            timer-expiry ISR
//!   ──────                 ──────────────            ────────────────
//!   echo_observed = false
//!   in_progress   = true ─▶ if in_progress &&
//!   start_pulse()            echo line active:
//!   arm_pulse_timer()          echo_observed = true
//!                                                 ─▶ if in_progress:
//!                                                      stop_pulse()
//!                                                      in_progress = false
//!                                                      raw = echo_observed
//! ```
//!
//! Every field written from interrupt context lives in [`PingFlags`] and is
//! an atomic, so neither side needs a lock.  Poll-only state (the next-ping
//! deadline, debounce) stays in
//! [`PresenceSensor`](super::presence::PresenceSensor) and is never visible
//! to the ISRs.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::app::ports::PingPort;

/// Interrupt-writable ping state.
///
/// | Field           | Written by                      | Read by          |
/// |-----------------|---------------------------------|------------------|
/// | `in_progress`   | `work` (set), timer ISR (clear) | both ISRs        |
/// | `echo_observed` | `work` (clear), edge ISR (set)  | timer ISR        |
/// | `raw`           | timer ISR                       | `work`           |
/// | `completed`     | timer ISR                       | status snapshot  |
/// | `echoed`        | timer ISR                       | status snapshot  |
#[derive(Debug)]
pub struct PingFlags {
    in_progress: AtomicBool,
    echo_observed: AtomicBool,
    raw: AtomicBool,
    completed: AtomicU32,
    echoed: AtomicU32,
}

impl PingFlags {
    pub const fn new() -> Self {
        Self {
            in_progress: AtomicBool::new(false),
            echo_observed: AtomicBool::new(false),
            raw: AtomicBool::new(false),
            completed: AtomicU32::new(0),
            echoed: AtomicU32::new(0),
        }
    }

    /// Return to power-on state.  Only call while the ISRs are quiet
    /// (during init, before the pulse timer is armed).
    pub fn reset(&self) {
        self.in_progress.store(false, Ordering::Release);
        self.echo_observed.store(false, Ordering::Relaxed);
        self.raw.store(false, Ordering::Release);
        self.completed.store(0, Ordering::Relaxed);
        self.echoed.store(0, Ordering::Relaxed);
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Result of the most recently completed ping.
    pub fn raw(&self) -> bool {
        self.raw.load(Ordering::Acquire)
    }

    pub fn completed(&self) -> u32 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn echoed(&self) -> u32 {
        self.echoed.load(Ordering::Relaxed)
    }

    /// Open a new echo window.  The echo latch is cleared before the window
    /// is published so an edge can never be attributed to the previous ping.
    pub(crate) fn begin(&self) {
        self.echo_observed.store(false, Ordering::Relaxed);
        self.in_progress.store(true, Ordering::Release);
    }

    /// Latch an echo if a window is open.  Repeated calls are idempotent.
    pub(crate) fn capture_echo(&self) -> bool {
        if !self.in_progress.load(Ordering::Acquire) {
            return false;
        }
        self.echo_observed.store(true, Ordering::Relaxed);
        true
    }

    /// Close the window and publish its result as the new raw sample.
    /// Returns `None` when no ping was in progress.
    pub(crate) fn finish(&self) -> Option<bool> {
        if !self.in_progress.swap(false, Ordering::AcqRel) {
            return None;
        }
        let echo = self.echo_observed.load(Ordering::Relaxed);
        self.raw.store(echo, Ordering::Release);
        self.completed.fetch_add(1, Ordering::Relaxed);
        if echo {
            self.echoed.fetch_add(1, Ordering::Relaxed);
        }
        Some(echo)
    }

    /// Close the window without producing a sample.  `raw` and the
    /// completion counters keep their previous values.
    pub(crate) fn abort(&self) -> bool {
        self.in_progress.swap(false, Ordering::AcqRel)
    }
}

impl Default for PingFlags {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// Interrupt entry points
// ───────────────────────────────────────────────────────────────

/// Handle given to the platform interrupt glue.
///
/// Holds only shared references to interrupt-safe state, so it is `Copy`
/// and can be stored in a `static` or passed as an ISR argument.  Neither
/// method blocks, allocates or logs.
#[derive(Debug)]
pub struct PingIsr<'a, P> {
    flags: &'a PingFlags,
    port: &'a P,
    echo_active_low: bool,
}

impl<P> Clone for PingIsr<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Copy for PingIsr<'_, P> {}

impl<'a, P: PingPort> PingIsr<'a, P> {
    pub const fn new(flags: &'a PingFlags, port: &'a P, echo_active_low: bool) -> Self {
        Self {
            flags,
            port,
            echo_active_low,
        }
    }

    /// Timer-expiry interrupt: end the pulse in progress and latch whether
    /// an echo was seen.  A spurious expiry with no ping running is ignored.
    pub fn on_timer_expiry(&self) {
        if !self.flags.in_progress() {
            return;
        }
        self.port.stop_pulse();
        self.flags.finish();
    }

    /// Input-edge interrupt on the echo line.  Only an edge that leaves the
    /// line at its active level counts, and only while a ping is running.
    pub fn on_input_edge(&self) {
        if !self.flags.in_progress() {
            return;
        }
        if self.port.read_echo_pin() != self.echo_active_low {
            self.flags.capture_echo();
        }
    }
}
