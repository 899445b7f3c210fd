//! Presence sensor dispatcher.
//!
//! [`PresenceSensor`] is the cooperative half of the cat sensor.  The main
//! loop calls [`work`](PresenceSensor::work) on every iteration; the
//! platform routes the pulse-timer and echo-edge interrupts to the
//! [`PingIsr`] handle returned by [`interrupts`](PresenceSensor::interrupts).
//!
//! ```text
//!  work(now) ─┬─ 1. ping due?  ──▶ begin window, start_pulse, arm_pulse_timer
//!             │                       ┊ (timer ISR later latches raw)
//!             └─ 2. debounce(raw) ──▶ listener.on_presence_change(..)
//! ```
//!
//! Step 1 always runs before step 2, so a raw sample latched by an
//! interrupt since the previous tick is debounced in the same tick.

use log::{debug, info, warn};
use serde::Serialize;

use super::debounce::PresenceDebouncer;
use super::ping::{PingFlags, PingIsr};
use crate::app::ports::{PingPort, PresenceListener};
use crate::config::SensorConfig;
use crate::deadline::{Deadline, Millis};

/// Point-in-time view of the sensor for diagnostics and telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PresenceStatus {
    /// Debounced presence, as last reported to the listener.
    pub present: bool,
    /// Result of the last completed ping.
    pub raw: bool,
    pub pinging: bool,
    /// A debounce window is running.
    pub settling: bool,
    /// Milliseconds until the running debounce window closes, 0 if none.
    pub settle_remaining_ms: u32,
    pub pings_started: u32,
    pub pings_completed: u32,
    /// Pings abandoned because the pulse timer could not be armed.
    pub pings_failed: u32,
    /// Completed pings that saw an echo.
    pub echoes: u32,
    /// Confirmed transitions since init.
    pub transitions: u32,
}

pub struct PresenceSensor<'a, P> {
    flags: &'a PingFlags,
    port: &'a P,
    config: SensorConfig,
    next_ping: Deadline,
    debounce: PresenceDebouncer,
    pings_started: u32,
    pings_failed: u32,
    transitions: u32,
    last_now: Millis,
}

impl<'a, P: PingPort> PresenceSensor<'a, P> {
    /// Bind the sensor to its shared flags and peripheral.  Call
    /// [`init`](Self::init) before the first `work`.
    pub fn new(flags: &'a PingFlags, port: &'a P, config: SensorConfig) -> Self {
        let debounce = PresenceDebouncer::new(config.debounce_ms());
        Self {
            flags,
            port,
            config,
            next_ping: Deadline::Expired,
            debounce,
            pings_started: 0,
            pings_failed: 0,
            transitions: 0,
            last_now: 0,
        }
    }

    /// Force the emitter off and reset all state.  The first `work` call
    /// afterwards starts a ping immediately.
    pub fn init(&mut self) {
        self.port.stop_pulse();
        self.flags.reset();
        self.next_ping = Deadline::Expired;
        self.debounce.reset();
        self.pings_started = 0;
        self.pings_failed = 0;
        self.transitions = 0;
        info!(
            "catsensor: ping every {}ms, pulse {}ms, debounce {}ms, echo active-{}",
            self.config.ping_interval_ms,
            self.config.pulse_duration_ms,
            self.config.debounce_ms(),
            if self.config.echo_active_low { "low" } else { "high" },
        );
    }

    /// Interrupt handle for the platform glue.
    pub fn interrupts(&self) -> PingIsr<'a, P> {
        PingIsr::new(self.flags, self.port, self.config.echo_active_low)
    }

    /// Timer-expiry entry point (same as `interrupts().on_timer_expiry()`).
    pub fn on_timer_expiry(&self) {
        self.interrupts().on_timer_expiry();
    }

    /// Input-edge entry point (same as `interrupts().on_input_edge()`).
    pub fn on_input_edge(&self) {
        self.interrupts().on_input_edge();
    }

    /// One dispatch tick.  Never blocks.
    pub fn work(&mut self, now: Millis, listener: &mut impl PresenceListener) {
        self.last_now = now;

        if !self.flags.in_progress() && self.next_ping.expired(now) {
            self.start_ping(now);
        }

        // One snapshot per tick: the timer ISR may latch a new sample at any
        // point, and the change check and commit must agree on its value.
        let raw = self.flags.raw();
        if let Some(present) = self.debounce.update(raw, now) {
            self.transitions = self.transitions.wrapping_add(1);
            info!("catsensor: cat {}", if present { "detected" } else { "gone" });
            listener.on_presence_change(present);
        }
    }

    fn start_ping(&mut self, now: Millis) {
        self.next_ping.arm(now, self.config.ping_interval_ms);
        self.flags.begin();
        self.port.start_pulse();
        self.pings_started = self.pings_started.wrapping_add(1);

        if let Err(e) = self.port.arm_pulse_timer(self.config.pulse_duration_ms) {
            // No expiry will come: end the pulse here and retry next interval.
            self.port.stop_pulse();
            self.flags.abort();
            self.pings_failed = self.pings_failed.wrapping_add(1);
            warn!("catsensor: ping #{} abandoned: {}", self.pings_started, e);
            return;
        }
        debug!("catsensor: ping #{} at {}ms", self.pings_started, now);
    }

    /// Debounced presence.
    pub fn is_present(&self) -> bool {
        self.debounce.confirmed()
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn status(&self) -> PresenceStatus {
        PresenceStatus {
            present: self.debounce.confirmed(),
            raw: self.flags.raw(),
            pinging: self.flags.in_progress(),
            settling: self.debounce.is_settling(self.last_now),
            settle_remaining_ms: self.debounce.settle_remaining(self.last_now),
            pings_started: self.pings_started,
            pings_completed: self.flags.completed(),
            pings_failed: self.pings_failed,
            echoes: self.flags.echoed(),
            transitions: self.transitions,
        }
    }
}
