//! Port traits — the hexagonal boundary between the presence core and the
//! outside world.
//!
//! ```text
//!   PingPort ──▶ PresenceSensor ──▶ PresenceListener
//!   TimePort ──▶   (pure logic)  ──▶ EventSink
//! ```
//!
//! Hardware adapters implement [`PingPort`] and [`TimePort`]; appliance
//! logic implements [`PresenceListener`].  The sensor never touches a
//! register directly, so the whole ping/debounce algorithm runs against a
//! simulated peripheral on the host.

use crate::error::PeripheralError;

// ───────────────────────────────────────────────────────────────
// Ping peripheral port (domain → emitter / echo line)
// ───────────────────────────────────────────────────────────────

/// Emitter, echo input and one-shot pulse timer of the cat sensor.
///
/// Every method takes `&self`: the same peripheral is driven from the main
/// loop (pulse start) and from interrupt context (pulse stop, echo read),
/// so implementations keep their state behind interrupt-safe cells.
pub trait PingPort {
    /// Start emitting the detection tone.
    fn start_pulse(&self);

    /// Stop emitting.  Called from the timer-expiry interrupt.
    fn stop_pulse(&self);

    /// Current electrical level of the echo line (`true` = high).
    fn read_echo_pin(&self) -> bool;

    /// Arm the one-shot pulse timer.  Its expiry must be routed to
    /// [`PingIsr::on_timer_expiry`](crate::sensors::ping::PingIsr::on_timer_expiry).
    ///
    /// An `Err` means no expiry will arrive; the caller ends the pulse itself.
    fn arm_pulse_timer(&self, duration_ms: u32) -> Result<(), PeripheralError>;
}

/// One-shot hardware timer used by [`HalPingPort`](crate::adapters::hal_ping::HalPingPort)
/// to bound the pulse.
pub trait PulseTimer {
    fn start_oneshot(&mut self, duration_ms: u32) -> Result<(), PeripheralError>;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Free-running millisecond counter.  Wraps at `u32::MAX`.
pub trait TimePort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Change notifier (domain → appliance logic)
// ───────────────────────────────────────────────────────────────

/// Receives confirmed presence transitions.
///
/// Called synchronously from [`PresenceSensor::work`](crate::sensors::presence::PresenceSensor::work),
/// never from interrupt context, exactly once per transition.  Must not
/// block: enqueue the event or act on it immediately.
pub trait PresenceListener {
    fn on_presence_change(&mut self, present: bool);
}

impl<F: FnMut(bool)> PresenceListener for F {
    fn on_presence_change(&mut self, present: bool) {
        self(present);
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// Structured [`AppEvent`](super::events::AppEvent)s leave the firmware
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
