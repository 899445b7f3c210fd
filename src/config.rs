//! Cat sensor configuration parameters
//!
//! Timing for the active ping cycle and the debounce window.  Defaults
//! match the reference appliance: a ping every 100 ms, a 10 ms pulse, and
//! three agreeing pings before a presence change is trusted.

use serde::{Deserialize, Serialize};

use crate::deadline::MAX_DURATION_MS;
use crate::error::{Error, Result};

/// Presence sensor configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    // --- Ping cycle ---
    /// Interval between ping starts (milliseconds)
    pub ping_interval_ms: u32,
    /// Length of one emitted pulse / echo window (milliseconds)
    pub pulse_duration_ms: u32,
    /// Emitter tone duty cycle while pulsing (1-100%)
    pub pulse_duty_percent: u8,

    // --- Echo ---
    /// Echo line level that counts as a detection (`true` = low)
    pub echo_active_low: bool,

    // --- Debounce ---
    /// Debounce window expressed in ping intervals
    pub debounce_pings: u32,

    // --- Supervision ---
    /// Missed ping intervals before the task watchdog resets the chip
    pub watchdog_stall_pings: u32,

    // --- Reporting ---
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            // Ping cycle
            ping_interval_ms: 100, // 10 Hz
            pulse_duration_ms: 10,
            pulse_duty_percent: 50,

            // Echo: IR receiver output is pulled low while it sees the carrier
            echo_active_low: true,

            // Debounce: 3 pings
            debounce_pings: 3,

            // Watchdog: 50 intervals = 5 s without a loop pass
            watchdog_stall_pings: 50,

            telemetry_interval_secs: 60,
        }
    }
}

impl SensorConfig {
    /// Debounce window in milliseconds.
    pub fn debounce_ms(&self) -> u32 {
        self.ping_interval_ms.saturating_mul(self.debounce_pings)
    }

    /// Task watchdog timeout in milliseconds.
    pub fn watchdog_timeout_ms(&self) -> u32 {
        self.ping_interval_ms.saturating_mul(self.watchdog_stall_pings)
    }

    /// Reject timing combinations the ping cycle cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.ping_interval_ms == 0 {
            return Err(Error::Config("ping_interval_ms must be non-zero"));
        }
        if self.pulse_duration_ms == 0 {
            return Err(Error::Config("pulse_duration_ms must be non-zero"));
        }
        if self.pulse_duration_ms >= self.ping_interval_ms {
            return Err(Error::Config("pulse must end before the next ping is due"));
        }
        if self.debounce_pings == 0 {
            return Err(Error::Config("debounce_pings must be at least 1"));
        }
        if self
            .ping_interval_ms
            .checked_mul(self.debounce_pings)
            .is_none_or(|ms| ms > MAX_DURATION_MS)
        {
            return Err(Error::Config("debounce window exceeds timer range"));
        }
        if self.watchdog_stall_pings <= self.debounce_pings {
            return Err(Error::Config("watchdog must outlast the debounce window"));
        }
        if self.pulse_duty_percent == 0 || self.pulse_duty_percent > 100 {
            return Err(Error::Config("pulse_duty_percent must be 1-100"));
        }
        Ok(())
    }
}
