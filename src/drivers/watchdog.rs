//! Task watchdog for the presence loop.
//!
//! The loop must pass through `work` far more often than the ping interval.
//! If it stops for `SensorConfig::watchdog_timeout_ms()` (a whole number of
//! missed ping intervals) the TWDT panics and the chip restarts with the
//! emitter off.
//!
//! On the host the watchdog only counts feeds so tests can check the loop
//! services it.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::{info, warn};

use crate::config::SensorConfig;

pub struct Watchdog {
    timeout_ms: u32,
    armed: bool,
    feeds: u32,
}

impl Watchdog {
    /// Subscribe the calling task with a timeout derived from the ping cadence.
    pub fn for_sensor(config: &SensorConfig) -> Self {
        let timeout_ms = config.watchdog_timeout_ms();
        let armed = subscribe(timeout_ms);
        if armed {
            info!(
                "watchdog: armed, {}ms ({} missed pings)",
                timeout_ms, config.watchdog_stall_pings
            );
        } else {
            warn!("watchdog: not armed, presence loop is unsupervised");
        }
        Self { timeout_ms, armed, feeds: 0 }
    }

    /// Called once per loop pass.
    pub fn feed(&mut self) {
        self.feeds = self.feeds.wrapping_add(1);
        if self.armed {
            reset();
        }
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}

#[cfg(target_os = "espidf")]
fn subscribe(timeout_ms: u32) -> bool {
    // SAFETY: TWDT config calls from the main task during boot.
    unsafe {
        let cfg = esp_task_wdt_config_t {
            timeout_ms,
            idle_core_mask: 0,
            trigger_panic: true,
        };
        let ret = esp_task_wdt_reconfigure(&cfg);
        if ret != ESP_OK {
            warn!("watchdog: reconfigure returned {} (may already be configured)", ret);
        }
        esp_task_wdt_add(core::ptr::null_mut()) == ESP_OK
    }
}

#[cfg(not(target_os = "espidf"))]
fn subscribe(_timeout_ms: u32) -> bool {
    true
}

#[cfg(target_os = "espidf")]
fn reset() {
    // SAFETY: the calling task was subscribed in `subscribe`.
    unsafe {
        esp_task_wdt_reset();
    }
}

#[cfg(not(target_os = "espidf"))]
fn reset() {}
