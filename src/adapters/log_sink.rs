//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (UART / USB-CDC via the ESP-IDF logger in production).
//! Telemetry goes out as a single JSON line so a serial monitor can scrape it.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(config) => {
                info!(
                    "START | ping={}ms pulse={}ms debounce={}ms",
                    config.ping_interval_ms,
                    config.pulse_duration_ms,
                    config.debounce_ms(),
                );
            }
            AppEvent::PresenceChanged { present } => {
                info!("CAT   | {}", if *present { "present" } else { "absent" });
            }
            AppEvent::Telemetry(status) => match serde_json::to_string(status) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
        }
    }
}
