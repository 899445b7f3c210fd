//! Outbound application events.
//!
//! The firmware loop emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, forward to the
//! appliance sequencer, etc.

use crate::config::SensorConfig;
use crate::sensors::presence::PresenceStatus;

/// Structured events emitted around the presence core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The sensor was initialised with this configuration.
    Started(SensorConfig),

    /// Debounced presence changed.
    PresenceChanged { present: bool },

    /// Periodic status snapshot.
    Telemetry(PresenceStatus),
}
