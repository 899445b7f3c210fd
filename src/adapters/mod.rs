//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to                          |
//! |------------|------------|--------------------------------------|
//! | `hal_ping` | PingPort   | embedded-hal PWM + input pin + timer |
//! | `log_sink` | EventSink  | Serial log output                    |
//! | `time`     | TimePort   | ESP32 system timer / host clock      |
//!
//! The ESP-IDF ping peripheral itself lives in
//! [`drivers::ping`](crate::drivers::ping) next to the raw init code.

pub mod hal_ping;
pub mod log_sink;
pub mod time;
