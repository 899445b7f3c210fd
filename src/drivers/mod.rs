//! Hardware initialisation and ESP-IDF peripheral drivers.

pub mod hw_init;
pub mod hw_timer;
pub mod ping;
pub mod watchdog;
