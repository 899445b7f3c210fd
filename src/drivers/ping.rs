//! ESP-IDF ping peripheral.
//!
//! Drives the emitter through the LEDC channel configured in
//! [`hw_init`](super::hw_init) and times the pulse with the esp_timer from
//! [`hw_timer`](super::hw_timer).  Every call is a register write or a
//! timer API call, so the port is shareable between the main loop and
//! interrupt context without locking.

use super::{hw_init, hw_timer};
use crate::app::ports::PingPort;
use crate::error::PeripheralError;
use crate::pins;

pub struct EspPingPort {
    duty: u8,
}

impl EspPingPort {
    pub fn new(duty_percent: u8) -> Self {
        Self { duty: hw_init::duty_from_percent(duty_percent) }
    }
}

impl PingPort for EspPingPort {
    fn start_pulse(&self) {
        hw_init::ledc_set(pins::LEDC_CH_PING, self.duty);
    }

    fn stop_pulse(&self) {
        hw_init::ledc_set(pins::LEDC_CH_PING, 0);
    }

    fn read_echo_pin(&self) -> bool {
        hw_init::gpio_read(pins::ECHO_GPIO)
    }

    fn arm_pulse_timer(&self, duration_ms: u32) -> Result<(), PeripheralError> {
        hw_timer::start_pulse_timer(duration_ms)
    }
}
