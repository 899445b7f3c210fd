//! Fuzz target: `PresenceSensor` driven by an arbitrary interrupt timeline
//!
//! Each input byte is one step: the low 5 bits advance the clock, bit 5
//! raises an echo edge, bit 6 fires the pulse timer, bit 7 drives the echo
//! line to its inactive level for that edge.
//!
//! Invariants checked:
//! - No panics under any byte sequence
//! - Notifications strictly alternate, starting with `true`
//! - `is_present()` always equals the last notified value
//! - At most one pulse is running at a time
//!
//! cargo fuzz run fuzz_presence_timeline

#![no_main]

use std::cell::Cell;

use catsensor::app::ports::PingPort;
use catsensor::config::SensorConfig;
use catsensor::error::PeripheralError;
use catsensor::sensors::{PingFlags, PresenceSensor};
use libfuzzer_sys::fuzz_target;

struct Bench {
    high: Cell<bool>,
    running: Cell<u32>,
    timer_broken: Cell<bool>,
}

impl PingPort for Bench {
    fn start_pulse(&self) {
        self.running.set(self.running.get() + 1);
        assert!(self.running.get() <= 1, "overlapping pulses");
    }
    fn stop_pulse(&self) {
        self.running.set(self.running.get().saturating_sub(1));
    }
    fn read_echo_pin(&self) -> bool {
        self.high.get()
    }
    fn arm_pulse_timer(&self, _duration_ms: u32) -> Result<(), PeripheralError> {
        if self.timer_broken.get() {
            return Err(PeripheralError::TimerStartFailed);
        }
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let flags = PingFlags::new();
    let bench = Bench { high: Cell::new(true), running: Cell::new(0), timer_broken: Cell::new(false) };
    let mut sensor = PresenceSensor::new(&flags, &bench, SensorConfig::default());
    let isr = sensor.interrupts();
    sensor.init();

    let mut now = u32::MAX - 1_000;
    let mut last: Option<bool> = None;

    for &b in data {
        now = now.wrapping_add(u32::from(b & 0x1F) * 4);
        sensor.work(now, &mut |p: bool| {
            assert_ne!(last, Some(p), "repeated notification");
            assert!(last.is_some() || p, "first notification must be arrival");
            last = Some(p);
        });
        assert_eq!(sensor.is_present(), last.unwrap_or(false));

        if b & 0x20 != 0 {
            bench.high.set(b & 0x80 != 0);
            isr.on_input_edge();
            bench.high.set(true);
        }
        if b & 0x40 != 0 {
            isr.on_timer_expiry();
        }
        // Timer arming fails whenever bits 5 and 7 are both set.
        bench.timer_broken.set(b & 0xA0 == 0xA0);
    }
});
