//! Mock ping peripheral for integration tests.
//!
//! Records every peripheral call so tests can assert on the full command
//! history, and lets the test script the echo line and fire the pulse
//! timer by hand.

use std::cell::{Cell, RefCell};

use catsensor::app::ports::PingPort;
use catsensor::config::SensorConfig;
use catsensor::error::PeripheralError;
use catsensor::sensors::{PingFlags, PresenceSensor};

// ── Peripheral call record ────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingCall {
    StartPulse,
    StopPulse,
    ArmTimer(u32),
}

// ── MockPing ──────────────────────────────────────────────────

pub struct MockPing {
    pub calls: RefCell<Vec<PingCall>>,
    /// Electrical level of the echo line (`true` = high / idle).
    pub echo_level: Cell<bool>,
    /// Make `arm_pulse_timer` fail.
    pub timer_broken: Cell<bool>,
}

#[allow(dead_code)]
impl MockPing {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            echo_level: Cell::new(true),
            timer_broken: Cell::new(false),
        }
    }

    pub fn pulses_started(&self) -> usize {
        self.count(PingCall::StartPulse)
    }

    pub fn pulses_stopped(&self) -> usize {
        self.count(PingCall::StopPulse)
    }

    pub fn emitter_on(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|c| match c {
                PingCall::StartPulse => Some(true),
                PingCall::StopPulse => Some(false),
                PingCall::ArmTimer(_) => None,
            })
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn count(&self, call: PingCall) -> usize {
        self.calls.borrow().iter().filter(|c| **c == call).count()
    }
}

impl Default for MockPing {
    fn default() -> Self {
        Self::new()
    }
}

impl PingPort for MockPing {
    fn start_pulse(&self) {
        self.calls.borrow_mut().push(PingCall::StartPulse);
    }

    fn stop_pulse(&self) {
        self.calls.borrow_mut().push(PingCall::StopPulse);
    }

    fn read_echo_pin(&self) -> bool {
        self.echo_level.get()
    }

    fn arm_pulse_timer(&self, duration_ms: u32) -> Result<(), PeripheralError> {
        self.calls.borrow_mut().push(PingCall::ArmTimer(duration_ms));
        if self.timer_broken.get() {
            return Err(PeripheralError::TimerStartFailed);
        }
        Ok(())
    }
}

// ── Scripted rig ──────────────────────────────────────────────

/// Drives a [`PresenceSensor`] through a millisecond timeline, firing the
/// pulse timer when it would expire and injecting echoes on request.
pub struct Rig<'a> {
    pub sensor: PresenceSensor<'a, MockPing>,
    pub port: &'a MockPing,
    pub now: u32,
    /// Time at which the armed pulse timer fires, if any.
    pulse_ends: Option<u32>,
    pub notified: Vec<(u32, bool)>,
}

#[allow(dead_code)]
impl<'a> Rig<'a> {
    pub fn new(flags: &'a PingFlags, port: &'a MockPing, config: SensorConfig) -> Self {
        Self::starting_at(flags, port, config, 0)
    }

    pub fn starting_at(flags: &'a PingFlags, port: &'a MockPing, config: SensorConfig, now: u32) -> Self {
        let mut sensor = PresenceSensor::new(flags, port, config);
        sensor.init();
        Self { sensor, port, now, pulse_ends: None, notified: Vec::new() }
    }

    /// One dispatch tick at the current time.
    pub fn tick(&mut self) {
        let before = self.port.calls.borrow().len();
        let now = self.now;
        let notified = &mut self.notified;
        self.sensor.work(now, &mut |present: bool| notified.push((now, present)));

        let armed = self.port.calls.borrow()[before..].iter().find_map(|c| match c {
            PingCall::ArmTimer(ms) => Some(*ms),
            _ => None,
        });
        if let Some(ms) = armed {
            if !self.port.timer_broken.get() {
                self.pulse_ends = Some(now.wrapping_add(ms));
            }
        }
    }

    /// Advance 1 ms at a time to `until`, ticking and firing the pulse
    /// timer on the way.  `echo` decides whether an echo edge arrives
    /// during each ping.
    pub fn run_until(&mut self, until: u32, echo: impl Fn(u32) -> bool) {
        while self.now != until {
            self.step(&echo);
        }
    }

    /// Advance `ms` milliseconds.
    pub fn run_for(&mut self, ms: u32, echo: impl Fn(u32) -> bool) {
        let until = self.now.wrapping_add(ms);
        self.run_until(until, echo);
    }

    fn step(&mut self, echo: &impl Fn(u32) -> bool) {
        self.tick();
        if self.sensor.status().pinging && echo(self.now) {
            self.echo_edge(true);
        }
        self.now = self.now.wrapping_add(1);
        if self.pulse_ends == Some(self.now) {
            self.pulse_ends = None;
            self.sensor.on_timer_expiry();
        }
    }

    /// Drive the echo line to its active (`true`) or idle level and raise
    /// the edge interrupt.
    pub fn echo_edge(&mut self, active: bool) {
        let active_low = self.sensor.config().echo_active_low;
        self.port.echo_level.set(active != active_low);
        self.sensor.on_input_edge();
        self.port.echo_level.set(active_low);
    }

    pub fn notifications(&self) -> Vec<bool> {
        self.notified.iter().map(|(_, p)| *p).collect()
    }
}

/// Echo script: a cat is always there.
#[allow(dead_code)]
pub fn always(_: u32) -> bool {
    true
}

/// Echo script: nothing is there.
#[allow(dead_code)]
pub fn never(_: u32) -> bool {
    false
}
