//! Cat sensor firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  EspPingPort      LogEventSink      Esp32TimeAdapter         │
//! │  (PingPort)       (EventSink)       (TimePort)               │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ─────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────┐      │
//! │  │        PresenceSensor (pure logic)                 │      │
//! │  │  Deadline · PingFlags · PresenceDebouncer          │      │
//! │  └────────────────────────────────────────────────────┘      │
//! │                                                              │
//! │  esp_timer task ──▶ PingIsr::on_timer_expiry                 │
//! │  echo GPIO ISR  ──▶ PingIsr::on_input_edge                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use catsensor::adapters::log_sink::LogEventSink;
use catsensor::adapters::time::Esp32TimeAdapter;
use catsensor::app::events::AppEvent;
use catsensor::app::ports::{EventSink, TimePort};
use catsensor::config::SensorConfig;
use catsensor::drivers::ping::EspPingPort;
use catsensor::drivers::watchdog::Watchdog;
use catsensor::drivers::{hw_init, hw_timer};
use catsensor::error::Error;
use catsensor::events::{drain_events, push_event, Event};
use catsensor::sensors::{PingFlags, PingIsr, PresenceSensor};

/// Shared with the timer task and the echo ISR.
static PING_FLAGS: PingFlags = PingFlags::new();

type Isr = PingIsr<'static, EspPingPort>;

// ── Interrupt trampolines ─────────────────────────────────────

unsafe extern "C" fn pulse_timer_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the leaked `Isr` registered in main().
    let isr = unsafe { &*(arg as *const Isr) };
    isr.on_timer_expiry();
}

unsafe extern "C" fn echo_edge_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the leaked `Isr` registered in main().
    let isr = unsafe { &*(arg as *const Isr) };
    isr.on_input_edge();
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("catsensor v{}", env!("CARGO_PKG_VERSION"));

    let config = SensorConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(|e| {
        error!("HAL init failed: {}", e);
        Error::Init("peripherals")
    })?;

    let port: &'static EspPingPort = Box::leak(Box::new(EspPingPort::new(config.pulse_duty_percent)));
    let mut sensor = PresenceSensor::new(&PING_FLAGS, port, config.clone());
    let isr: &'static Isr = Box::leak(Box::new(sensor.interrupts()));
    let isr_arg = isr as *const Isr as *mut core::ffi::c_void;

    // SAFETY: `isr` is leaked and lives for the rest of the program.
    unsafe {
        hw_timer::create_pulse_timer(pulse_timer_cb, isr_arg).map_err(|e| {
            error!("pulse timer: {}", e);
            Error::Init("pulse timer")
        })?;
        hw_init::install_echo_isr(echo_edge_isr, isr_arg).map_err(|e| {
            error!("echo ISR: {}", e);
            Error::Init("echo ISR")
        })?;
    }

    let mut watchdog = Watchdog::for_sensor(&config);
    let time = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();

    sensor.init();
    sink.emit(&AppEvent::Started(config.clone()));

    // ── 3. Event loop ─────────────────────────────────────────
    let mut last_telemetry_s = time.uptime_secs();

    loop {
        sensor.work(time.now_ms(), &mut |present: bool| {
            if !push_event(Event::presence(present)) {
                warn!("event queue full, presence change dropped");
            }
        });

        let now_s = time.uptime_secs();
        if now_s.saturating_sub(last_telemetry_s) >= config.telemetry_interval_secs as u64 {
            last_telemetry_s = now_s;
            push_event(Event::TelemetryTick);
        }

        drain_events(|event| match event {
            Event::PresenceDetected => sink.emit(&AppEvent::PresenceChanged { present: true }),
            Event::PresenceLost => sink.emit(&AppEvent::PresenceChanged { present: false }),
            Event::TelemetryTick => sink.emit(&AppEvent::Telemetry(sensor.status())),
        });

        watchdog.feed();
        esp_idf_hal::delay::FreeRtos::delay_ms(1);
    }
}
