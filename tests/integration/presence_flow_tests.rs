//! Integration tests for the ping → echo → debounce → notify pipeline.
//!
//! Each test drives a `PresenceSensor` over a scripted millisecond
//! timeline against `MockPing`, firing the pulse timer and echo edges the
//! way the interrupt glue does on hardware.

use super::mock_hw::{always, never, MockPing, PingCall, Rig};

use catsensor::config::SensorConfig;
use catsensor::sensors::PingFlags;

fn reference() -> SensorConfig {
    SensorConfig::default()
}

// ── Cadence ───────────────────────────────────────────────────

#[test]
fn init_forces_emitter_off() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let _rig = Rig::new(&flags, &port, reference());
    assert_eq!(*port.calls.borrow(), vec![PingCall::StopPulse]);
}

#[test]
fn first_work_pings_then_waits_full_interval() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(100, never);
    assert_eq!(port.pulses_started(), 1, "only the boot ping before t=100");
    assert!(!rig.sensor.status().pinging);

    rig.run_for(1, never);
    assert_eq!(port.pulses_started(), 2, "second ping exactly at t=100");
}

#[test]
fn no_pulse_while_interval_pending() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());
    rig.run_until(20, never);
    port.clear();

    for _ in 0..50 {
        rig.tick();
    }
    assert!(port.calls.borrow().is_empty());
    assert!(!flags.in_progress());
}

#[test]
fn every_pulse_is_armed_and_stopped() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());
    port.clear();

    rig.run_until(1_000, always);
    assert_eq!(port.pulses_started(), 10);
    assert_eq!(port.pulses_stopped(), 10);
    assert!(!port.emitter_on());

    let calls = port.calls.borrow();
    for pair in calls.chunks(3) {
        assert_eq!(
            pair,
            [PingCall::StartPulse, PingCall::ArmTimer(10), PingCall::StopPulse]
        );
    }
}

#[test]
fn failed_timer_arm_does_not_wedge_sensor() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());
    port.clear();
    port.timer_broken.set(true);

    rig.run_until(1_000, always);
    assert_eq!(port.pulses_started(), 10, "one attempt per interval");
    assert_eq!(port.pulses_stopped(), 10);
    assert!(!port.emitter_on());
    assert!(!flags.in_progress());
    assert_eq!(rig.sensor.status().pings_failed, 10);
    assert!(rig.notified.is_empty());

    port.timer_broken.set(false);
    rig.run_until(2_000, always);
    assert_eq!(rig.notified, vec![(1_310, true)]);
}

// ── Echo capture ──────────────────────────────────────────────

#[test]
fn silent_window_samples_absent() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());
    rig.run_until(11, never);
    assert!(!flags.raw());
    assert_eq!(flags.completed(), 1);
    assert_eq!(flags.echoed(), 0);
}

#[test]
fn any_number_of_edges_samples_present() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.tick();
    for _ in 0..7 {
        rig.echo_edge(true);
    }
    rig.run_until(11, never);
    assert!(flags.raw());
    assert_eq!(flags.echoed(), 1);
}

#[test]
fn edges_to_inactive_level_are_ignored() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.tick();
    rig.echo_edge(false);
    rig.run_until(11, never);
    assert!(!flags.raw());
}

#[test]
fn edge_after_window_closes_is_ignored() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(11, never);
    rig.echo_edge(true);
    rig.run_until(99, never);
    assert!(!flags.raw());
    assert_eq!(rig.sensor.status().echoes, 0);
}

#[test]
fn echo_flag_is_cleared_for_each_ping() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(100, |t| t < 100);
    assert!(flags.raw());
    rig.run_until(111, never);
    assert!(!flags.raw(), "second ping saw nothing");
}

#[test]
fn active_high_receiver() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let config = SensorConfig { echo_active_low: false, ..reference() };
    let mut rig = Rig::new(&flags, &port, config);

    rig.run_until(400, always);
    assert_eq!(rig.notifications(), vec![true]);
}

// ── Debounce / notify ─────────────────────────────────────────

#[test]
fn echo_at_boot_reports_presence_at_310ms() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(310, always);
    assert!(rig.notified.is_empty(), "nothing before the window closes");

    rig.run_until(2_000, always);
    assert_eq!(rig.notified, vec![(310, true)]);
    assert!(rig.sensor.is_present());
}

#[test]
fn flips_restart_window_from_last_change() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    // raw: true @10, false @110, true @210, then steady.
    rig.run_until(2_000, |t| !(100..200).contains(&t));
    assert_eq!(rig.notified, vec![(510, true)]);
}

#[test]
fn single_ping_blip_never_reports() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(5_000, |t| t < 100);
    assert!(rig.notified.is_empty());
    assert!(!rig.sensor.is_present());
    assert_eq!(rig.sensor.status().echoes, 1);
}

#[test]
fn blip_while_present_never_reports_absence() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(1_000, always);
    rig.run_until(1_100, never);
    rig.run_until(5_000, always);
    assert_eq!(rig.notifications(), vec![true]);
}

#[test]
fn arrival_then_departure() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(1_000, always);
    rig.run_until(3_000, never);
    // Last echoing ping starts at 900; the first silent one ends at 1_010.
    assert_eq!(rig.notified, vec![(310, true), (1_310, false)]);
    assert_eq!(rig.sensor.status().transitions, 2);
}

#[test]
fn steady_state_is_idempotent() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(1_020, always);
    let calls = port.calls.borrow().len();
    let before = rig.notified.len();

    for _ in 0..100 {
        rig.tick();
    }
    assert_eq!(port.calls.borrow().len(), calls, "no peripheral activity");
    assert_eq!(rig.notified.len(), before, "no duplicate notification");
}

#[test]
fn longer_debounce_window() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let config = SensorConfig { debounce_pings: 5, ..reference() };
    let mut rig = Rig::new(&flags, &port, config);

    rig.run_until(2_000, always);
    assert_eq!(rig.notified, vec![(510, true)]);
}

#[test]
fn timeline_across_counter_wrap() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let start = u32::MAX - 150;
    let mut rig = Rig::starting_at(&flags, &port, reference(), start);

    rig.run_for(1_000, always);
    assert_eq!(rig.notified, vec![(start.wrapping_add(310), true)]);
    assert_eq!(port.pulses_started(), 10);
}

// ── Status ────────────────────────────────────────────────────

#[test]
fn status_tracks_counters() {
    let flags = PingFlags::new();
    let port = MockPing::new();
    let mut rig = Rig::new(&flags, &port, reference());

    rig.run_until(305, |t| t >= 200);
    let s = rig.sensor.status();
    assert_eq!(s.pings_started, 4);
    assert_eq!(s.pings_completed, 3);
    assert_eq!(s.echoes, 1);
    assert!(s.pinging);
    assert!(s.raw);
    assert!(s.settling);
    assert!(!s.present);
}
