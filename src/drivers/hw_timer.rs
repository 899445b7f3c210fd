//! One-shot pulse timer using ESP-IDF's esp_timer API.
//!
//! The timer bounds each ping: it is started when the emitter switches on
//! and its callback ends the pulse.  Callbacks execute in the ESP timer
//! task context (not ISR), so they may log.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use super::hw_init::IsrFn;
use crate::error::PeripheralError;

#[cfg(target_os = "espidf")]
static mut PULSE_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: PULSE_TIMER is written once in `create_pulse_timer()` before
/// the first ping is started.
#[cfg(target_os = "espidf")]
unsafe fn pulse_timer() -> esp_timer_handle_t { unsafe { PULSE_TIMER } }

/// Create the pulse timer and bind `callback(arg)` to its expiry.
///
/// # Safety
/// `arg` must stay valid for the lifetime of the program.
#[cfg(target_os = "espidf")]
pub unsafe fn create_pulse_timer(callback: IsrFn, arg: *mut core::ffi::c_void) -> Result<(), EspTimerError> {
    // SAFETY: PULSE_TIMER is written here once at boot from the single
    // main-task context before any pulse is started.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(callback),
            arg,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"ping".as_ptr(),
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut PULSE_TIMER);
        if ret != ESP_OK {
            return Err(EspTimerError(ret));
        }
    }
    info!("hw_timer: pulse timer created");
    Ok(())
}

/// # Safety
/// Host build: nothing is registered, `arg` is never dereferenced.
#[cfg(not(target_os = "espidf"))]
pub unsafe fn create_pulse_timer(_callback: IsrFn, _arg: *mut core::ffi::c_void) -> Result<(), EspTimerError> {
    log::info!("hw_timer(sim): pulse timer not created");
    Ok(())
}

/// Fire the pulse timer once after `duration_ms`.
#[cfg(target_os = "espidf")]
pub fn start_pulse_timer(duration_ms: u32) -> Result<(), PeripheralError> {
    // SAFETY: pulse_timer() contract; handle is null only if creation failed.
    unsafe {
        let t = pulse_timer();
        if t.is_null() {
            log::error!("hw_timer: pulse timer was never created");
            return Err(PeripheralError::TimerStartFailed);
        }
        let ret = esp_timer_start_once(t, duration_ms as u64 * 1_000);
        if ret != ESP_OK {
            log::error!("hw_timer: {} (rc={})", PeripheralError::TimerStartFailed, ret);
            return Err(PeripheralError::TimerStartFailed);
        }
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_pulse_timer(_duration_ms: u32) -> Result<(), PeripheralError> {
    Ok(())
}

/// esp_timer call failed with the given return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EspTimerError(pub i32);

impl core::fmt::Display for EspTimerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "esp_timer call failed (rc={})", self.0)
    }
}

impl core::error::Error for EspTimerError {}
