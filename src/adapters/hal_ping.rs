//! `embedded-hal` ping peripheral adapter.
//!
//! Implements [`PingPort`] over any HAL that provides a PWM channel for the
//! emitter tone ([`SetDutyCycle`]), a GPIO input for the echo line
//! ([`InputPin`]) and a one-shot [`PulseTimer`].  The HAL drivers take
//! `&mut self` but the port is shared between the main loop and interrupt
//! context, so they live behind a critical-section mutex.
//!
//! HAL errors cannot travel through the infallible port; they are logged
//! and a failed echo read is treated as "line inactive" (no echo).

use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;
use embedded_hal::digital::InputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::ports::{PingPort, PulseTimer};
use crate::error::PeripheralError;

struct Inner<PWM, PIN, TMR> {
    pwm: PWM,
    echo: PIN,
    timer: TMR,
    duty_percent: u8,
}

pub struct HalPingPort<PWM, PIN, TMR> {
    inner: CriticalSectionMutex<RefCell<Inner<PWM, PIN, TMR>>>,
    echo_active_low: bool,
}

impl<PWM, PIN, TMR> HalPingPort<PWM, PIN, TMR>
where
    PWM: SetDutyCycle,
    PIN: InputPin,
    TMR: PulseTimer,
{
    pub fn new(pwm: PWM, echo: PIN, timer: TMR, duty_percent: u8, echo_active_low: bool) -> Self {
        Self {
            inner: CriticalSectionMutex::new(RefCell::new(Inner {
                pwm,
                echo,
                timer,
                duty_percent: duty_percent.min(100),
            })),
            echo_active_low,
        }
    }

    /// Release the wrapped drivers.
    pub fn release(self) -> (PWM, PIN, TMR) {
        let inner = self.inner.into_inner().into_inner();
        (inner.pwm, inner.echo, inner.timer)
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner<PWM, PIN, TMR>) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

impl<PWM, PIN, TMR> PingPort for HalPingPort<PWM, PIN, TMR>
where
    PWM: SetDutyCycle,
    PIN: InputPin,
    TMR: PulseTimer,
{
    fn start_pulse(&self) {
        self.with(|hw| {
            if let Err(e) = hw.pwm.set_duty_cycle_percent(hw.duty_percent) {
                warn!("ping: {} ({:?})", PeripheralError::PwmWriteFailed, e);
            }
        });
    }

    fn stop_pulse(&self) {
        self.with(|hw| {
            if let Err(e) = hw.pwm.set_duty_cycle_fully_off() {
                warn!("ping: {} ({:?})", PeripheralError::PwmWriteFailed, e);
            }
        });
    }

    fn read_echo_pin(&self) -> bool {
        self.with(|hw| match hw.echo.is_high() {
            Ok(high) => high,
            Err(e) => {
                warn!("ping: {} ({:?})", PeripheralError::GpioReadFailed, e);
                // Report the inactive level so a broken line reads as "no echo".
                self.echo_active_low
            }
        })
    }

    fn arm_pulse_timer(&self, duration_ms: u32) -> Result<(), PeripheralError> {
        self.with(|hw| hw.timer.start_oneshot(duration_ms))
    }
}
