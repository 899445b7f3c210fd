//! Unified error types for the cat sensor firmware.
//!
//! The presence core itself is total: pinging, echo capture and debounce
//! never fail.  Errors only exist at the boundary: configuration checks,
//! peripheral initialisation, and HAL calls made by the adapters.  All
//! variants are `Copy` so they can be logged from any context without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
    /// A peripheral call made on behalf of the ping cycle failed.
    Peripheral(PeripheralError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Peripheral(e) => write!(f, "peripheral: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Peripheral errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralError {
    /// Emitter duty-cycle write failed.
    PwmWriteFailed,
    /// Echo line could not be read.
    GpioReadFailed,
    /// One-shot pulse timer could not be started.
    TimerStartFailed,
}

impl fmt::Display for PeripheralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed => write!(f, "PWM write failed"),
            Self::GpioReadFailed => write!(f, "GPIO read failed"),
            Self::TimerStartFailed => write!(f, "pulse timer start failed"),
        }
    }
}

impl From<PeripheralError> for Error {
    fn from(e: PeripheralError) -> Self {
        Self::Peripheral(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
