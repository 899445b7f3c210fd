//! GPIO / peripheral pin assignments for the cat sensor board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Ultrasonic emitter (transducer driven through a MOSFET)
// ---------------------------------------------------------------------------

/// LEDC PWM output carrying the ping tone.
pub const PING_EMITTER_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Echo receiver (comparator output, open-drain, active-low)
// ---------------------------------------------------------------------------

/// Digital input: LOW while the receiver hears the tone.
pub const ECHO_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Emitter tone frequency, matched to a 40 kHz transducer.
pub const PING_TONE_FREQ_HZ: u32 = 40_000;
/// LEDC channel driving the emitter.
pub const LEDC_CH_PING: u32 = 0;
