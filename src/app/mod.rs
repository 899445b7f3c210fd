//! Application boundary — port traits and outbound events.
//!
//! The presence core in [`crate::sensors`] talks to hardware and to the
//! appliance logic only through the traits in [`ports`], keeping it fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
