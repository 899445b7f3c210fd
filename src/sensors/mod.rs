//! Cat presence sensor — active ping, echo capture and debounce.
//!
//! | Module      | Runs in                  | Owns                              |
//! |-------------|--------------------------|-----------------------------------|
//! | `ping`      | timer ISR, edge ISR      | interrupt-writable flags (atomic) |
//! | `debounce`  | main loop                | raw → confirmed filter            |
//! | `presence`  | main loop                | ping cadence, dispatch, status    |

pub mod debounce;
pub mod ping;
pub mod presence;

pub use ping::{PingFlags, PingIsr};
pub use presence::{PresenceSensor, PresenceStatus};
