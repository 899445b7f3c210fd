//! Main-loop event queue.
//!
//! Events are produced by:
//! - the presence change notifier (debounced cat arrived / left)
//! - the loop's own telemetry counter
//!
//! and consumed by the main loop, which drains them in FIFO order after
//! each dispatch tick.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Notifier     │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Telemetry    │────▶│  (lock-free) │     │  (consumer)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::mpmc::Q16;

/// Events handed from the presence notifier and telemetry timer to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Debounced presence went true.
    PresenceDetected,
    /// Debounced presence went false.
    PresenceLost,
    /// Telemetry report interval elapsed.
    TelemetryTick,
}

impl Event {
    pub fn presence(present: bool) -> Self {
        if present {
            Self::PresenceDetected
        } else {
            Self::PresenceLost
        }
    }
}

/// Fixed-capacity lock-free queue.  Safe to push from ISR context.
pub struct EventQueue {
    queue: Q16<Event>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self { queue: Q16::new() }
    }

    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: Event) -> bool {
        self.queue.enqueue(event).is_ok()
    }

    pub fn pop(&self) -> Option<Event> {
        self.queue.dequeue()
    }

    /// Drain all pending events into a callback, oldest first.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

static EVENTS: EventQueue = EventQueue::new();

/// Push onto the global queue.
pub fn push_event(event: Event) -> bool {
    EVENTS.push(event)
}

/// Drain the global queue.
pub fn drain_events(handler: impl FnMut(Event)) {
    EVENTS.drain(handler);
}
