//! # Broadcast bus for recovery events.
//!
//! [`Bus`] wraps [`tokio::sync::broadcast`] so policies can publish without
//! blocking and without knowing who listens.
//!
//! ```text
//! ForwardRecovery (step A) ──┐
//! ForwardRecovery (step B) ──┼──► Bus ──► executor / metrics / audit receivers
//! ForwardRecovery (step N) ──┘
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; with no receivers the event is dropped.
//! - Capacity is shared by all receivers; slow ones observe `RecvError::Lagged(n)`.
//! - Cloning is cheap (`Arc`-backed sender), so one bus can back many policies.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for recovery events.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus with the given ring buffer capacity (clamped to at least 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to all current receivers.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver for events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn receivers_see_events_after_subscribing() {
        let bus = Bus::new(4);
        bus.publish(Event::new(EventKind::AttemptStarting));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::AttemptFailed).with_task("t"));

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::AttemptFailed);
        assert_eq!(ev.task.as_deref(), Some("t"));
    }

    #[test]
    fn publish_without_receivers_is_silent() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::StepAborted));
    }
}
