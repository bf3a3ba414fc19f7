use ledger_state::Event;
use tracing::info;

/// Receives the events of every call that commits.
///
/// Sinks are told about events only after the call's state changes are
/// committed; a reverted call publishes nothing.
pub trait EventSink {
    /// Publishes one committed event.
    fn publish(&mut self, event: &Event);
}

/// An append-only in-memory event log.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// All the events published so far, oldest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

impl EventSink for EventLog {
    fn publish(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

/// Logs every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&mut self, event: &Event) {
        info!(
            key = %event.key(),
            value = %hex::encode(event.value().inner()),
            "Event published"
        );
    }
}

impl<T: EventSink + ?Sized> EventSink for Box<T> {
    fn publish(&mut self, event: &Event) {
        (**self).publish(event)
    }
}
