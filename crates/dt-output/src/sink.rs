//! The `EventSink` trait implemented by anything that wants to observe a
//! world's events — a logger, a UI bridge, a test probe.

use dt_sim::WorldEvent;

/// Receives the events a [`dt_sim::facade::World`] raised since the last
/// drain. All methods have default no-op implementations so an implementor
/// only needs to override what it cares about.
pub trait EventSink {
    fn on_event(&mut self, _event: &WorldEvent) {}

    /// Convenience: feed every event from one `World::drain_events()` call.
    fn on_events(&mut self, events: &[WorldEvent]) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// An [`EventSink`] that logs every event at `tracing::debug!`.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&mut self, event: &WorldEvent) {
        tracing::debug!(?event, "world event");
    }
}

/// An [`EventSink`] that does nothing. Use when a caller needs an
/// `&mut dyn EventSink` but doesn't care about events.
pub struct NoopSink;

impl EventSink for NoopSink {}
