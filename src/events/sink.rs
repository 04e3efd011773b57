//! Event sinks: where the engine sends what happened.

use super::event::GameEvent;

/// Receives game events in the order they happen.
pub trait EventSink {
    /// Handle one event.
    fn emit(&mut self, event: GameEvent);
}

/// Sink that keeps every event in memory.
///
/// Used by tests and by adapters that render after the fact.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if no events were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events of one kind (see [`GameEvent::kind`]).
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a GameEvent> + 'a {
        self.events.iter().filter(move |e| e.kind() == kind)
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
