//! Event bus port — publish/subscribe for relay events.

use relayhub_domain::event::RelayEvent;

/// Publishes relay events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers. Events published while
    /// nobody is listening are dropped.
    fn publish(&self, event: RelayEvent);
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: RelayEvent) {
        (**self).publish(event);
    }
}
