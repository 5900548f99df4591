//! Adapts the pluggable [`EventBusProvider`] transport to the domain's
//! transport-agnostic [`EventPublisher`] port.
//!
//! The two traits look similar but serve different seams:
//! [`EventBusProvider`] is what the registry resolves (selectable backend,
//! exposes `subscribe`); [`EventPublisher`] is what the application layer's
//! use cases actually depend on (publish-only, no transport details). This
//! adapter is the only place the two meet.

use std::sync::Arc;

use async_trait::async_trait;
use photolib_domain::error::Result;
use photolib_domain::events::{DomainEvent, EventPublisher};
use photolib_domain::ports::infrastructure::events::{DomainEventStream, EventBusProvider};

/// Wraps a resolved [`EventBusProvider`] as an [`EventPublisher`].
pub struct EventBusPublisher {
    bus: Arc<dyn EventBusProvider>,
}

impl EventBusPublisher {
    /// Adapts `bus` for use by the application layer.
    #[must_use]
    pub fn new(bus: Arc<dyn EventBusProvider>) -> Self {
        Self { bus }
    }

    /// Subscribes to the underlying transport directly, for the HTTP
    /// surface's session event stream. Bypasses the publish-only
    /// [`EventPublisher`] seam on purpose: only a transport adapter needs
    /// the raw stream.
    #[must_use]
    pub fn subscribe(&self) -> DomainEventStream {
        self.bus.subscribe()
    }
}

#[async_trait]
impl EventPublisher for EventBusPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<()> {
        self.bus.publish(event).await
    }

    // The session monitor and ambient logging are the only consumers and
    // both want events regardless of live subscriber count; this adapter
    // has no cheap way to ask the underlying transport, so it always
    // reports a listener rather than risk silently dropping events.
    fn has_subscribers(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;
    use photolib_domain::value_objects::ImageId;
    use photolib_providers::events::InProcessEventBus;

    use super::*;

    #[tokio::test]
    async fn published_events_reach_a_prior_subscriber() {
        let bus: Arc<dyn EventBusProvider> = Arc::new(InProcessEventBus::default());
        let publisher = EventBusPublisher::new(bus);
        let mut stream = publisher.subscribe();

        let image_id = ImageId::new();
        publisher.publish(DomainEvent::ImageIndexed { session_id: None, image_id }).await.unwrap();

        let received = stream.next().await.expect("subscriber should observe the published event");
        match received {
            DomainEvent::ImageIndexed { image_id: received_id, .. } => assert_eq!(received_id, image_id),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn always_reports_subscribers() {
        let bus: Arc<dyn EventBusProvider> = Arc::new(InProcessEventBus::default());
        let publisher = EventBusPublisher::new(bus);
        assert!(publisher.has_subscribers());
    }
}
