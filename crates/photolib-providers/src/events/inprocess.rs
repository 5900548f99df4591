//! In-process event bus backed by a `tokio::sync::broadcast` channel.

use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use photolib_domain::error::Result;
use photolib_domain::events::{DomainEvent, EventPublisher};
use photolib_domain::ports::infrastructure::events::{DomainEventStream, EventBusProvider};
use photolib_domain::registry::events::{EVENT_BUS_PROVIDERS, EventBusProviderConfig, EventBusProviderEntry};
use tokio::sync::broadcast;

const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Broadcasts [`DomainEvent`]s to every current subscriber; late subscribers
/// simply miss events published before they subscribed, matching the
/// "successfully published means sent, not received" contract.
pub struct InProcessEventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl InProcessEventBus {
    /// Creates a bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl Default for InProcessEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

#[async_trait]
impl EventBusProvider for InProcessEventBus {
    async fn publish(&self, event: DomainEvent) -> Result<()> {
        // A send error only means there are no receivers right now; that's
        // not a failure for an event bus.
        let _ = self.sender.send(event);
        Ok(())
    }

    fn subscribe(&self) -> DomainEventStream {
        let receiver = self.sender.subscribe();
        futures::stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => return Some((event, receiver)),
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed()
    }

    fn provider_name(&self) -> &str {
        "inprocess"
    }
}

#[async_trait]
impl EventPublisher for InProcessEventBus {
    async fn publish(&self, event: DomainEvent) -> Result<()> {
        EventBusProvider::publish(self, event).await
    }

    fn has_subscribers(&self) -> bool {
        self.sender.receiver_count() > 0
    }
}

fn inprocess_factory(_config: &EventBusProviderConfig) -> std::result::Result<Arc<dyn EventBusProvider>, String> {
    Ok(Arc::new(InProcessEventBus::default()))
}

#[linkme::distributed_slice(EVENT_BUS_PROVIDERS)]
static INPROCESS_PROVIDER: EventBusProviderEntry = EventBusProviderEntry {
    name: "inprocess",
    description: "In-process tokio broadcast event bus",
    build: inprocess_factory,
};
