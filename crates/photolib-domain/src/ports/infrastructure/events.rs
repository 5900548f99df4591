//! Event bus provider port: the pluggable transport behind [`crate::events::EventPublisher`].

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::Result;
use crate::events::DomainEvent;

/// A stream of domain events, as returned by [`EventBusProvider::subscribe`].
pub type DomainEventStream = BoxStream<'static, DomainEvent>;

/// Pluggable event bus backend, selected via the registry like any other
/// provider. Concrete implementations range from an in-process
/// `tokio::sync::broadcast` channel to a networked pub/sub system.
#[async_trait]
pub trait EventBusProvider: Send + Sync {
    /// Publishes an event to all current subscribers.
    async fn publish(&self, event: DomainEvent) -> Result<()>;

    /// Subscribes to the event stream from this point forward.
    fn subscribe(&self) -> DomainEventStream;

    /// Name of this provider, e.g. `"inprocess"`.
    fn provider_name(&self) -> &str;
}
