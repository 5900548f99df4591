//! Event Publisher Domain Port
//!
//! Defines the business contract for publishing system events. This abstraction
//! enables services to publish events without coupling to a specific transport
//! (in-process broadcast, a message bus, etc.).

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::value_objects::{ImageId, PointCloudTaskId, SessionId};

/// Service lifecycle state for managed services.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceState {
    /// Service is starting up.
    Starting,
    /// Service is running normally.
    Running,
    /// Service is stopping.
    Stopping,
    /// Service is stopped.
    #[default]
    Stopped,
    /// Service failed with error.
    Failed {
        /// Reason for failure.
        reason: String,
    },
}

/// System-wide event types for decoupled service communication.
///
/// Published by the application layer as background work completes;
/// consumed by the session monitor to surface results into a session's
/// transcript as [`crate::entities::SessionEntry::system_event`] entries,
/// and by observability code for ambient logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DomainEvent {
    /// An uploaded image finished embedding and upserting into the vector
    /// store, completing a deferred ([`crate::ports::services::IndexingMode::Async`]) ingest.
    ImageIndexed {
        /// The session the originating ingest call belongs to, if tracked.
        session_id: Option<SessionId>,
        /// The indexed image.
        image_id: ImageId,
    },
    /// An indexing attempt failed during the async job core's processing.
    ImageIndexingFailed {
        /// The session the originating ingest call belongs to, if tracked.
        session_id: Option<SessionId>,
        /// The image whose indexing failed.
        image_id: ImageId,
        /// Error text.
        reason: String,
    },
    /// A point-cloud generation task finished successfully.
    PointCloudCompleted {
        /// The session that requested generation.
        session_id: SessionId,
        /// The completed task.
        task_id: PointCloudTaskId,
    },
    /// A point-cloud generation task failed.
    PointCloudFailed {
        /// The session that requested generation.
        session_id: SessionId,
        /// The failed task.
        task_id: PointCloudTaskId,
        /// Error text.
        reason: String,
    },
    /// A full `reindex_all` sweep completed.
    ReindexCompleted {
        /// Number of images rebuilt.
        reindexed: u64,
        /// Number of images that failed to rebuild.
        failed: u64,
        /// Duration in milliseconds.
        duration_ms: u64,
    },
    /// Cache invalidation requested.
    CacheInvalidate {
        /// Namespace to invalidate (`None` = all).
        namespace: Option<String>,
    },
    /// A managed service's lifecycle state changed.
    ServiceStateChanged {
        /// Name of the service.
        name: String,
        /// New state.
        state: ServiceState,
        /// Previous state, if known.
        previous_state: Option<ServiceState>,
    },
    /// Configuration section reloaded.
    ConfigReloaded {
        /// Section that was reloaded.
        section: String,
        /// Timestamp of reload.
        timestamp: DateTime<Utc>,
    },
    /// Health check sweep completed.
    HealthCheckCompleted {
        /// Overall status.
        status: String,
        /// Number of healthy dependencies.
        healthy_count: usize,
        /// Number of unhealthy dependencies.
        unhealthy_count: usize,
    },
    /// A search query executed, for ambient observability.
    SearchExecuted {
        /// Query text, when the query was text-based.
        query: Option<String>,
        /// Number of results returned.
        results: usize,
        /// Duration in milliseconds.
        duration_ms: u64,
    },
}

/// Domain port for publishing system events.
///
/// Services use this trait to publish events that other parts of the system
/// (the session monitor, ambient logging) can react to, without coupling to
/// a specific transport implementation.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes an event to all subscribers. "Successfully published" means
    /// the event was sent, not necessarily that subscribers received it.
    async fn publish(&self, event: DomainEvent) -> Result<()>;

    /// Returns true if at least one subscriber is listening, useful for
    /// avoiding unnecessary event construction if no one is listening.
    fn has_subscribers(&self) -> bool;
}

/// Shared event publisher for dependency injection.
pub type SharedEventPublisher = Arc<dyn EventPublisher>;
