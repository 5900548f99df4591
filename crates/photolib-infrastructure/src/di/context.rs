//! Composition root output: every resolved provider and application use case,
//! held behind `Arc` so HTTP handlers, the MCP surface, and the CLI can all
//! share one instance per process.

use std::sync::Arc;

use photolib_application::{
    AgentOrchestrator, Indexer, InMemoryJobManager, PointCloudManager, RecommendationWorkflow, SearchEngine, SessionStore, StaticToolRegistry, ToolDispatcher,
};
use photolib_domain::arc_getters;
use photolib_domain::ports::jobs::JobManagerInterface;
use photolib_domain::ports::providers::{EmbeddingProvider, ObjectStoreProvider, VectorStoreProvider};
use photolib_domain::ports::services::agent::AgentOrchestratorInterface;
use photolib_domain::ports::services::indexing::IndexerInterface;
use photolib_domain::ports::services::pointcloud::PointCloudManagerInterface;
use photolib_domain::ports::services::recommendation::{DeletionWorkflowInterface, RecommendationWorkflowInterface};
use photolib_domain::ports::services::search::SearchEngineInterface;
use photolib_domain::ports::services::tool_registry::ToolRegistryInterface;

use crate::config::AppConfig;
use crate::di::dispatcher::DefaultToolDispatcher;
use crate::di::event_bus_adapter::EventBusPublisher;
use crate::health::HealthReporter;

/// Everything the HTTP/MCP surfaces and the CLI need, assembled once at
/// startup by [`crate::di::bootstrap::init_app`].
pub struct AppContext {
    pub(crate) config: AppConfig,
    pub(crate) object_store: Arc<dyn ObjectStoreProvider>,
    pub(crate) embedding: Arc<dyn EmbeddingProvider>,
    pub(crate) vector_store: Arc<dyn VectorStoreProvider>,
    pub(crate) job_manager: Arc<InMemoryJobManager>,
    pub(crate) indexer: Arc<Indexer>,
    pub(crate) search_engine: Arc<SearchEngine>,
    pub(crate) pointcloud_manager: Arc<PointCloudManager>,
    pub(crate) recommendation: Arc<RecommendationWorkflow>,
    /// Kept only as its port: the concrete type is assembled in
    /// [`crate::di::bootstrap`] sharing a `pending` map with `recommendation`.
    pub(crate) deletion: Arc<dyn DeletionWorkflowInterface>,
    pub(crate) tool_registry: Arc<StaticToolRegistry>,
    pub(crate) session_store: Arc<SessionStore>,
    pub(crate) agent_orchestrator: Arc<AgentOrchestrator>,
    pub(crate) dispatcher: Arc<DefaultToolDispatcher>,
    pub(crate) events: Arc<EventBusPublisher>,
    pub(crate) health: Arc<HealthReporter>,
}

impl AppContext {
    arc_getters! {
        object_store: dyn ObjectStoreProvider,
        embedding: dyn EmbeddingProvider,
        vector_store: dyn VectorStoreProvider,
        job_manager: InMemoryJobManager,
        indexer: Indexer,
        search_engine: SearchEngine,
        pointcloud_manager: PointCloudManager,
        recommendation: RecommendationWorkflow,
        tool_registry: StaticToolRegistry,
        session_store: SessionStore,
        agent_orchestrator: AgentOrchestrator,
        dispatcher: DefaultToolDispatcher,
        events: EventBusPublisher,
        health: HealthReporter,
    }

    /// The effective configuration this context was built from.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Upcast to [`JobManagerInterface`], for use cases that only need the port.
    #[must_use]
    pub fn job_manager_port(&self) -> Arc<dyn JobManagerInterface> {
        self.job_manager.clone() as Arc<dyn JobManagerInterface>
    }

    /// Upcast to [`IndexerInterface`].
    #[must_use]
    pub fn indexer_port(&self) -> Arc<dyn IndexerInterface> {
        self.indexer.clone() as Arc<dyn IndexerInterface>
    }

    /// Upcast to [`SearchEngineInterface`].
    #[must_use]
    pub fn search_port(&self) -> Arc<dyn SearchEngineInterface> {
        self.search_engine.clone() as Arc<dyn SearchEngineInterface>
    }

    /// Upcast to [`PointCloudManagerInterface`].
    #[must_use]
    pub fn pointcloud_port(&self) -> Arc<dyn PointCloudManagerInterface> {
        self.pointcloud_manager.clone() as Arc<dyn PointCloudManagerInterface>
    }

    /// Upcast to [`RecommendationWorkflowInterface`].
    #[must_use]
    pub fn recommendation_port(&self) -> Arc<dyn RecommendationWorkflowInterface> {
        self.recommendation.clone() as Arc<dyn RecommendationWorkflowInterface>
    }

    /// The confirmed-deletion workflow, as its port.
    #[must_use]
    pub fn deletion_port(&self) -> Arc<dyn DeletionWorkflowInterface> {
        Arc::clone(&self.deletion)
    }

    /// Upcast to [`ToolRegistryInterface`].
    #[must_use]
    pub fn tool_registry_port(&self) -> Arc<dyn ToolRegistryInterface> {
        self.tool_registry.clone() as Arc<dyn ToolRegistryInterface>
    }

    /// Upcast to [`AgentOrchestratorInterface`].
    #[must_use]
    pub fn agent_orchestrator_port(&self) -> Arc<dyn AgentOrchestratorInterface> {
        self.agent_orchestrator.clone() as Arc<dyn AgentOrchestratorInterface>
    }

    /// Upcast to [`ToolDispatcher`], for transport handlers that invoke a
    /// catalogued tool directly (`edit_image`, `generate_social_media_caption`,
    /// `knowledge_qa`) without going through the agent orchestrator.
    #[must_use]
    pub fn dispatcher_port(&self) -> Arc<dyn ToolDispatcher> {
        self.dispatcher.clone() as Arc<dyn ToolDispatcher>
    }

    /// Subscribes to the domain event stream from this point forward, for
    /// the session event-stream endpoint.
    #[must_use]
    pub fn event_stream(&self) -> photolib_domain::ports::infrastructure::events::DomainEventStream {
        self.events.subscribe()
    }
}
