//! Resolves [`AppConfig`] into a fully wired [`AppContext`].

use std::sync::Arc;

use dashmap::DashMap;
use photolib_application::decorators::{CachedObjectStoreProvider, InstrumentedEmbeddingProvider, InstrumentedObjectStoreProvider, InstrumentedVectorStoreProvider};
use photolib_application::{AgentOrchestrator, DeletionWorkflow, Indexer, InMemoryJobManager, PointCloudManager, RecommendationWorkflow, SearchEngine, SessionStore, StaticToolRegistry};
use photolib_domain::error::Result;
use photolib_domain::registry::{
    resolve_cache_provider, resolve_edit_provider, resolve_embedding_provider, resolve_event_bus_provider,
    resolve_object_store_provider, resolve_point_cloud_provider, resolve_reasoning_provider,
    resolve_task_runner_provider, resolve_vector_store_provider, resolve_vision_provider,
};
use photolib_domain::ports::services::indexing::IndexingMode;

use crate::config::AppConfig;
use crate::di::context::AppContext;
use crate::di::dispatcher::DefaultToolDispatcher;
use crate::di::event_bus_adapter::EventBusPublisher;
use crate::health::HealthReporter;

/// Resolves every configured provider and assembles the application's use
/// cases into an [`AppContext`], ready for the HTTP/MCP surfaces and the CLI.
///
/// # Errors
///
/// Returns an error if any provider named in `config` isn't registered, or
/// if a provider's own construction fails (e.g. an unreachable remote
/// endpoint probed eagerly at startup).
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    let object_store_raw = resolve_object_store_provider(&config.object_store.clone().into())?;
    let embedding_raw = resolve_embedding_provider(&config.embedding.clone().into())?;
    let vector_store_raw = resolve_vector_store_provider(&config.vector_store.clone().into())?;
    let vision = resolve_vision_provider(&config.vision.clone().into())?;
    let edit = resolve_edit_provider(&config.edit.clone().into())?;
    let pointcloud_generator = resolve_point_cloud_provider(&config.pointcloud.clone().into())?;
    let task_runner = resolve_task_runner_provider(&config.task_runner.clone().into())?;
    let cache = resolve_cache_provider(&config.cache.clone().into())?;
    let event_bus = resolve_event_bus_provider(&config.events.clone().into())?;

    let reasoning = if config.reasoning.base_url.as_deref().is_some_and(|url| !url.is_empty()) {
        Some(resolve_reasoning_provider(&config.reasoning.clone().into())?)
    } else {
        None
    };

    let events = Arc::new(EventBusPublisher::new(event_bus));

    let object_store = Arc::new(InstrumentedObjectStoreProvider::new(Arc::new(CachedObjectStoreProvider::new(
        object_store_raw,
        cache,
        config.cache.ttl_secs.unwrap_or(300),
    ))));
    let embedding = Arc::new(InstrumentedEmbeddingProvider::new(embedding_raw));
    let vector_store = Arc::new(InstrumentedVectorStoreProvider::new(vector_store_raw));

    let job_manager = Arc::new(InMemoryJobManager::new());
    let session_store = Arc::new(SessionStore::new());
    let pending = Arc::new(DashMap::new());

    let indexer = Arc::new(Indexer::new(
        object_store.clone() as Arc<dyn photolib_domain::ports::providers::ObjectStoreProvider>,
        embedding.clone() as Arc<dyn photolib_domain::ports::providers::EmbeddingProvider>,
        vector_store.clone() as Arc<dyn photolib_domain::ports::providers::VectorStoreProvider>,
        task_runner.clone(),
        job_manager.clone() as Arc<dyn photolib_domain::ports::jobs::JobManagerInterface>,
        events.clone() as Arc<dyn photolib_domain::events::EventPublisher>,
        config.collection.clone(),
        IndexingMode::Sync,
    ));

    let search_engine = Arc::new(SearchEngine::new(
        embedding.clone() as Arc<dyn photolib_domain::ports::providers::EmbeddingProvider>,
        vector_store.clone() as Arc<dyn photolib_domain::ports::providers::VectorStoreProvider>,
        config.collection.clone(),
    ));

    let pointcloud_manager = Arc::new(PointCloudManager::new(
        object_store.clone() as Arc<dyn photolib_domain::ports::providers::ObjectStoreProvider>,
        pointcloud_generator.clone(),
        task_runner.clone(),
        job_manager.clone() as Arc<dyn photolib_domain::ports::jobs::JobManagerInterface>,
        events.clone() as Arc<dyn photolib_domain::events::EventPublisher>,
    ));

    let recommendation = Arc::new(RecommendationWorkflow::new(
        vision.clone(),
        object_store.clone() as Arc<dyn photolib_domain::ports::providers::ObjectStoreProvider>,
        session_store.clone(),
        pending.clone(),
    ));

    let deletion: Arc<dyn photolib_domain::ports::services::recommendation::DeletionWorkflowInterface> = Arc::new(DeletionWorkflow::new(
        object_store.clone() as Arc<dyn photolib_domain::ports::providers::ObjectStoreProvider>,
        vector_store.clone() as Arc<dyn photolib_domain::ports::providers::VectorStoreProvider>,
        config.collection.clone(),
        pending.clone(),
    ));

    let tool_registry = Arc::new(StaticToolRegistry::new());

    let dispatcher = Arc::new(DefaultToolDispatcher::new(
        search_engine.clone() as Arc<dyn photolib_domain::ports::services::SearchEngineInterface>,
        indexer.clone() as Arc<dyn photolib_domain::ports::services::IndexerInterface>,
        recommendation.clone() as Arc<dyn photolib_domain::ports::services::RecommendationWorkflowInterface>,
        deletion.clone(),
        pointcloud_manager.clone() as Arc<dyn photolib_domain::ports::services::PointCloudManagerInterface>,
        vision,
        edit,
        reasoning.clone(),
        object_store.clone() as Arc<dyn photolib_domain::ports::providers::ObjectStoreProvider>,
        pending,
    ));

    let agent_orchestrator = Arc::new(
        AgentOrchestrator::new(reasoning, tool_registry.clone() as Arc<dyn photolib_domain::ports::services::ToolRegistryInterface>, dispatcher.clone(), session_store.clone())
            .with_max_iterations(config.agent.max_iterations),
    );

    let health = Arc::new(HealthReporter::new(
        embedding.clone() as Arc<dyn photolib_domain::ports::providers::EmbeddingProvider>,
        vector_store.clone() as Arc<dyn photolib_domain::ports::providers::VectorStoreProvider>,
        object_store.clone() as Arc<dyn photolib_domain::ports::providers::ObjectStoreProvider>,
        config.collection.clone(),
        job_manager.clone() as Arc<dyn photolib_domain::ports::jobs::JobManagerInterface>,
    ));

    Ok(AppContext {
        config,
        object_store,
        embedding,
        vector_store,
        job_manager,
        indexer,
        search_engine,
        pointcloud_manager,
        recommendation,
        deletion,
        tool_registry,
        session_store,
        agent_orchestrator,
        dispatcher,
        events,
        health,
    })
}
