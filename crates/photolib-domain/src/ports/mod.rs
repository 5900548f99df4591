//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers. Ports
//! are organized by purpose and enable dependency injection with clear
//! separation of concerns.
//!
//! ## Architecture
//!
//! Ports define the contracts that external layers must implement. This
//! follows the Dependency Inversion Principle:
//! - High-level modules (domain) define interfaces
//! - Low-level modules (providers, infrastructure, application) implement them
//!
//! ## Organization
//!
//! - **infrastructure/** - cross-cutting infrastructure ports (lifecycle, logging, events)
//! - **providers/** - external service provider ports (embedding, vector store, object store, ...)
//! - **services/** - application service ports (search, indexing, agent, point cloud, ...)
//! - **jobs** - the async job core's tracking interface (C8)

/// Infrastructure service ports.
pub mod infrastructure;
/// External service provider ports.
pub mod providers;
/// Application service ports.
pub mod services;

/// Async job core: generic background job tracking.
pub mod jobs;

// ============================================================================
// Canonical re-exports — the ONE import surface for all port traits/types.
// Consumers should use `use photolib_domain::ports::{...};` only.
// ============================================================================

// --- Infrastructure ---
pub use infrastructure::{
    DependencyHealth, DependencyHealthCheck, DomainEventStream, EventBusProvider,
    ExtendedHealthResponse, LifecycleManaged, LogLevel, OperationLogger, PortServiceState,
    ShutdownCoordinator,
};

// --- Providers ---
pub use providers::{
    CacheEntryConfig, CacheProvider, CacheStats, CollectionInfo, DEFAULT_CACHE_NAMESPACE,
    DEFAULT_CACHE_TTL_SECS, EditRequest, EditedOutput, EmbedInput, Embedding,
    EmbeddingProvider, ImageEditProvider, ImageInput, ImageMetadataEdit, ListSortBy,
    ObjectStoreProvider, ObjectStoreStats,
    PointCloudGenerationProvider, PointCloudGenerationResult, PointCloudRequest,
    ReasoningEngineProvider, ReasoningMessage, ReasoningRole, ReasoningStep, ReasoningToolCall,
    SortOrder, TaskRunnerProvider, VectorFilter, VectorStoreProvider, VisionImage,
    VisionModelProvider, VisionRequest, VisionResponse,
};

// --- Services ---
pub use services::{
    AgentOrchestratorInterface, AgentTurn, ArtefactExtraction, DeletionOutcome,
    DeletionPreviewEntry, DeletionPreviewItem, DeletionWorkflowInterface, ExtractedImage,
    ExtractedPointCloud, ExtractedRecommendation, IndexOutcome, IndexerInterface, IndexingMode,
    IndexingOptions, MetaQuery, ParamLocation, ParamSpec, ParamType, PointCloudManagerInterface,
    RecommendationOutcome, RecommendationWorkflowInterface, ReindexReport, RuleBasedIntent,
    SearchEngineInterface, SearchHit, SearchQuery, SessionMonitorHandle, ToolBinding,
    ToolDescriptor, ToolRegistryInterface,
};

// --- Jobs ---
pub use jobs::{
    Job, JobCounts, JobManagerInterface, JobProgressUpdate, JobResult, JobStatus, JobType,
};
