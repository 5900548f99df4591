//! Application service port interfaces for the core request-to-tool
//! orchestration and indexing pipeline (C4-C9 in the design).

/// Agent orchestrator: ReAct tool-calling loop plus artefact extraction (C7).
pub mod agent;
/// Indexer: orchestrates uploads into the object store and vector store (C5).
pub mod indexing;
/// Point-cloud generation task management and session monitoring (C8).
pub mod pointcloud;
/// Multi-image aesthetic recommendation and confirmed deletion (C9).
pub mod recommendation;
/// Search engine: text/image/hybrid/metadata query composition (C4).
pub mod search;
/// Declarative tool registry consumed by the orchestrator (C6).
pub mod tool_registry;

pub use agent::{
    AgentOrchestratorInterface, AgentTurn, ArtefactExtraction, ExtractedImage, ExtractedPointCloud,
    ExtractedRecommendation, RuleBasedIntent,
};
pub use indexing::{IndexOutcome, IndexerInterface, IndexingMode, IndexingOptions, ReindexReport};
pub use pointcloud::{PointCloudManagerInterface, SessionMonitorHandle};
pub use recommendation::{
    DeletionOutcome, DeletionPreviewEntry, DeletionPreviewItem, DeletionWorkflowInterface,
    RecommendationOutcome, RecommendationWorkflowInterface,
};
pub use search::{MetaQuery, SearchEngineInterface, SearchHit, SearchQuery};
pub use tool_registry::{
    ParamLocation, ParamSpec, ParamType, ToolBinding, ToolDescriptor, ToolRegistryInterface,
};
