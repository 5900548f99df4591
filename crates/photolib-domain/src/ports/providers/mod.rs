//! External Provider Ports
//!
//! Ports for the external services the domain depends on: embedding
//! generation, vector storage, object storage, and the three single-call
//! remote models (vision, image edit, point-cloud). Exactly one
//! implementation of each provider trait is active per process; selection
//! happens in [`crate::registry`] from configuration.
//!
//! | Port | Description |
//! | ------ | ------------- |
//! | [`EmbeddingProvider`] | Unit-length multimodal embeddings (C1) |
//! | [`VectorStoreProvider`] | Filtered cosine similarity search (C2) |
//! | [`ObjectStoreProvider`] | Image byte persistence (C3) |
//! | [`VisionModelProvider`] | Captions, VQA, analysis, recommendation |
//! | [`ImageEditProvider`] | Remote image editing |
//! | [`CacheProvider`] | Optional result caching |

/// Cache provider port, used by the search engine's optional result cache.
pub mod cache;
/// Image-edit provider port: the remote model behind `edit_image`.
pub mod edit;
/// Embedding provider port.
pub mod embedding;
/// Object store provider port: persists image bytes under a UUID.
pub mod object_store;
/// Point-cloud generation provider port: the remote 3DGS service.
pub mod pointcloud;
/// Reasoning-engine provider port: the tool-calling LLM behind the agent orchestrator.
pub mod reasoning;
/// Background task runner provider port.
pub mod task;
/// Vector store provider port.
pub mod vector_store;
/// Vision model provider port: captions, VQA, analysis, recommendation.
pub mod vision;

pub use cache::{CacheEntryConfig, CacheProvider, CacheStats, DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECS};
pub use edit::{EditRequest, EditedOutput, ImageEditProvider};
pub use embedding::{EmbedInput, Embedding, EmbeddingProvider, ImageInput};
pub use object_store::{ImageMetadataEdit, ListSortBy, ObjectStoreProvider, ObjectStoreStats, SortOrder};
pub use pointcloud::{PointCloudGenerationProvider, PointCloudGenerationResult, PointCloudRequest};
pub use reasoning::{ReasoningEngineProvider, ReasoningMessage, ReasoningRole, ReasoningStep, ReasoningToolCall};
pub use task::TaskRunnerProvider;
pub use vector_store::{CollectionInfo, VectorFilter, VectorStoreProvider};
pub use vision::{VisionImage, VisionModelProvider, VisionRequest, VisionResponse};
