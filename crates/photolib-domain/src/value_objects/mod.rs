//! Value objects: small, immutable types with no identity of their own.

pub mod config;
pub mod ids;
pub mod types;

pub use config::{EmbeddingConfig, VectorStoreConfig};
pub use ids::{
    CollectionId, ImageId, OperationId, PointCloudTaskId, RecommendationId, SessionId, ToolCallId,
};
pub use types::{
    EmbeddingProviderKind, ImageFormat, PointCloudTaskStatus, SessionStatus,
    VectorStoreProviderKind,
};
