//! Domain Entities
//!
//! Core business entities representing the main concepts of the photo
//! library: images, their vector-store counterparts, point-cloud generation
//! tasks, and agent conversation sessions.

/// The core photo entity: bytes-backed, system-assigned identity.
pub mod image;
pub use image::{Image, ImageMetadata};

/// Vector store row and search result shapes.
pub mod vector_record;
pub use vector_record::{ScoredRecord, VectorPayload, VectorRecord};

/// 3D point-cloud generation task state machine.
pub mod point_cloud_task;
pub use point_cloud_task::{PointCloudQuality, PointCloudTask};

/// Conversational session state for the agent orchestrator.
pub mod session;
pub use session::{ScoredImageRef, Session, SessionEntry, SessionRole};

/// Tool invocation tracking.
pub mod tool_call;
pub use tool_call::ToolCall;
