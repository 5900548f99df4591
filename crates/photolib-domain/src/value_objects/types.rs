//! Domain type definitions.
//!
//! Type aliases and small enums for dynamic domain concepts, kept as simple
//! strings/aliases at the boundary so new providers can be added without
//! changing core types.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Embedding provider identifier (e.g. "local-fastembed", "remote").
pub type EmbeddingProviderKind = String;

/// Vector store provider identifier (e.g. "local-file", "qdrant").
pub type VectorStoreProviderKind = String;

/// Image format, as sniffed from file content rather than trusted from the
/// upload's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG
    #[display("jpeg")]
    Jpeg,
    /// PNG
    #[display("png")]
    Png,
    /// GIF
    #[display("gif")]
    Gif,
    /// WebP
    #[display("webp")]
    WebP,
    /// BMP
    #[display("bmp")]
    Bmp,
    /// Content could not be decoded as any supported format (corrupt or
    /// truncated file); the record is still listed, bytes intact.
    #[display("unknown")]
    Unknown,
}

impl ImageFormat {
    /// Canonical lowercase file extension for this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Unknown => "bin",
        }
    }

    /// MIME type for this format.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
            Self::Bmp => "image/bmp",
            Self::Unknown => "application/octet-stream",
        }
    }
}

impl_from_str!(ImageFormat, "Unsupported image format: {}", {
    "jpeg" => ImageFormat::Jpeg,
    "jpg" => ImageFormat::Jpeg,
    "png" => ImageFormat::Png,
    "gif" => ImageFormat::Gif,
    "webp" => ImageFormat::WebP,
    "bmp" => ImageFormat::Bmp,
});

/// Lifecycle status of a point-cloud generation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum PointCloudTaskStatus {
    /// Queued, not yet picked up by a worker.
    #[display("pending")]
    Pending,
    /// Currently being generated.
    #[display("processing")]
    Processing,
    /// Finished successfully; the PLY artefact is available.
    #[display("completed")]
    Completed,
    /// Finished with an error.
    #[display("failed")]
    Failed,
}

impl PointCloudTaskStatus {
    /// Returns `true` if the task has reached a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Status of an agent session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum SessionStatus {
    /// The orchestrator is actively processing turns for this session.
    #[display("active")]
    Active,
    /// The session finished without error.
    #[display("completed")]
    Completed,
    /// The session terminated due to an unrecoverable error.
    #[display("failed")]
    Failed,
}
