//! Point-cloud generation provider port: the remote 3DGS service behind
//! `generate_pointcloud`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::entities::PointCloudQuality;
use crate::error::Result;

/// Parameters for a single point-cloud generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudRequest {
    /// Source image bytes, uploaded as a multipart `image` field.
    pub image_bytes: Vec<u8>,
    /// Media type of `image_bytes`.
    pub media_type: String,
    /// Requested quality profile.
    pub quality: PointCloudQuality,
}

/// Successful result of a generation call, before the PLY bytes are
/// downloaded and persisted by [`crate::ports::services::PointCloudManagerInterface`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointCloudGenerationResult {
    /// URL the PLY artefact can be downloaded from.
    pub download_url: String,
    /// Interactive view URL, passed through verbatim (absolute as-is,
    /// relative prefixed with the service base by the caller).
    pub view_url: Option<String>,
    /// Backend-reported metadata (point count, generation time, etc), passed
    /// through without interpretation.
    pub metadata: serde_json::Value,
}

/// A remote 3D point-cloud generation service. Requests are submitted as
/// `multipart(image, quality, return_format=url, simplify_ply=true)`; on any
/// HTTP error, timeout, or a `success=false` response body the call fails.
#[async_trait]
pub trait PointCloudGenerationProvider: Send + Sync {
    /// Submits one generation request and returns the backend's response,
    /// before the PLY bytes are fetched.
    async fn generate(&self, request: PointCloudRequest) -> Result<PointCloudGenerationResult>;

    /// Downloads the PLY bytes from a `download_url` returned by [`Self::generate`].
    async fn download(&self, url: &str) -> Result<Vec<u8>>;

    /// Identifies the backend for logging and metrics labelling.
    fn provider_name(&self) -> &str;
}
