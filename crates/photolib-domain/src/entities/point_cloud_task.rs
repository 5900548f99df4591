//! 3D point-cloud generation task tracking.

use chrono::{DateTime, Utc};
use derive_more::Display;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::value_objects::{ImageId, PointCloudTaskId, PointCloudTaskStatus};

/// Quality profile requested for point-cloud generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PointCloudQuality {
    /// Prioritises fidelity over generation time.
    #[display("balanced")]
    Balanced,
    /// Prioritises generation time over fidelity.
    #[display("fast")]
    Fast,
}

impl_from_str!(PointCloudQuality, "Unknown point-cloud quality: {}", {
    "balanced" => PointCloudQuality::Balanced,
    "fast" => PointCloudQuality::Fast,
});

/// Tracks one point-cloud generation request from submission to completion.
///
/// Status transitions are monotonic: `PENDING -> PROCESSING -> {COMPLETED,
/// FAILED}`. Terminal states are never overwritten. If the in-memory record
/// for a task is lost (e.g. process restart) but its PLY file still exists on
/// disk, the task is reconstructed as `COMPLETED` with best-effort fields —
/// see [`crate::constants::values::POINT_CLOUD_BYTES_PER_POINT_ESTIMATE`].
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PointCloudTask {
    /// System-assigned task identifier.
    pub id: PointCloudTaskId,
    /// The image this point cloud was generated from.
    pub source_image_id: ImageId,
    /// Current lifecycle status.
    pub status: PointCloudTaskStatus,
    /// Requested quality profile.
    pub quality: PointCloudQuality,
    /// Relative path of the generated PLY file, once known.
    pub file_path: Option<String>,
    /// Size in bytes of the generated PLY file.
    pub file_size: Option<u64>,
    /// Estimated point count (`file_size / BYTES_PER_POINT_ESTIMATE`).
    pub point_count: Option<u64>,
    /// URL for interactively viewing the point cloud, passed through from the
    /// external service (absolute URLs as-is; relative URLs are prefixed with
    /// the service base by the transport layer).
    pub view_url: Option<String>,
    /// Download URL, per the `/pointcloud/download/{task_id}` convention.
    pub download_url: Option<String>,
    /// Error message, set only when `status == Failed`.
    pub error_message: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the terminal transition, if reached.
    pub completed_at: Option<DateTime<Utc>>,
}

impl PointCloudTask {
    /// Creates a new task in `Pending` status.
    #[must_use]
    pub fn new(id: PointCloudTaskId, source_image_id: ImageId, quality: PointCloudQuality) -> Self {
        Self {
            id,
            source_image_id,
            status: PointCloudTaskStatus::Pending,
            quality,
            file_path: None,
            file_size: None,
            point_count: None,
            view_url: None,
            download_url: None,
            error_message: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Returns the conventional download URL for this task.
    #[must_use]
    pub fn download_path(&self) -> String {
        format!("/pointcloud/download/{}", self.id)
    }
}
