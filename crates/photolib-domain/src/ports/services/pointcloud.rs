//! Point-cloud task lifecycle management and session background-event
//! delivery (C8/§4.9 session monitor).

use async_trait::async_trait;

use crate::entities::{PointCloudQuality, PointCloudTask};
use crate::error::Result;
use crate::ports::providers::embedding::ImageInput;
use crate::value_objects::{ImageId, PointCloudTaskId, SessionId};

/// Creates, tracks, and serves the output of point-cloud generation tasks.
///
/// Generation itself runs through the async job core (C8): [`Self::request`]
/// only persists a [`PointCloudTask`] in `Pending` state and enqueues the
/// work; progress is observed via [`Self::get_task`] or a session's system
/// events once the session monitor picks up completion.
#[async_trait]
pub trait PointCloudManagerInterface: Send + Sync {
    /// Creates a task for `source_image` and enqueues its generation job.
    async fn request(
        &self,
        session_id: SessionId,
        source_image: ImageId,
        quality: PointCloudQuality,
    ) -> Result<PointCloudTask>;

    /// Looks up a task's current state.
    async fn get_task(&self, task_id: PointCloudTaskId) -> Result<PointCloudTask>;

    /// Returns the generated point cloud's bytes, once `Completed`. Returns
    /// [`crate::error::Error::NotConfirmed`]-shaped guidance isn't
    /// applicable here; a task not yet complete yields
    /// [`crate::error::Error::ProviderUnavailable`] describing its status.
    async fn fetch_output(&self, task_id: PointCloudTaskId) -> Result<ImageInput>;
}

/// A handle returned by the infrastructure layer when it schedules the
/// periodic sweep that promotes completed background jobs (point-cloud
/// generation, deferred indexing) into a session's transcript as system
/// events. The domain only needs to know the sweep can be stopped; its
/// scheduling cadence and implementation are infrastructure concerns.
#[async_trait]
pub trait SessionMonitorHandle: Send + Sync {
    /// Stops the background sweep. Idempotent.
    async fn stop(&self);
}
