//! Point-cloud generation task lifecycle and session monitor (C8/§4.9).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use photolib_domain::constants::values::{SESSION_MONITOR_POLL_INTERVAL_SECS, SESSION_MONITOR_TIMEOUT_SECS};
use photolib_domain::entities::{PointCloudQuality, PointCloudTask};
use photolib_domain::error::{Error, Result};
use photolib_domain::events::{DomainEvent, EventPublisher};
use photolib_domain::ports::jobs::{JobResult, JobType};
use photolib_domain::ports::providers::embedding::ImageInput;
use photolib_domain::ports::providers::pointcloud::{PointCloudGenerationProvider, PointCloudRequest};
use photolib_domain::ports::providers::{ObjectStoreProvider, TaskRunnerProvider};
use photolib_domain::ports::services::pointcloud::{PointCloudManagerInterface, SessionMonitorHandle};
use photolib_domain::ports::JobManagerInterface;
use photolib_domain::value_objects::{ImageId, PointCloudTaskId, PointCloudTaskStatus, SessionId};

use crate::use_cases::session_store::SessionStore;

/// Tracks point-cloud tasks in memory and drives their generation through
/// the async job core.
pub struct PointCloudManager {
    object_store: Arc<dyn ObjectStoreProvider>,
    generator: Arc<dyn PointCloudGenerationProvider>,
    task_runner: Arc<dyn TaskRunnerProvider>,
    job_manager: Arc<dyn JobManagerInterface>,
    events: Arc<dyn EventPublisher>,
    tasks: Arc<DashMap<PointCloudTaskId, PointCloudTask>>,
}

impl PointCloudManager {
    /// Builds a point-cloud manager over the given providers.
    #[must_use]
    pub fn new(
        object_store: Arc<dyn ObjectStoreProvider>,
        generator: Arc<dyn PointCloudGenerationProvider>,
        task_runner: Arc<dyn TaskRunnerProvider>,
        job_manager: Arc<dyn JobManagerInterface>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            object_store,
            generator,
            task_runner,
            job_manager,
            events,
            tasks: Arc::new(DashMap::new()),
        }
    }

    /// Shared task map, used by [`SessionMonitor`] to observe completions
    /// without going through the trait object.
    #[must_use]
    pub fn tasks(&self) -> Arc<DashMap<PointCloudTaskId, PointCloudTask>> {
        Arc::clone(&self.tasks)
    }
}

#[async_trait]
impl PointCloudManagerInterface for PointCloudManager {
    async fn request(&self, session_id: SessionId, source_image: ImageId, quality: PointCloudQuality) -> Result<PointCloudTask> {
        let (bytes, media_type) = self
            .object_store
            .get(&source_image)
            .await?
            .ok_or_else(|| Error::not_found(format!("image {source_image}")))?;

        let task_id = PointCloudTaskId::new();
        let task = PointCloudTask::new(task_id, source_image, quality);
        self.tasks.insert(task_id, task.clone());

        let job_id = self.job_manager.submit_job(JobType::Custom("pointcloud".to_owned()), "point-cloud generation", 1);
        self.job_manager.start_job(&job_id);

        let generator = Arc::clone(&self.generator);
        let job_manager = Arc::clone(&self.job_manager);
        let events = Arc::clone(&self.events);
        let tasks = Arc::clone(&self.tasks);

        if let Some(mut entry) = self.tasks.get_mut(&task_id) {
            entry.status = PointCloudTaskStatus::Processing;
        }

        self.task_runner.spawn(Box::pin(async move {
            let result = generator
                .generate(PointCloudRequest {
                    image_bytes: bytes,
                    media_type,
                    quality,
                })
                .await;

            match result {
                Ok(output) => {
                    if let Some(mut entry) = tasks.get_mut(&task_id) {
                        entry.status = PointCloudTaskStatus::Completed;
                        entry.download_url = Some(output.download_url);
                        entry.view_url = output.view_url;
                        entry.completed_at = Some(chrono::Utc::now());
                    }
                    job_manager.complete_job(
                        &job_id,
                        Some(JobResult {
                            summary: format!("point cloud ready for {task_id}"),
                            items_processed: 1,
                            items_failed: 0,
                            metadata: Default::default(),
                        }),
                    );
                    let _ = events.publish(DomainEvent::PointCloudCompleted { session_id, task_id }).await;
                }
                Err(err) => {
                    if let Some(mut entry) = tasks.get_mut(&task_id) {
                        entry.status = PointCloudTaskStatus::Failed;
                        entry.error_message = Some(err.to_string());
                        entry.completed_at = Some(chrono::Utc::now());
                    }
                    job_manager.fail_job(&job_id, &err.to_string());
                    let _ = events
                        .publish(DomainEvent::PointCloudFailed {
                            session_id,
                            task_id,
                            reason: err.to_string(),
                        })
                        .await;
                }
            }
        }))?;

        Ok(task)
    }

    async fn get_task(&self, task_id: PointCloudTaskId) -> Result<PointCloudTask> {
        self.tasks
            .get(&task_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::not_found(format!("point-cloud task {task_id}")))
    }

    async fn fetch_output(&self, task_id: PointCloudTaskId) -> Result<ImageInput> {
        let task = self.get_task(task_id).await?;
        if task.status != PointCloudTaskStatus::Completed {
            return Err(Error::provider_unavailable(
                "pointcloud",
                format!("task {task_id} is {}", task.status),
            ));
        }
        let download_url = task
            .download_url
            .ok_or_else(|| Error::internal(format!("task {task_id} completed without a download url")))?;
        let bytes = self.generator.download(&download_url).await?;
        Ok(ImageInput {
            bytes,
            media_type: "application/octet-stream".to_owned(),
        })
    }
}

/// Background sweep that promotes completed/failed point-cloud tasks into
/// their owning session's transcript as system events, per the session
/// monitor described in §4.9.
pub struct SessionMonitor {
    handle: tokio::task::JoinHandle<()>,
}

impl SessionMonitor {
    /// Starts polling `tasks` every [`SESSION_MONITOR_POLL_INTERVAL_SECS`],
    /// appending a system event to `session_store` the first time a task
    /// tracked against `session_id` reaches a terminal state. Gives up on a
    /// single task after [`SESSION_MONITOR_TIMEOUT_SECS`] without a transition.
    #[must_use]
    pub fn start(
        session_id: SessionId,
        task_id: PointCloudTaskId,
        tasks: Arc<DashMap<PointCloudTaskId, PointCloudTask>>,
        session_store: Arc<SessionStore>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let deadline = tokio::time::Instant::now() + Duration::from_secs(SESSION_MONITOR_TIMEOUT_SECS);
            let mut interval = tokio::time::interval(Duration::from_secs(SESSION_MONITOR_POLL_INTERVAL_SECS));

            loop {
                interval.tick().await;
                if tokio::time::Instant::now() >= deadline {
                    break;
                }

                let Some(task) = tasks.get(&task_id).map(|entry| entry.clone()) else {
                    break;
                };

                if task.status.is_terminal() {
                    let event = if task.status == PointCloudTaskStatus::Completed {
                        "pointcloud_completed"
                    } else {
                        "pointcloud_failed"
                    };
                    let payload = serde_json::json!({
                        "task_id": task_id.to_string(),
                        "status": task.status.to_string(),
                        "download_url": task.download_url,
                        "view_url": task.view_url,
                        "error_message": task.error_message,
                    });
                    session_store.append(session_id, photolib_domain::entities::SessionEntry::system_event(event, payload));
                    break;
                }
            }
        });

        Self { handle }
    }
}

#[async_trait]
impl SessionMonitorHandle for SessionMonitor {
    async fn stop(&self) {
        self.handle.abort();
    }
}
