//! In-memory implementation of the async job core (C8).

use dashmap::DashMap;
use photolib_domain::ports::jobs::{
    Job, JobCounts, JobId, JobManagerInterface, JobProgressUpdate, JobResult, JobStatus, JobType,
};

/// Tracks job lifecycle entirely in process memory. Jobs do not survive a
/// restart; the point-cloud and indexing use cases reconstruct what they can
/// from on-disk state when a restart loses a job's in-flight record.
#[derive(Default)]
pub struct InMemoryJobManager {
    jobs: DashMap<JobId, Job>,
}

impl InMemoryJobManager {
    /// Builds an empty job manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobManagerInterface for InMemoryJobManager {
    fn list_jobs(&self, job_type: Option<&JobType>) -> Vec<Job> {
        let mut jobs: Vec<Job> = self
            .jobs
            .iter()
            .filter(|entry| job_type.is_none_or(|t| &entry.job_type == t))
            .map(|entry| entry.clone())
            .collect();
        jobs.sort_by_key(|j| j.created_at);
        jobs
    }

    fn get_job(&self, job_id: &JobId) -> Option<Job> {
        self.jobs.get(job_id).map(|entry| entry.clone())
    }

    fn submit_job(&self, job_type: JobType, label: &str, total_items: usize) -> JobId {
        let id = JobId::new();
        let mut job = Job::new(id, job_type, label);
        job.total_items = total_items;
        self.jobs.insert(id, job);
        id
    }

    fn start_job(&self, job_id: &JobId) {
        if let Some(mut job) = self.jobs.get_mut(job_id) {
            job.status = JobStatus::Running;
            job.started_at = Some(chrono::Utc::now().timestamp());
        }
    }

    fn update_progress(&self, job_id: &JobId, update: JobProgressUpdate) {
        if let Some(mut job) = self.jobs.get_mut(job_id) {
            job.processed_items = update.processed_items;
            job.total_items = update.total_items;
            job.current_item = update.current_item;
            if job.total_items > 0 {
                job.progress_percent =
                    ((job.processed_items as f64 / job.total_items as f64) * 100.0).clamp(0.0, 100.0) as u8;
            }
        }
    }

    fn complete_job(&self, job_id: &JobId, result: Option<JobResult>) {
        if let Some(mut job) = self.jobs.get_mut(job_id) {
            job.status = JobStatus::Completed;
            job.progress_percent = 100;
            job.completed_at = Some(chrono::Utc::now().timestamp());
            job.result = result;
        }
    }

    fn fail_job(&self, job_id: &JobId, error: &str) {
        if let Some(mut job) = self.jobs.get_mut(job_id) {
            job.status = JobStatus::Failed(error.to_owned());
            job.completed_at = Some(chrono::Utc::now().timestamp());
        }
    }

    fn cancel_job(&self, job_id: &JobId) {
        if let Some(mut job) = self.jobs.get_mut(job_id) {
            if !job.status.is_terminal() {
                job.status = JobStatus::Cancelled;
                job.completed_at = Some(chrono::Utc::now().timestamp());
            }
        }
    }

    fn job_counts(&self) -> JobCounts {
        let mut counts = JobCounts::default();
        for entry in &self.jobs {
            match &entry.status {
                JobStatus::Queued => counts.queued += 1,
                JobStatus::Running => counts.running += 1,
                JobStatus::Completed => counts.completed += 1,
                JobStatus::Failed(_) => counts.failed += 1,
                JobStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_transitions_update_counts() {
        let mgr = InMemoryJobManager::new();
        let id = mgr.submit_job(JobType::Indexing, "ingest batch", 10);
        assert_eq!(mgr.job_counts().queued, 1);

        mgr.start_job(&id);
        assert_eq!(mgr.job_counts().running, 1);

        mgr.update_progress(
            &id,
            JobProgressUpdate {
                current_item: Some("img-7".to_owned()),
                processed_items: 7,
                total_items: 10,
            },
        );
        assert_eq!(mgr.get_job(&id).unwrap().progress_percent, 70);

        mgr.complete_job(
            &id,
            Some(JobResult {
                summary: "done".to_owned(),
                items_processed: 10,
                items_failed: 0,
                metadata: Default::default(),
            }),
        );
        assert_eq!(mgr.job_counts().completed, 1);
        assert!(mgr.get_job(&id).unwrap().status == JobStatus::Completed);
    }

    #[test]
    fn cancel_is_a_no_op_on_terminal_jobs() {
        let mgr = InMemoryJobManager::new();
        let id = mgr.submit_job(JobType::Analysis, "probe", 1);
        mgr.fail_job(&id, "boom");
        mgr.cancel_job(&id);
        assert!(matches!(mgr.get_job(&id).unwrap().status, JobStatus::Failed(_)));
    }

    #[test]
    fn list_jobs_filters_by_type() {
        let mgr = InMemoryJobManager::new();
        mgr.submit_job(JobType::Indexing, "a", 0);
        mgr.submit_job(JobType::Analysis, "b", 0);
        assert_eq!(mgr.list_jobs(Some(&JobType::Indexing)).len(), 1);
        assert_eq!(mgr.list_jobs(None).len(), 2);
    }
}
