//! Tokio-backed background task runner.

use std::sync::Arc;

use futures::future::BoxFuture;
use photolib_domain::error::Result;
use photolib_domain::ports::TaskRunnerProvider;
use photolib_domain::registry::task_runner::{
    TASK_RUNNER_PROVIDERS, TaskRunnerProviderConfig, TaskRunnerProviderEntry,
};

/// Spawns background tasks onto the ambient tokio runtime. Fire-and-forget:
/// a task that panics or errors is not reported back to the caller, matching
/// the point-cloud and session-monitor background workflows this backs.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTaskRunner;

impl TaskRunnerProvider for TokioTaskRunner {
    fn spawn(&self, task: BoxFuture<'static, ()>) -> Result<()> {
        tokio::spawn(task);
        Ok(())
    }
}

fn tokio_runner_factory(
    _config: &TaskRunnerProviderConfig,
) -> std::result::Result<Arc<dyn TaskRunnerProvider>, String> {
    Ok(Arc::new(TokioTaskRunner))
}

#[linkme::distributed_slice(TASK_RUNNER_PROVIDERS)]
static TOKIO_PROVIDER: TaskRunnerProviderEntry = TaskRunnerProviderEntry {
    name: "tokio",
    description: "Spawns background work onto the ambient tokio runtime",
    build: tokio_runner_factory,
};
