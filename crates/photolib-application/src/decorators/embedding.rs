//! Timing/outcome instrumentation for [`EmbeddingProvider`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use async_trait::async_trait;
use photolib_domain::error::Result;
use photolib_domain::ports::providers::{EmbedInput, Embedding, EmbeddingProvider};

/// Wraps an [`EmbeddingProvider`], recording call counts/failures and timing
/// every call through `tracing`.
pub struct InstrumentedEmbeddingProvider {
    inner: Arc<dyn EmbeddingProvider>,
    calls: AtomicU64,
    failures: AtomicU64,
}

impl InstrumentedEmbeddingProvider {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            inner,
            calls: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Total `embed`/`embed_batch` calls observed so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Total failed calls observed so far.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl EmbeddingProvider for InstrumentedEmbeddingProvider {
    async fn embed(&self, input: EmbedInput) -> Result<Embedding> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();
        let result = self.inner.embed(input).await;
        let elapsed = started.elapsed();
        if let Err(err) = &result {
            self.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(provider = self.inner.provider_name(), elapsed_ms = elapsed.as_millis() as u64, error = %err, "embed failed");
        } else {
            tracing::debug!(provider = self.inner.provider_name(), elapsed_ms = elapsed.as_millis() as u64, "embed");
        }
        result
    }

    async fn embed_batch(&self, inputs: &[EmbedInput]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();
        let result = self.inner.embed_batch(inputs).await;
        let elapsed = started.elapsed();
        if let Err(err) = &result {
            self.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(provider = self.inner.provider_name(), elapsed_ms = elapsed.as_millis() as u64, batch_size = inputs.len(), error = %err, "embed_batch failed");
        } else {
            tracing::debug!(provider = self.inner.provider_name(), elapsed_ms = elapsed.as_millis() as u64, batch_size = inputs.len(), "embed_batch");
        }
        result
    }

    fn vector_dimension(&self) -> usize {
        self.inner.vector_dimension()
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
