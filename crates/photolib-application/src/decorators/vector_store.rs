//! Timing/outcome instrumentation for [`VectorStoreProvider`].

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use photolib_domain::entities::{ScoredRecord, VectorPayload, VectorRecord};
use photolib_domain::error::Result;
use photolib_domain::ports::providers::{CollectionInfo, VectorFilter, VectorStoreProvider};
use photolib_domain::value_objects::ImageId;

/// Wraps a [`VectorStoreProvider`], logging timing and outcome for every call.
pub struct InstrumentedVectorStoreProvider {
    inner: Arc<dyn VectorStoreProvider>,
}

impl InstrumentedVectorStoreProvider {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn VectorStoreProvider>) -> Self {
        Self { inner }
    }
}

macro_rules! timed {
    ($self:expr, $op:expr, $collection:expr, $body:expr) => {{
        let started = Instant::now();
        let result = $body;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(provider = $self.inner.provider_name(), op = $op, collection = $collection, elapsed_ms, "vector store call"),
            Err(err) => tracing::warn!(provider = $self.inner.provider_name(), op = $op, collection = $collection, elapsed_ms, error = %err, "vector store call failed"),
        }
        result
    }};
}

#[async_trait]
impl VectorStoreProvider for InstrumentedVectorStoreProvider {
    async fn initialize(&self, collection: &str, dimensions: usize) -> Result<()> {
        timed!(self, "initialize", collection, self.inner.initialize(collection, dimensions).await)
    }

    async fn upsert(&self, collection: &str, record: VectorRecord) -> Result<()> {
        timed!(self, "upsert", collection, self.inner.upsert(collection, record).await)
    }

    async fn upsert_batch(&self, collection: &str, records: Vec<VectorRecord>) -> Result<()> {
        timed!(self, "upsert_batch", collection, self.inner.upsert_batch(collection, records).await)
    }

    async fn get(&self, collection: &str, id: &ImageId) -> Result<Option<VectorRecord>> {
        timed!(self, "get", collection, self.inner.get(collection, id).await)
    }

    async fn get_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<VectorRecord>> {
        timed!(self, "get_batch", collection, self.inner.get_batch(collection, ids).await)
    }

    async fn set_payload(&self, collection: &str, id: &ImageId, partial: VectorPayload) -> Result<()> {
        timed!(self, "set_payload", collection, self.inner.set_payload(collection, id, partial).await)
    }

    async fn delete(&self, collection: &str, id: &ImageId) -> Result<bool> {
        timed!(self, "delete", collection, self.inner.delete(collection, id).await)
    }

    async fn delete_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<ImageId>> {
        timed!(self, "delete_batch", collection, self.inner.delete_batch(collection, ids).await)
    }

    async fn search(&self, collection: &str, query_vector: &[f32], top_k: usize, score_threshold: Option<f32>, filter: Option<&VectorFilter>) -> Result<Vec<ScoredRecord>> {
        timed!(self, "search", collection, self.inner.search(collection, query_vector, top_k, score_threshold, filter).await)
    }

    async fn scroll(&self, collection: &str, limit: usize, offset: Option<usize>, filter: Option<&VectorFilter>) -> Result<(Vec<VectorRecord>, Option<usize>)> {
        timed!(self, "scroll", collection, self.inner.scroll(collection, limit, offset, filter).await)
    }

    async fn count(&self, collection: &str, filter: Option<&VectorFilter>) -> Result<usize> {
        timed!(self, "count", collection, self.inner.count(collection, filter).await)
    }

    async fn info(&self, collection: &str) -> Result<CollectionInfo> {
        timed!(self, "info", collection, self.inner.info(collection).await)
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}
