//! Timing/outcome instrumentation for [`ObjectStoreProvider`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use photolib_domain::entities::Image;
use photolib_domain::error::Result;
use photolib_domain::ports::providers::{ImageMetadataEdit, ListSortBy, ObjectStoreProvider, ObjectStoreStats, SortOrder};
use photolib_domain::value_objects::ImageId;

/// Wraps an [`ObjectStoreProvider`], logging timing and outcome for every call.
pub struct InstrumentedObjectStoreProvider {
    inner: Arc<dyn ObjectStoreProvider>,
}

impl InstrumentedObjectStoreProvider {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn ObjectStoreProvider>) -> Self {
        Self { inner }
    }
}

macro_rules! timed {
    ($op:expr, $body:expr) => {{
        let started = Instant::now();
        let result = $body;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::debug!(op = $op, elapsed_ms, "object store call"),
            Err(err) => tracing::warn!(op = $op, elapsed_ms, error = %err, "object store call failed"),
        }
        result
    }};
}

#[async_trait]
impl ObjectStoreProvider for InstrumentedObjectStoreProvider {
    async fn put(&self, bytes: Vec<u8>, original_filename: &str) -> Result<Image> {
        timed!("put", self.inner.put(bytes, original_filename).await)
    }

    async fn get(&self, id: &ImageId) -> Result<Option<(Vec<u8>, String)>> {
        timed!("get", self.inner.get(id).await)
    }

    async fn stat(&self, id: &ImageId) -> Result<Option<Image>> {
        timed!("stat", self.inner.stat(id).await)
    }

    async fn update_metadata(&self, id: &ImageId, edit: ImageMetadataEdit) -> Result<Option<Image>> {
        timed!("update_metadata", self.inner.update_metadata(id, edit).await)
    }

    async fn path_of(&self, id: &ImageId) -> Result<Option<PathBuf>> {
        timed!("path_of", self.inner.path_of(id).await)
    }

    async fn delete(&self, id: &ImageId) -> Result<bool> {
        timed!("delete", self.inner.delete(id).await)
    }

    async fn list(&self, page: usize, page_size: usize, sort_by: ListSortBy, sort_order: SortOrder) -> Result<(Vec<Image>, u64)> {
        timed!("list", self.inner.list(page, page_size, sort_by, sort_order).await)
    }

    async fn stats(&self) -> Result<ObjectStoreStats> {
        timed!("stats", self.inner.stats().await)
    }
}
