//! Vector store port: a keyed collection of `(id, vector, payload)` supporting
//! cosine-similarity top-K search with filters, plus unscored pagination.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{ScoredRecord, VectorPayload};
use crate::error::Result;
use crate::value_objects::ImageId;

/// Conjunctive filter applied to a [`VectorStoreProvider::search`] or
/// [`VectorStoreProvider::scroll`] call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectorFilter {
    /// Keep records carrying at least one of these tags.
    pub tags_any: Option<Vec<String>>,
    /// Keep records whose `created_at` falls within this inclusive range.
    pub created_at_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// Keep only these ids, if set.
    pub ids_allowlist: Option<Vec<ImageId>>,
    /// Keep records whose payload `extra` fields match exactly.
    pub field_equals: Option<std::collections::HashMap<String, serde_json::Value>>,
}

/// Collection-level status and sizing, as returned by [`VectorStoreProvider::info`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name.
    pub name: String,
    /// Number of indexed vectors.
    pub vectors_count: u64,
    /// Number of points (equal to `vectors_count` for this store; kept
    /// distinct for parity with engines that separate point and vector counts).
    pub points_count: u64,
    /// Backend-reported status string (e.g. `"green"`, `"ready"`).
    pub status: String,
    /// Fixed vector dimension for this collection.
    pub dimensions: usize,
}

/// Vector storage and similarity search, with filtered pagination.
///
/// Exactly one backend is active per process ([`crate::registry::vector_store`]
/// resolves it from configuration): a process-local file-backed store, or a
/// Qdrant-compatible REST store. Vector dimension is fixed at collection
/// creation; an upsert with a mismatched dimension fails with
/// [`crate::error::Error::DimensionMismatch`].
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Creates the collection if absent, with cosine distance and the given
    /// fixed dimension. Idempotent when the collection already matches.
    async fn initialize(&self, collection: &str, dimensions: usize) -> Result<()>;

    /// Inserts or updates a single record.
    async fn upsert(&self, collection: &str, record: crate::entities::VectorRecord) -> Result<()>;

    /// Inserts or updates a batch of records. Atomic at the per-call level;
    /// across separate calls there is no ordering guarantee.
    async fn upsert_batch(
        &self,
        collection: &str,
        records: Vec<crate::entities::VectorRecord>,
    ) -> Result<()>;

    /// Fetches a single record by id.
    async fn get(&self, collection: &str, id: &ImageId) -> Result<Option<crate::entities::VectorRecord>>;

    /// Fetches several records by id, preserving no particular order.
    async fn get_batch(
        &self,
        collection: &str,
        ids: &[ImageId],
    ) -> Result<Vec<crate::entities::VectorRecord>>;

    /// Merges `partial` into the stored payload without touching the vector.
    async fn set_payload(&self, collection: &str, id: &ImageId, partial: VectorPayload) -> Result<()>;

    /// Deletes a single record. Idempotent: deleting a missing id is not an error.
    async fn delete(&self, collection: &str, id: &ImageId) -> Result<bool>;

    /// Deletes a batch of records, reporting which ids were actually removed.
    async fn delete_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<ImageId>>;

    /// Cosine-similarity top-K search. Results are ordered by descending
    /// score; `score_threshold`, when set, prunes below the cutoff before
    /// truncation to `top_k`.
    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        top_k: usize,
        score_threshold: Option<f32>,
        filter: Option<&VectorFilter>,
    ) -> Result<Vec<ScoredRecord>>;

    /// Unscored pagination over the collection, optionally filtered.
    async fn scroll(
        &self,
        collection: &str,
        limit: usize,
        offset: Option<usize>,
        filter: Option<&VectorFilter>,
    ) -> Result<(Vec<crate::entities::VectorRecord>, Option<usize>)>;

    /// Counts records matching `filter` (all records if `None`).
    async fn count(&self, collection: &str, filter: Option<&VectorFilter>) -> Result<usize>;

    /// Collection-level status and sizing.
    async fn info(&self, collection: &str) -> Result<CollectionInfo>;

    /// Identifies the backend for logging and metrics labelling.
    fn provider_name(&self) -> &str;

    /// Default health probe: resolves `info` for the default collection.
    async fn health_check(&self, collection: &str) -> Result<()> {
        self.info(collection).await?;
        Ok(())
    }
}
