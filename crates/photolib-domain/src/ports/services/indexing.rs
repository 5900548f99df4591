//! Indexer port: turns uploaded image bytes into an object-store entry plus
//! a vector-store record, synchronously or deferred to a background job (C5).

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ports::providers::embedding::ImageInput;
use crate::value_objects::ImageId;

/// Whether an `ingest` call indexes before returning or hands the work to
/// the async job core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IndexingMode {
    /// Embed and upsert before returning; the caller's request blocks on it.
    Sync,
    /// Persist the object immediately, enqueue embedding/upsert as a job (C8),
    /// and return before the vector record exists.
    Async,
    /// Persist the object only; no vector record is ever created for it.
    None,
}

/// Caller-supplied options for a single `ingest` call.
#[derive(Debug, Clone, Default)]
pub struct IndexingOptions {
    /// Whether to create a vector record at all, and if so, how.
    pub auto_index: Option<IndexingMode>,
    /// Tags attached to the stored payload.
    pub tags: Vec<String>,
    /// Free-text description attached to the stored payload.
    pub description: Option<String>,
    /// Original upload filename, preserved for display only. Falls back to a
    /// generated name when unset.
    pub original_filename: Option<String>,
}

/// Result of a single `ingest` call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct IndexOutcome {
    /// The id assigned to the newly stored image.
    pub image_id: ImageId,
    /// The mode actually applied (falls back to the indexer's configured
    /// default when the caller didn't specify one).
    pub mode: IndexingMode,
    /// Set once the vector record exists; `false` under [`IndexingMode::Async`]
    /// until the background job completes, and always `false` under
    /// [`IndexingMode::None`].
    pub indexed: bool,
    /// Id of the background job tracking the deferred embed/upsert, when
    /// `mode` is [`IndexingMode::Async`].
    pub job_id: Option<String>,
}

/// Summary of a full `reindex_all` sweep.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ReindexReport {
    /// Total images scanned in the object store.
    pub scanned: u64,
    /// Images that received a fresh vector record.
    pub reindexed: u64,
    /// Images skipped because they already had an up-to-date record.
    pub skipped: u64,
    /// Images that failed to embed or upsert, with their id and error text.
    pub failed: Vec<(ImageId, String)>,
}

/// Orchestrates image ingestion: persists bytes via the object store, then
/// embeds and upserts a vector record per [`IndexingOptions::auto_index`].
#[async_trait]
pub trait IndexerInterface: Send + Sync {
    /// Stores `image` and, depending on `options.auto_index`, creates or
    /// schedules the corresponding vector record.
    async fn ingest(&self, image: ImageInput, options: IndexingOptions) -> Result<IndexOutcome>;

    /// Re-embeds every object in the store and rebuilds its vector record,
    /// used after a provider/model change. Continues past individual
    /// failures, collecting them in the returned report.
    async fn reindex_all(&self) -> Result<ReindexReport>;
}
