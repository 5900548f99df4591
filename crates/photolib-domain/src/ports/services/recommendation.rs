//! Multi-image aesthetic recommendation and confirmed deletion workflows (C9).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::value_objects::{ImageId, SessionId};

/// One candidate surfaced by a recommendation pass: an image judged
/// redundant or lower quality than others in its similarity cluster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeletionPreviewItem {
    /// The candidate image.
    pub id: ImageId,
    /// The image it was judged redundant against, when the recommendation
    /// came from a similarity cluster rather than a standalone quality call.
    pub similar_to: Option<ImageId>,
    /// Vision model's stated reason, verbatim.
    pub reason: String,
}

/// Result of a single recommendation pass.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecommendationOutcome {
    /// The session this batch is tied to, so a later "delete them" can find it.
    pub session_id: SessionId,
    /// Candidates proposed for deletion. Never auto-applied.
    pub candidates: Vec<DeletionPreviewItem>,
}

/// Clusters a session's recently surfaced images by similarity and asks the
/// vision model to judge which of each cluster are safe to discard.
#[async_trait]
pub trait RecommendationWorkflowInterface: Send + Sync {
    /// Evaluates `session_id`'s last surfaced images (or `images`, when
    /// explicitly supplied) and returns deletion candidates.
    async fn recommend(
        &self,
        session_id: SessionId,
        images: Option<Vec<ImageId>>,
    ) -> Result<RecommendationOutcome>;
}

/// Result of an executed deletion.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeletionOutcome {
    /// Images actually removed from both the object store and vector store.
    pub deleted: Vec<ImageId>,
    /// Images requested but not found, left out of `deleted` rather than
    /// failing the whole call.
    pub missing: Vec<ImageId>,
}

/// A single entry in a pre-deletion preview: enough metadata to show a
/// caller what would be removed, without touching either store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DeletionPreviewEntry {
    /// The candidate image.
    pub id: ImageId,
    /// Original upload filename.
    pub filename: String,
    /// Size in bytes.
    pub file_size: u64,
    /// Pixel width, if known.
    pub width: Option<u32>,
    /// Pixel height, if known.
    pub height: Option<u32>,
    /// Ingestion timestamp.
    pub created_at: DateTime<Utc>,
}

/// Executes deletions from both the object store and the vector store.
/// Deletion is not gated on a prior recommendation run — any valid,
/// confirmed id list is accepted.
#[async_trait]
pub trait DeletionWorkflowInterface: Send + Sync {
    /// Describes what `images` would remove, without deleting anything.
    /// Unknown ids are silently omitted from the result.
    async fn preview(&self, images: &[ImageId]) -> Result<Vec<DeletionPreviewEntry>>;

    /// Deletes `images`, cascading to both stores. Returns
    /// [`crate::error::Error::NotConfirmed`] if `confirmed` is `false`, or
    /// [`crate::error::Error::EmptyInput`] if `images` is empty. Per-id
    /// store failures are recorded in the outcome's `missing` list rather
    /// than aborting the remaining deletions.
    async fn confirm_deletion(
        &self,
        session_id: SessionId,
        images: Vec<ImageId>,
        confirmed: bool,
        reason: Option<String>,
    ) -> Result<DeletionOutcome>;
}
