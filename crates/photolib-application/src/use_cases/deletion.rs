//! Confirmed deletion workflow (C9).

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::services::recommendation::{DeletionOutcome, DeletionPreviewEntry, DeletionWorkflowInterface, RecommendationOutcome};
use photolib_domain::ports::providers::{ObjectStoreProvider, VectorStoreProvider};
use photolib_domain::value_objects::{ImageId, SessionId};

/// Deletes images from both the object store and the vector store, gated
/// only on the caller passing `confirmed: true` for a non-empty id list —
/// no prior [`crate::use_cases::recommendation::RecommendationWorkflow`]
/// run is required.
pub struct DeletionWorkflow {
    object_store: Arc<dyn ObjectStoreProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    collection: String,
    pending: Arc<DashMap<SessionId, RecommendationOutcome>>,
}

impl DeletionWorkflow {
    /// Builds a deletion workflow sharing `pending` with the recommendation
    /// workflow that populates it.
    #[must_use]
    pub fn new(
        object_store: Arc<dyn ObjectStoreProvider>,
        vector_store: Arc<dyn VectorStoreProvider>,
        collection: impl Into<String>,
        pending: Arc<DashMap<SessionId, RecommendationOutcome>>,
    ) -> Self {
        Self {
            object_store,
            vector_store,
            collection: collection.into(),
            pending,
        }
    }
}

#[async_trait]
impl DeletionWorkflowInterface for DeletionWorkflow {
    async fn preview(&self, images: &[ImageId]) -> Result<Vec<DeletionPreviewEntry>> {
        let mut entries = Vec::with_capacity(images.len());
        for id in images {
            if let Some(image) = self.object_store.stat(id).await? {
                entries.push(DeletionPreviewEntry {
                    id: image.id,
                    filename: image.filename,
                    file_size: image.file_size,
                    width: image.width,
                    height: image.height,
                    created_at: image.created_at,
                });
            }
        }
        Ok(entries)
    }

    async fn confirm_deletion(
        &self,
        session_id: SessionId,
        images: Vec<ImageId>,
        confirmed: bool,
        _reason: Option<String>,
    ) -> Result<DeletionOutcome> {
        if !confirmed {
            return Err(Error::not_confirmed("confirm_deletion"));
        }
        if images.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut deleted = Vec::new();
        let mut missing = Vec::new();

        for id in images {
            let removed_object = match self.object_store.delete(&id).await {
                Ok(removed) => removed,
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "object store delete failed during confirmed deletion");
                    missing.push(id);
                    continue;
                }
            };
            let removed_vector = match self.vector_store.delete(&self.collection, &id).await {
                Ok(removed) => removed,
                Err(err) => {
                    tracing::warn!(id = %id, error = %err, "vector store delete failed during confirmed deletion");
                    missing.push(id);
                    continue;
                }
            };
            if removed_object || removed_vector {
                deleted.push(id);
            } else {
                missing.push(id);
            }
        }

        if let Some(mut pending) = self.pending.get_mut(&session_id) {
            pending.candidates.retain(|c| !deleted.contains(&c.id));
        }

        Ok(DeletionOutcome { deleted, missing })
    }
}
