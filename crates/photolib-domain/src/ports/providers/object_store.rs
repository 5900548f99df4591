//! Object store port: persists image bytes under a system-assigned UUID.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::entities::Image;
use crate::error::Result;
use crate::value_objects::ImageId;

/// A targeted edit to an image's mutable metadata. Every field is an
/// "if set, replace wholesale" instruction; `None` leaves it untouched.
/// `description: Some(None)` clears an existing description.
#[derive(Debug, Clone, Default)]
pub struct ImageMetadataEdit {
    /// Replacement tag set, when set.
    pub tags: Option<HashSet<String>>,
    /// Replacement description; `Some(None)` clears it.
    pub description: Option<Option<String>>,
    /// Replacement extra fields, when set.
    pub extra: Option<HashMap<String, serde_json::Value>>,
}

/// Sort key for [`ObjectStoreProvider::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSortBy {
    /// Sort by ingestion timestamp.
    CreatedAt,
    /// Sort by original filename.
    Filename,
}

/// Sort direction for [`ObjectStoreProvider::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

/// Aggregate statistics over all stored images.
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreStats {
    /// Total number of stored images.
    pub total_images: u64,
    /// Total bytes occupied across all stored images.
    pub total_size: u64,
}

/// Persists image bytes under a system-generated UUID and retrieves them by
/// id. UUIDs are never supplied by the caller; filenames are preserved only
/// as display metadata. The store is single-process; concurrent writers are
/// serialised by the indexer, not by this port.
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync {
    /// Validates extension and size, assigns a UUID, writes `bytes` under a
    /// date-partitioned path, and probes basic image properties. Fails with
    /// [`crate::error::Error::InvalidInput`] before writing if the format is
    /// unsupported or the payload exceeds the size limit.
    async fn put(&self, bytes: Vec<u8>, original_filename: &str) -> Result<Image>;

    /// Fetches the raw bytes and media type for `id`, if it exists.
    async fn get(&self, id: &ImageId) -> Result<Option<(Vec<u8>, String)>>;

    /// Fetches full metadata for `id`, excluding bytes.
    async fn stat(&self, id: &ImageId) -> Result<Option<Image>>;

    /// Applies a targeted metadata edit, returning the updated record, or
    /// `None` if `id` doesn't exist.
    async fn update_metadata(&self, id: &ImageId, edit: ImageMetadataEdit) -> Result<Option<Image>>;

    /// Resolves the absolute on-disk path for `id`, if it exists.
    async fn path_of(&self, id: &ImageId) -> Result<Option<std::path::PathBuf>>;

    /// Deletes the stored bytes and metadata for `id`. Idempotent: deleting
    /// a missing id returns `false` rather than an error.
    async fn delete(&self, id: &ImageId) -> Result<bool>;

    /// Paginated scan of all stored images. Tolerates corrupt files by
    /// returning a best-effort record with `format` reported as unreadable
    /// rather than failing the whole scan.
    async fn list(
        &self,
        page: usize,
        page_size: usize,
        sort_by: ListSortBy,
        sort_order: SortOrder,
    ) -> Result<(Vec<Image>, u64)>;

    /// Aggregate statistics over the whole store.
    async fn stats(&self) -> Result<ObjectStoreStats>;
}
