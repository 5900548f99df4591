//! The core entity of the library: a single ingested photo.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::value_objects::{ImageFormat, ImageId};

/// Mutable descriptive metadata attached to an [`Image`].
///
/// Bytes are immutable once written; this is the part of an image record
/// that can change after ingestion (tags, description, free-form extras).
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImageMetadata {
    /// User- or agent-supplied tags.
    pub tags: HashSet<String>,
    /// Free-text description, e.g. a generated caption.
    pub description: Option<String>,
    /// Arbitrary additional fields (edit provenance, etc.).
    pub extra: HashMap<String, serde_json::Value>,
}

/// A single photo persisted by the object store and indexed for search.
///
/// The `id` is assigned by the system at ingestion and is never
/// client-supplied; the underlying bytes are immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Image {
    /// System-assigned identifier.
    pub id: ImageId,
    /// Original upload filename, preserved for display only (never used for lookup).
    pub filename: String,
    /// Date-partitioned relative path under the object store root (e.g. `2026/07/28/{id}.jpg`).
    pub relative_path: String,
    /// Size of the stored bytes.
    pub file_size: u64,
    /// Pixel width, if it could be probed.
    pub width: Option<u32>,
    /// Pixel height, if it could be probed.
    pub height: Option<u32>,
    /// Format sniffed from file content.
    pub format: ImageFormat,
    /// Ingestion timestamp.
    pub created_at: DateTime<Utc>,
    /// Mutable metadata.
    pub metadata: ImageMetadata,
}

impl Image {
    /// Creates a new image record with a freshly generated id and the
    /// current timestamp. Pixel dimensions are unset; callers that probe
    /// them (e.g. the object store on `put`) set `width`/`height` afterwards.
    #[must_use]
    pub fn new(
        filename: String,
        relative_path: String,
        file_size: u64,
        format: ImageFormat,
    ) -> Self {
        Self {
            id: ImageId::new(),
            filename,
            relative_path,
            file_size,
            width: None,
            height: None,
            format,
            created_at: Utc::now(),
            metadata: ImageMetadata::default(),
        }
    }

    /// Returns the canonical serving URL for this image, per the
    /// `/images/{id}` convention consumed by the artefact extractor.
    #[must_use]
    pub fn preview_url(&self) -> String {
        format!("/images/{}", self.id)
    }

    /// Returns `true` if this image was derived from an `edit_image` call.
    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.metadata.extra.contains_key("source_image_id")
    }
}
