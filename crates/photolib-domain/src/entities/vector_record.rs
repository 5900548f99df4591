//! The vector-store side of an indexed image.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::constants::embedding::EMBEDDING_NORMALIZATION_EPSILON;
use crate::value_objects::ImageId;

/// Payload carried alongside a vector, filterable at search time.
///
/// A projection of [`crate::entities::ImageMetadata`]; kept separate because
/// the vector store only needs the fields it indexes or filters on, not the
/// full image record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VectorPayload {
    /// Tags copied from the source image.
    pub tags: Vec<String>,
    /// Ingestion timestamp, used by metadata-only queries.
    pub created_at: DateTime<Utc>,
    /// Original filename, surfaced in search results without a store round-trip.
    pub filename: String,
    /// Caption/description, surfaced in search results.
    pub description: Option<String>,
    /// Additional filterable fields.
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// A single row in the vector store: `(id, vector, payload)`.
///
/// `id` is identical to the [`Image`](crate::entities::Image) id it indexes —
/// the two form a partial bijection that may briefly lag during async
/// indexing (see the indexer's async path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Identifier, shared with the source image.
    pub id: ImageId,
    /// L2-normalised embedding vector.
    pub vector: Vec<f32>,
    /// Filterable metadata projection.
    pub payload: VectorPayload,
}

impl VectorRecord {
    /// Returns `true` if `vector` is (approximately) unit length.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        let norm: f32 = self.vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        (norm - 1.0).abs() <= EMBEDDING_NORMALIZATION_EPSILON
    }
}

/// A scored vector-store match, as returned by similarity search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredRecord {
    /// Matched identifier.
    pub id: ImageId,
    /// Cosine similarity score in `[-1, 1]`, higher is more similar.
    pub score: f32,
    /// The matched payload.
    pub payload: VectorPayload,
}
