//! Search engine port: composes the embedding provider and vector store to
//! serve text, image, hybrid, and metadata-constrained queries (C4).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::VectorPayload;
use crate::error::Result;
use crate::ports::providers::embedding::ImageInput;
use crate::value_objects::ImageId;

/// A single scored or unscored hit returned by any search operation.
///
/// `preview_url` is always set (`/images/{id}`, per the external URL
/// convention); `score` is `None` for metadata-only queries that had no
/// vector comparison to rank on.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchHit {
    /// Matched image id.
    pub id: ImageId,
    /// Cosine similarity score, when the query involved a vector comparison.
    pub score: Option<f32>,
    /// The matched payload.
    pub payload: VectorPayload,
    /// Canonical serving URL, `/images/{id}`.
    pub preview_url: String,
}

/// How an image was supplied to an image-based query.
#[derive(Debug, Clone)]
pub enum SearchQuery {
    /// `search_by_text`: a natural-language query, embedded with the
    /// indexing instruction (not a distinct query instruction).
    Text {
        /// The query text.
        query: String,
        /// Restrict to records carrying at least one of these tags.
        tags: Option<Vec<String>>,
    },
    /// `search_by_image_id`/`search_by_image`: image bytes or a known id.
    /// Id-based queries filter their own id out of the results.
    Image {
        /// Bytes of the query image, or `None` when `by_id` identifies it.
        image: Option<ImageInput>,
        /// The query image's own id, used to self-exclude from results.
        by_id: Option<ImageId>,
    },
    /// `search_hybrid`: a single multimodal embedding call over combined
    /// text and image input, searched once.
    Hybrid {
        /// Optional text component.
        text: Option<String>,
        /// Optional image component.
        image: Option<ImageInput>,
    },
}

/// A parsed metadata query: an optional date constraint and optional tags.
///
/// Produced by [`split_date_and_query`](crate::utils::text::split_date_and_query)
/// or supplied directly by a caller that already has structured fields.
#[derive(Debug, Clone, Default)]
pub struct MetaQuery {
    /// Exact calendar day, when the caller supplied a full `YYYY-MM-DD`.
    pub exact_date: Option<DateTime<Utc>>,
    /// Month/day without a year (`MM-DD` or `MM月DD日`), matched across all years.
    pub month_day: Option<(u32, u32)>,
    /// Tag filter, applied in addition to any date constraint.
    pub tags: Option<Vec<String>>,
}

/// Composes the embedding provider and vector store to serve the four query
/// kinds in §4.4. Every returned hit carries a decorated `preview_url`.
#[async_trait]
pub trait SearchEngineInterface: Send + Sync {
    /// Text, image, or hybrid semantic query (`SearchQuery::{Text,Image,Hybrid}`).
    async fn search(
        &self,
        query: SearchQuery,
        top_k: usize,
        score_threshold: Option<f32>,
    ) -> Result<Vec<SearchHit>>;

    /// Metadata-only query (`meta_search_images`). When `meta.month_day` is
    /// set (no year given), the store filter can't express "any year with
    /// this month/day" directly: the engine falls back to a bounded scroll
    /// filtered by tags, rejects non-matching `created_at` values, and sorts
    /// the remainder by `created_at` descending, capped at `top_k`.
    async fn search_by_meta(&self, meta: MetaQuery, top_k: usize) -> Result<Vec<SearchHit>>;

    /// Text query constrained by metadata (`meta_search_hybrid`). Uses the
    /// text embedding as the query vector, either against a store-level date
    /// range (`exact_date` set) or a pre-computed id allowlist derived from
    /// the month/day scan used by [`Self::search_by_meta`].
    async fn search_by_text_with_meta(
        &self,
        query: &str,
        meta: MetaQuery,
        top_k: usize,
        score_threshold: Option<f32>,
    ) -> Result<Vec<SearchHit>>;
}
