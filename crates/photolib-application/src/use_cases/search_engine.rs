//! Search engine use case: composes the embedding provider and vector store
//! to serve text/image/hybrid and metadata-constrained queries (C4).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Duration, TimeZone, Utc};
use photolib_domain::constants::values::{META_QUERY_FETCH_CEILING, META_QUERY_SCAN_CEILING};
use photolib_domain::error::Result;
use photolib_domain::ports::providers::vector_store::VectorFilter;
use photolib_domain::ports::providers::{EmbedInput, EmbeddingProvider, VectorStoreProvider};
use photolib_domain::ports::services::search::{MetaQuery, SearchEngineInterface, SearchHit, SearchQuery};

/// Implements the four query kinds in §4.4 over a single embedding provider
/// and vector store, both bound to one collection.
pub struct SearchEngine {
    embedding: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    collection: String,
}

impl SearchEngine {
    /// Builds a search engine bound to `collection`.
    #[must_use]
    pub fn new(embedding: Arc<dyn EmbeddingProvider>, vector_store: Arc<dyn VectorStoreProvider>, collection: impl Into<String>) -> Self {
        Self {
            embedding,
            vector_store,
            collection: collection.into(),
        }
    }

    fn hit_from(record: photolib_domain::entities::ScoredRecord) -> SearchHit {
        SearchHit {
            preview_url: format!("/images/{}", record.id),
            id: record.id,
            score: Some(record.score),
            payload: record.payload,
        }
    }

    fn hit_from_record(record: photolib_domain::entities::VectorRecord) -> SearchHit {
        SearchHit {
            preview_url: format!("/images/{}", record.id),
            id: record.id,
            score: None,
            payload: record.payload,
        }
    }

    fn day_range(date: chrono::DateTime<Utc>) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
        let start = Utc
            .with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0)
            .single()
            .unwrap_or(date);
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        (start, end)
    }

    /// Scans the collection in bounded pages, keeping only records whose
    /// `created_at` matches `(month, day)` across any year, up to
    /// `META_QUERY_SCAN_CEILING` scanned and `META_QUERY_FETCH_CEILING` fetched.
    async fn scan_month_day(&self, month_day: (u32, u32), tags: Option<Vec<String>>) -> Result<Vec<photolib_domain::entities::VectorRecord>> {
        let mut matched = Vec::new();
        let mut scanned = 0usize;
        let mut offset = None;
        let filter = VectorFilter {
            tags_any: tags,
            ..Default::default()
        };

        loop {
            let limit = META_QUERY_FETCH_CEILING.min(META_QUERY_SCAN_CEILING - scanned).max(1);
            let (records, next_offset) = self
                .vector_store
                .scroll(&self.collection, limit, offset, Some(&filter))
                .await?;
            scanned += records.len();

            for record in records {
                if record.payload.created_at.month() == month_day.0 && record.payload.created_at.day() == month_day.1 {
                    matched.push(record);
                }
                if matched.len() >= META_QUERY_FETCH_CEILING {
                    return Ok(matched);
                }
            }

            match next_offset {
                Some(o) if scanned < META_QUERY_SCAN_CEILING => offset = Some(o),
                _ => break,
            }
        }

        Ok(matched)
    }
}

#[async_trait]
impl SearchEngineInterface for SearchEngine {
    async fn search(&self, query: SearchQuery, top_k: usize, score_threshold: Option<f32>) -> Result<Vec<SearchHit>> {
        match query {
            SearchQuery::Text { query, tags } => {
                let embedded = self.embedding.embed(EmbedInput::text(query)).await?;
                let filter = VectorFilter {
                    tags_any: tags,
                    ..Default::default()
                };
                let hits = self
                    .vector_store
                    .search(&self.collection, &embedded.vector, top_k, score_threshold, Some(&filter))
                    .await?;
                Ok(hits.into_iter().map(Self::hit_from).collect())
            }
            SearchQuery::Image { image, by_id } => {
                let vector = match (&image, by_id) {
                    (Some(input), _) => self.embedding.embed(EmbedInput::image(input.clone())).await?.vector,
                    (None, Some(id)) => {
                        let record = self
                            .vector_store
                            .get(&self.collection, &id)
                            .await?
                            .ok_or_else(|| photolib_domain::error::Error::not_found(format!("image {id}")))?;
                        record.vector
                    }
                    (None, None) => return Err(photolib_domain::error::Error::EmptyInput),
                };

                let hits = self.vector_store.search(&self.collection, &vector, top_k, score_threshold, None).await?;
                Ok(hits
                    .into_iter()
                    .filter(|h| Some(h.id) != by_id)
                    .map(Self::hit_from)
                    .collect())
            }
            SearchQuery::Hybrid { text, image } => {
                if text.is_none() && image.is_none() {
                    return Err(photolib_domain::error::Error::EmptyInput);
                }
                let embedded = self
                    .embedding
                    .embed(EmbedInput {
                        text,
                        image,
                        instruction: None,
                        normalize: true,
                    })
                    .await?;
                let hits = self
                    .vector_store
                    .search(&self.collection, &embedded.vector, top_k, score_threshold, None)
                    .await?;
                Ok(hits.into_iter().map(Self::hit_from).collect())
            }
        }
    }

    async fn search_by_meta(&self, meta: MetaQuery, top_k: usize) -> Result<Vec<SearchHit>> {
        if let Some(exact) = meta.exact_date {
            let (start, end) = Self::day_range(exact);
            let filter = VectorFilter {
                tags_any: meta.tags,
                created_at_range: Some((start, end)),
                ..Default::default()
            };
            let (mut records, _) = self.vector_store.scroll(&self.collection, top_k, None, Some(&filter)).await?;
            records.sort_by(|a, b| b.payload.created_at.cmp(&a.payload.created_at));
            records.truncate(top_k);
            return Ok(records.into_iter().map(Self::hit_from_record).collect());
        }

        if let Some(month_day) = meta.month_day {
            let mut matched = self.scan_month_day(month_day, meta.tags).await?;
            matched.sort_by(|a, b| b.payload.created_at.cmp(&a.payload.created_at));
            matched.truncate(top_k);
            return Ok(matched.into_iter().map(Self::hit_from_record).collect());
        }

        let filter = VectorFilter {
            tags_any: meta.tags,
            ..Default::default()
        };
        let (mut records, _) = self.vector_store.scroll(&self.collection, top_k, None, Some(&filter)).await?;
        records.sort_by(|a, b| b.payload.created_at.cmp(&a.payload.created_at));
        records.truncate(top_k);
        Ok(records.into_iter().map(Self::hit_from_record).collect())
    }

    async fn search_by_text_with_meta(&self, query: &str, meta: MetaQuery, top_k: usize, score_threshold: Option<f32>) -> Result<Vec<SearchHit>> {
        let embedded = self.embedding.embed(EmbedInput::text(query)).await?;

        if let Some(exact) = meta.exact_date {
            let (start, end) = Self::day_range(exact);
            let filter = VectorFilter {
                tags_any: meta.tags,
                created_at_range: Some((start, end)),
                ..Default::default()
            };
            let hits = self
                .vector_store
                .search(&self.collection, &embedded.vector, top_k, score_threshold, Some(&filter))
                .await?;
            return Ok(hits.into_iter().map(Self::hit_from).collect());
        }

        if let Some(month_day) = meta.month_day {
            let matched = self.scan_month_day(month_day, meta.tags).await?;
            let ids: Vec<_> = matched.into_iter().map(|r| r.id).collect();
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            let filter = VectorFilter {
                ids_allowlist: Some(ids),
                ..Default::default()
            };
            let hits = self
                .vector_store
                .search(&self.collection, &embedded.vector, top_k, score_threshold, Some(&filter))
                .await?;
            return Ok(hits.into_iter().map(Self::hit_from).collect());
        }

        let filter = VectorFilter {
            tags_any: meta.tags,
            ..Default::default()
        };
        let hits = self
            .vector_store
            .search(&self.collection, &embedded.vector, top_k, score_threshold, Some(&filter))
            .await?;
        Ok(hits.into_iter().map(Self::hit_from).collect())
    }
}

/// Parses an isolated date token (as produced by
/// [`split_date_and_query`](photolib_domain::utils::text::split_date_and_query))
/// into a [`MetaQuery`]'s date fields.
///
/// Recognises `YYYY[./-]MM[./-]DD`, `MM[./-]DD`, and `MM月DD日?`. Returns
/// `None` if `token` doesn't parse as a date in one of these forms.
#[must_use]
pub fn parse_date_token(token: &str) -> Option<(Option<chrono::DateTime<Utc>>, Option<(u32, u32)>)> {
    static FULL_RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    static SHORT_RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    static CJK_RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let full = FULL_RE.get_or_init(|| regex::Regex::new(r"^(\d{4})[./-](\d{1,2})[./-](\d{1,2})$").unwrap());
    let short = SHORT_RE.get_or_init(|| regex::Regex::new(r"^(\d{1,2})[./-](\d{1,2})$").unwrap());
    let cjk = CJK_RE.get_or_init(|| regex::Regex::new(r"^(\d{1,2})月(\d{1,2})日?$").unwrap());

    if let Some(caps) = full.captures(token) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        let date = Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()?;
        return Some((Some(date), None));
    }

    if let Some(caps) = short.captures(token) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        return Some((None, Some((month, day))));
    }

    if let Some(caps) = cjk.captures(token) {
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        return Some((None, Some((month, day))));
    }

    None
}

/// Builds a [`MetaQuery`] from separately-supplied date text and tags, as
/// handed in directly by `meta_search_images`/`meta_search_hybrid` callers.
#[must_use]
pub fn build_meta_query(date_text: Option<&str>, tags: Option<Vec<String>>) -> MetaQuery {
    let (exact_date, month_day) = date_text.and_then(parse_date_token).unwrap_or((None, None));
    MetaQuery { exact_date, month_day, tags }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_date() {
        let (exact, month_day) = parse_date_token("2026-01-18").unwrap();
        assert!(exact.is_some());
        assert!(month_day.is_none());
    }

    #[test]
    fn parses_month_day_without_year() {
        let (exact, month_day) = parse_date_token("1.18").unwrap();
        assert!(exact.is_none());
        assert_eq!(month_day, Some((1, 18)));
    }

    #[test]
    fn parses_cjk_month_day() {
        let (exact, month_day) = parse_date_token("1月18日").unwrap();
        assert!(exact.is_none());
        assert_eq!(month_day, Some((1, 18)));
    }

    #[test]
    fn unrecognised_token_is_none() {
        assert!(parse_date_token("beach").is_none());
    }

    #[test]
    fn build_meta_query_with_no_date_text_only_sets_tags() {
        let meta = build_meta_query(None, Some(vec!["beach".to_owned()]));
        assert!(meta.exact_date.is_none());
        assert!(meta.month_day.is_none());
        assert_eq!(meta.tags, Some(vec!["beach".to_owned()]));
    }
}
