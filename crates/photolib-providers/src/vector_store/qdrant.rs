//! Qdrant-compatible REST vector store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use photolib_domain::constants::vector_store::{QDRANT_DEFAULT_PORT, QDRANT_DISTANCE_METRIC};
use photolib_domain::entities::{ScoredRecord, VectorPayload, VectorRecord};
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::vector_store::{CollectionInfo, VectorFilter, VectorStoreProvider};
use photolib_domain::registry::vector_store::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use photolib_domain::value_objects::ImageId;
use serde_json::{Value, json};

const QDRANT_CALL_TIMEOUT_SECS: u64 = 30;

/// Vector store backed by a Qdrant (or Qdrant-compatible) REST endpoint.
pub struct QdrantVectorStore {
    client: reqwest::Client,
    base_url: String,
}

impl QdrantVectorStore {
    /// Builds a client bound to `base_url` (e.g. `http://localhost:6333`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(QDRANT_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into() })
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/collections/{collection}", self.base_url)
    }

    fn points_url(&self, collection: &str, path: &str) -> String {
        format!("{}/collections/{collection}/points{path}", self.base_url)
    }

    async fn request_json(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(classify_http_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::rate_limited("qdrant", None));
        }
        if status.is_server_error() {
            return Err(Error::provider_unavailable("qdrant", format!("upstream status {status}")));
        }
        let body: Value = response.json().await.map_err(|e| Error::corrupt_payload(format!("malformed qdrant response: {e}")))?;
        if !status.is_success() {
            let message = body.get("status").and_then(|s| s.get("error")).and_then(Value::as_str).unwrap_or("request rejected");
            return Err(Error::invalid_input(format!("qdrant rejected the request: {message}")));
        }
        Ok(body)
    }

    fn build_filter(filter: &VectorFilter) -> Value {
        let mut must = Vec::new();
        if let Some(tags) = &filter.tags_any {
            must.push(json!({"key": "tags", "match": {"any": tags}}));
        }
        if let Some((start, end)) = &filter.created_at_range {
            must.push(json!({"key": "created_at", "range": {"gte": start.to_rfc3339(), "lte": end.to_rfc3339()}}));
        }
        if let Some(allowlist) = &filter.ids_allowlist {
            let ids: Vec<String> = allowlist.iter().map(ToString::to_string).collect();
            must.push(json!({"has_id": ids}));
        }
        if let Some(field_equals) = &filter.field_equals {
            for (key, value) in field_equals {
                must.push(json!({"key": format!("extra.{key}"), "match": {"value": value}}));
            }
        }
        json!({"must": must})
    }

    fn point_to_record(point: &Value) -> Option<VectorRecord> {
        let id = point.get("id")?.as_str()?;
        let id = id.parse::<uuid::Uuid>().ok().map(ImageId::from_uuid)?;
        let vector = point.get("vector")?.as_array()?.iter().filter_map(Value::as_f64).map(|v| v as f32).collect();
        let payload = point.get("payload").cloned().unwrap_or_default();
        let payload: VectorPayload = serde_json::from_value(payload).unwrap_or_default();
        Some(VectorRecord { id, vector, payload })
    }
}

fn classify_http_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out("qdrant", QDRANT_CALL_TIMEOUT_SECS * 1000)
    } else {
        Error::provider_unavailable("qdrant", error.to_string())
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantVectorStore {
    async fn initialize(&self, collection: &str, dimensions: usize) -> Result<()> {
        let body = json!({"vectors": {"size": dimensions, "distance": QDRANT_DISTANCE_METRIC}});
        self.request_json(self.client.put(self.collection_url(collection)).json(&body)).await?;
        Ok(())
    }

    async fn upsert(&self, collection: &str, record: VectorRecord) -> Result<()> {
        self.upsert_batch(collection, vec![record]).await
    }

    async fn upsert_batch(&self, collection: &str, records: Vec<VectorRecord>) -> Result<()> {
        let points: Vec<Value> = records
            .iter()
            .map(|r| json!({"id": r.id.to_string(), "vector": r.vector, "payload": r.payload}))
            .collect();
        let body = json!({"points": points});
        self.request_json(self.client.put(self.points_url(collection, "?wait=true")).json(&body)).await?;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &ImageId) -> Result<Option<VectorRecord>> {
        let records = self.get_batch(collection, std::slice::from_ref(id)).await?;
        Ok(records.into_iter().next())
    }

    async fn get_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<VectorRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let id_strings: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let body = json!({"ids": id_strings, "with_payload": true, "with_vector": true});
        let response = self.request_json(self.client.post(self.points_url(collection, "")).json(&body)).await?;
        let points = response.get("result").and_then(Value::as_array).cloned().unwrap_or_default();
        Ok(points.iter().filter_map(Self::point_to_record).collect())
    }

    async fn set_payload(&self, collection: &str, id: &ImageId, partial: VectorPayload) -> Result<()> {
        let body = json!({"payload": partial, "points": [id.to_string()]});
        self.request_json(self.client.post(self.points_url(collection, "/payload")).json(&body)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &ImageId) -> Result<bool> {
        let removed = self.delete_batch(collection, std::slice::from_ref(id)).await?;
        Ok(!removed.is_empty())
    }

    async fn delete_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<ImageId>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let id_strings: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let body = json!({"points": id_strings});
        self.request_json(self.client.post(self.points_url(collection, "/delete?wait=true")).json(&body)).await?;
        Ok(ids.to_vec())
    }

    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        top_k: usize,
        score_threshold: Option<f32>,
        filter: Option<&VectorFilter>,
    ) -> Result<Vec<ScoredRecord>> {
        let mut body = json!({"vector": query_vector, "limit": top_k, "with_payload": true});
        if let Some(threshold) = score_threshold {
            body["score_threshold"] = json!(threshold);
        }
        if let Some(filter) = filter {
            body["filter"] = Self::build_filter(filter);
        }
        let response = self.request_json(self.client.post(self.points_url(collection, "/search")).json(&body)).await?;
        let hits = response.get("result").and_then(Value::as_array).cloned().unwrap_or_default();
        let mut scored = Vec::with_capacity(hits.len());
        for hit in &hits {
            let Some(id) = hit.get("id").and_then(Value::as_str).and_then(|s| s.parse::<uuid::Uuid>().ok()) else {
                continue;
            };
            let score = hit.get("score").and_then(Value::as_f64).unwrap_or_default() as f32;
            let payload = hit.get("payload").cloned().unwrap_or_default();
            let payload: VectorPayload = serde_json::from_value(payload).unwrap_or_default();
            scored.push(ScoredRecord { id: ImageId::from_uuid(id), score, payload });
        }
        Ok(scored)
    }

    async fn scroll(
        &self,
        collection: &str,
        limit: usize,
        offset: Option<usize>,
        filter: Option<&VectorFilter>,
    ) -> Result<(Vec<VectorRecord>, Option<usize>)> {
        let mut body = json!({"limit": limit, "with_payload": true, "with_vector": true});
        if let Some(offset) = offset {
            body["offset"] = json!(offset);
        }
        if let Some(filter) = filter {
            body["filter"] = Self::build_filter(filter);
        }
        let response = self.request_json(self.client.post(self.points_url(collection, "/scroll")).json(&body)).await?;
        let result = response.get("result").cloned().unwrap_or_default();
        let points = result.get("points").and_then(Value::as_array).cloned().unwrap_or_default();
        let records: Vec<VectorRecord> = points.iter().filter_map(Self::point_to_record).collect();
        let next_offset = result
            .get("next_page_offset")
            .and_then(|v| if v.is_null() { None } else { v.as_u64() })
            .map(|v| v as usize);
        Ok((records, next_offset))
    }

    async fn count(&self, collection: &str, filter: Option<&VectorFilter>) -> Result<usize> {
        let mut body = json!({"exact": true});
        if let Some(filter) = filter {
            body["filter"] = Self::build_filter(filter);
        }
        let response = self.request_json(self.client.post(self.points_url(collection, "/count")).json(&body)).await?;
        Ok(response.get("result").and_then(|r| r.get("count")).and_then(Value::as_u64).unwrap_or_default() as usize)
    }

    async fn info(&self, collection: &str) -> Result<CollectionInfo> {
        let response = self.request_json(self.client.get(self.collection_url(collection))).await?;
        let result = response.get("result").cloned().unwrap_or_default();
        Ok(CollectionInfo {
            name: collection.to_owned(),
            vectors_count: result.get("vectors_count").and_then(Value::as_u64).unwrap_or_default(),
            points_count: result.get("points_count").and_then(Value::as_u64).unwrap_or_default(),
            status: result.get("status").and_then(Value::as_str).unwrap_or("unknown").to_owned(),
            dimensions: result
                .get("config")
                .and_then(|c| c.get("params"))
                .and_then(|p| p.get("vectors"))
                .and_then(|v| v.get("size"))
                .and_then(Value::as_u64)
                .unwrap_or_default() as usize,
        })
    }

    fn provider_name(&self) -> &str {
        "qdrant"
    }
}

fn qdrant_factory(config: &VectorStoreProviderConfig) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    let base_url = config.uri.clone().unwrap_or_else(|| format!("http://localhost:{QDRANT_DEFAULT_PORT}"));
    QdrantVectorStore::new(base_url).map(|store| Arc::new(store) as Arc<dyn VectorStoreProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static QDRANT_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "qdrant",
    description: "Qdrant-compatible REST vector store",
    build: qdrant_factory,
};
