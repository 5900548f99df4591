//! Process-local, file-backed vector store.
//!
//! Holds the index in memory for fast reads and writes, and periodically
//! flushes a JSON snapshot to disk so a restart does not lose indexed
//! vectors. Intended for single-node deployments without an external vector
//! database.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use photolib_domain::constants::vector_store::{
    LOCAL_VECTOR_STORE_SNAPSHOT_FILE, LOCAL_VECTOR_STORE_SNAPSHOT_INTERVAL_SECS,
};
use photolib_domain::entities::{ScoredRecord, VectorPayload, VectorRecord};
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::vector_store::{CollectionInfo, VectorFilter, VectorStoreProvider};
use photolib_domain::registry::vector_store::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use photolib_domain::value_objects::ImageId;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CollectionData {
    dimensions: usize,
    records: HashMap<ImageId, VectorRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Snapshot {
    collections: HashMap<String, CollectionData>,
}

/// In-memory vector index, periodically snapshotted to a JSON file.
pub struct LocalFileVectorStore {
    state: Arc<RwLock<Snapshot>>,
    snapshot_path: PathBuf,
}

impl LocalFileVectorStore {
    /// Loads an existing snapshot from `data_dir` if present, and spawns the
    /// periodic flush task.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing snapshot file exists but cannot be parsed.
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        let snapshot_path = data_dir.join(LOCAL_VECTOR_STORE_SNAPSHOT_FILE);
        let snapshot = if snapshot_path.exists() {
            let bytes = std::fs::read(&snapshot_path)
                .map_err(|e| Error::internal(format!("failed to read vector store snapshot: {e}")))?;
            serde_json::from_slice(&bytes)
                .map_err(|e| Error::corrupt_payload(format!("vector store snapshot is malformed: {e}")))?
        } else {
            Snapshot::default()
        };

        let state = Arc::new(RwLock::new(snapshot));
        let store = Self { state, snapshot_path };
        store.spawn_periodic_flush();
        Ok(store)
    }

    fn spawn_periodic_flush(&self) {
        let state = Arc::clone(&self.state);
        let path = self.snapshot_path.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(LOCAL_VECTOR_STORE_SNAPSHOT_INTERVAL_SECS));
            loop {
                interval.tick().await;
                if let Err(e) = flush_snapshot(&state, &path).await {
                    warn!(error = %e, "failed to flush vector store snapshot");
                }
            }
        });
    }

    fn matches_filter(record: &VectorRecord, filter: &VectorFilter) -> bool {
        if let Some(tags_any) = &filter.tags_any {
            if !tags_any.iter().any(|tag| record.payload.tags.contains(tag)) {
                return false;
            }
        }
        if let Some((start, end)) = &filter.created_at_range {
            if record.payload.created_at < *start || record.payload.created_at > *end {
                return false;
            }
        }
        if let Some(allowlist) = &filter.ids_allowlist {
            if !allowlist.contains(&record.id) {
                return false;
            }
        }
        if let Some(field_equals) = &filter.field_equals {
            for (key, expected) in field_equals {
                if record.payload.extra.get(key) != Some(expected) {
                    return false;
                }
            }
        }
        true
    }

    fn merge_payload(existing: &mut VectorPayload, partial: VectorPayload) {
        if !partial.tags.is_empty() {
            existing.tags = partial.tags;
        }
        if partial.created_at != DateTime::<Utc>::default() {
            existing.created_at = partial.created_at;
        }
        if !partial.filename.is_empty() {
            existing.filename = partial.filename;
        }
        if partial.description.is_some() {
            existing.description = partial.description;
        }
        existing.extra.extend(partial.extra);
    }
}

async fn flush_snapshot(state: &Arc<RwLock<Snapshot>>, path: &std::path::Path) -> Result<()> {
    let snapshot = state.read().await;
    let bytes = serde_json::to_vec_pretty(&*snapshot)
        .map_err(|e| Error::internal(format!("failed to serialize vector store snapshot: {e}")))?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 { 0.0 } else { dot / (norm_a * norm_b) }
}

#[async_trait]
impl VectorStoreProvider for LocalFileVectorStore {
    async fn initialize(&self, collection: &str, dimensions: usize) -> Result<()> {
        let mut state = self.state.write().await;
        match state.collections.get(collection) {
            Some(existing) if existing.dimensions != dimensions => {
                Err(Error::dimension_mismatch(existing.dimensions, dimensions))
            }
            Some(_) => Ok(()),
            None => {
                state.collections.insert(collection.to_owned(), CollectionData { dimensions, records: HashMap::new() });
                Ok(())
            }
        }
    }

    async fn upsert(&self, collection: &str, record: VectorRecord) -> Result<()> {
        let mut state = self.state.write().await;
        let data = state
            .collections
            .entry(collection.to_owned())
            .or_insert_with(|| CollectionData { dimensions: record.vector.len(), records: HashMap::new() });
        if data.dimensions != record.vector.len() {
            return Err(Error::dimension_mismatch(data.dimensions, record.vector.len()));
        }
        data.records.insert(record.id, record);
        Ok(())
    }

    async fn upsert_batch(&self, collection: &str, records: Vec<VectorRecord>) -> Result<()> {
        let mut state = self.state.write().await;
        let dimensions = state.collections.get(collection).map_or_else(
            || records.first().map_or(0, |r| r.vector.len()),
            |data| data.dimensions,
        );
        for record in &records {
            if record.vector.len() != dimensions {
                return Err(Error::dimension_mismatch(dimensions, record.vector.len()));
            }
        }
        let data = state
            .collections
            .entry(collection.to_owned())
            .or_insert_with(|| CollectionData { dimensions, records: HashMap::new() });
        for record in records {
            data.records.insert(record.id, record);
        }
        Ok(())
    }

    async fn get(&self, collection: &str, id: &ImageId) -> Result<Option<VectorRecord>> {
        let state = self.state.read().await;
        Ok(state.collections.get(collection).and_then(|data| data.records.get(id).cloned()))
    }

    async fn get_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<VectorRecord>> {
        let state = self.state.read().await;
        let Some(data) = state.collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter_map(|id| data.records.get(id).cloned()).collect())
    }

    async fn set_payload(&self, collection: &str, id: &ImageId, partial: VectorPayload) -> Result<()> {
        let mut state = self.state.write().await;
        if let Some(data) = state.collections.get_mut(collection) {
            if let Some(record) = data.records.get_mut(id) {
                Self::merge_payload(&mut record.payload, partial);
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &ImageId) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.collections.get_mut(collection).is_some_and(|data| data.records.remove(id).is_some()))
    }

    async fn delete_batch(&self, collection: &str, ids: &[ImageId]) -> Result<Vec<ImageId>> {
        let mut state = self.state.write().await;
        let Some(data) = state.collections.get_mut(collection) else {
            return Ok(Vec::new());
        };
        Ok(ids.iter().filter(|id| data.records.remove(id).is_some()).copied().collect())
    }

    async fn search(
        &self,
        collection: &str,
        query_vector: &[f32],
        top_k: usize,
        score_threshold: Option<f32>,
        filter: Option<&VectorFilter>,
    ) -> Result<Vec<ScoredRecord>> {
        let state = self.state.read().await;
        let Some(data) = state.collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut scored: Vec<ScoredRecord> = data
            .records
            .values()
            .filter(|record| filter.is_none_or(|f| Self::matches_filter(record, f)))
            .map(|record| ScoredRecord {
                id: record.id,
                score: cosine_similarity(query_vector, &record.vector),
                payload: record.payload.clone(),
            })
            .filter(|scored| score_threshold.is_none_or(|threshold| scored.score >= threshold))
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn scroll(
        &self,
        collection: &str,
        limit: usize,
        offset: Option<usize>,
        filter: Option<&VectorFilter>,
    ) -> Result<(Vec<VectorRecord>, Option<usize>)> {
        let state = self.state.read().await;
        let Some(data) = state.collections.get(collection) else {
            return Ok((Vec::new(), None));
        };

        let mut matching: Vec<&VectorRecord> =
            data.records.values().filter(|record| filter.is_none_or(|f| Self::matches_filter(record, f))).collect();
        matching.sort_by(|a, b| a.id.cmp(&b.id));

        let start = offset.unwrap_or(0);
        let page: Vec<VectorRecord> = matching.iter().skip(start).take(limit).map(|r| (*r).clone()).collect();
        let next_offset = if start + page.len() < matching.len() { Some(start + page.len()) } else { None };
        Ok((page, next_offset))
    }

    async fn count(&self, collection: &str, filter: Option<&VectorFilter>) -> Result<usize> {
        let state = self.state.read().await;
        let Some(data) = state.collections.get(collection) else {
            return Ok(0);
        };
        Ok(data.records.values().filter(|record| filter.is_none_or(|f| Self::matches_filter(record, f))).count())
    }

    async fn info(&self, collection: &str) -> Result<CollectionInfo> {
        let state = self.state.read().await;
        let data = state.collections.get(collection);
        Ok(CollectionInfo {
            name: collection.to_owned(),
            vectors_count: data.map_or(0, |d| d.records.len() as u64),
            points_count: data.map_or(0, |d| d.records.len() as u64),
            status: "green".to_owned(),
            dimensions: data.map_or(0, |d| d.dimensions),
        })
    }

    fn provider_name(&self) -> &str {
        "local-file"
    }
}

fn local_file_factory(
    config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    let data_dir = config.uri.as_deref().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("./data/vector_store"));
    LocalFileVectorStore::new(data_dir).map(|store| Arc::new(store) as Arc<dyn VectorStoreProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static LOCAL_FILE_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "local-file",
    description: "Process-local in-memory vector index with periodic JSON snapshots",
    build: local_file_factory,
};
