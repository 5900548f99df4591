//! Vector store provider constants.

/// Default Qdrant REST API port.
pub const QDRANT_DEFAULT_PORT: u16 = 6333;
/// Distance metric used for all collections (cosine similarity over
/// L2-normalized vectors, per the image/text embedding invariant).
pub const QDRANT_DISTANCE_METRIC: &str = "Cosine";
/// Name of the single collection the service indexes images into.
pub const DEFAULT_COLLECTION_NAME: &str = "photos";
/// File name of the local-file vector store's JSON snapshot.
pub const LOCAL_VECTOR_STORE_SNAPSHOT_FILE: &str = "vector_store_snapshot.json";
/// How often the local-file vector store flushes its in-memory index to disk.
pub const LOCAL_VECTOR_STORE_SNAPSHOT_INTERVAL_SECS: u64 = 30;
