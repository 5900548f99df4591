//! General domain-wide default values.

/// Default batch size for indexing operations.
pub const INDEXING_BATCH_SIZE: usize = 16;

/// Indexing job status label: started.
pub const INDEXING_STATUS_STARTED: &str = "started";

/// Indexing job status label: completed.
pub const INDEXING_STATUS_COMPLETED: &str = "completed";

/// Default maximum number of ReAct iterations the agent orchestrator will run
/// before giving up and returning its best-effort answer.
pub const ORCHESTRATOR_DEFAULT_MAX_ITERATIONS: usize = 8;

/// Approximate bytes-per-point used to estimate a PLY point-cloud's point
/// count from its file size (see `SPEC_FULL.md` open question 2).
pub const POINT_CLOUD_BYTES_PER_POINT_ESTIMATE: u64 = 45;

/// Maximum accepted upload size for a single image (50 MiB).
pub const OBJECT_STORE_MAX_IMAGE_BYTES: u64 = 50 * 1024 * 1024;

/// Allowed upload file extensions, lower-cased.
pub const OBJECT_STORE_ALLOWED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// Per-call timeout for embedding provider requests.
pub const EMBEDDING_CALL_TIMEOUT_SECS: u64 = 60;

/// Per-call timeout for vision-model requests (captioning, VQA, recommendation).
pub const VISION_CALL_TIMEOUT_SECS: u64 = 120;

/// Per-call timeout for the point-cloud generation HTTP request.
pub const POINT_CLOUD_CALL_TIMEOUT_SECS: u64 = 300;

/// Per-call timeout for remote image-edit requests.
pub const EDIT_CALL_TIMEOUT_SECS: u64 = 120;

/// Per-call timeout for the reasoning engine's tool-calling completion requests.
pub const REASONING_CALL_TIMEOUT_SECS: u64 = 60;

/// Per-call timeout for downloading a generated PLY artefact.
pub const POINT_CLOUD_DOWNLOAD_TIMEOUT_SECS: u64 = 30;

/// Interval between session-monitor polls of a point-cloud task's status.
pub const SESSION_MONITOR_POLL_INTERVAL_SECS: u64 = 5;

/// Maximum wall-clock time the session monitor polls a point-cloud task
/// before giving up without emitting a completion event.
pub const SESSION_MONITOR_TIMEOUT_SECS: u64 = 600;

/// Maximum number of images accepted by a single `recommend_images` call.
pub const RECOMMENDATION_MAX_IMAGES: usize = 10;

/// Hard ceiling on records scanned by the metadata-query month/day fallback
/// (`search_by_meta` with no year given).
pub const META_QUERY_SCAN_CEILING: usize = 20_000;

/// Hard ceiling on records fetched (not merely scanned) by the same fallback.
pub const META_QUERY_FETCH_CEILING: usize = 5_000;
