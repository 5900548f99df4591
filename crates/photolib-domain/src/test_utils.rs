//! Centralized test utilities for the entire workspace.
//!
//! All crates should import shared test fixture builders from here instead of
//! redefining them locally.

/// Centralized test result type for all test functions across the workspace.
///
/// # Example
/// ```rust,ignore
/// use photolib_domain::test_utils::TestResult;
///
/// #[test]
/// fn my_test() -> TestResult {
///     let value = some_fallible_fn()?;
///     assert_eq!(value, 42);
///     Ok(())
/// }
/// ```
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Returns the workspace root directory by traversing up from the crate manifest dir.
///
/// Each crate sits at `<workspace>/crates/<crate>`, so 2 ancestors up is the workspace root.
///
/// # Errors
///
/// Returns an error if `CARGO_MANIFEST_DIR` has fewer than 2 parent directories.
pub fn workspace_root() -> TestResult<std::path::PathBuf> {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .ok_or_else(|| {
            "workspace root not found (CARGO_MANIFEST_DIR has fewer than 2 parents)".into()
        })
        .map(std::path::Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// Common test identity constants
// ---------------------------------------------------------------------------

/// Default test session user id.
pub const TEST_USER_ID: &str = "test-user";

/// Default test timestamp (`2023-11-14T22:13:20Z`).
pub const TEST_TIMESTAMP: i64 = 1_700_000_000;

use crate::entities::{Image, ImageMetadata, ScoredRecord, Session, ToolCall, VectorPayload, VectorRecord};
use crate::ports::providers::embedding::Embedding;
use crate::value_objects::{ImageFormat, ImageId, SessionId};

/// Creates a test [`Image`] with the given filename and an otherwise-default body.
#[must_use]
pub fn create_test_image(filename: &str) -> Image {
    Image {
        id: ImageId::new(),
        filename: filename.to_owned(),
        relative_path: format!("2026/01/01/{filename}"),
        file_size: 1024,
        width: Some(800),
        height: Some(600),
        format: ImageFormat::Jpeg,
        created_at: chrono::DateTime::from_timestamp(TEST_TIMESTAMP, 0)
            .unwrap_or_else(chrono::Utc::now),
        metadata: ImageMetadata::default(),
    }
}

/// Creates a test [`Embedding`] of the given dimension, filled with a constant value.
#[must_use]
pub fn create_test_embedding(dimensions: usize) -> Embedding {
    Embedding {
        vector: vec![0.1_f32; dimensions],
        dimensions,
    }
}

/// Creates a test [`VectorRecord`] for the given image id.
#[must_use]
pub fn create_test_vector_record(id: ImageId, dimensions: usize) -> VectorRecord {
    VectorRecord {
        id,
        vector: vec![0.1_f32; dimensions],
        payload: VectorPayload {
            tags: vec!["test".to_owned()],
            created_at: chrono::DateTime::from_timestamp(TEST_TIMESTAMP, 0)
                .unwrap_or_else(chrono::Utc::now),
            filename: "test.jpg".to_owned(),
            description: None,
            extra: std::collections::HashMap::new(),
        },
    }
}

/// Creates a test [`ScoredRecord`] wrapping [`create_test_vector_record`] with the given score.
#[must_use]
pub fn create_test_scored_record(id: ImageId, dimensions: usize, score: f32) -> ScoredRecord {
    let record = create_test_vector_record(id, dimensions);
    ScoredRecord {
        id: record.id,
        score,
        payload: record.payload,
    }
}

/// Creates a test [`Session`] with a fresh id.
#[must_use]
pub fn create_test_session() -> Session {
    Session::new(SessionId::new(), Some(TEST_USER_ID.to_owned()))
}

/// Creates a test [`ToolCall`] for the given session.
#[must_use]
pub fn create_test_tool_call(session_id: SessionId, tool_name: &str) -> ToolCall {
    ToolCall::start(session_id, tool_name.to_owned(), serde_json::json!({}))
}
