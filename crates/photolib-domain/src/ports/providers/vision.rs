//! Vision model port: the remote multimodal LLM used for captioning, VQA,
//! single-image analysis, and multi-image aesthetic recommendation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single image attached to a vision-model request, base64-encoded inline
/// per the remote API's contract.
#[derive(Clone, Serialize, Deserialize)]
pub struct VisionImage {
    /// Base64-encoded image bytes.
    pub base64_data: String,
    /// Media type, e.g. `"image/jpeg"`.
    pub media_type: String,
}

impl std::fmt::Debug for VisionImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionImage")
            .field("base64_len", &self.base64_data.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

/// A single chat-style call to the vision model: one or more images, a
/// prompt, and an optional system instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionRequest {
    /// Images to attach, in order.
    pub images: Vec<VisionImage>,
    /// The user-facing prompt (caption style, a VQA question, the
    /// recommendation analysis prompt, etc).
    pub prompt: String,
    /// Optional system-level instruction.
    pub system: Option<String>,
    /// Per-call timeout override; defaults to the provider's own timeout
    /// (120s for vision calls, per the concurrency model).
    pub timeout: Option<std::time::Duration>,
}

/// Raw text completion from the vision model, before any structured
/// extraction (e.g. recommendation JSON parsing) is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionResponse {
    /// The model's text output.
    pub content: String,
}

/// A remote multimodal vision LLM, used for captions, VQA, single-image
/// "analyze" actions, and the multi-image recommendation workflow. Retries
/// up to [`crate::constants::retry::RETRY_MAX_ATTEMPTS`] times with
/// exponential backoff on timeout or a 5xx/429 response.
#[async_trait]
pub trait VisionModelProvider: Send + Sync {
    /// Issues one vision-model call.
    async fn complete(&self, request: VisionRequest) -> Result<VisionResponse>;

    /// Identifies the backend for logging and metrics labelling.
    fn provider_name(&self) -> &str;
}
