//! Image edit provider port: the remote model behind `edit_image`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Parameters for a single edit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    /// Source image bytes.
    pub source_bytes: Vec<u8>,
    /// Media type of the source bytes.
    pub media_type: String,
    /// Natural-language edit instruction.
    pub prompt: String,
    /// Optional named style (e.g. `"watercolor"`), recorded in derived metadata.
    pub style: Option<String>,
    /// Backend-specific extra parameters, passed through verbatim.
    pub parameters: serde_json::Value,
}

/// One generated output of an edit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditedOutput {
    /// Generated image bytes.
    pub bytes: Vec<u8>,
    /// Media type of the generated bytes.
    pub media_type: String,
}

/// A remote image-editing model. The application layer persists each
/// returned output as a new [`crate::entities::Image`] carrying
/// `{source_image_id, edit_prompt, edit_style, edit_model, edit_parameters,
/// edit_time}` in its `extra` metadata and triggers async indexing for it.
#[async_trait]
pub trait ImageEditProvider: Send + Sync {
    /// Submits one edit request and returns the generated outputs.
    async fn edit(&self, request: EditRequest) -> Result<Vec<EditedOutput>>;

    /// Identifies the backend model, recorded in derived image metadata.
    fn model_name(&self) -> &str;
}
