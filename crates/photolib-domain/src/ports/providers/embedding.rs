//! Embedding provider port: unit-length multimodal vectors from text, image,
//! or both.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// In-memory image payload, used when the caller has bytes rather than a path.
#[derive(Clone, Serialize, Deserialize)]
pub struct ImageInput {
    /// Raw encoded image bytes.
    pub bytes: Vec<u8>,
    /// Media type, e.g. `"image/png"`.
    pub media_type: String,
}

impl std::fmt::Debug for ImageInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageInput")
            .field("bytes_len", &self.bytes.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

/// Input to a single [`EmbeddingProvider::embed`] call.
///
/// At least one of `text`/`image` must be set, or the call fails with
/// [`crate::error::Error::InvalidInput`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedInput {
    /// Text to embed.
    pub text: Option<String>,
    /// Image to embed.
    pub image: Option<ImageInput>,
    /// Instruction prefix; defaults to the indexing instruction when unset
    /// (see `EMBEDDING_INDEXING_INSTRUCTION`).
    pub instruction: Option<String>,
    /// Whether to L2-normalise the output. Defaults to `true`; the vector
    /// store's invariants assume normalised vectors, so callers should only
    /// disable this for diagnostics.
    pub normalize: bool,
}

impl EmbedInput {
    /// Builds a text-only input with normalisation enabled.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            normalize: true,
            ..Default::default()
        }
    }

    /// Builds an image-only input with normalisation enabled.
    #[must_use]
    pub fn image(image: ImageInput) -> Self {
        Self {
            image: Some(image),
            normalize: true,
            ..Default::default()
        }
    }
}

/// A unit-length embedding vector of fixed dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embedding {
    /// The vector itself.
    pub vector: Vec<f32>,
    /// Dimension, redundant with `vector.len()` but kept for cheap assertions.
    pub dimensions: usize,
}

/// Produces unit-length embedding vectors of a fixed dimension from text,
/// image, or combined input. Exactly one backend is active per process,
/// selected by [`crate::registry::embedding`] from configuration.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds a single input.
    async fn embed(&self, input: EmbedInput) -> Result<Embedding>;

    /// Embeds a batch of inputs, preserving order and length. Providers
    /// without native batching may implement this as sequential `embed` calls.
    async fn embed_batch(&self, inputs: &[EmbedInput]) -> Result<Vec<Embedding>> {
        let mut out = Vec::with_capacity(inputs.len());
        for input in inputs {
            out.push(self.embed(input.clone()).await?);
        }
        Ok(out)
    }

    /// The fixed output dimension `D` this provider produces.
    fn vector_dimension(&self) -> usize;

    /// Identifies the backend for logging and metrics labelling.
    fn provider_name(&self) -> &str;

    /// Default health probe: embeds a short fixed string.
    async fn health_check(&self) -> Result<()> {
        self.embed(EmbedInput::text("health check")).await?;
        Ok(())
    }
}
