//! Local multimodal embedding provider, backed by `fastembed`'s CLIP models.
//!
//! Runs inference on an actor task so the underlying ONNX sessions are never
//! touched from more than one thread at a time, mirroring how the rest of
//! the provider pack isolates non-`Send`-friendly native handles.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use fastembed::{EmbeddingModel, ImageEmbedding, ImageEmbeddingModel, ImageInitOptions, InitOptions, TextEmbedding};
use photolib_domain::constants::embedding::{EMBEDDING_DIMENSION_FASTEMBED_CLIP, EMBEDDING_INDEXING_INSTRUCTION};
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::embedding::{EmbedInput, Embedding, EmbeddingProvider};
use photolib_domain::registry::embedding::{EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry};
use tokio::sync::{mpsc, oneshot};

use super::util::{flatten_to_rgb_jpeg, maybe_normalize};

enum EmbedJob {
    Text { text: String, tx: oneshot::Sender<Result<Vec<f32>>> },
    Image { path: PathBuf, tx: oneshot::Sender<Result<Vec<f32>>> },
}

/// Local CLIP-backed embedding provider. Text and images are encoded by the
/// two towers of the same CLIP model, so both land in the shared 512-d space.
pub struct LocalEmbeddingProvider {
    sender: mpsc::Sender<EmbedJob>,
}

impl LocalEmbeddingProvider {
    /// Initialises both CLIP towers and spawns the inference actor.
    ///
    /// # Errors
    ///
    /// Returns an error if either model fails to load (e.g. the weights
    /// cannot be fetched or cached locally).
    pub fn new(cache_dir: Option<PathBuf>) -> Result<Self> {
        let mut text_options = InitOptions::new(EmbeddingModel::ClipVitB32);
        let mut image_options = ImageInitOptions::new(ImageEmbeddingModel::ClipVitB32);
        if let Some(dir) = cache_dir {
            text_options = text_options.with_cache_dir(dir.clone());
            image_options = image_options.with_cache_dir(dir);
        }

        let text_model = TextEmbedding::try_new(text_options)
            .map_err(|e| Error::misconfigured(format!("failed to load local CLIP text model: {e}")))?;
        let image_model = ImageEmbedding::try_new(image_options)
            .map_err(|e| Error::misconfigured(format!("failed to load local CLIP image model: {e}")))?;

        let (sender, receiver) = mpsc::channel(32);
        tokio::task::spawn_blocking(move || run_actor(receiver, text_model, image_model));

        Ok(Self { sender })
    }

    async fn embed_text(&self, text: String) -> Result<Vec<f32>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EmbedJob::Text { text, tx })
            .await
            .map_err(|_| Error::provider_unavailable("fastembed", "inference actor is not running"))?;
        rx.await.map_err(|_| Error::provider_unavailable("fastembed", "inference actor dropped the request"))?
    }

    async fn embed_image(&self, path: PathBuf) -> Result<Vec<f32>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(EmbedJob::Image { path, tx })
            .await
            .map_err(|_| Error::provider_unavailable("fastembed", "inference actor is not running"))?;
        rx.await.map_err(|_| Error::provider_unavailable("fastembed", "inference actor dropped the request"))?
    }
}

fn run_actor(mut receiver: mpsc::Receiver<EmbedJob>, text_model: TextEmbedding, image_model: ImageEmbedding) {
    while let Some(job) = receiver.blocking_recv() {
        match job {
            EmbedJob::Text { text, tx } => {
                let result = text_model
                    .embed(vec![text], None)
                    .map(|mut vectors| vectors.remove(0))
                    .map_err(|e| Error::provider_unavailable("fastembed", e.to_string()));
                let _ = tx.send(result);
            }
            EmbedJob::Image { path, tx } => {
                let result = image_model
                    .embed(vec![path], None)
                    .map(|mut vectors| vectors.remove(0))
                    .map_err(|e| Error::provider_unavailable("fastembed", e.to_string()));
                let _ = tx.send(result);
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for LocalEmbeddingProvider {
    async fn embed(&self, input: EmbedInput) -> Result<Embedding> {
        if input.text.is_none() && input.image.is_none() {
            return Err(Error::invalid_input("embedding input must carry text and/or an image"));
        }

        let instruction = input.instruction.as_deref().unwrap_or(EMBEDDING_INDEXING_INSTRUCTION);

        let text_vector = match &input.text {
            Some(text) => Some(self.embed_text(format!("{instruction} {text}")).await?),
            None => None,
        };

        let image_vector = match &input.image {
            Some(image) => {
                let jpeg_bytes = flatten_to_rgb_jpeg(&image.bytes)?;
                let temp_file = tempfile::Builder::new()
                    .suffix(".jpg")
                    .tempfile()
                    .map_err(|e| Error::internal(format!("failed to create temp file for inference: {e}")))?;
                std::fs::write(temp_file.path(), jpeg_bytes)
                    .map_err(|e| Error::internal(format!("failed to write temp image for inference: {e}")))?;
                Some(self.embed_image(temp_file.path().to_path_buf()).await?)
            }
            None => None,
        };

        let mut vector = match (text_vector, image_vector) {
            (Some(t), Some(i)) => t.iter().zip(i.iter()).map(|(a, b)| (a + b) / 2.0).collect(),
            (Some(t), None) => t,
            (None, Some(i)) => i,
            (None, None) => unreachable!("validated above"),
        };

        maybe_normalize(&mut vector, input.normalize);
        let dimensions = vector.len();
        Ok(Embedding { vector, dimensions })
    }

    fn vector_dimension(&self) -> usize {
        EMBEDDING_DIMENSION_FASTEMBED_CLIP
    }

    fn provider_name(&self) -> &str {
        "local"
    }
}

fn local_factory(config: &EmbeddingProviderConfig) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    LocalEmbeddingProvider::new(config.cache_dir.clone())
        .map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static LOCAL_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "local",
    description: "Local CLIP embedding via fastembed (no network dependency)",
    build: local_factory,
};
