//! Remote multimodal embedding provider: posts one input at a time to an
//! HTTP embedding API with an explicit target dimension.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use photolib_domain::constants::embedding::{EMBEDDING_DIMENSION_REMOTE_DEFAULT, EMBEDDING_INDEXING_INSTRUCTION};
use photolib_domain::constants::EMBEDDING_CALL_TIMEOUT_SECS;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::embedding::{EmbedInput, Embedding, EmbeddingProvider};
use photolib_domain::registry::embedding::{EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::util::{flatten_to_rgb_jpeg, maybe_normalize};

#[derive(Debug, Deserialize)]
struct RemoteEmbedResponse {
    embedding: Vec<f32>,
}

/// HTTP-backed embedding provider. Requires an API key; calls the endpoint
/// once per input, attaching local images as multipart file parts.
pub struct RemoteEmbeddingProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    dimensions: usize,
}

impl RemoteEmbeddingProvider {
    /// Builds a provider bound to `base_url`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, dimensions: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(EMBEDDING_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), api_key: api_key.into(), dimensions })
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteEmbeddingProvider {
    async fn embed(&self, input: EmbedInput) -> Result<Embedding> {
        if input.text.is_none() && input.image.is_none() {
            return Err(Error::invalid_input("embedding input must carry text and/or an image"));
        }

        let instruction = input.instruction.as_deref().unwrap_or(EMBEDDING_INDEXING_INSTRUCTION).to_owned();
        let mut form = Form::new().text("instruction", instruction).text("dimension", self.dimensions.to_string());

        if let Some(text) = &input.text {
            form = form.text("text", text.clone());
        }

        if let Some(image) = &input.image {
            let jpeg_bytes = flatten_to_rgb_jpeg(&image.bytes)?;
            let part = Part::bytes(jpeg_bytes).file_name("image.jpg").mime_str("image/jpeg").map_err(|e| {
                Error::internal(format!("failed to build multipart image attachment: {e}"))
            })?;
            form = form.part("image", part);
        }

        let response = self
            .client
            .post(format!("{}/v1/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| classify_http_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            return Err(Error::rate_limited("remote-embedding", retry_after_ms));
        }
        if status.is_server_error() {
            return Err(Error::provider_unavailable("remote-embedding", format!("upstream status {status}")));
        }
        if !status.is_success() {
            return Err(Error::invalid_input(format!("remote embedding request rejected: {status}")));
        }

        let parsed: RemoteEmbedResponse =
            response.json().await.map_err(|e| Error::corrupt_payload(format!("malformed embedding response: {e}")))?;

        let mut vector = parsed.embedding;
        maybe_normalize(&mut vector, input.normalize);
        let dimensions = vector.len();
        Ok(Embedding { vector, dimensions })
    }

    fn vector_dimension(&self) -> usize {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "remote"
    }
}

fn classify_http_error(error: &reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out("remote-embedding", EMBEDDING_CALL_TIMEOUT_SECS * 1000)
    } else {
        Error::provider_unavailable("remote-embedding", error.to_string())
    }
}

fn remote_factory(config: &EmbeddingProviderConfig) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let base_url = config.base_url.clone().ok_or_else(|| "remote embedding provider requires base_url".to_owned())?;
    let api_key = config.api_key.clone().ok_or_else(|| "remote embedding provider requires api_key".to_owned())?;
    let dimensions = config.dimensions.unwrap_or(EMBEDDING_DIMENSION_REMOTE_DEFAULT);
    RemoteEmbeddingProvider::new(base_url, api_key, dimensions)
        .map(|provider| Arc::new(provider) as Arc<dyn EmbeddingProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static REMOTE_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "remote",
    description: "HTTP multimodal embedding API, one input per call",
    build: remote_factory,
};
