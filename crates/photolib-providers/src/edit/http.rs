//! HTTP client for a remote image-editing model.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use photolib_domain::constants::EDIT_CALL_TIMEOUT_SECS;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::edit::{EditRequest, EditedOutput, ImageEditProvider};
use photolib_domain::registry::edit::{EDIT_PROVIDERS, EditProviderConfig, EditProviderEntry};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct EditResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    outputs: Vec<EditResponseOutput>,
}

#[derive(Debug, Deserialize)]
struct EditResponseOutput {
    base64_data: String,
    media_type: String,
}

/// Calls a remote generative edit model with one base64-encoded source
/// image and a natural-language instruction, returning one or more
/// generated outputs.
pub struct HttpEditProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpEditProvider {
    /// Builds a client bound to `base_url`, calling `model` on each request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(EDIT_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), api_key, model: model.into() })
    }
}

#[async_trait]
impl ImageEditProvider for HttpEditProvider {
    async fn edit(&self, request: EditRequest) -> Result<Vec<EditedOutput>> {
        let body = json!({
            "model": self.model,
            "image": BASE64.encode(&request.source_bytes),
            "media_type": request.media_type,
            "prompt": request.prompt,
            "style": request.style,
            "parameters": request.parameters,
        });

        let endpoint = format!("{}/v1/images/edits", self.base_url);
        let mut builder = self.client.post(endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(classify_http_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::rate_limited("edit", None));
        }
        if status.is_server_error() {
            return Err(Error::provider_unavailable("edit", format!("upstream status {status}")));
        }

        let parsed: EditResponse =
            response.json().await.map_err(|e| Error::corrupt_payload(format!("malformed edit response: {e}")))?;

        if !status.is_success() {
            let message = parsed.error.unwrap_or_else(|| "edit model rejected the request".to_owned());
            return Err(Error::invalid_input(message));
        }

        if parsed.outputs.is_empty() {
            return Err(Error::corrupt_payload("edit response contained no outputs"));
        }

        parsed
            .outputs
            .into_iter()
            .map(|output| {
                BASE64
                    .decode(&output.base64_data)
                    .map(|bytes| EditedOutput { bytes, media_type: output.media_type })
                    .map_err(|e| Error::corrupt_payload(format!("malformed base64 in edit output: {e}")))
            })
            .collect()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn classify_http_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out("edit_image", EDIT_CALL_TIMEOUT_SECS * 1000)
    } else {
        Error::provider_unavailable("edit", error.to_string())
    }
}

fn http_factory(config: &EditProviderConfig) -> std::result::Result<Arc<dyn ImageEditProvider>, String> {
    let base_url = config.base_url.clone().ok_or("edit provider requires base_url")?;
    let model = config.model.clone().ok_or("edit provider requires model")?;
    HttpEditProvider::new(base_url, config.api_key.clone(), model)
        .map(|provider| Arc::new(provider) as Arc<dyn ImageEditProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(EDIT_PROVIDERS)]
static HTTP_PROVIDER: EditProviderEntry = EditProviderEntry {
    name: "http",
    description: "Remote generative image-edit model",
    build: http_factory,
};
