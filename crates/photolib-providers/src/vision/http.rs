//! HTTP client for a remote multimodal vision model, speaking an
//! OpenAI-compatible chat completions wire format.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use photolib_domain::constants::VISION_CALL_TIMEOUT_SECS;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::vision::{VisionModelProvider, VisionRequest, VisionResponse};
use photolib_domain::registry::vision::{VISION_PROVIDERS, VisionProviderConfig, VisionProviderEntry};
use serde::Deserialize;
use serde_json::{Value, json};

/// Calls a chat-completions-style multimodal endpoint with inline
/// base64-encoded images. Issues exactly one HTTP request per call; retry
/// with backoff is the caller's responsibility.
pub struct HttpVisionProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpVisionProvider {
    /// Builds a client bound to `base_url`, calling `model` on each request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(VISION_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.into(), api_key, model: model.into() })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[async_trait]
impl VisionModelProvider for HttpVisionProvider {
    async fn complete(&self, request: VisionRequest) -> Result<VisionResponse> {
        let mut content: Vec<Value> = request
            .images
            .iter()
            .map(|image| {
                json!({
                    "type": "image_url",
                    "image_url": {"url": format!("data:{};base64,{}", image.media_type, image.base64_data)},
                })
            })
            .collect();
        content.push(json!({"type": "text", "text": request.prompt}));

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": content}));

        let body = json!({"model": self.model, "messages": messages});

        let endpoint = format!("{}/v1/chat/completions", self.base_url);
        let mut builder = self.client.post(endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(classify_http_error)?;
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            return Err(Error::rate_limited("vision", retry_after_ms));
        }
        if status.is_server_error() {
            return Err(Error::provider_unavailable("vision", format!("upstream status {status}")));
        }
        if !status.is_success() {
            return Err(Error::invalid_input(format!("vision model rejected the request with status {status}")));
        }

        let parsed: ChatCompletionResponse =
            response.json().await.map_err(|e| Error::corrupt_payload(format!("malformed vision response: {e}")))?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::corrupt_payload("vision response contained no choices"))?;
        Ok(VisionResponse { content })
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

fn classify_http_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out("vision_complete", VISION_CALL_TIMEOUT_SECS * 1000)
    } else {
        Error::provider_unavailable("vision", error.to_string())
    }
}

fn http_factory(config: &VisionProviderConfig) -> std::result::Result<Arc<dyn VisionModelProvider>, String> {
    let base_url = config.base_url.clone().ok_or("vision provider requires base_url")?;
    let model = config.model.clone().ok_or("vision provider requires model")?;
    HttpVisionProvider::new(base_url, config.api_key.clone(), model)
        .map(|provider| Arc::new(provider) as Arc<dyn VisionModelProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(VISION_PROVIDERS)]
static HTTP_PROVIDER: VisionProviderEntry = VisionProviderEntry {
    name: "http",
    description: "OpenAI-compatible multimodal chat completions endpoint",
    build: http_factory,
};
