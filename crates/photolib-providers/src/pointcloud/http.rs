//! HTTP client for a remote 3D point-cloud generation service.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use photolib_domain::constants::{POINT_CLOUD_CALL_TIMEOUT_SECS, POINT_CLOUD_DOWNLOAD_TIMEOUT_SECS};
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::pointcloud::{
    PointCloudGenerationProvider, PointCloudGenerationResult, PointCloudRequest,
};
use photolib_domain::registry::pointcloud::{
    POINT_CLOUD_PROVIDERS, PointCloudProviderConfig, PointCloudProviderEntry,
};
use reqwest::multipart;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    view_url: Option<String>,
    #[serde(default)]
    metadata: serde_json::Value,
}

/// Generates point clouds by posting a multipart request to an external
/// 3D Gaussian splatting service and downloading the resulting PLY file.
pub struct HttpPointCloudProvider {
    client: reqwest::Client,
    download_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpPointCloudProvider {
    /// Builds a client bound to `base_url`, optionally bearer-authenticated
    /// with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(POINT_CLOUD_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build HTTP client: {e}")))?;
        let download_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(POINT_CLOUD_DOWNLOAD_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::internal(format!("failed to build download client: {e}")))?;
        Ok(Self { client, download_client, base_url: base_url.into(), api_key })
    }

    fn authed(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

fn classify_http_error(error: &reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timed_out("generate_pointcloud", POINT_CLOUD_CALL_TIMEOUT_SECS * 1000)
    } else {
        Error::provider_unavailable("pointcloud", error.to_string())
    }
}

#[async_trait]
impl PointCloudGenerationProvider for HttpPointCloudProvider {
    async fn generate(&self, request: PointCloudRequest) -> Result<PointCloudGenerationResult> {
        let image_part = multipart::Part::bytes(request.image_bytes)
            .mime_str(&request.media_type)
            .map_err(|e| Error::internal(format!("invalid media type: {e}")))?;
        let form = multipart::Form::new()
            .part("image", image_part)
            .text("quality", request.quality.to_string())
            .text("return_format", "url")
            .text("simplify_ply", "true");

        let endpoint = format!("{}/generate", self.base_url);
        let response = self
            .authed(self.client.post(endpoint).multipart(form))
            .send()
            .await
            .map_err(|e| classify_http_error(&e))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::rate_limited("pointcloud", None));
        }
        if status.is_server_error() {
            return Err(Error::provider_unavailable("pointcloud", format!("upstream status {status}")));
        }

        let body: GenerateResponse =
            response.json().await.map_err(|e| Error::corrupt_payload(format!("malformed point-cloud response: {e}")))?;

        if !status.is_success() || !body.success {
            let message = body.error.unwrap_or_else(|| "point-cloud generation rejected".to_owned());
            return Err(Error::invalid_input(message));
        }

        let download_url = body.download_url.ok_or_else(|| Error::corrupt_payload("response missing download_url"))?;
        Ok(PointCloudGenerationResult { download_url, view_url: body.view_url, metadata: body.metadata })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.download_client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timed_out("download_pointcloud", POINT_CLOUD_DOWNLOAD_TIMEOUT_SECS * 1000)
            } else {
                Error::provider_unavailable("pointcloud", e.to_string())
            }
        })?;
        if !response.status().is_success() {
            return Err(Error::provider_unavailable("pointcloud", format!("download failed with status {}", response.status())));
        }
        Ok(response.bytes().await.map_err(|e| Error::provider_unavailable("pointcloud", e.to_string()))?.to_vec())
    }

    fn provider_name(&self) -> &str {
        "http"
    }
}

fn http_factory(config: &PointCloudProviderConfig) -> std::result::Result<Arc<dyn PointCloudGenerationProvider>, String> {
    let base_url = config.base_url.clone().ok_or("pointcloud provider requires base_url")?;
    HttpPointCloudProvider::new(base_url, config.api_key.clone())
        .map(|provider| Arc::new(provider) as Arc<dyn PointCloudGenerationProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(POINT_CLOUD_PROVIDERS)]
static HTTP_PROVIDER: PointCloudProviderEntry = PointCloudProviderEntry {
    name: "http",
    description: "Remote 3D Gaussian splatting point-cloud generation service",
    build: http_factory,
};
