//! Point-cloud Generation Provider Registry
//!
//! Auto-registration system for point-cloud generation providers using linkme distributed slices.

use std::collections::HashMap;

/// Configuration for point-cloud generation provider creation.
#[derive(Debug, Clone, Default)]
pub struct PointCloudProviderConfig {
    /// Provider name (e.g., "http")
    pub provider: String,
    /// Base URL of the external 3DGS service
    pub base_url: Option<String>,
    /// API key for authentication, if required
    pub api_key: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(PointCloudProviderConfig {
    /// Set the base URL of the external service
    base_url: with_base_url(into String),
    /// Set the API key
    api_key: with_api_key(into String),
});

crate::impl_registry!(
    provider_trait: crate::ports::providers::PointCloudGenerationProvider,
    config_type: PointCloudProviderConfig,
    entry_type: PointCloudProviderEntry,
    slice_name: POINT_CLOUD_PROVIDERS,
    resolve_fn: resolve_point_cloud_provider,
    list_fn: list_point_cloud_providers
);
