//! Vision Model Provider Registry
//!
//! Auto-registration system for vision model providers using linkme distributed slices.

use std::collections::HashMap;

/// Configuration for vision model provider creation.
#[derive(Debug, Clone, Default)]
pub struct VisionProviderConfig {
    /// Provider name (e.g., "http")
    pub provider: String,
    /// Base URL of the multimodal vision API
    pub base_url: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Model name/identifier
    pub model: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(VisionProviderConfig {
    /// Set the base URL of the API
    base_url: with_base_url(into String),
    /// Set the API key
    api_key: with_api_key(into String),
    /// Set the model name
    model: with_model(into String),
});

crate::impl_registry!(
    provider_trait: crate::ports::providers::VisionModelProvider,
    config_type: VisionProviderConfig,
    entry_type: VisionProviderEntry,
    slice_name: VISION_PROVIDERS,
    resolve_fn: resolve_vision_provider,
    list_fn: list_vision_providers
);
