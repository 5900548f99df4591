//! Image Edit Provider Registry
//!
//! Auto-registration system for image edit providers using linkme distributed slices.

use std::collections::HashMap;

/// Configuration for image edit provider creation.
#[derive(Debug, Clone, Default)]
pub struct EditProviderConfig {
    /// Provider name (e.g., "http")
    pub provider: String,
    /// Base URL of the remote edit model API
    pub base_url: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Model name/identifier
    pub model: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(EditProviderConfig {
    /// Set the base URL of the API
    base_url: with_base_url(into String),
    /// Set the API key
    api_key: with_api_key(into String),
    /// Set the model name
    model: with_model(into String),
});

crate::impl_registry!(
    provider_trait: crate::ports::providers::ImageEditProvider,
    config_type: EditProviderConfig,
    entry_type: EditProviderEntry,
    slice_name: EDIT_PROVIDERS,
    resolve_fn: resolve_edit_provider,
    list_fn: list_edit_providers
);
