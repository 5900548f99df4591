//! Reasoning Engine Provider Registry
//!
//! Auto-registration system for reasoning engine providers (the agent
//! orchestrator's tool-calling backend) using linkme distributed slices.

use std::collections::HashMap;

/// Configuration for reasoning engine provider creation.
#[derive(Debug, Clone, Default)]
pub struct ReasoningProviderConfig {
    /// Provider name (e.g., "http")
    pub provider: String,
    /// Base URL of the OpenAI-compatible chat completions API
    pub base_url: Option<String>,
    /// API key for authentication
    pub api_key: Option<String>,
    /// Model name/identifier
    pub model: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(ReasoningProviderConfig {
    /// Set the base URL of the API
    base_url: with_base_url(into String),
    /// Set the API key
    api_key: with_api_key(into String),
    /// Set the model name
    model: with_model(into String),
});

crate::impl_registry!(
    provider_trait: crate::ports::providers::ReasoningEngineProvider,
    config_type: ReasoningProviderConfig,
    entry_type: ReasoningProviderEntry,
    slice_name: REASONING_PROVIDERS,
    resolve_fn: resolve_reasoning_provider,
    list_fn: list_reasoning_providers
);
