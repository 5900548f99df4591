//! Configuration value objects for external providers.
//!
//! These are the provider-facing configuration shapes resolved by the
//! registries in [`crate::registry`]; the infrastructure layer's own
//! `AppConfig` is built from these via `figment`.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::types::{EmbeddingProviderKind, VectorStoreProviderKind};

const REDACTED: &str = "REDACTED";

/// Configuration for connecting to and using an embedding provider.
#[derive(Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EmbeddingConfig {
    /// Provider name (e.g. "local-fastembed", "remote").
    pub provider: EmbeddingProviderKind,
    /// Model identifier specific to the provider.
    pub model: Option<String>,
    /// API key for remote providers.
    pub api_key: Option<String>,
    /// Custom API endpoint URL for remote providers.
    pub base_url: Option<String>,
    /// Output embedding dimensions.
    pub dimensions: Option<usize>,
    /// On-disk cache directory for local model weights.
    pub cache_dir: Option<String>,
    /// Additional provider-specific configuration.
    pub extra: HashMap<String, String>,
}

impl fmt::Debug for EmbeddingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| REDACTED))
            .field("base_url", &self.base_url)
            .field("dimensions", &self.dimensions)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

crate::impl_config_builder!(EmbeddingConfig {
    /// Set the model name.
    model: with_model(into String),
    /// Set the API key.
    api_key: with_api_key(into String),
    /// Set the base URL for the API.
    base_url: with_base_url(into String),
    /// Set the embedding dimensions.
    dimensions: with_dimensions(usize),
    /// Set the local model cache directory.
    cache_dir: with_cache_dir(into String),
});

/// Configuration for connecting to a vector store backend.
#[derive(Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VectorStoreConfig {
    /// Provider name (e.g. "local-file", "qdrant").
    pub provider: VectorStoreProviderKind,
    /// Server address for remote providers (e.g. Qdrant).
    pub address: Option<String>,
    /// Authentication token for remote providers.
    pub token: Option<String>,
    /// Collection name for organizing vectors.
    pub collection: Option<String>,
    /// Expected embedding dimensions.
    pub dimensions: Option<usize>,
    /// On-disk directory for the local-file provider's snapshot.
    pub data_dir: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Additional provider-specific configuration.
    pub extra: HashMap<String, String>,
}

impl fmt::Debug for VectorStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorStoreConfig")
            .field("provider", &self.provider)
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| REDACTED))
            .field("collection", &self.collection)
            .field("dimensions", &self.dimensions)
            .field("data_dir", &self.data_dir)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

crate::impl_config_builder!(VectorStoreConfig {
    /// Set the server address.
    address: with_address(into String),
    /// Set the collection name.
    collection: with_collection(into String),
    /// Set the embedding dimensions.
    dimensions: with_dimensions(usize),
    /// Set the authentication token.
    token: with_token(into String),
});
