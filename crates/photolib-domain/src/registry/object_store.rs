//! Object Store Provider Registry
//!
//! Auto-registration system for object store providers using linkme distributed slices.

use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration for object store provider creation.
#[derive(Debug, Clone, Default)]
pub struct ObjectStoreProviderConfig {
    /// Provider name (e.g., "filesystem")
    pub provider: String,
    /// Storage root directory
    pub root: Option<PathBuf>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

crate::impl_config_builder!(ObjectStoreProviderConfig {
    /// Set the storage root directory
    root: with_root(into PathBuf),
});

crate::impl_registry!(
    provider_trait: crate::ports::providers::ObjectStoreProvider,
    config_type: ObjectStoreProviderConfig,
    entry_type: ObjectStoreProviderEntry,
    slice_name: OBJECT_STORE_PROVIDERS,
    resolve_fn: resolve_object_store_provider,
    list_fn: list_object_store_providers
);
