//! Moka in-memory cache provider.
//!
//! High-performance, concurrent in-memory cache, used to memoize embedding
//! vectors and search results that are expensive to recompute.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::future::Cache;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider, CacheStats};
use photolib_domain::registry::cache::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};

/// Moka-based in-memory cache provider. Values are stored as raw bytes so
/// the provider stays agnostic to what's cached; TTL is tracked per-entry
/// rather than at the cache level since callers set it per call.
#[derive(Clone)]
pub struct MokaCacheProvider {
    cache: Cache<String, CachedValue>,
    max_size: usize,
}

#[derive(Clone)]
struct CachedValue {
    bytes: Vec<u8>,
    expires_at: Option<Instant>,
}

impl MokaCacheProvider {
    /// Creates a provider with the given maximum entry count.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        let cache = Cache::builder().max_capacity(max_size as u64).build();
        Self { cache, max_size }
    }

    async fn set(&self, key: &str, bytes: Vec<u8>, config: CacheEntryConfig) -> Result<()> {
        let expires_at = config.ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        self.cache.insert(key.to_owned(), CachedValue { bytes, expires_at }).await;
        Ok(())
    }
}

#[async_trait]
impl CacheProvider for MokaCacheProvider {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let Some(cached) = self.cache.get(key).await else {
            return Ok(None);
        };
        if cached.expires_at.is_some_and(|expires_at| Instant::now() >= expires_at) {
            self.cache.invalidate(key).await;
            return Ok(None);
        }
        let json = String::from_utf8(cached.bytes)
            .map_err(|e| Error::corrupt_payload(format!("cached value is not valid UTF-8: {e}")))?;
        Ok(Some(json))
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        self.set(key, value.as_bytes().to_vec(), config).await
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let existed = self.cache.contains_key(key);
        self.cache.invalidate(key).await;
        Ok(existed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(key))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        self.cache.run_pending_tasks().await;
        Ok(CacheStats {
            hits: 0,
            misses: 0,
            entries: self.cache.entry_count(),
            hit_rate: 0.0,
            bytes_used: 0,
        })
    }

    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheProvider")
            .field("max_size", &self.max_size)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

fn moka_cache_factory(config: &CacheProviderConfig) -> std::result::Result<Arc<dyn CacheProvider>, String> {
    let max_size = config.max_size.unwrap_or(10_000);
    Ok(Arc::new(MokaCacheProvider::new(max_size)))
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static MOKA_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "moka",
    description: "Moka high-performance in-memory cache",
    build: moka_cache_factory,
};
