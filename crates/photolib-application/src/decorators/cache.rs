//! Metadata-lookup caching for [`ObjectStoreProvider`] (C3's `cache` section).
//!
//! Only `stat` is memoized — `get`/`list` stream or page full bytes that
//! aren't worth duplicating in an in-memory cache, and `stat` is the call the
//! search/artefact-extraction paths repeat most per request. Any mutation
//! invalidates the entry rather than trying to patch it in place.

use std::sync::Arc;

use async_trait::async_trait;
use photolib_domain::entities::Image;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::cache::{CacheEntryConfig, CacheProvider};
use photolib_domain::ports::providers::{ImageMetadataEdit, ListSortBy, ObjectStoreProvider, ObjectStoreStats, SortOrder};
use photolib_domain::value_objects::ImageId;

/// Wraps an [`ObjectStoreProvider`], fronting `stat` with `cache`.
pub struct CachedObjectStoreProvider {
    inner: Arc<dyn ObjectStoreProvider>,
    cache: Arc<dyn CacheProvider>,
    ttl_secs: u64,
}

impl CachedObjectStoreProvider {
    /// Wraps `inner`, memoizing `stat` lookups in `cache` for `ttl_secs`.
    #[must_use]
    pub fn new(inner: Arc<dyn ObjectStoreProvider>, cache: Arc<dyn CacheProvider>, ttl_secs: u64) -> Self {
        Self { inner, cache, ttl_secs }
    }

    fn key(id: &ImageId) -> String {
        format!("image-stat:{id}")
    }

    async fn invalidate(&self, id: &ImageId) {
        let _ = self.cache.delete(&Self::key(id)).await;
    }
}

#[async_trait]
impl ObjectStoreProvider for CachedObjectStoreProvider {
    async fn put(&self, bytes: Vec<u8>, original_filename: &str) -> Result<Image> {
        self.inner.put(bytes, original_filename).await
    }

    async fn get(&self, id: &ImageId) -> Result<Option<(Vec<u8>, String)>> {
        self.inner.get(id).await
    }

    async fn stat(&self, id: &ImageId) -> Result<Option<Image>> {
        let key = Self::key(id);
        if let Some(json) = self.cache.get_json(&key).await? {
            match serde_json::from_str::<Image>(&json) {
                Ok(image) => return Ok(Some(image)),
                Err(_) => {
                    let _ = self.cache.delete(&key).await;
                }
            }
        }

        let result = self.inner.stat(id).await?;
        if let Some(image) = &result {
            let json = serde_json::to_string(image).map_err(|e| Error::internal(e.to_string()))?;
            self.cache.set_json(&key, &json, CacheEntryConfig::new().with_ttl_secs(self.ttl_secs)).await?;
        }
        Ok(result)
    }

    async fn update_metadata(&self, id: &ImageId, edit: ImageMetadataEdit) -> Result<Option<Image>> {
        let result = self.inner.update_metadata(id, edit).await;
        self.invalidate(id).await;
        result
    }

    async fn path_of(&self, id: &ImageId) -> Result<Option<std::path::PathBuf>> {
        self.inner.path_of(id).await
    }

    async fn delete(&self, id: &ImageId) -> Result<bool> {
        let result = self.inner.delete(id).await;
        self.invalidate(id).await;
        result
    }

    async fn list(&self, page: usize, page_size: usize, sort_by: ListSortBy, sort_order: SortOrder) -> Result<(Vec<Image>, u64)> {
        self.inner.list(page, page_size, sort_by, sort_order).await
    }

    async fn stats(&self) -> Result<ObjectStoreStats> {
        self.inner.stats().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use photolib_domain::ports::providers::cache::CacheStats;
    use photolib_domain::value_objects::ImageFormat;

    use super::*;

    #[derive(Default)]
    struct FakeObjectStore {
        stat_calls: Mutex<u32>,
        image: Image,
    }

    impl FakeObjectStore {
        fn new() -> Self {
            Self {
                stat_calls: Mutex::new(0),
                image: Image::new("a.jpg".to_owned(), "2026/07/29/a.jpg".to_owned(), 10, ImageFormat::Jpeg),
            }
        }
    }

    #[async_trait]
    impl ObjectStoreProvider for FakeObjectStore {
        async fn put(&self, _bytes: Vec<u8>, _original_filename: &str) -> Result<Image> {
            panic!("not exercised by this test")
        }
        async fn get(&self, _id: &ImageId) -> Result<Option<(Vec<u8>, String)>> {
            panic!("not exercised by this test")
        }
        async fn stat(&self, _id: &ImageId) -> Result<Option<Image>> {
            *self.stat_calls.lock().unwrap() += 1;
            Ok(Some(self.image.clone()))
        }
        async fn update_metadata(&self, _id: &ImageId, _edit: ImageMetadataEdit) -> Result<Option<Image>> {
            Ok(Some(self.image.clone()))
        }
        async fn path_of(&self, _id: &ImageId) -> Result<Option<std::path::PathBuf>> {
            panic!("not exercised by this test")
        }
        async fn delete(&self, _id: &ImageId) -> Result<bool> {
            Ok(true)
        }
        async fn list(&self, _page: usize, _page_size: usize, _sort_by: ListSortBy, _sort_order: SortOrder) -> Result<(Vec<Image>, u64)> {
            panic!("not exercised by this test")
        }
        async fn stats(&self) -> Result<ObjectStoreStats> {
            panic!("not exercised by this test")
        }
    }

    #[derive(Default)]
    struct FakeCache {
        store: Mutex<std::collections::HashMap<String, String>>,
    }

    #[async_trait]
    impl CacheProvider for FakeCache {
        async fn get_json(&self, key: &str) -> Result<Option<String>> {
            Ok(self.store.lock().unwrap().get(key).cloned())
        }
        async fn set_json(&self, key: &str, value: &str, _config: CacheEntryConfig) -> Result<()> {
            self.store.lock().unwrap().insert(key.to_owned(), value.to_owned());
            Ok(())
        }
        async fn delete(&self, key: &str) -> Result<bool> {
            Ok(self.store.lock().unwrap().remove(key).is_some())
        }
        async fn exists(&self, key: &str) -> Result<bool> {
            Ok(self.store.lock().unwrap().contains_key(key))
        }
        async fn clear(&self) -> Result<()> {
            self.store.lock().unwrap().clear();
            Ok(())
        }
        async fn stats(&self) -> Result<CacheStats> {
            panic!("not exercised by this test")
        }
        async fn size(&self) -> Result<usize> {
            Ok(self.store.lock().unwrap().len())
        }
        fn provider_name(&self) -> &str {
            "fake"
        }
    }

    impl std::fmt::Debug for FakeCache {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("FakeCache").finish()
        }
    }

    #[tokio::test]
    async fn second_stat_is_served_from_cache() {
        let inner = Arc::new(FakeObjectStore::new());
        let cache = Arc::new(FakeCache::default());
        let decorated = CachedObjectStoreProvider::new(inner.clone(), cache, 60);

        let id = ImageId::new();
        decorated.stat(&id).await.unwrap();
        decorated.stat(&id).await.unwrap();

        assert_eq!(*inner.stat_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn update_metadata_invalidates_cached_entry() {
        let inner = Arc::new(FakeObjectStore::new());
        let cache = Arc::new(FakeCache::default());
        let decorated = CachedObjectStoreProvider::new(inner.clone(), cache, 60);

        let id = ImageId::new();
        decorated.stat(&id).await.unwrap();
        decorated.update_metadata(&id, ImageMetadataEdit::default()).await.unwrap();
        decorated.stat(&id).await.unwrap();

        assert_eq!(*inner.stat_calls.lock().unwrap(), 2);
    }
}
