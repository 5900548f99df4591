//! Filesystem-backed object store: date-partitioned directory layout plus a
//! JSON sidecar per image carrying the record's metadata.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use photolib_domain::constants::{OBJECT_STORE_ALLOWED_EXTENSIONS, OBJECT_STORE_MAX_IMAGE_BYTES};
use photolib_domain::entities::Image;
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::object_store::{
    ImageMetadataEdit, ListSortBy, ObjectStoreProvider, ObjectStoreStats, SortOrder,
};
use photolib_domain::registry::object_store::{
    OBJECT_STORE_PROVIDERS, ObjectStoreProviderConfig, ObjectStoreProviderEntry,
};
use photolib_domain::value_objects::{ImageFormat, ImageId};
use tracing::warn;

const SIDECAR_EXTENSION: &str = "json";

/// Persists image bytes under `root/YYYY/MM/DD/{uuid}.{ext}`, with a
/// `{uuid}.json` sidecar carrying everything but the bytes. The sidecar
/// index is rebuilt from disk at startup so restarts don't lose metadata.
pub struct FileSystemObjectStore {
    root: PathBuf,
    index: DashMap<ImageId, Image>,
}

impl FileSystemObjectStore {
    /// Scans `root` for existing `.json` sidecars to rebuild the in-memory
    /// index, tolerating unreadable entries.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` cannot be created.
    pub fn new(root: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&root)
            .map_err(|e| Error::internal(format!("failed to create object store root {}: {e}", root.display())))?;

        let index = DashMap::new();
        for entry in walkdir::WalkDir::new(&root).into_iter().filter_map(std::result::Result::ok) {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SIDECAR_EXTENSION) {
                continue;
            }
            match std::fs::read(path).ok().and_then(|bytes| serde_json::from_slice::<Image>(&bytes).ok()) {
                Some(image) => {
                    index.insert(image.id, image);
                }
                None => warn!(path = %path.display(), "skipping unreadable object store sidecar"),
            }
        }

        Ok(Self { root, index })
    }

    fn sidecar_path(&self, image: &Image) -> PathBuf {
        self.data_path(image).with_extension(SIDECAR_EXTENSION)
    }

    fn data_path(&self, image: &Image) -> PathBuf {
        self.root.join(&image.relative_path)
    }

    fn relative_path(id: ImageId, format: ImageFormat, now: chrono::DateTime<Utc>) -> String {
        format!("{}/{}/{}/{id}.{}", now.format("%Y"), now.format("%m"), now.format("%d"), format.extension())
    }

    fn save_sidecar(&self, image: &Image) -> Result<()> {
        let path = self.sidecar_path(image);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::internal(format!("failed to create directory {}: {e}", parent.display())))?;
        }
        let bytes = serde_json::to_vec_pretty(image)
            .map_err(|e| Error::internal(format!("failed to serialize image metadata: {e}")))?;
        std::fs::write(&path, bytes).map_err(|e| Error::internal(format!("failed to write sidecar {}: {e}", path.display())))
    }

    fn validate_upload(bytes: &[u8], original_filename: &str) -> Result<()> {
        if bytes.len() as u64 > OBJECT_STORE_MAX_IMAGE_BYTES {
            return Err(Error::invalid_input(format!(
                "upload exceeds the maximum size of {OBJECT_STORE_MAX_IMAGE_BYTES} bytes"
            )));
        }
        let extension = Path::new(original_filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| Error::invalid_input("filename has no extension"))?;
        if !OBJECT_STORE_ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::invalid_input(format!("unsupported file extension: {extension}")));
        }
        Ok(())
    }

    fn sniff_format(bytes: &[u8]) -> Result<ImageFormat> {
        match image::guess_format(bytes) {
            Ok(image::ImageFormat::Jpeg) => Ok(ImageFormat::Jpeg),
            Ok(image::ImageFormat::Png) => Ok(ImageFormat::Png),
            Ok(image::ImageFormat::Gif) => Ok(ImageFormat::Gif),
            Ok(image::ImageFormat::WebP) => Ok(ImageFormat::WebP),
            Ok(image::ImageFormat::Bmp) => Ok(ImageFormat::Bmp),
            _ => Err(Error::invalid_input("unsupported or unrecognised image format")),
        }
    }
}

#[async_trait]
impl ObjectStoreProvider for FileSystemObjectStore {
    async fn put(&self, bytes: Vec<u8>, original_filename: &str) -> Result<Image> {
        Self::validate_upload(&bytes, original_filename)?;
        let format = Self::sniff_format(&bytes)?;

        let id = ImageId::new();
        let now = Utc::now();
        let relative_path = Self::relative_path(id, format, now);

        let mut image = Image {
            id,
            filename: original_filename.to_owned(),
            relative_path,
            file_size: bytes.len() as u64,
            width: None,
            height: None,
            format,
            created_at: now,
            metadata: photolib_domain::entities::ImageMetadata::default(),
        };

        if let Ok(decoded) = image::load_from_memory(&bytes) {
            image.width = Some(decoded.width());
            image.height = Some(decoded.height());
        }

        let data_path = self.data_path(&image);
        if let Some(parent) = data_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&data_path, &bytes).await?;
        self.save_sidecar(&image)?;
        self.index.insert(id, image.clone());
        Ok(image)
    }

    async fn get(&self, id: &ImageId) -> Result<Option<(Vec<u8>, String)>> {
        let Some(image) = self.index.get(id).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        let path = self.data_path(&image);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some((bytes, image.format.mime_type().to_owned()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::from(e)),
        }
    }

    async fn stat(&self, id: &ImageId) -> Result<Option<Image>> {
        Ok(self.index.get(id).map(|entry| entry.value().clone()))
    }

    async fn update_metadata(&self, id: &ImageId, edit: ImageMetadataEdit) -> Result<Option<Image>> {
        let Some(mut entry) = self.index.get_mut(id) else {
            return Ok(None);
        };
        if let Some(tags) = edit.tags {
            entry.metadata.tags = tags;
        }
        if let Some(description) = edit.description {
            entry.metadata.description = description;
        }
        if let Some(extra) = edit.extra {
            entry.metadata.extra = extra;
        }
        let updated = entry.value().clone();
        drop(entry);
        self.save_sidecar(&updated)?;
        Ok(Some(updated))
    }

    async fn path_of(&self, id: &ImageId) -> Result<Option<PathBuf>> {
        let Some(image) = self.index.get(id).map(|entry| entry.value().clone()) else {
            return Ok(None);
        };
        Ok(Some(self.data_path(&image)))
    }

    async fn delete(&self, id: &ImageId) -> Result<bool> {
        let Some((_, image)) = self.index.remove(id) else {
            return Ok(false);
        };
        let _ = tokio::fs::remove_file(self.data_path(&image)).await;
        let _ = tokio::fs::remove_file(self.sidecar_path(&image)).await;
        Ok(true)
    }

    async fn list(&self, page: usize, page_size: usize, sort_by: ListSortBy, sort_order: SortOrder) -> Result<(Vec<Image>, u64)> {
        let mut images: Vec<Image> = self.index.iter().map(|entry| entry.value().clone()).collect();
        images.sort_by(|a, b| {
            let ordering = match sort_by {
                ListSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
                ListSortBy::Filename => a.filename.cmp(&b.filename),
            };
            match sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = images.len() as u64;
        let start = page.saturating_mul(page_size);
        let page_items = images.into_iter().skip(start).take(page_size).collect();
        Ok((page_items, total))
    }

    async fn stats(&self) -> Result<ObjectStoreStats> {
        let mut stats = ObjectStoreStats::default();
        for entry in &self.index {
            stats.total_images += 1;
            stats.total_size += entry.value().file_size;
        }
        Ok(stats)
    }
}

fn filesystem_factory(
    config: &ObjectStoreProviderConfig,
) -> std::result::Result<Arc<dyn ObjectStoreProvider>, String> {
    let root = config.root.clone().unwrap_or_else(|| PathBuf::from("./data/images"));
    FileSystemObjectStore::new(root).map(|store| Arc::new(store) as Arc<dyn ObjectStoreProvider>).map_err(|e| e.to_string())
}

#[linkme::distributed_slice(OBJECT_STORE_PROVIDERS)]
static FILESYSTEM_PROVIDER: ObjectStoreProviderEntry = ObjectStoreProviderEntry {
    name: "filesystem",
    description: "Date-partitioned filesystem storage with JSON sidecar metadata",
    build: filesystem_factory,
};
