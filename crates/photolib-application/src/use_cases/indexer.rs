//! Indexer use case: turns uploaded bytes into an object-store entry and,
//! depending on the caller's chosen mode, a vector-store record (C5).

use std::sync::Arc;

use async_trait::async_trait;
use photolib_domain::entities::{VectorPayload, VectorRecord};
use photolib_domain::error::Result;
use photolib_domain::events::{DomainEvent, EventPublisher};
use photolib_domain::ports::jobs::{JobResult, JobType};
use photolib_domain::ports::providers::embedding::ImageInput;
use photolib_domain::ports::providers::object_store::{ImageMetadataEdit, ListSortBy, SortOrder};
use photolib_domain::ports::providers::{EmbedInput, EmbeddingProvider, ObjectStoreProvider, TaskRunnerProvider, VectorStoreProvider};
use photolib_domain::ports::services::indexing::{IndexOutcome, IndexerInterface, IndexingMode, IndexingOptions, ReindexReport};
use photolib_domain::ports::JobManagerInterface;

/// Orchestrates ingestion: persist via the object store, then embed and
/// upsert according to [`IndexingOptions::auto_index`].
pub struct Indexer {
    object_store: Arc<dyn ObjectStoreProvider>,
    embedding: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    task_runner: Arc<dyn TaskRunnerProvider>,
    job_manager: Arc<dyn JobManagerInterface>,
    events: Arc<dyn EventPublisher>,
    collection: String,
    default_mode: IndexingMode,
}

impl Indexer {
    /// Builds an indexer bound to `collection`, defaulting to `default_mode`
    /// when a caller's [`IndexingOptions::auto_index`] is unset.
    #[must_use]
    pub fn new(
        object_store: Arc<dyn ObjectStoreProvider>,
        embedding: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStoreProvider>,
        task_runner: Arc<dyn TaskRunnerProvider>,
        job_manager: Arc<dyn JobManagerInterface>,
        events: Arc<dyn EventPublisher>,
        collection: impl Into<String>,
        default_mode: IndexingMode,
    ) -> Self {
        Self {
            object_store,
            embedding,
            vector_store,
            task_runner,
            job_manager,
            events,
            collection: collection.into(),
            default_mode,
        }
    }

    async fn embed_and_upsert(
        embedding: &Arc<dyn EmbeddingProvider>,
        vector_store: &Arc<dyn VectorStoreProvider>,
        collection: &str,
        image_id: photolib_domain::value_objects::ImageId,
        bytes: Vec<u8>,
        media_type: String,
        payload: VectorPayload,
    ) -> Result<()> {
        let embedded = embedding
            .embed(EmbedInput::image(ImageInput { bytes, media_type }))
            .await?;
        vector_store.initialize(collection, embedded.dimensions).await?;
        vector_store
            .upsert(
                collection,
                VectorRecord {
                    id: image_id,
                    vector: embedded.vector,
                    payload,
                },
            )
            .await
    }
}

#[async_trait]
impl IndexerInterface for Indexer {
    async fn ingest(&self, image: ImageInput, options: IndexingOptions) -> Result<IndexOutcome> {
        let bytes = image.bytes.clone();
        let media_type = image.media_type.clone();
        let filename = options
            .original_filename
            .clone()
            .unwrap_or_else(|| format!("upload.{}", media_type.split('/').next_back().unwrap_or("bin")));
        let stored = self.object_store.put(image.bytes, &filename).await?;

        if !options.tags.is_empty() || options.description.is_some() {
            self.object_store
                .update_metadata(
                    &stored.id,
                    ImageMetadataEdit {
                        tags: if options.tags.is_empty() {
                            None
                        } else {
                            Some(options.tags.iter().cloned().collect())
                        },
                        description: options.description.clone().map(Some),
                        extra: None,
                    },
                )
                .await?;
        }

        let mode = options.auto_index.unwrap_or(self.default_mode);
        let payload = VectorPayload {
            tags: options.tags.clone(),
            created_at: stored.created_at,
            filename: stored.filename.clone(),
            description: options.description.clone(),
            extra: Default::default(),
        };

        match mode {
            IndexingMode::None => Ok(IndexOutcome {
                image_id: stored.id,
                mode,
                indexed: false,
                job_id: None,
            }),
            IndexingMode::Sync => {
                let indexed = Self::embed_and_upsert(
                    &self.embedding,
                    &self.vector_store,
                    &self.collection,
                    stored.id,
                    bytes,
                    media_type,
                    payload,
                )
                .await
                .is_ok();
                Ok(IndexOutcome {
                    image_id: stored.id,
                    mode,
                    indexed,
                    job_id: None,
                })
            }
            IndexingMode::Async => {
                let job_id = self.job_manager.submit_job(JobType::Indexing, &stored.filename, 1);
                self.job_manager.start_job(&job_id);

                let embedding = Arc::clone(&self.embedding);
                let vector_store = Arc::clone(&self.vector_store);
                let collection = self.collection.clone();
                let job_manager = Arc::clone(&self.job_manager);
                let events = Arc::clone(&self.events);
                let image_id = stored.id;

                self.task_runner.spawn(Box::pin(async move {
                    let outcome = Indexer::embed_and_upsert(
                        &embedding, &vector_store, &collection, image_id, bytes, media_type, payload,
                    )
                    .await;
                    match outcome {
                        Ok(()) => {
                            job_manager.complete_job(
                                &job_id,
                                Some(JobResult {
                                    summary: format!("indexed {image_id}"),
                                    items_processed: 1,
                                    items_failed: 0,
                                    metadata: Default::default(),
                                }),
                            );
                            let _ = events.publish(DomainEvent::ImageIndexed { session_id: None, image_id }).await;
                        }
                        Err(err) => {
                            job_manager.fail_job(&job_id, &err.to_string());
                            let _ = events
                                .publish(DomainEvent::ImageIndexingFailed {
                                    session_id: None,
                                    image_id,
                                    reason: err.to_string(),
                                })
                                .await;
                        }
                    }
                }))?;

                Ok(IndexOutcome {
                    image_id: stored.id,
                    mode,
                    indexed: false,
                    job_id: Some(job_id.to_string()),
                })
            }
        }
    }

    async fn reindex_all(&self) -> Result<ReindexReport> {
        let mut report = ReindexReport::default();
        let page_size = photolib_domain::constants::values::INDEXING_BATCH_SIZE;
        let mut page = 0usize;

        loop {
            let (images, total) = self
                .object_store
                .list(page, page_size, ListSortBy::CreatedAt, SortOrder::Asc)
                .await?;
            if images.is_empty() {
                break;
            }

            for image in &images {
                report.scanned += 1;
                if self.vector_store.get(&self.collection, &image.id).await?.is_some() {
                    report.skipped += 1;
                    continue;
                }

                let Some((bytes, media_type)) = self.object_store.get(&image.id).await? else {
                    report.failed.push((image.id, "bytes missing from object store".to_owned()));
                    continue;
                };

                let payload = VectorPayload {
                    tags: image.metadata.tags.iter().cloned().collect(),
                    created_at: image.created_at,
                    filename: image.filename.clone(),
                    description: image.metadata.description.clone(),
                    extra: image.metadata.extra.clone(),
                };

                match Self::embed_and_upsert(
                    &self.embedding,
                    &self.vector_store,
                    &self.collection,
                    image.id,
                    bytes,
                    media_type,
                    payload,
                )
                .await
                {
                    Ok(()) => report.reindexed += 1,
                    Err(err) => report.failed.push((image.id, err.to_string())),
                }
            }

            page += 1;
            if (page * page_size) as u64 >= total {
                break;
            }
        }

        Ok(report)
    }
}
