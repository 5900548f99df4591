//! # Providers Layer
//!
//! Concrete adapters for every external provider port declared in
//! `photolib-domain`. Each provider registers itself into a `linkme`
//! distributed slice at startup; which one is active per process is chosen
//! by configuration, not by this crate.
//!
//! ## Providers
//!
//! | Module | Port | Backends |
//! |--------|------|----------|
//! | [`embedding`] | `EmbeddingProvider` | `local` (fastembed CLIP), `remote` (HTTP) |
//! | [`vector_store`] | `VectorStoreProvider` | `local-file`, `qdrant` |
//! | [`object_store`] | `ObjectStoreProvider` | `filesystem` |
//! | [`vision`] | `VisionModelProvider` | `http` |
//! | [`edit`] | `ImageEditProvider` | `http` |
//! | [`pointcloud`] | `PointCloudGenerationProvider` | `http` |
//! | [`reasoning`] | `ReasoningEngineProvider` | `http` |
//! | [`cache`] | `CacheProvider` | `moka` (in-memory) |
//! | [`events`] | `EventBusProvider` | `inprocess` (tokio broadcast) |
//! | [`task`] | `TaskRunnerProvider` | `tokio` |
//!
//! Providers are selected at runtime via `photolib_domain::registry::*`;
//! linking this crate into a binary is what populates the distributed
//! slices those registries resolve against.

pub mod cache;
pub mod edit;
pub mod embedding;
pub mod events;
pub mod object_store;
pub mod pointcloud;
pub mod reasoning;
pub mod task;
pub mod vector_store;
pub mod vision;
