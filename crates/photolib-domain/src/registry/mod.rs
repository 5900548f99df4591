//! Provider Registry System
//!
//! Defines the auto-registration infrastructure for plugin providers.
//! Uses the `linkme` crate for compile-time registration of providers
//! that can be discovered and instantiated at runtime.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(PROVIDERS)]  │
//! │                        static ENTRY: ProviderEntry = ...        │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static PROVIDERS: [Entry] = [..]     │
//! │                              ↓                                  │
//! │  3. Resolver queries:  PROVIDERS.iter()                         │
//! │                              ↓                                  │
//! │  4. Config selects:    "provider = qdrant" → QdrantProvider     │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Registering a provider (in photolib-providers)
//!
//! ```no_run
//! use photolib_domain::registry::embedding::{EmbeddingProviderEntry, EMBEDDING_PROVIDERS};
//! use photolib_domain::ports::EmbeddingProvider;
//!
//! // Providers register via #[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
//! // See photolib-providers for implementation examples.
//! ```
//!
//! ### Resolving a provider (in photolib-infrastructure)
//!
//! ```no_run
//! use photolib_domain::registry::embedding::{EmbeddingProviderConfig, resolve_embedding_provider};
//!
//! fn get_provider() -> Result<(), photolib_domain::Error> {
//!     let config = EmbeddingProviderConfig::new("local");
//!     let provider = resolve_embedding_provider(&config)?;
//!     println!("Using provider: {}", provider.provider_name());
//!     Ok(())
//! }
//! ```

/// Cache provider registry.
pub mod cache;
/// Image edit provider registry.
pub mod edit;
/// Embedding provider registry.
pub mod embedding;
/// Event bus provider registry.
pub mod events;
/// Object store provider registry.
pub mod object_store;
/// Point-cloud generation provider registry.
pub mod pointcloud;
/// Reasoning engine provider registry.
pub mod reasoning;
/// Background task runner provider registry.
pub mod task_runner;
/// Declarative tool registry, backing the agent orchestrator's tool-calling loop.
pub mod tools;
/// Vector store provider registry.
pub mod vector_store;
/// Vision model provider registry.
pub mod vision;

pub use cache::{CacheProviderConfig, resolve_cache_provider};
pub use edit::{EditProviderConfig, resolve_edit_provider};
pub use embedding::{EmbeddingProviderConfig, resolve_embedding_provider};
pub use events::{EventBusProviderConfig, resolve_event_bus_provider};
pub use object_store::{ObjectStoreProviderConfig, resolve_object_store_provider};
pub use pointcloud::{PointCloudProviderConfig, resolve_point_cloud_provider};
pub use reasoning::{ReasoningProviderConfig, resolve_reasoning_provider};
pub use task_runner::{TaskRunnerProviderConfig, resolve_task_runner_provider};
pub use tools::{ToolEntry, TOOLS, get_tool, list_tools};
pub use vector_store::{VectorStoreProviderConfig, resolve_vector_store_provider};
pub use vision::{VisionProviderConfig, resolve_vision_provider};
