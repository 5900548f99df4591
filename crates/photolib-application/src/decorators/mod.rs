//! Decorator Module - SOLID Open/Closed Compliant
//!
//! Provides decorators that wrap providers to add cross-cutting concerns
//! without modifying the original provider implementations.
//!
//! ## Design Pattern
//!
//! All decorators follow the Decorator Pattern to comply with SOLID Open/Closed:
//! - Wraps an existing provider via `Arc<dyn Trait>`
//! - Implements the same trait as the wrapped provider
//! - Adds timing and success/failure logging without modification
//! - Can be stacked, e.g. `InstrumentedVectorStoreProvider(CachedProvider(...))`
//!
//! Only the three hottest ports — embedding, vector store, object store —
//! get a dedicated decorator; the single-call remote providers (vision,
//! edit, point-cloud, reasoning) are low-frequency enough that their own
//! HTTP client wrappers log directly instead. [`cache::CachedObjectStoreProvider`]
//! is a second, independent object-store decorator (metadata memoization
//! rather than logging) and can be stacked with the instrumented one.

mod cache;
mod embedding;
mod object_store;
mod vector_store;

pub use cache::CachedObjectStoreProvider;
pub use embedding::InstrumentedEmbeddingProvider;
pub use object_store::InstrumentedObjectStoreProvider;
pub use vector_store::InstrumentedVectorStoreProvider;
