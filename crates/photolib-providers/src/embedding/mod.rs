//! Embedding provider implementations.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | `LocalEmbeddingProvider` | Local | `fastembed`-backed CLIP encoder, no network dependency |
//! | `RemoteEmbeddingProvider` | Remote | HTTP multimodal embedding API |

mod util;

#[cfg(feature = "embedding-local")]
pub mod local;
pub mod remote;

#[cfg(feature = "embedding-local")]
pub use local::LocalEmbeddingProvider;
pub use remote::RemoteEmbeddingProvider;
