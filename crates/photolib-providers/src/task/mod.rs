//! Background task runner provider implementations.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | `TokioTaskRunner` | Local | Spawns onto the ambient tokio runtime |

pub mod tokio_runner;

pub use tokio_runner::TokioTaskRunner;
