//! Event bus provider implementations.
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | `InProcessEventBus` | Local | `tokio::sync::broadcast`-backed, single-process fan-out |

pub mod inprocess;

pub use inprocess::InProcessEventBus;
