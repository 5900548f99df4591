//! Application layer - semantic photo library service
//!
//! Implements the use cases described by the domain layer's service ports,
//! orchestrating domain entities and provider ports according to Clean
//! Architecture principles.
//!
//! ## Architecture
//!
//! The application layer:
//! - Contains use case implementations (`use_cases::*`)
//! - Orchestrates domain entities and provider ports
//! - Has no dependency on infrastructure or any concrete provider crate
//!
//! ## Use Cases
//!
//! Ingestion, search, async jobs, point-cloud generation, agent
//! orchestration, and the recommend/confirm-delete workflow. See
//! [`use_cases`] for the full list.
//!
//! ## Decorators
//!
//! Cross-cutting concerns (timing, success/failure counters) applied to
//! provider ports without touching their implementations:
//! - [`decorators::InstrumentedEmbeddingProvider`]
//! - [`decorators::InstrumentedVectorStoreProvider`]
//! - [`decorators::InstrumentedObjectStoreProvider`]
//!
//! ## Dependencies
//!
//! This crate depends only on `photolib-domain` and pure Rust libraries for
//! async, serialization, and concurrent collections.

pub mod constants;
pub mod decorators;
pub mod use_cases;

pub use decorators::{InstrumentedEmbeddingProvider, InstrumentedObjectStoreProvider, InstrumentedVectorStoreProvider};
pub use use_cases::*;
