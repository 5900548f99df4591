//! # Domain Layer
//!
//! Core business logic and domain types for the semantic photo library
//! service. Contains only pure domain entities, value objects, and business
//! rules.
//!
//! ## Architecture
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`entities`] | Core business entities with identity (images, sessions, tool calls) |
//! | [`value_objects`] | Immutable value objects (ids, config, enums) |
//! | [`ports`] | External provider and service port interfaces |
//! | [`registry`] | Provider auto-registration (`linkme`) |
//! | [`constants`] | Domain constants |
//! | [`error`] | Domain error types |
//!
//! ## Clean Architecture Principles
//!
//! - **Entities** are at the center with business rules
//! - **Value Objects** are immutable and compared by value
//! - **No external dependencies** - only standard library and core traits
//! - **Pure business logic** - no infrastructure or application concerns
//!
//! ## Example
//!
//! ```
//! use photolib_domain::entities::Image;
//! use photolib_domain::ports::providers::embedding::Embedding;
//! use photolib_domain::value_objects::{ImageFormat, ImageId};
//!
//! let image = Image::new(
//!     "beach.jpg".to_owned(),
//!     "2026/01/18/beach.jpg".to_owned(),
//!     204_800,
//!     ImageFormat::Jpeg,
//! );
//!
//! let embedding = Embedding { vector: vec![0.1, 0.2], dimensions: 2 };
//! assert_eq!(embedding.dimensions, embedding.vector.len());
//! assert!(!image.id.to_string().is_empty());
//! ```

/// Common macros
#[macro_use]
pub mod macros;

/// Domain-level constants
pub mod constants;
/// Core business entities with identity
pub mod entities;
/// Domain error types
pub mod error;
/// Domain event interfaces
pub mod events;
/// Domain surface for infrastructure plug points (logging facade)
pub mod infra;
/// External provider and service port interfaces
pub mod ports;
/// Provider auto-registration registry
pub mod registry;
/// Common utilities
pub mod utils;
/// Immutable value objects
pub mod value_objects;

#[cfg(any(test, feature = "test-utils"))]
/// Shared test helpers for the workspace.
pub mod test_services_config;
#[cfg(any(test, feature = "test-utils"))]
/// Shared test helpers for the workspace.
pub mod test_utils;

// Re-export commonly used types for convenience
pub use constants::*;
pub use entities::*;
pub use error::{Error, Result};
pub use events::{DomainEvent, EventPublisher, ServiceState};
pub use value_objects::*;
