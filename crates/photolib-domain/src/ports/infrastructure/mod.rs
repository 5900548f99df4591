//! Infrastructure Ports
//!
//! Ports for infrastructure services that provide technical capabilities to
//! the domain: service lifecycle/health, operation logging, and the
//! pluggable event bus transport. All three are cross-cutting concerns every
//! provider and application service shares.
//!
//! | Port | Description |
//! | ------ | ------------- |
//! | [`LifecycleManaged`] | Start/stop/health-check for a managed background service |
//! | [`OperationLogger`] | Single-entry-point operation logging |
//! | [`EventBusProvider`] | Event publish/subscribe transport |

/// Event bus provider port.
pub mod events;
/// Service lifecycle and health-check ports.
pub mod lifecycle;
/// Operation logging port (level + context + message + optional detail).
pub mod logging;

pub use events::{DomainEventStream, EventBusProvider};
pub use lifecycle::{
    DependencyHealth, DependencyHealthCheck, ExtendedHealthResponse, LifecycleManaged,
    PortServiceState, ShutdownCoordinator,
};
pub use logging::{LogLevel, OperationLogger};
