//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that wire the domain and application
//! layers to the outside world: configuration, logging, dependency
//! injection, and ambient health reporting. Provider implementations
//! themselves live in `photolib-providers`, registered into the domain's
//! `linkme` registries; this crate only resolves and composes them.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Layered TOML + environment configuration (`figment`) |
//! | [`logging`] | `tracing`-backed domain logging facade adapter |
//! | [`di`] | Bootstraps the resolved provider set into an `AppContext` |
//! | [`health`] | Aggregated process/dependency health reporting |

pub mod config;
pub mod di;
pub mod health;
pub mod logging;
pub mod utils;

pub use utils::TimedOperation;
