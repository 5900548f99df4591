//! Domain macros organized by usage context.
//!
//! Sub-modules group macros by the domain area they serve:
//! - [`entities`]: Entity and value-object type macros (`define_id!`)
//! - [`ports`]: Port trait definition macros (`impl_from_str!`, `labels!`)
//! - [`registry`]: Provider registry infrastructure macros
//! - [`di`]: DI container accessor macros (`arc_getters!`)
//! - [`logging`]: Structured logging helper macros

#[macro_use]
mod entities;
#[macro_use]
mod logging;
#[macro_use]
mod ports;
#[macro_use]
mod registry;
#[macro_use]
mod di;
