//! Tool Registry (C6)
//!
//! Unlike the provider registries in this module, tools aren't selected by
//! config at startup: every registered tool is always available. The
//! `linkme` slice just gives each tool module a way to contribute its
//! descriptor without a central file enumerating all of them.
//!
//! ## Usage
//!
//! ```no_run
//! use photolib_domain::registry::tools::{ToolEntry, TOOLS};
//! use photolib_domain::ports::services::tool_registry::ToolDescriptor;
//!
//! #[linkme::distributed_slice(TOOLS)]
//! static ENTRY: ToolEntry = ToolEntry {
//!     name: "example_tool",
//!     build: || ToolDescriptor {
//!         name: "example_tool".to_owned(),
//!         description: "Does a thing.".to_owned(),
//!         parameters: Vec::new(),
//!         binding: None,
//!     },
//! };
//! ```

use crate::ports::services::tool_registry::ToolDescriptor;

/// One registered tool. `build` is a plain function pointer rather than a
/// const-initialized descriptor since [`ToolDescriptor`] owns `String`s.
pub struct ToolEntry {
    /// Stable tool name, must match the name embedded in the built descriptor.
    pub name: &'static str,
    /// Builds the descriptor on demand.
    pub build: fn() -> ToolDescriptor,
}

#[linkme::distributed_slice]
/// All tools contributed via `#[linkme::distributed_slice(TOOLS)]`.
pub static TOOLS: [ToolEntry] = [..];

/// All registered tool descriptors, in registration order.
#[must_use]
pub fn list_tools() -> Vec<ToolDescriptor> {
    TOOLS.iter().map(|entry| (entry.build)()).collect()
}

/// Looks up a single descriptor by name.
#[must_use]
pub fn get_tool(name: &str) -> Option<ToolDescriptor> {
    TOOLS.iter().find(|entry| entry.name == name).map(|entry| (entry.build)())
}
