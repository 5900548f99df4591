//! Declarative registry of tools the agent orchestrator can call (C6).
//!
//! A [`ToolDescriptor`] is the single source of truth a tool is defined from:
//! its JSON Schema parameters double as the function-calling schema handed to
//! the reasoning engine and as the binding that dispatches an HTTP/MCP
//! request into the matching application use case.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Primitive JSON Schema type of a single tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    /// `string`.
    String,
    /// `integer`.
    Integer,
    /// `number`.
    Number,
    /// `boolean`.
    Boolean,
    /// `array`.
    Array,
    /// `object`.
    Object,
}

/// Where a bound HTTP handler reads a parameter's value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParamLocation {
    /// Part of the request path, e.g. `/images/{id}`.
    Path,
    /// A query string parameter.
    Query,
    /// A field in the JSON request body.
    Body,
}

/// One parameter of a [`ToolDescriptor`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParamSpec {
    /// Parameter name, matching the key the reasoning engine will supply.
    pub name: String,
    /// JSON Schema primitive type.
    pub param_type: ParamType,
    /// Human-readable description surfaced to the reasoning engine.
    pub description: String,
    /// Whether the tool call is invalid without this parameter.
    pub required: bool,
    /// Where a bound handler reads this parameter from.
    pub location: ParamLocation,
}

/// How a tool is reachable outside the orchestrator, for exposure as an
/// external HTTP route and/or MCP tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolBinding {
    /// HTTP method, e.g. `"POST"`.
    pub method: String,
    /// HTTP path template, e.g. `"/search/text"`.
    pub path: String,
}

/// A single tool the orchestrator can invoke during a ReAct loop iteration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolDescriptor {
    /// Stable, unique tool name, e.g. `"search_by_text"`.
    pub name: String,
    /// Description surfaced to the reasoning engine when choosing a tool.
    pub description: String,
    /// Declared parameters.
    pub parameters: Vec<ParamSpec>,
    /// External HTTP binding, when the tool is also reachable directly.
    pub binding: Option<ToolBinding>,
}

/// Registry the orchestrator consults to list available tools and dispatch
/// a chosen call to the underlying use case.
pub trait ToolRegistryInterface: Send + Sync {
    /// All registered tool descriptors, in registration order.
    fn list(&self) -> Vec<ToolDescriptor>;

    /// Looks up a single descriptor by name.
    fn get(&self, name: &str) -> Option<ToolDescriptor>;
}
