//! Reasoning-engine provider port: the tool-calling LLM driving the agent
//! orchestrator's ReAct loop (C7). Optional — when no implementation is
//! configured, the orchestrator falls back to
//! [`crate::ports::services::AgentOrchestratorInterface::resolve_rule_based_intent`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ports::services::tool_registry::ToolDescriptor;

/// Speaker role of a single [`ReasoningMessage`] in the conversation sent to
/// the reasoning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningRole {
    /// System-level instruction (persona, tool-use policy).
    System,
    /// The end user's utterance.
    User,
    /// A prior assistant turn, including any tool calls it made.
    Assistant,
    /// A tool's result, fed back as an observation.
    Tool,
}

/// One message in the transcript handed to [`ReasoningEngineProvider::step`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningMessage {
    /// Who produced this message.
    pub role: ReasoningRole,
    /// Message text. For `Role::Tool`, the tool's JSON result serialized to text.
    pub content: String,
    /// Set on `Role::Tool` messages: which call this is the result of.
    pub tool_call_id: Option<String>,
    /// Set on `Role::Tool` messages: the name of the tool that was called.
    pub name: Option<String>,
}

impl ReasoningMessage {
    /// Builds a plain system/user/assistant message.
    #[must_use]
    pub fn new(role: ReasoningRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call_id: None,
            name: None,
        }
    }

    /// Builds a tool-result observation message.
    #[must_use]
    pub fn tool_result(tool_call_id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: ReasoningRole::Tool,
            content: content.into(),
            tool_call_id: Some(tool_call_id.into()),
            name: Some(name.into()),
        }
    }
}

/// A single tool invocation the reasoning engine has requested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningToolCall {
    /// Backend-assigned call id, echoed back in the follow-up tool message.
    pub id: String,
    /// Name of the tool to invoke, matching a [`ToolDescriptor::name`].
    pub name: String,
    /// Arguments, already parsed from the backend's JSON-encoded form.
    pub arguments: serde_json::Value,
}

/// One step of the ReAct loop: either the engine wants to call tools, or it
/// has produced a final answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReasoningStep {
    /// The engine requests these tool calls before it can continue; the
    /// orchestrator executes them and feeds results back as `Role::Tool`
    /// messages in the next [`ReasoningEngineProvider::step`] call.
    ToolCalls(Vec<ReasoningToolCall>),
    /// The engine is done; this is the reply shown to the user.
    FinalAnswer(String),
}

/// A tool-calling LLM backend. Implementations post `messages` plus the
/// tool catalogue to a chat-completions-style API and interpret the
/// response as either further tool calls or a final answer.
#[async_trait]
pub trait ReasoningEngineProvider: Send + Sync {
    /// Issues one completion call given the transcript so far and the full
    /// tool catalogue available this turn.
    async fn step(&self, messages: &[ReasoningMessage], tools: &[ToolDescriptor]) -> Result<ReasoningStep>;

    /// Identifies the backend for logging and metrics labelling.
    fn provider_name(&self) -> &str;
}
