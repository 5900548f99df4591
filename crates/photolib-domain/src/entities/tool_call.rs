//! A record of a single tool invocation made by the agent orchestrator.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::value_objects::{SessionId, ToolCallId};

/// One invocation of a [`crate::registry::tools::ToolDescriptor`] during a
/// ReAct loop iteration, kept for observability and session replay.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolCall {
    /// Unique identifier for this invocation.
    pub id: ToolCallId,
    /// The session this call was made within.
    pub session_id: SessionId,
    /// Name of the invoked tool, matching a registered [`crate::registry::tools::ToolDescriptor`].
    pub tool_name: String,
    /// Arguments passed to the tool, as resolved by the reasoning engine.
    pub parameters: serde_json::Value,
    /// The tool's response, once it returns.
    pub result: Option<serde_json::Value>,
    /// Error message, if the call failed.
    pub error: Option<String>,
    /// When the call was issued.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the call.
    pub duration_ms: Option<u64>,
}

impl ToolCall {
    /// Starts tracking a new tool invocation.
    #[must_use]
    pub fn start(session_id: SessionId, tool_name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            id: ToolCallId::new(),
            session_id,
            tool_name: tool_name.into(),
            parameters,
            result: None,
            error: None,
            started_at: Utc::now(),
            duration_ms: None,
        }
    }

    /// Records a successful result and the elapsed duration.
    pub fn succeed(&mut self, result: serde_json::Value, duration_ms: u64) {
        self.result = Some(result);
        self.duration_ms = Some(duration_ms);
    }

    /// Records a failure and the elapsed duration.
    pub fn fail(&mut self, error: impl Into<String>, duration_ms: u64) {
        self.error = Some(error.into());
        self.duration_ms = Some(duration_ms);
    }
}
