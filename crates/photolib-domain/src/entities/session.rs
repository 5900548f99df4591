//! Conversational session state for the agent orchestrator.

use chrono::{DateTime, Utc};
use derive_more::Display;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::HashMap;

use crate::value_objects::{ImageId, SessionId, SessionStatus};

/// The speaker of a single [`SessionEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    /// A message from the end user.
    #[display("user")]
    User,
    /// A reply produced by the orchestrator.
    #[display("assistant")]
    Assistant,
    /// A system-generated notification, e.g. a background job completion.
    #[display("system")]
    System,
}

/// One turn in a session's transcript.
///
/// System entries carrying an `event` tag are how background work (point-cloud
/// completion, for instance) surfaces back into the conversation — consumers
/// can list `history` entries with `role == System` and `event.is_some()` to
/// discover them without a separate notification channel.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionEntry {
    /// Who produced this entry.
    pub role: SessionRole,
    /// The entry's text content.
    pub content: String,
    /// When this entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// Event tag for system entries (e.g. `"pointcloud_completed"`).
    pub event: Option<String>,
    /// Structured payload accompanying a system event.
    pub payload: Option<serde_json::Value>,
}

impl SessionEntry {
    /// Builds a plain user or assistant turn.
    #[must_use]
    pub fn turn(role: SessionRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            event: None,
            payload: None,
        }
    }

    /// Builds a system event entry, as appended by background job completions.
    #[must_use]
    pub fn system_event(event: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            role: SessionRole::System,
            content: String::new(),
            timestamp: Utc::now(),
            event: Some(event.into()),
            payload: Some(payload),
        }
    }
}

/// A search/recommendation hit recorded against a session, used to ground
/// pronoun-like references ("delete that one") in later turns.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoredImageRef {
    /// The referenced image.
    pub id: ImageId,
    /// The score it was returned with, if any.
    pub score: Option<f32>,
    /// A shallow metadata snapshot at the time of reference.
    pub metadata: Option<serde_json::Value>,
}

/// A conversational session held in process memory.
///
/// Created on demand, keyed by an opaque `conversation_id`; the core does not
/// guarantee persistence across restarts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    /// System-assigned session identifier.
    pub id: SessionId,
    /// Caller-supplied user identifier, if any.
    pub user_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Ordered transcript.
    pub history: Vec<SessionEntry>,
    /// Opaque scratchpad for orchestrator-internal state.
    pub context: HashMap<String, serde_json::Value>,
    /// The most recent tool invocation's image results, used to ground
    /// recommendation/deletion extraction in the same conversation.
    pub last_images: Vec<ScoredImageRef>,
    /// Overall session lifecycle status.
    pub status: SessionStatus,
}

impl Session {
    /// Creates a fresh, empty session.
    #[must_use]
    pub fn new(id: SessionId, user_id: Option<String>) -> Self {
        Self {
            id,
            user_id,
            created_at: Utc::now(),
            history: Vec::new(),
            context: HashMap::new(),
            last_images: Vec::new(),
            status: SessionStatus::Active,
        }
    }

    /// Appends a turn and returns its index in `history`.
    pub fn push(&mut self, entry: SessionEntry) -> usize {
        self.history.push(entry);
        self.history.len() - 1
    }

    /// Replaces `last_images`, discarding the previous tool invocation's results.
    pub fn set_last_images(&mut self, images: Vec<ScoredImageRef>) {
        self.last_images = images;
    }

    /// Returns system entries carrying an event tag, in transcript order.
    pub fn system_events(&self) -> impl Iterator<Item = &SessionEntry> {
        self.history
            .iter()
            .filter(|e| e.role == SessionRole::System && e.event.is_some())
    }
}
