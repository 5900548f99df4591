//! Agent orchestrator port: drives a ReAct tool-calling loop over the tool
//! registry, with a rule-based fallback when no reasoning engine is
//! configured (C7).

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ScoredImageRef, ToolCall};
use crate::error::Result;
use crate::value_objects::{ImageId, PointCloudTaskId, SessionId};

/// The result of driving one user message through the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AgentTurn {
    /// The session the turn was recorded against.
    pub session_id: SessionId,
    /// Final natural-language reply.
    pub reply: String,
    /// Every tool call made while producing `reply`, in invocation order.
    pub tool_calls: Vec<ToolCall>,
    /// Images surfaced by this turn's tool calls, used to seed
    /// [`crate::entities::Session::last_images`] for follow-up references.
    pub extracted: ArtefactExtraction,
    /// Number of ReAct iterations consumed, for diagnosing loop exhaustion.
    pub iterations: u32,
}

/// An image reference pulled out of a tool result during extraction.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedImage {
    /// The referenced image.
    pub id: ImageId,
    /// Score it carried in the originating tool result, if any.
    pub score: Option<f32>,
}

/// A point-cloud task reference pulled out of a tool result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedPointCloud {
    /// The referenced task.
    pub task_id: PointCloudTaskId,
}

/// A recommendation batch reference pulled out of a tool result, grounding a
/// later "delete those" turn.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExtractedRecommendation {
    /// The image judged best/keep, distinct from the alternatives proposed
    /// for deletion.
    pub best_image_id: Option<ImageId>,
    /// The remaining candidates, proposed for deletion.
    pub alternative_image_ids: Vec<ImageId>,
    /// True iff at least one alternative exists, i.e. whether the caller
    /// should be prompted to confirm deleting them.
    pub user_prompt_for_deletion: bool,
}

/// Artefacts extracted from a turn's tool results, used to carry state
/// forward into the next turn without the caller re-stating ids.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ArtefactExtraction {
    /// Images surfaced this turn.
    pub images: Vec<ExtractedImage>,
    /// Point-cloud tasks created or inspected this turn.
    pub point_clouds: Vec<ExtractedPointCloud>,
    /// Deletion candidates proposed this turn.
    pub recommendation: Option<ExtractedRecommendation>,
}

impl ArtefactExtraction {
    /// Projects the extracted images into [`ScoredImageRef`]s suitable for
    /// [`crate::entities::Session::set_last_images`].
    #[must_use]
    pub fn as_scored_image_refs(&self) -> Vec<ScoredImageRef> {
        self.images
            .iter()
            .map(|img| ScoredImageRef {
                id: img.id,
                score: img.score,
                metadata: None,
            })
            .collect()
    }
}

/// A deterministic guess at the caller's intent, used when no reasoning
/// engine is configured or the configured one is unreachable. Matches a
/// fixed set of keyword patterns against the raw message text; anything
/// that doesn't match falls through to a plain conversational reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub enum RuleBasedIntent {
    /// Message looked like a text search query.
    SearchByText {
        /// Extracted query text.
        query: String,
    },
    /// Message referenced an uploaded or previously returned image by id.
    SearchByImage {
        /// The referenced image.
        image_id: ImageId,
    },
    /// Message asked to generate a point cloud from a prior image.
    GeneratePointCloud {
        /// The source image.
        image_id: ImageId,
    },
    /// Message asked for duplicate/similar-photo recommendations.
    RequestRecommendation,
    /// Message confirmed a pending deletion (e.g. "yes, delete them").
    ConfirmDeletion,
    /// No pattern matched; treat as plain conversation.
    Unrecognized,
}

/// Drives a single conversational turn through the tool-calling loop: the
/// reasoning engine (or the rule-based fallback) picks zero or more tools
/// from the registry, the orchestrator executes them and feeds results back,
/// until a final reply is produced or the iteration cap is hit.
#[async_trait]
pub trait AgentOrchestratorInterface: Send + Sync {
    /// Processes `message` within `session_id`, creating the session first
    /// if it doesn't exist yet.
    async fn handle_turn(&self, session_id: SessionId, message: &str) -> Result<AgentTurn>;

    /// Resolves intent without invoking a reasoning engine, used as the
    /// fallback path and exercised directly by tests.
    fn resolve_rule_based_intent(&self, message: &str) -> RuleBasedIntent;
}
