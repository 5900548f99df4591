//! ReAct-style agent orchestrator (C7).
//!
//! When a [`ReasoningEngineProvider`] is configured, [`AgentOrchestrator`]
//! drives a tool-calling loop against it, bounded by
//! [`ORCHESTRATOR_DEFAULT_MAX_ITERATIONS`]. Without one, it falls back to
//! [`resolve_rule_based_intent`] — a fixed keyword match good enough to cover
//! search/point-cloud/recommendation/deletion requests without an LLM.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use photolib_domain::constants::values::ORCHESTRATOR_DEFAULT_MAX_ITERATIONS;
use photolib_domain::entities::{SessionEntry, SessionRole, ToolCall};
use photolib_domain::error::Result;
use photolib_domain::ports::providers::reasoning::{ReasoningEngineProvider, ReasoningMessage, ReasoningRole, ReasoningStep};
use photolib_domain::ports::services::agent::{AgentOrchestratorInterface, AgentTurn, ArtefactExtraction, ExtractedImage, ExtractedPointCloud, ExtractedRecommendation, RuleBasedIntent};
use photolib_domain::ports::services::tool_registry::ToolRegistryInterface;
use photolib_domain::value_objects::{ImageId, PointCloudTaskId, SessionId};
use regex::Regex;
use uuid::Uuid;

use crate::use_cases::session_store::SessionStore;

const SYSTEM_PROMPT: &str = "\
You are the assistant for a personal semantic photo library. You can search \
photos by text, image similarity, or metadata, generate captions, point \
clouds, and social edits, and recommend near-duplicates for deletion. Use \
the available tools rather than guessing. Only ask the user to confirm \
before deleting anything.";

/// Executes a single named tool and, separately, a confirmed-deletion
/// request. Kept as its own trait so the orchestrator doesn't need a
/// reference to every concrete use case directly — the infrastructure layer
/// wires the real implementation over all of them.
#[async_trait]
pub trait ToolDispatcher: Send + Sync {
    /// Runs the tool named `name` with `arguments`, returning its JSON result.
    async fn dispatch(&self, name: &str, arguments: serde_json::Value) -> Result<serde_json::Value>;

    /// Confirms deletion of whichever images were most recently recommended
    /// for removal in `session_id`. Not exposed as a catalogue tool: the
    /// reasoning engine never chooses this directly, the orchestrator invokes
    /// it only after [`RuleBasedIntent::ConfirmDeletion`] or an equivalent
    /// tool-call-free affirmative reply.
    async fn confirm_pending_deletion(&self, session_id: SessionId, confirmed: bool, reason: Option<String>) -> Result<serde_json::Value>;
}

/// Drives conversational turns through a ReAct tool-calling loop, or the
/// rule-based fallback when no reasoning engine is configured.
pub struct AgentOrchestrator {
    reasoning: Option<Arc<dyn ReasoningEngineProvider>>,
    tools: Arc<dyn ToolRegistryInterface>,
    dispatcher: Arc<dyn ToolDispatcher>,
    session_store: Arc<SessionStore>,
    max_iterations: usize,
}

impl AgentOrchestrator {
    /// Builds an orchestrator. `reasoning` is `None` to force the rule-based
    /// fallback path regardless of configuration.
    #[must_use]
    pub fn new(
        reasoning: Option<Arc<dyn ReasoningEngineProvider>>,
        tools: Arc<dyn ToolRegistryInterface>,
        dispatcher: Arc<dyn ToolDispatcher>,
        session_store: Arc<SessionStore>,
    ) -> Self {
        Self {
            reasoning,
            tools,
            dispatcher,
            session_store,
            max_iterations: ORCHESTRATOR_DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Overrides the iteration cap, e.g. a tighter budget for latency-sensitive callers.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    async fn run_react_loop(&self, session_id: SessionId, reasoning: &Arc<dyn ReasoningEngineProvider>, history: &[SessionEntry]) -> Result<(String, Vec<ToolCall>, u32)> {
        let tools = self.tools.list();
        let mut messages = vec![ReasoningMessage::new(ReasoningRole::System, SYSTEM_PROMPT)];
        messages.extend(history.iter().filter(|e| e.event.is_none()).map(|e| {
            let role = match e.role {
                SessionRole::User => ReasoningRole::User,
                SessionRole::Assistant => ReasoningRole::Assistant,
                SessionRole::System => ReasoningRole::System,
            };
            ReasoningMessage::new(role, e.content.clone())
        }));

        let mut tool_calls = Vec::new();
        let mut iterations = 0u32;

        loop {
            iterations += 1;
            if iterations as usize > self.max_iterations {
                return Ok(("I wasn't able to finish that within my step budget — could you narrow the request?".to_owned(), tool_calls, iterations - 1));
            }

            match reasoning.step(&messages, &tools).await {
                Ok(ReasoningStep::FinalAnswer(reply)) => return Ok((reply, tool_calls, iterations)),
                Ok(ReasoningStep::ToolCalls(calls)) => {
                    for call in calls {
                        let started = Instant::now();
                        let mut record = ToolCall::start(session_id, call.name.clone(), call.arguments.clone());

                        let outcome = if call.name == "confirm_deletion" {
                            let confirmed = call.arguments.get("confirmed").and_then(serde_json::Value::as_bool).unwrap_or(false);
                            let reason = call.arguments.get("reason").and_then(|v| v.as_str()).map(str::to_owned);
                            self.dispatcher.confirm_pending_deletion(session_id, confirmed, reason).await
                        } else {
                            self.dispatcher.dispatch(&call.name, call.arguments.clone()).await
                        };

                        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                        let observation = match &outcome {
                            Ok(value) => {
                                record.succeed(value.clone(), elapsed_ms);
                                value.to_string()
                            }
                            Err(err) => {
                                record.fail(err.to_string(), elapsed_ms);
                                format!("error: {err}")
                            }
                        };

                        messages.push(ReasoningMessage::tool_result(call.id.clone(), call.name.clone(), observation));
                        tool_calls.push(record);
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "reasoning engine step failed, falling back to apology");
                    return Ok(("Sorry, I ran into a problem handling that — could you try again?".to_owned(), tool_calls, iterations));
                }
            }
        }
    }

    fn extract_artefacts(&self, query: &str, reply: &str, tool_calls: &[ToolCall]) -> ArtefactExtraction {
        let mut images = extract_images(reply);
        for call in tool_calls {
            if let Some(result) = &call.result {
                images.extend(extract_images_from_value(result));
            }
        }
        dedup_images(&mut images);

        let is_point_cloud = classify_point_cloud_intent(query);
        let is_recommendation = classify_recommendation_intent(query);

        let point_clouds = extract_point_cloud_id(reply, is_point_cloud).into_iter().map(|task_id| ExtractedPointCloud { task_id }).collect();

        let recommendation = extract_recommendation(reply, is_point_cloud, is_recommendation);

        ArtefactExtraction { images, point_clouds, recommendation }
    }
}

#[async_trait]
impl AgentOrchestratorInterface for AgentOrchestrator {
    async fn handle_turn(&self, session_id: SessionId, message: &str) -> Result<AgentTurn> {
        self.session_store.get_or_create(session_id, None);
        self.session_store.append(session_id, SessionEntry::turn(SessionRole::User, message));

        let (reply, tool_calls, iterations) = if let Some(reasoning) = &self.reasoning {
            let history = self.session_store.get(session_id).map(|s| s.history).unwrap_or_default();
            self.run_react_loop(session_id, reasoning, &history).await?
        } else {
            let intent = self.resolve_rule_based_intent(message);
            let (reply, tool_calls) = self.run_rule_based_intent(session_id, intent).await?;
            (reply, tool_calls, 1)
        };

        let extracted = self.extract_artefacts(message, &reply, &tool_calls);
        self.session_store.append(session_id, SessionEntry::turn(SessionRole::Assistant, reply.clone()));
        self.session_store.set_last_images(session_id, extracted.as_scored_image_refs());

        Ok(AgentTurn {
            session_id,
            reply,
            tool_calls,
            extracted,
            iterations,
        })
    }

    fn resolve_rule_based_intent(&self, message: &str) -> RuleBasedIntent {
        let lower = message.to_lowercase();
        let uuid = first_uuid(message);

        let confirms_deletion = contains_any(&lower, &["删除", "清理", "confirm", "确认", "yes, delete", "delete them", "go ahead"])
            && contains_any(&lower, &["delete", "删除", "remove", "trash", "confirm", "确认", "yes", "是的"]);
        if confirms_deletion {
            return RuleBasedIntent::ConfirmDeletion;
        }

        let wants_point_cloud = contains_any(&lower, ["point cloud", "pointcloud", "点云", "3d model", "三维", "立体重建"].as_slice());
        if wants_point_cloud {
            if let Some(image_id) = uuid {
                return RuleBasedIntent::GeneratePointCloud { image_id: ImageId::from(image_id) };
            }
            return RuleBasedIntent::Unrecognized;
        }

        let wants_recommendation = contains_any(&lower, ["recommend", "推荐", "duplicate", "重复", "which to keep", "best photo", "最佳"].as_slice());
        if wants_recommendation {
            return RuleBasedIntent::RequestRecommendation;
        }

        if let Some(image_id) = uuid {
            if contains_any(&lower, ["similar", "like this", "像这张", "相似", "alike"].as_slice()) {
                return RuleBasedIntent::SearchByImage { image_id: ImageId::from(image_id) };
            }
        }

        if message.trim().is_empty() {
            return RuleBasedIntent::Unrecognized;
        }

        RuleBasedIntent::SearchByText { query: message.trim().to_owned() }
    }
}

impl AgentOrchestrator {
    async fn run_rule_based_intent(&self, session_id: SessionId, intent: RuleBasedIntent) -> Result<(String, Vec<ToolCall>)> {
        let (tool_name, arguments) = match &intent {
            RuleBasedIntent::SearchByText { query } => ("semantic_search_images", serde_json::json!({ "query": query })),
            RuleBasedIntent::SearchByImage { image_id } => ("search_by_image_id", serde_json::json!({ "image_id": image_id })),
            RuleBasedIntent::GeneratePointCloud { image_id } => ("generate_pointcloud", serde_json::json!({ "image_id": image_id })),
            RuleBasedIntent::RequestRecommendation => ("recommend_images", serde_json::json!({ "session_id": session_id })),
            RuleBasedIntent::ConfirmDeletion => {
                let result = self.dispatcher.confirm_pending_deletion(session_id, true, None).await;
                return Ok(match result {
                    Ok(value) => (format!("Done — {value}"), Vec::new()),
                    Err(err) => (format!("I couldn't complete that deletion: {err}"), Vec::new()),
                });
            }
            RuleBasedIntent::Unrecognized => return Ok(("I'm not sure what you'd like me to do with that yet.".to_owned(), Vec::new())),
        };

        let started = Instant::now();
        let mut record = ToolCall::start(session_id, tool_name, arguments.clone());
        let outcome = self.dispatcher.dispatch(tool_name, arguments).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let reply = match &outcome {
            Ok(value) => {
                record.succeed(value.clone(), elapsed_ms);
                summarize_tool_result(tool_name, value)
            }
            Err(err) => {
                record.fail(err.to_string(), elapsed_ms);
                format!("I couldn't complete that: {err}")
            }
        };

        Ok((reply, vec![record]))
    }
}

fn summarize_tool_result(tool_name: &str, value: &serde_json::Value) -> String {
    match tool_name {
        "semantic_search_images" | "search_by_image_id" => format!("Here's what I found:\n\n{}", render_image_markdown(value)),
        "generate_pointcloud" => {
            let task_id = value.get("task_id").and_then(|v| v.as_str()).unwrap_or("unknown");
            format!("Point-cloud generation started, task id {task_id}.")
        }
        "recommend_images" => format!("I've reviewed those photos:\n\n{value}"),
        _ => value.to_string(),
    }
}

fn render_image_markdown(value: &serde_json::Value) -> String {
    let Some(hits) = value.get("hits").and_then(|v| v.as_array()) else {
        return value.to_string();
    };
    hits.iter()
        .filter_map(|hit| hit.get("id").and_then(|v| v.as_str()))
        .map(|id| format!("![photo](/images/{id})"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

fn uuid_regex() -> Regex {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}").expect("valid regex")
}

fn first_uuid(text: &str) -> Option<Uuid> {
    uuid_regex().find(text).and_then(|m| Uuid::parse_str(m.as_str()).ok())
}

fn markdown_image_regex() -> Regex {
    Regex::new(r"!\[[^\]]*\]\(([^)]*)\)").expect("valid regex")
}

/// Pulls ids out of Markdown image links (`![alt](url)`), taking the URL's
/// trailing UUID as the referenced image id. Duplicates are kept in order;
/// callers that need a deduplicated list should call [`dedup_images`].
fn extract_images(text: &str) -> Vec<ExtractedImage> {
    markdown_image_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let url = caps.get(1)?.as_str();
            let id = uuid_regex().find_iter(url).last()?;
            Uuid::parse_str(id.as_str()).ok()
        })
        .map(|id| ExtractedImage { id: ImageId::from(id), score: None })
        .collect()
}

fn extract_images_from_value(value: &serde_json::Value) -> Vec<ExtractedImage> {
    let Some(hits) = value.get("hits").and_then(|v| v.as_array()) else {
        return Vec::new();
    };
    hits.iter()
        .filter_map(|hit| {
            let id = hit.get("id").and_then(|v| v.as_str()).and_then(|s| Uuid::parse_str(s).ok())?;
            let score = hit.get("score").and_then(serde_json::Value::as_f64).map(|s| s as f32);
            Some(ExtractedImage { id: ImageId::from(id), score })
        })
        .collect()
}

fn dedup_images(images: &mut Vec<ExtractedImage>) {
    let mut seen = std::collections::HashSet::new();
    images.retain(|img| seen.insert(img.id));
}

fn classify_point_cloud_intent(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, ["point cloud", "pointcloud", "点云", "3d model", "三维重建"].as_slice())
}

fn classify_recommendation_intent(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, ["recommend", "推荐", "keep", "duplicate", "重复", "最佳", "delete"].as_slice())
}

/// Finds the point-cloud task id in `text`, when `is_point_cloud` classifies
/// the reply as point-cloud-related. Prefers a UUID immediately following an
/// explicit prefix token (`点云ID`, `pointcloud_id`, `任务ID`); otherwise any
/// UUID that isn't the trailing id of a Markdown image URL.
fn extract_point_cloud_id(text: &str, is_point_cloud: bool) -> Option<PointCloudTaskId> {
    if !is_point_cloud {
        return None;
    }

    let prefixed = Regex::new(r"(?i)(?:点云ID|pointcloud_id|任务ID)[:：]?\s*([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})").expect("valid regex");
    if let Some(caps) = prefixed.captures(text) {
        if let Some(id) = caps.get(1).and_then(|m| Uuid::parse_str(m.as_str()).ok()) {
            return Some(PointCloudTaskId::from(id));
        }
    }

    let image_tail_ids: std::collections::HashSet<Uuid> = extract_images(text).into_iter().map(|img| img.id.into()).collect();

    uuid_regex()
        .find_iter(text)
        .filter_map(|m| Uuid::parse_str(m.as_str()).ok())
        .find(|id| !image_tail_ids.contains(id))
        .map(PointCloudTaskId::from)
}

/// Collects the recommended-for-deletion image set, when `text` reads as a
/// recommendation verdict, splitting the best image from the rest. Prefers a
/// UUID colocated with a recommendation cue (`推荐`, `最佳`, `第N张`, or an
/// `ID:` token) as the best id; falls back to the first UUID in the text
/// only when the reply isn't also classified as point-cloud related, since a
/// bare id there is far more likely to be a task id. Every other UUID found
/// in the text becomes an alternative, which is what drives
/// `user_prompt_for_deletion`.
fn extract_recommendation(text: &str, is_point_cloud: bool, is_recommendation: bool) -> Option<ExtractedRecommendation> {
    if !is_recommendation {
        return None;
    }

    let mut seen = std::collections::HashSet::new();
    let cue = Regex::new(r"(?i)(?:推荐|最佳|第\s*\d+\s*张|ID[:：])\s*[^0-9a-fA-F]{0,20}([0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})").expect("valid regex");
    let cued: Vec<Uuid> = cue.captures_iter(text).filter_map(|caps| caps.get(1).and_then(|m| Uuid::parse_str(m.as_str()).ok())).filter(|id| seen.insert(*id)).collect();

    let all_ids: Vec<Uuid> = if !cued.is_empty() {
        cued
    } else if !is_point_cloud {
        let mut seen = std::collections::HashSet::new();
        uuid_regex().find_iter(text).filter_map(|m| Uuid::parse_str(m.as_str()).ok()).filter(|id| seen.insert(*id)).collect()
    } else {
        Vec::new()
    };

    if all_ids.is_empty() {
        return None;
    }

    let best = all_ids[0];
    let alternative_image_ids: Vec<ImageId> = all_ids[1..].iter().copied().map(ImageId::from).collect();
    let user_prompt_for_deletion = !alternative_image_ids.is_empty();

    Some(ExtractedRecommendation {
        best_image_id: Some(ImageId::from(best)),
        alternative_image_ids,
        user_prompt_for_deletion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_uuid() -> Uuid {
        Uuid::parse_str("11111111-1111-1111-1111-111111111111").unwrap()
    }

    #[test]
    fn extracts_markdown_image_ids_in_order_with_duplicates() {
        let id = sample_uuid();
        let text = format!("![a](/images/{id})\n![b](/images/{id})");
        let images = extract_images(&text);
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].id, ImageId::from(id));
        assert_eq!(images[1].id, ImageId::from(id));
    }

    #[test]
    fn point_cloud_prefers_prefixed_token_over_image_tail() {
        let image_id = sample_uuid();
        let task_id = Uuid::parse_str("22222222-2222-2222-2222-222222222222").unwrap();
        let text = format!("![src](/images/{image_id})\n点云ID: {task_id}");
        let extracted = extract_point_cloud_id(&text, true);
        assert_eq!(extracted, Some(PointCloudTaskId::from(task_id)));
    }

    #[test]
    fn point_cloud_ignores_image_tail_when_no_prefix() {
        let image_id = sample_uuid();
        let text = format!("Here is your photo ![src](/images/{image_id})");
        assert_eq!(extract_point_cloud_id(&text, true), None);
    }

    #[test]
    fn recommendation_prefers_cue_colocated_ids() {
        let best = sample_uuid();
        let other = Uuid::parse_str("33333333-3333-3333-3333-333333333333").unwrap();
        let text = format!("最佳: {best}\nalso saw {other} in passing");
        let outcome = extract_recommendation(&text, false, true).unwrap();
        assert_eq!(outcome.best_image_id, Some(ImageId::from(best)));
        assert!(outcome.alternative_image_ids.is_empty());
        assert!(!outcome.user_prompt_for_deletion);
    }

    #[test]
    fn recommendation_first_uuid_fallback_is_gated_by_point_cloud_classification() {
        let id = sample_uuid();
        let text = format!("no cue here, just {id}");
        assert!(extract_recommendation(&text, true, true).is_none());
        assert!(extract_recommendation(&text, false, true).is_some());
    }

}
