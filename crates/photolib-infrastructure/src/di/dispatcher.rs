//! Wires every non-conversational tool in the catalogue to its backing use
//! case or provider, and shapes each result into the JSON contract the
//! orchestrator's artefact extraction expects: a search-shaped result
//! carries `{"hits": [{"id", "score", ...}]}`, `generate_pointcloud` carries
//! a top-level `"task_id"`.
//!
//! `edit_image`, `generate_social_media_caption`, and `knowledge_qa` have no
//! dedicated application use case — they're thin enough (one provider call
//! plus some JSON shaping) that a separate use case would only add
//! indirection, so they're implemented directly here.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine as _;
use dashmap::DashMap;
use photolib_domain::entities::{ImageMetadata, PointCloudQuality};
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::edit::{EditRequest, ImageEditProvider};
use photolib_domain::ports::providers::embedding::ImageInput;
use photolib_domain::ports::providers::object_store::ImageMetadataEdit;
use photolib_domain::ports::providers::reasoning::{ReasoningEngineProvider, ReasoningMessage, ReasoningRole, ReasoningStep};
use photolib_domain::ports::providers::vision::{VisionImage, VisionModelProvider, VisionRequest};
use photolib_domain::ports::providers::ObjectStoreProvider;
use photolib_domain::ports::services::indexing::{IndexerInterface, IndexingMode, IndexingOptions};
use photolib_domain::ports::services::pointcloud::PointCloudManagerInterface;
use photolib_domain::ports::services::recommendation::{DeletionWorkflowInterface, RecommendationOutcome, RecommendationWorkflowInterface};
use photolib_domain::ports::services::search::{MetaQuery, SearchHit, SearchQuery};
use photolib_domain::ports::services::SearchEngineInterface;
use photolib_domain::value_objects::{ImageId, SessionId};
use photolib_application::use_cases::search_engine::build_meta_query;
use photolib_application::ToolDispatcher;

/// Results with no caller-supplied `limit`/`top_k` fall back to this many hits.
const DEFAULT_SEARCH_TOP_K: usize = 20;

/// Implements [`ToolDispatcher`] over the full set of resolved providers and
/// application use cases.
pub struct DefaultToolDispatcher {
    search_engine: Arc<dyn SearchEngineInterface>,
    indexer: Arc<dyn IndexerInterface>,
    recommendation: Arc<dyn RecommendationWorkflowInterface>,
    deletion: Arc<dyn DeletionWorkflowInterface>,
    pointcloud: Arc<dyn PointCloudManagerInterface>,
    vision: Arc<dyn VisionModelProvider>,
    edit: Arc<dyn ImageEditProvider>,
    reasoning: Option<Arc<dyn ReasoningEngineProvider>>,
    object_store: Arc<dyn ObjectStoreProvider>,
    pending: Arc<DashMap<SessionId, RecommendationOutcome>>,
}

impl DefaultToolDispatcher {
    /// Builds a dispatcher over every provider/use case a catalogued tool
    /// can reach. `pending` is the same map shared between the
    /// recommendation and deletion workflows, so a `confirm_deletion`
    /// tool call can find what was last recommended for `session_id`.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        search_engine: Arc<dyn SearchEngineInterface>,
        indexer: Arc<dyn IndexerInterface>,
        recommendation: Arc<dyn RecommendationWorkflowInterface>,
        deletion: Arc<dyn DeletionWorkflowInterface>,
        pointcloud: Arc<dyn PointCloudManagerInterface>,
        vision: Arc<dyn VisionModelProvider>,
        edit: Arc<dyn ImageEditProvider>,
        reasoning: Option<Arc<dyn ReasoningEngineProvider>>,
        object_store: Arc<dyn ObjectStoreProvider>,
        pending: Arc<DashMap<SessionId, RecommendationOutcome>>,
    ) -> Self {
        Self {
            search_engine,
            indexer,
            recommendation,
            deletion,
            pointcloud,
            vision,
            edit,
            reasoning,
            object_store,
            pending,
        }
    }

    async fn dispatch_semantic_search(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let query = arguments.get("query").and_then(|v| v.as_str()).map(str::to_owned);
        let image_id = parse_optional_image_id(arguments, "image_id")?;
        let top_k = parse_limit(arguments).unwrap_or(DEFAULT_SEARCH_TOP_K);

        let search_query = match (query, image_id) {
            (Some(text), Some(id)) => {
                let (bytes, media_type) = self.fetch_image_bytes(id).await?;
                SearchQuery::Hybrid { text: Some(text), image: Some(ImageInput { bytes, media_type }) }
            }
            (Some(text), None) => SearchQuery::Text { query: text, tags: None },
            (None, Some(id)) => SearchQuery::Image { image: None, by_id: Some(id) },
            (None, None) => return Err(Error::EmptyInput),
        };

        let hits = self.search_engine.search(search_query, top_k, None).await?;
        hits_to_value(hits)
    }

    async fn dispatch_search_by_image_id(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let image_id = parse_required_image_id(arguments, "image_id")?;
        let top_k = parse_limit(arguments).unwrap_or(DEFAULT_SEARCH_TOP_K);
        let hits = self
            .search_engine
            .search(SearchQuery::Image { image: None, by_id: Some(image_id) }, top_k, None)
            .await?;
        hits_to_value(hits)
    }

    async fn dispatch_meta_search(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let meta = meta_query_from(arguments);
        let hits = self.search_engine.search_by_meta(meta, DEFAULT_SEARCH_TOP_K).await?;
        hits_to_value(hits)
    }

    async fn dispatch_meta_search_hybrid(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let query = arguments.get("query").and_then(|v| v.as_str()).ok_or_else(|| Error::invalid_input("meta_search_hybrid requires `query`"))?;
        let meta = meta_query_from(arguments);
        let hits = self.search_engine.search_by_text_with_meta(query, meta, DEFAULT_SEARCH_TOP_K, None).await?;
        hits_to_value(hits)
    }

    async fn dispatch_caption(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let image_ids = arguments
            .get("image_ids")
            .and_then(|v| v.as_array())
            .ok_or_else(|| Error::invalid_input("generate_social_media_caption requires `image_ids`"))?;
        let style = arguments.get("style").and_then(|v| v.as_str());

        let mut images = Vec::with_capacity(image_ids.len());
        for raw in image_ids {
            let id = raw.as_str().and_then(|s| ImageId::from_str(s).ok()).ok_or_else(|| Error::invalid_input("image_ids must be image id strings"))?;
            let (bytes, media_type) = self.fetch_image_bytes(id).await?;
            images.push(VisionImage { base64_data: base64::engine::general_purpose::STANDARD.encode(bytes), media_type });
        }

        let prompt = match style {
            Some(style) => format!("Write a short, social-media-ready caption for these photos in a {style} tone."),
            None => "Write a short, social-media-ready caption for these photos.".to_owned(),
        };

        let response = self.vision.complete(VisionRequest { images, prompt, system: None, timeout: None }).await?;
        Ok(serde_json::json!({ "caption": response.content }))
    }

    async fn dispatch_recommend(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let session_id = parse_required_session_id(arguments, "session_id")?;
        let images = arguments
            .get("images")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).filter_map(|s| ImageId::from_str(s).ok()).collect::<Vec<_>>());
        let outcome = self.recommendation.recommend(session_id, images).await?;
        Ok(serde_json::to_value(outcome)?)
    }

    async fn dispatch_edit(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let image_id = parse_required_image_id(arguments, "image_id")?;
        let instruction = arguments.get("instruction").and_then(|v| v.as_str()).ok_or_else(|| Error::invalid_input("edit_image requires `instruction`"))?;
        let (source_bytes, media_type) = self.fetch_image_bytes(image_id).await?;

        let outputs = self
            .edit
            .edit(EditRequest {
                source_bytes,
                media_type,
                prompt: instruction.to_owned(),
                style: None,
                parameters: serde_json::Value::Null,
            })
            .await?;

        let edit_time = chrono_now_rfc3339();
        let mut hits = Vec::with_capacity(outputs.len());
        for output in outputs {
            let outcome = self
                .indexer
                .ingest(
                    ImageInput { bytes: output.bytes, media_type: output.media_type },
                    IndexingOptions { auto_index: Some(IndexingMode::Async), ..Default::default() },
                )
                .await?;

            let mut extra = std::collections::HashMap::new();
            extra.insert("source_image_id".to_owned(), serde_json::json!(image_id.to_string()));
            extra.insert("edit_prompt".to_owned(), serde_json::json!(instruction));
            extra.insert("edit_model".to_owned(), serde_json::json!(self.edit.model_name()));
            extra.insert("edit_time".to_owned(), serde_json::json!(edit_time));
            self.object_store
                .update_metadata(&outcome.image_id, ImageMetadataEdit { extra: Some(extra), ..Default::default() })
                .await?;

            hits.push(serde_json::json!({ "id": outcome.image_id.to_string() }));
        }

        Ok(serde_json::json!({ "hits": hits }))
    }

    async fn dispatch_pointcloud(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let image_id = parse_required_image_id(arguments, "image_id")?;
        let quality = arguments
            .get("quality")
            .and_then(|v| v.as_str())
            .map(PointCloudQuality::from_str)
            .transpose()
            .map_err(|e| Error::invalid_input(e.to_string()))?
            .unwrap_or(PointCloudQuality::Balanced);
        let session_id = parse_optional_session_id(arguments, "session_id")?.unwrap_or_else(SessionId::new);

        let task = self.pointcloud.request(session_id, image_id, quality).await?;
        Ok(serde_json::json!({ "task_id": task.id.to_string() }))
    }

    /// Direct action dispatch for `agent_execute_action`: `{action,
    /// parameters, context?}` executes exactly one of `{search, upload
    /// (reserved), delete, update, analyze}` against the library, with no
    /// ReAct loop involved.
    async fn dispatch_agent_execute_action(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let action = arguments.get("action").and_then(|v| v.as_str()).ok_or_else(|| Error::invalid_input("agent_execute_action requires `action`"))?;
        let parameters = arguments.get("parameters").cloned().unwrap_or_else(|| serde_json::json!({}));
        let context = arguments.get("context");

        match action {
            "search" => self.dispatch_semantic_search(&parameters).await,
            "upload" => Err(Error::invalid_input("the `upload` action is reserved and not executable through agent_execute_action")),
            "delete" => self.action_delete(&parameters, context).await,
            "update" => self.action_update(&parameters).await,
            "analyze" => self.action_analyze(&parameters).await,
            other => Err(Error::invalid_input(format!("unknown agent action `{other}`"))),
        }
    }

    /// Cascades an ungated delete of `parameters.image_ids` through both
    /// stores. `context.session_id`, when present, scopes which pending
    /// recommendation batch gets pruned of the deleted ids.
    async fn action_delete(&self, parameters: &serde_json::Value, context: Option<&serde_json::Value>) -> Result<serde_json::Value> {
        let raw_ids = parameters.get("image_ids").and_then(|v| v.as_array()).ok_or_else(|| Error::invalid_input("delete action requires `image_ids`"))?;
        let images: Vec<ImageId> = raw_ids
            .iter()
            .map(|v| v.as_str().and_then(|s| ImageId::from_str(s).ok()).ok_or_else(|| Error::invalid_input("image_ids must be image id strings")))
            .collect::<Result<_>>()?;

        let session_id = context
            .and_then(|c| c.get("session_id"))
            .and_then(|v| v.as_str())
            .map(SessionId::from_str)
            .transpose()
            .map_err(|e| Error::invalid_input(e.to_string()))?
            .unwrap_or_else(SessionId::new);

        let outcome = self.deletion.confirm_deletion(session_id, images, true, None).await?;
        Ok(serde_json::to_value(outcome)?)
    }

    /// Edits `parameters.image_id`'s tags/description/extra metadata.
    async fn action_update(&self, parameters: &serde_json::Value) -> Result<serde_json::Value> {
        let image_id = parse_required_image_id(parameters, "image_id")?;
        let tags = parameters
            .get("tags")
            .and_then(|v| v.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect());
        let description = parameters.get("description").map(|v| v.as_str().map(str::to_owned));
        let extra = parameters
            .get("extra")
            .and_then(|v| v.as_object())
            .map(|obj| obj.iter().map(|(k, v)| (k.clone(), v.clone())).collect());

        let updated = self
            .object_store
            .update_metadata(&image_id, ImageMetadataEdit { tags, description, extra })
            .await?
            .ok_or_else(|| Error::not_found(format!("image {image_id}")))?;
        Ok(serde_json::to_value(updated)?)
    }

    /// Invokes the vision model on a single `parameters.image_id`,
    /// answering `parameters.question` or giving a free-form description.
    async fn action_analyze(&self, parameters: &serde_json::Value) -> Result<serde_json::Value> {
        let image_id = parse_required_image_id(parameters, "image_id")?;
        let question = parameters.get("question").and_then(|v| v.as_str()).unwrap_or("Describe this photo in detail.");
        let (bytes, media_type) = self.fetch_image_bytes(image_id).await?;

        let response = self
            .vision
            .complete(VisionRequest {
                images: vec![VisionImage { base64_data: base64::engine::general_purpose::STANDARD.encode(bytes), media_type }],
                prompt: question.to_owned(),
                system: None,
                timeout: None,
            })
            .await?;
        Ok(serde_json::json!({ "analysis": response.content }))
    }

    async fn dispatch_knowledge_qa(&self, arguments: &serde_json::Value) -> Result<serde_json::Value> {
        let question = arguments.get("question").and_then(|v| v.as_str()).ok_or_else(|| Error::invalid_input("knowledge_qa requires `question`"))?;

        let hits = self
            .search_engine
            .search(SearchQuery::Text { query: question.to_owned(), tags: None }, DEFAULT_SEARCH_TOP_K, None)
            .await?;
        let context = hits
            .iter()
            .map(|hit| format!("- {} (tags: {})", hit.id, hit.payload.tags.join(", ")))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!("Answer the question using only these candidate photos as context:\n{context}\n\nQuestion: {question}");

        let answer = if let Some(reasoning) = &self.reasoning {
            let messages = vec![
                ReasoningMessage::new(ReasoningRole::System, "Answer concisely from the given photo context."),
                ReasoningMessage::new(ReasoningRole::User, prompt.clone()),
            ];
            match reasoning.step(&messages, &[]).await? {
                ReasoningStep::FinalAnswer(reply) => reply,
                ReasoningStep::ToolCalls(_) => return Err(Error::internal("reasoning engine requested tools with none offered")),
            }
        } else {
            self.vision
                .complete(VisionRequest { images: Vec::new(), prompt, system: None, timeout: None })
                .await?
                .content
        };

        let hits_json = serde_json::to_value(&hits)?;
        Ok(serde_json::json!({ "answer": answer, "hits": hits_json }))
    }

    async fn fetch_image_bytes(&self, id: ImageId) -> Result<(Vec<u8>, String)> {
        let (bytes, media_type) = self.object_store.get(&id).await?.ok_or_else(|| Error::not_found(format!("image {id}")))?;
        Ok((bytes, media_type))
    }
}

fn hits_to_value(hits: Vec<SearchHit>) -> Result<serde_json::Value> {
    Ok(serde_json::json!({ "hits": serde_json::to_value(hits)? }))
}

fn meta_query_from(arguments: &serde_json::Value) -> MetaQuery {
    let date = arguments.get("date").and_then(|v| v.as_str());
    let tags = arguments.get("tags").and_then(|v| v.as_array()).map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_owned)).collect());
    build_meta_query(date, tags)
}

fn parse_limit(arguments: &serde_json::Value) -> Option<usize> {
    arguments.get("limit").and_then(serde_json::Value::as_u64).map(|n| n as usize)
}

fn parse_required_image_id(arguments: &serde_json::Value, field: &str) -> Result<ImageId> {
    arguments
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| ImageId::from_str(s).ok())
        .ok_or_else(|| Error::invalid_input(format!("missing or invalid `{field}`")))
}

fn parse_optional_image_id(arguments: &serde_json::Value, field: &str) -> Result<Option<ImageId>> {
    match arguments.get(field).and_then(|v| v.as_str()) {
        Some(s) => ImageId::from_str(s).map(Some).map_err(|e| Error::invalid_input(e.to_string())),
        None => Ok(None),
    }
}

fn parse_required_session_id(arguments: &serde_json::Value, field: &str) -> Result<SessionId> {
    arguments
        .get(field)
        .and_then(|v| v.as_str())
        .and_then(|s| SessionId::from_str(s).ok())
        .ok_or_else(|| Error::invalid_input(format!("missing or invalid `{field}`")))
}

fn parse_optional_session_id(arguments: &serde_json::Value, field: &str) -> Result<Option<SessionId>> {
    match arguments.get(field).and_then(|v| v.as_str()) {
        Some(s) => SessionId::from_str(s).map(Some).map_err(|e| Error::invalid_input(e.to_string())),
        None => Ok(None),
    }
}

fn chrono_now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Formats the system's local time as `YYYY-MM-DD HH:MM:SS`, per §6's
/// `get_current_time` contract.
fn local_time_string() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[async_trait]
impl ToolDispatcher for DefaultToolDispatcher {
    async fn dispatch(&self, name: &str, arguments: serde_json::Value) -> Result<serde_json::Value> {
        match name {
            "semantic_search_images" => self.dispatch_semantic_search(&arguments).await,
            "search_by_image_id" => self.dispatch_search_by_image_id(&arguments).await,
            "meta_search_images" => self.dispatch_meta_search(&arguments).await,
            "meta_search_hybrid" => self.dispatch_meta_search_hybrid(&arguments).await,
            "get_current_time" => Ok(serde_json::json!({ "current_time": local_time_string() })),
            "get_photo_meta_schema" => Ok(serde_json::to_value(schemars::schema_for!(ImageMetadata))?),
            "generate_social_media_caption" => self.dispatch_caption(&arguments).await,
            "recommend_images" => self.dispatch_recommend(&arguments).await,
            "edit_image" => self.dispatch_edit(&arguments).await,
            "generate_pointcloud" => self.dispatch_pointcloud(&arguments).await,
            "knowledge_qa" => self.dispatch_knowledge_qa(&arguments).await,
            "agent_execute_action" => self.dispatch_agent_execute_action(&arguments).await,
            other => Err(Error::invalid_input(format!("unknown tool `{other}`"))),
        }
    }

    async fn confirm_pending_deletion(&self, session_id: SessionId, confirmed: bool, reason: Option<String>) -> Result<serde_json::Value> {
        let images = self
            .pending
            .get(&session_id)
            .map(|entry| entry.candidates.iter().map(|item| item.id).collect::<Vec<_>>())
            .unwrap_or_default();
        let outcome = self.deletion.confirm_deletion(session_id, images, confirmed, reason).await?;
        Ok(serde_json::to_value(outcome)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_limit_reads_u64_as_usize() {
        let args = serde_json::json!({ "limit": 7 });
        assert_eq!(parse_limit(&args), Some(7));
    }

    #[test]
    fn parse_limit_missing_field_is_none() {
        assert_eq!(parse_limit(&serde_json::json!({})), None);
    }

    #[test]
    fn parse_required_image_id_rejects_malformed_uuid() {
        let args = serde_json::json!({ "image_id": "not-a-uuid" });
        assert!(parse_required_image_id(&args, "image_id").is_err());
    }

    #[test]
    fn parse_required_image_id_accepts_valid_uuid() {
        let id = ImageId::new();
        let args = serde_json::json!({ "image_id": id.to_string() });
        assert_eq!(parse_required_image_id(&args, "image_id").unwrap(), id);
    }

    #[test]
    fn parse_optional_image_id_absent_field_is_ok_none() {
        assert_eq!(parse_optional_image_id(&serde_json::json!({}), "image_id").unwrap(), None);
    }

    #[test]
    fn parse_optional_session_id_rejects_malformed_uuid() {
        let args = serde_json::json!({ "session_id": "nope" });
        assert!(parse_optional_session_id(&args, "session_id").is_err());
    }

    #[test]
    fn meta_query_from_collects_tags_and_date() {
        let args = serde_json::json!({ "date": "1.18", "tags": ["beach", "sunset"] });
        let meta = meta_query_from(&args);
        assert_eq!(meta.month_day, Some((1, 18)));
        assert_eq!(meta.tags, Some(vec!["beach".to_owned(), "sunset".to_owned()]));
    }

    #[test]
    fn hits_to_value_wraps_in_hits_key() {
        let value = hits_to_value(Vec::new()).unwrap();
        assert_eq!(value["hits"], serde_json::json!([]));
    }

    #[test]
    fn chrono_now_rfc3339_produces_parseable_timestamp() {
        let ts = chrono_now_rfc3339();
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
