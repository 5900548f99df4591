//! Multi-image aesthetic recommendation workflow (C9).

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use dashmap::DashMap;
use photolib_domain::constants::retry::{RETRY_BACKOFF_MULTIPLIER, RETRY_INITIAL_BACKOFF_MS, RETRY_MAX_ATTEMPTS, RETRY_MAX_BACKOFF_MS};
use photolib_domain::constants::values::{RECOMMENDATION_MAX_IMAGES, VISION_CALL_TIMEOUT_SECS};
use photolib_domain::error::{Error, Result};
use photolib_domain::ports::providers::vision::{VisionImage, VisionModelProvider, VisionRequest};
use photolib_domain::ports::providers::ObjectStoreProvider;
use photolib_domain::ports::services::recommendation::{DeletionPreviewItem, RecommendationOutcome, RecommendationWorkflowInterface};
use photolib_domain::value_objects::{ImageId, SessionId};

use crate::use_cases::session_store::SessionStore;

const RECOMMENDATION_PROMPT: &str = "\
You are judging a set of candidate photos from the same scene or moment. \
Score each on composition, sharpness, exposure, subject clarity, emotional \
impact, redundancy with the others, and overall aesthetic quality. Respond \
with a JSON object of the shape {\"best_image_id\": \"<index>\", \
\"recommendation_reason\": \"...\", \"alternative_image_ids\": [\"<index>\", \
...], \"key_strengths\": [...], \"potential_improvements\": [...]}, where \
image ids are the 0-based index of the image in the order provided.";

/// Evaluates a session's recently surfaced images with the vision model and
/// records the resulting candidates, pending confirmation through
/// [`crate::use_cases::deletion::DeletionWorkflow`].
pub struct RecommendationWorkflow {
    vision: Arc<dyn VisionModelProvider>,
    object_store: Arc<dyn ObjectStoreProvider>,
    session_store: Arc<SessionStore>,
    pending: Arc<DashMap<SessionId, RecommendationOutcome>>,
}

impl RecommendationWorkflow {
    /// Builds a recommendation workflow sharing `pending` with the deletion
    /// workflow so a later "delete those" turn can find this run's candidates.
    #[must_use]
    pub fn new(
        vision: Arc<dyn VisionModelProvider>,
        object_store: Arc<dyn ObjectStoreProvider>,
        session_store: Arc<SessionStore>,
        pending: Arc<DashMap<SessionId, RecommendationOutcome>>,
    ) -> Self {
        Self {
            vision,
            object_store,
            session_store,
            pending,
        }
    }

    async fn complete_with_retry(&self, request: VisionRequest) -> Result<String> {
        let mut backoff = RETRY_INITIAL_BACKOFF_MS;
        let mut last_err = None;

        for attempt in 1..=RETRY_MAX_ATTEMPTS {
            match self.vision.complete(request.clone()).await {
                Ok(response) => return Ok(response.content),
                Err(err @ (Error::TimedOut { .. } | Error::RateLimited { .. } | Error::ProviderUnavailable { .. })) => {
                    last_err = Some(err);
                    if attempt < RETRY_MAX_ATTEMPTS {
                        tokio::time::sleep(std::time::Duration::from_millis(backoff)).await;
                        backoff = ((backoff as f64) * RETRY_BACKOFF_MULTIPLIER).min(RETRY_MAX_BACKOFF_MS as f64) as u64;
                    }
                }
                Err(other) => return Err(other),
            }
        }

        Err(last_err.unwrap_or_else(|| Error::provider_unavailable("vision", "exhausted retries")))
    }
}

#[async_trait]
impl RecommendationWorkflowInterface for RecommendationWorkflow {
    async fn recommend(&self, session_id: SessionId, images: Option<Vec<ImageId>>) -> Result<RecommendationOutcome> {
        let candidate_ids = match images {
            Some(ids) => ids,
            None => self
                .session_store
                .get(session_id)
                .map(|s| s.last_images.iter().map(|r| r.id).collect())
                .unwrap_or_default(),
        };

        if candidate_ids.is_empty() {
            return Err(Error::EmptyInput);
        }
        if candidate_ids.len() > RECOMMENDATION_MAX_IMAGES {
            return Err(Error::invalid_input(format!(
                "recommend_images accepts at most {RECOMMENDATION_MAX_IMAGES} images, got {}",
                candidate_ids.len()
            )));
        }

        let mut vision_images = Vec::with_capacity(candidate_ids.len());
        for id in &candidate_ids {
            let (bytes, media_type) = self
                .object_store
                .get(id)
                .await?
                .ok_or_else(|| Error::not_found(format!("image {id}")))?;
            vision_images.push(VisionImage {
                base64_data: base64::engine::general_purpose::STANDARD.encode(bytes),
                media_type,
            });
        }

        let content = self
            .complete_with_retry(VisionRequest {
                images: vision_images,
                prompt: RECOMMENDATION_PROMPT.to_owned(),
                system: None,
                timeout: Some(std::time::Duration::from_secs(VISION_CALL_TIMEOUT_SECS)),
            })
            .await?;

        let parsed = extract_json(&content).ok_or_else(|| Error::corrupt_payload(format!("recommendation response wasn't JSON: {content}")))?;

        let best_index: usize = parsed
            .get("best_image_id")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| Error::corrupt_payload("recommendation response missing best_image_id"))?;
        let reason = parsed
            .get("recommendation_reason")
            .and_then(|v| v.as_str())
            .unwrap_or("no reason given")
            .to_owned();

        let best_id = candidate_ids.get(best_index).copied();
        let candidates = candidate_ids
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != best_index)
            .map(|(_, id)| DeletionPreviewItem {
                id: *id,
                similar_to: best_id,
                reason: reason.clone(),
            })
            .collect();

        let outcome = RecommendationOutcome { session_id, candidates };
        self.pending.insert(session_id, outcome.clone());
        Ok(outcome)
    }
}

/// Extracts the first JSON object found in `content`, preferring a fenced
/// ```json block, falling back to the first `{...}` span.
fn extract_json(content: &str) -> Option<serde_json::Value> {
    if let Some(start) = content.find("```json") {
        let after = &content[start + 7..];
        if let Some(end) = after.find("```") {
            if let Ok(value) = serde_json::from_str(after[..end].trim()) {
                return Some(value);
            }
        }
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&content[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_fenced_json() {
        let text = "Here you go:\n```json\n{\"best_image_id\": \"0\"}\n```\nthanks";
        let value = extract_json(text).unwrap();
        assert_eq!(value["best_image_id"], "0");
    }

    #[test]
    fn extracts_bare_json() {
        let text = "result: {\"best_image_id\": \"1\"} done";
        let value = extract_json(text).unwrap();
        assert_eq!(value["best_image_id"], "1");
    }

    #[test]
    fn non_json_content_returns_none() {
        assert!(extract_json("no structure here").is_none());
    }
}
