//! Aesthetic recommendation, deletion preview, and confirmed deletion (C9).

use std::str::FromStr;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use photolib_domain::error::Error;
use photolib_domain::ports::services::recommendation::{
    DeletionOutcome, DeletionPreviewEntry, DeletionWorkflowInterface, RecommendationOutcome, RecommendationWorkflowInterface,
};
use photolib_domain::value_objects::{ImageId, SessionId};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(recommend))
        .route("/deletion/preview", post(preview))
        .route("/deletion/confirm", post(confirm))
}

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    session_id: String,
    images: Option<Vec<String>>,
}

async fn recommend(State(state): State<AppState>, Json(body): Json<RecommendRequest>) -> ApiResult<Json<RecommendationOutcome>> {
    let session_id = SessionId::from_str(&body.session_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let images = body
        .images
        .map(|ids| ids.iter().map(|s| ImageId::from_str(s)).collect::<Result<Vec<_>, _>>())
        .transpose()
        .map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;

    let outcome = state.ctx.recommendation_port().recommend(session_id, images).await.map_err(ApiError)?;
    Ok(Json(outcome))
}

#[derive(Debug, Deserialize)]
struct PreviewRequest {
    images: Vec<String>,
}

async fn preview(State(state): State<AppState>, Json(body): Json<PreviewRequest>) -> ApiResult<Json<Vec<DeletionPreviewEntry>>> {
    let ids = body.images.iter().map(|s| ImageId::from_str(s)).collect::<Result<Vec<_>, _>>().map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let entries = state.ctx.deletion_port().preview(&ids).await.map_err(ApiError)?;
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
struct ConfirmRequest {
    session_id: String,
    images: Vec<String>,
    confirmed: bool,
    reason: Option<String>,
}

async fn confirm(State(state): State<AppState>, Json(body): Json<ConfirmRequest>) -> ApiResult<Json<DeletionOutcome>> {
    let session_id = SessionId::from_str(&body.session_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let ids = body.images.iter().map(|s| ImageId::from_str(s)).collect::<Result<Vec<_>, _>>().map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let outcome = state.ctx.deletion_port().confirm_deletion(session_id, ids, body.confirmed, body.reason).await.map_err(ApiError)?;
    Ok(Json(outcome))
}
