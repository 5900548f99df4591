//! Endpoints for catalogued tools with no dedicated application use case
//! (`get_current_time`, `get_photo_meta_schema`, `generate_social_media_caption`,
//! `edit_image`, `knowledge_qa`), dispatched through [`ToolDispatcher`].

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use photolib_application::ToolDispatcher;
use photolib_domain::entities::ImageMetadata;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/time", get(current_time))
        .route("/schema/photo-meta", get(photo_meta_schema))
        .route("/caption", post(caption))
        .route("/edit", post(edit))
        .route("/qa", post(qa))
}

#[derive(Debug, Serialize)]
struct TimeResponse {
    utc: chrono::DateTime<chrono::Utc>,
}

async fn current_time() -> Json<TimeResponse> {
    Json(TimeResponse { utc: chrono::Utc::now() })
}

async fn photo_meta_schema() -> Json<schemars::Schema> {
    Json(schemars::schema_for!(ImageMetadata))
}

async fn caption(State(state): State<AppState>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    dispatch(&state, "generate_social_media_caption", body).await
}

async fn edit(State(state): State<AppState>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    dispatch(&state, "edit_image", body).await
}

async fn qa(State(state): State<AppState>, Json(body): Json<Value>) -> ApiResult<Json<Value>> {
    dispatch(&state, "knowledge_qa", body).await
}

async fn dispatch(state: &AppState, tool: &str, arguments: Value) -> ApiResult<Json<Value>> {
    let result = state.ctx.dispatcher_port().dispatch(tool, arguments).await.map_err(ApiError)?;
    Ok(Json(result))
}
