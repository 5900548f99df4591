//! Point-cloud task submission, polling, and download (C8/§4.9).

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use photolib_domain::entities::{PointCloudQuality, PointCloudTask};
use photolib_domain::error::Error;
use photolib_domain::ports::services::pointcloud::PointCloudManagerInterface;
use photolib_domain::value_objects::{ImageId, PointCloudTaskId, SessionId};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pointcloud", post(request_pointcloud))
        .route("/pointcloud/{task_id}", get(get_pointcloud_task))
        .route("/pointcloud/download/{task_id}", get(download_pointcloud))
}

#[derive(Debug, Deserialize)]
struct PointCloudRequest {
    image_id: String,
    quality: Option<String>,
    session_id: Option<String>,
}

async fn request_pointcloud(State(state): State<AppState>, Json(body): Json<PointCloudRequest>) -> ApiResult<Json<PointCloudTask>> {
    let image_id = ImageId::from_str(&body.image_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let quality = body
        .quality
        .as_deref()
        .map(PointCloudQuality::from_str)
        .transpose()
        .map_err(|e| ApiError(Error::invalid_input(e.to_string())))?
        .unwrap_or(PointCloudQuality::Balanced);
    let session_id = match body.session_id {
        Some(raw) => SessionId::from_str(&raw).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?,
        None => SessionId::new(),
    };

    let task = state.ctx.pointcloud_port().request(session_id, image_id, quality).await.map_err(ApiError)?;
    Ok(Json(task))
}

async fn get_pointcloud_task(State(state): State<AppState>, Path(task_id): Path<String>) -> ApiResult<Json<PointCloudTask>> {
    let id = PointCloudTaskId::from_str(&task_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let task = state.ctx.pointcloud_port().get_task(id).await.map_err(ApiError)?;
    Ok(Json(task))
}

async fn download_pointcloud(State(state): State<AppState>, Path(task_id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = PointCloudTaskId::from_str(&task_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let output = state.ctx.pointcloud_port().fetch_output(id).await.map_err(ApiError)?;
    Ok(([(header::CONTENT_TYPE, output.media_type)], output.bytes))
}
