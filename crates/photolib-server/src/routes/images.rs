//! Upload, byte-serving, metadata, and pagination endpoints for stored images.

use std::str::FromStr;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use photolib_domain::error::Error;
use photolib_domain::ports::providers::embedding::ImageInput;
use photolib_domain::ports::providers::object_store::{ImageMetadataEdit, ListSortBy, ObjectStoreProvider, SortOrder};
use photolib_domain::ports::services::indexing::{IndexerInterface, IndexingMode, IndexingOptions};
use photolib_domain::value_objects::ImageId;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", post(upload_image).get(list_images))
        .route("/images/{image_id}", get(get_image_bytes))
        .route("/images/{image_id}/meta", get(get_image_meta).patch(update_image_meta))
}

/// Response envelope for a completed upload, per the upload endpoint
/// contract: `indexed` and `index_mode` describe what happened to the
/// vector record, independent of whether the bytes were stored successfully.
#[derive(Debug, Serialize)]
struct UploadResponse {
    id: String,
    filename: String,
    file_path: String,
    file_size: u64,
    width: Option<u32>,
    height: Option<u32>,
    format: String,
    created_at: chrono::DateTime<chrono::Utc>,
    url: String,
    indexed: serde_json::Value,
    index_mode: &'static str,
    index_error: Option<String>,
}

async fn upload_image(State(state): State<AppState>, mut multipart: Multipart) -> ApiResult<Json<UploadResponse>> {
    let mut bytes: Option<Vec<u8>> = None;
    let mut filename = "upload".to_owned();
    let mut auto_index = true;
    let mut async_index = false;
    let mut tags = Vec::new();
    let mut description = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| ApiError(Error::invalid_input(format!("malformed multipart body: {e}"))))? {
        match field.name().unwrap_or_default() {
            "file" => {
                filename = field.file_name().unwrap_or("upload").to_owned();
                bytes = Some(field.bytes().await.map_err(|e| ApiError(Error::invalid_input(format!("failed reading `file`: {e}"))))?.to_vec());
            }
            "auto_index" => auto_index = parse_bool_field(field).await?,
            "async_index" => async_index = parse_bool_field(field).await?,
            "tags" => {
                let text = field.text().await.map_err(|e| ApiError(Error::invalid_input(format!("failed reading `tags`: {e}"))))?;
                tags = text.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect();
            }
            "description" => {
                description = Some(field.text().await.map_err(|e| ApiError(Error::invalid_input(format!("failed reading `description`: {e}"))))?);
            }
            _ => {}
        }
    }

    let bytes = bytes.ok_or_else(|| ApiError(Error::invalid_input("multipart body must include a `file` field")))?;
    let media_type = infer_media_type(&filename);

    let mode = match (auto_index, async_index) {
        (false, _) => IndexingMode::None,
        (true, true) => IndexingMode::Async,
        (true, false) => IndexingMode::Sync,
    };

    let outcome = state
        .ctx
        .indexer_port()
        .ingest(
            ImageInput { bytes, media_type },
            IndexingOptions { auto_index: Some(mode), tags, description, original_filename: Some(filename) },
        )
        .await
        .map_err(ApiError)?;

    let stored = state.ctx.object_store().stat(&outcome.image_id).await.map_err(ApiError)?.ok_or_else(|| ApiError(Error::internal("image vanished immediately after ingest")))?;

    let (indexed_value, index_mode, index_error) = match outcome.mode {
        IndexingMode::Sync if outcome.indexed => (serde_json::json!(true), "sync", None),
        IndexingMode::Sync => (serde_json::json!(false), "sync", Some("embedding or upsert failed; the image is stored but not searchable".to_owned())),
        IndexingMode::Async => (serde_json::json!("processing"), "async", None),
        IndexingMode::None => (serde_json::json!(false), "none", None),
    };

    Ok(Json(UploadResponse {
        id: stored.id.to_string(),
        filename: stored.filename,
        file_path: stored.relative_path,
        file_size: stored.file_size,
        width: stored.width,
        height: stored.height,
        format: stored.format.to_string(),
        created_at: stored.created_at,
        url: stored.preview_url(),
        indexed: indexed_value,
        index_mode,
        index_error,
    }))
}

async fn parse_bool_field(field: axum::extract::multipart::Field<'_>) -> ApiResult<bool> {
    let text = field.text().await.map_err(|e| ApiError(Error::invalid_input(format!("malformed boolean field: {e}"))))?;
    Ok(matches!(text.trim(), "true" | "1" | "yes"))
}

fn infer_media_type(filename: &str) -> String {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
    .to_owned()
}

async fn get_image_bytes(State(state): State<AppState>, Path(image_id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = ImageId::from_str(&image_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let (bytes, media_type) = state.ctx.object_store().get(&id).await.map_err(ApiError)?.ok_or_else(|| ApiError(Error::not_found(format!("image {id}"))))?;
    Ok(([(header::CONTENT_TYPE, media_type)], bytes))
}

async fn get_image_meta(State(state): State<AppState>, Path(image_id): Path<String>) -> ApiResult<impl IntoResponse> {
    let id = ImageId::from_str(&image_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let image = state.ctx.object_store().stat(&id).await.map_err(ApiError)?.ok_or_else(|| ApiError(Error::not_found(format!("image {id}"))))?;
    Ok(Json(image))
}

#[derive(Debug, Deserialize)]
struct MetaEditRequest {
    tags: Option<Vec<String>>,
    description: Option<String>,
    clear_description: Option<bool>,
}

async fn update_image_meta(State(state): State<AppState>, Path(image_id): Path<String>, Json(body): Json<MetaEditRequest>) -> ApiResult<impl IntoResponse> {
    let id = ImageId::from_str(&image_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let description = if body.clear_description.unwrap_or(false) { Some(None) } else { body.description.map(Some) };
    let edit = ImageMetadataEdit { tags: body.tags.map(|t| t.into_iter().collect::<std::collections::HashSet<_>>()), description, extra: None };
    let updated = state.ctx.object_store().update_metadata(&id, edit).await.map_err(ApiError)?.ok_or_else(|| ApiError(Error::not_found(format!("image {id}"))))?;
    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    page: Option<usize>,
    page_size: Option<usize>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    images: Vec<photolib_domain::entities::Image>,
    total: u64,
}

async fn list_images(State(state): State<AppState>, Query(query): Query<ListQuery>) -> ApiResult<impl IntoResponse> {
    let sort_by = match query.sort_by.as_deref() {
        Some("filename") => ListSortBy::Filename,
        _ => ListSortBy::CreatedAt,
    };
    let sort_order = match query.sort_order.as_deref() {
        Some("asc") => SortOrder::Asc,
        _ => SortOrder::Desc,
    };
    let page = query.page.unwrap_or(1).max(1);
    let page_size = query.page_size.unwrap_or(50).clamp(1, 500);

    let (images, total) = state.ctx.object_store().list(page, page_size, sort_by, sort_order).await.map_err(ApiError)?;
    Ok((StatusCode::OK, Json(ListResponse { images, total })))
}
