//! Semantic, similarity, and metadata search endpoints (C4).

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use photolib_application::use_cases::search_engine::build_meta_query;
use photolib_domain::error::Error;
use photolib_domain::ports::providers::embedding::ImageInput;
use photolib_domain::ports::providers::object_store::ObjectStoreProvider;
use photolib_domain::ports::services::search::{SearchEngineInterface, SearchHit, SearchQuery};
use photolib_domain::value_objects::ImageId;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

const DEFAULT_TOP_K: usize = 20;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", post(search))
        .route("/search/meta", post(search_meta))
        .route("/search/meta-hybrid", post(search_meta_hybrid))
        .route("/images/{image_id}/similar", get(search_by_image_id))
}

#[derive(Debug, Serialize)]
struct HitsResponse {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    query: Option<String>,
    image_id: Option<String>,
    limit: Option<usize>,
}

async fn search(State(state): State<AppState>, Json(body): Json<SearchRequest>) -> ApiResult<Json<HitsResponse>> {
    let image_id = body.image_id.as_deref().map(ImageId::from_str).transpose().map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let top_k = body.limit.unwrap_or(DEFAULT_TOP_K);

    let query = match (body.query, image_id) {
        (Some(text), Some(id)) => {
            let (bytes, media_type) = state.ctx.object_store().get(&id).await.map_err(ApiError)?.ok_or_else(|| ApiError(Error::not_found(format!("image {id}"))))?;
            SearchQuery::Hybrid { text: Some(text), image: Some(ImageInput { bytes, media_type }) }
        }
        (Some(text), None) => SearchQuery::Text { query: text, tags: None },
        (None, Some(id)) => SearchQuery::Image { image: None, by_id: Some(id) },
        (None, None) => return Err(ApiError(Error::EmptyInput)),
    };

    let hits = state.ctx.search_port().search(query, top_k, None).await.map_err(ApiError)?;
    Ok(Json(HitsResponse { hits }))
}

#[derive(Debug, Deserialize)]
struct SimilarQuery {
    limit: Option<usize>,
}

async fn search_by_image_id(State(state): State<AppState>, Path(image_id): Path<String>, Query(query): Query<SimilarQuery>) -> ApiResult<Json<HitsResponse>> {
    let id = ImageId::from_str(&image_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let top_k = query.limit.unwrap_or(DEFAULT_TOP_K);
    let hits = state.ctx.search_port().search(SearchQuery::Image { image: None, by_id: Some(id) }, top_k, None).await.map_err(ApiError)?;
    Ok(Json(HitsResponse { hits }))
}

#[derive(Debug, Deserialize)]
struct MetaSearchRequest {
    date: Option<String>,
    tags: Option<Vec<String>>,
}

async fn search_meta(State(state): State<AppState>, Json(body): Json<MetaSearchRequest>) -> ApiResult<Json<HitsResponse>> {
    let meta = build_meta_query(body.date.as_deref(), body.tags);
    let hits = state.ctx.search_port().search_by_meta(meta, DEFAULT_TOP_K).await.map_err(ApiError)?;
    Ok(Json(HitsResponse { hits }))
}

#[derive(Debug, Deserialize)]
struct MetaHybridRequest {
    query: String,
    date: Option<String>,
    tags: Option<Vec<String>>,
}

async fn search_meta_hybrid(State(state): State<AppState>, Json(body): Json<MetaHybridRequest>) -> ApiResult<Json<HitsResponse>> {
    let meta = build_meta_query(body.date.as_deref(), body.tags);
    let hits = state.ctx.search_port().search_by_text_with_meta(&body.query, meta, DEFAULT_TOP_K, None).await.map_err(ApiError)?;
    Ok(Json(HitsResponse { hits }))
}
