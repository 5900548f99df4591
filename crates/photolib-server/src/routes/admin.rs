//! Operational endpoints: health, background job inspection, and a manual
//! full reindex trigger (C8).

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use photolib_domain::error::Error;
use photolib_domain::ports::infrastructure::lifecycle::ExtendedHealthResponse;
use photolib_domain::ports::jobs::{Job, JobCounts, JobId, JobManagerInterface};
use photolib_domain::ports::services::indexing::ReindexReport;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/jobs", get(list_jobs))
        .route("/jobs/{job_id}", get(get_job))
        .route("/jobs/counts", get(job_counts))
        .route("/admin/reindex", post(reindex))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<ExtendedHealthResponse>) {
    let report = state.ctx.health().check().await;
    let status = if report.status == "healthy" { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status, Json(report))
}

async fn list_jobs(State(state): State<AppState>) -> Json<Vec<Job>> {
    Json(state.ctx.job_manager().list_jobs(None))
}

async fn get_job(State(state): State<AppState>, Path(job_id): Path<String>) -> ApiResult<Json<Job>> {
    let id = JobId::from_str(&job_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let job = state.ctx.job_manager().get_job(&id).ok_or_else(|| ApiError(Error::not_found(format!("job {id}"))))?;
    Ok(Json(job))
}

async fn job_counts(State(state): State<AppState>) -> Json<JobCounts> {
    Json(state.ctx.job_manager().job_counts())
}

async fn reindex(State(state): State<AppState>) -> ApiResult<Json<ReindexReport>> {
    let report = state.ctx.indexer_port().reindex_all().await.map_err(ApiError)?;
    Ok(Json(report))
}
