//! Conversational turn and confirmed-deletion endpoints (C7/C6).

use std::str::FromStr;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use photolib_application::ToolDispatcher;
use photolib_domain::error::Error;
use photolib_domain::ports::services::agent::{AgentOrchestratorInterface, AgentTurn};
use photolib_domain::value_objects::SessionId;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/agent/turn", post(turn))
        .route("/agent/confirm-deletion", post(confirm_deletion))
}

#[derive(Debug, Deserialize)]
struct TurnRequest {
    session_id: Option<String>,
    message: String,
}

async fn turn(State(state): State<AppState>, Json(body): Json<TurnRequest>) -> ApiResult<Json<AgentTurn>> {
    let session_id = match body.session_id {
        Some(raw) => SessionId::from_str(&raw).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?,
        None => SessionId::new(),
    };

    let turn = state.ctx.agent_orchestrator_port().handle_turn(session_id, &body.message).await.map_err(ApiError)?;
    Ok(Json(turn))
}

#[derive(Debug, Deserialize)]
struct ConfirmDeletionRequest {
    session_id: String,
    confirmed: bool,
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct ConfirmDeletionResponse {
    result: serde_json::Value,
}

async fn confirm_deletion(State(state): State<AppState>, Json(body): Json<ConfirmDeletionRequest>) -> ApiResult<Json<ConfirmDeletionResponse>> {
    let session_id = SessionId::from_str(&body.session_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let result = state.ctx.dispatcher_port().confirm_pending_deletion(session_id, body.confirmed, body.reason).await.map_err(ApiError)?;
    Ok(Json(ConfirmDeletionResponse { result }))
}
