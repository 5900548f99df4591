//! Session transcript lookup and a server-sent-events stream of background
//! job completions scoped to one session (§4.9 session monitor).

use std::convert::Infallible;
use std::str::FromStr;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::{Json, Router};
use futures::StreamExt;
use photolib_domain::error::Error;
use photolib_domain::events::DomainEvent;
use photolib_domain::value_objects::SessionId;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions/{session_id}", get(get_session))
        .route("/sessions/{session_id}/events", get(session_events))
}

async fn get_session(State(state): State<AppState>, Path(session_id): Path<String>) -> ApiResult<Json<photolib_domain::entities::Session>> {
    let id = SessionId::from_str(&session_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let session = state.ctx.session_store().get(id).ok_or_else(|| ApiError(Error::not_found(format!("session {id}"))))?;
    Ok(Json(session))
}

/// Streams every [`DomainEvent`] that names `session_id`, as they're published,
/// so a client can watch a point-cloud or async-index job finish without polling.
async fn session_events(State(state): State<AppState>, Path(session_id): Path<String>) -> ApiResult<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>> {
    let id = SessionId::from_str(&session_id).map_err(|e| ApiError(Error::invalid_input(e.to_string())))?;
    let stream = state.ctx.event_stream().filter_map(move |event| {
        let owned = event_for_session(&event, id);
        async move { owned }
    });

    let sse_stream = stream.map(|event| {
        let payload = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_owned());
        Ok(Event::default().data(payload))
    });

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15))))
}

fn event_for_session(event: &DomainEvent, session_id: SessionId) -> Option<DomainEvent> {
    let belongs = match event {
        DomainEvent::ImageIndexed { session_id: sid, .. } | DomainEvent::ImageIndexingFailed { session_id: sid, .. } => *sid == Some(session_id),
        DomainEvent::PointCloudCompleted { session_id: sid, .. } | DomainEvent::PointCloudFailed { session_id: sid, .. } => *sid == session_id,
        _ => false,
    };
    belongs.then(|| event.clone())
}
