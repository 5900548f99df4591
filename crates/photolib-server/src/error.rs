//! Maps [`photolib_domain::error::Error`] onto the transport-boundary status
//! codes in spec §7: `{InvalidInput, NotFound, NotConfirmed, EmptyInput}`
//! become client errors, everything else becomes a generic server error with
//! the underlying message kept in logs rather than the response body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use photolib_domain::error::Error;
use serde::Serialize;
use tracing::error;

/// Thin wrapper so [`Error`] can implement [`IntoResponse`] without giving
/// the domain crate an Axum dependency.
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, expose_message) = match &self.0 {
            Error::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input", true),
            Error::EmptyInput => (StatusCode::BAD_REQUEST, "empty_input", true),
            Error::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found", true),
            Error::NotConfirmed { .. } => (StatusCode::CONFLICT, "not_confirmed", true),
            Error::Unauthenticated { .. } => (StatusCode::UNAUTHORIZED, "unauthenticated", false),
            Error::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, "rate_limited", true),
            Error::TimedOut { .. } => (StatusCode::GATEWAY_TIMEOUT, "timed_out", true),
            Error::ProviderUnavailable { .. } => (StatusCode::BAD_GATEWAY, "provider_unavailable", false),
            Error::DimensionMismatch { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "dimension_mismatch", false),
            Error::CorruptPayload { .. } => (StatusCode::BAD_GATEWAY, "corrupt_payload", false),
            Error::Misconfigured { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "misconfigured", false),
            Error::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal", false),
            Error::Io { .. } | Error::Json { .. } | Error::Http { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal", false),
        };

        if status.is_server_error() {
            error!(error = %self.0, kind, "request failed");
        }

        let message = if expose_message { self.0.to_string() } else { "an internal error occurred".to_owned() };
        (status, Json(ErrorBody { kind, message })).into_response()
    }
}

/// Result alias for Axum handlers that surface domain errors as [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;
