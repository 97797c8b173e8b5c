//! HTTP handlers for the connector surface.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use espf_events::Event;

use crate::error::{ApiError, ErrorResponse};
use crate::processor::Outcome;
use crate::state::AppState;

/// Service name reported by the health endpoint.
const SERVICE_NAME: &str = "WTL HLR/HSS Connector";

/// Health check response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: String,
    /// Service name.
    pub service: String,
}

/// Event acknowledgment body.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventResponse {
    /// Outcome description.
    pub message: String,
}

/// Health check endpoint. No authentication required.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Healthy".to_string(),
        service: SERVICE_NAME.to_string(),
    })
}

/// Process an enriched PortaBilling ESPF event.
///
/// The body is parsed manually so schema failures map onto the shared 422
/// response shape instead of a framework-specific rejection.
#[utoipa::path(
    post,
    path = "/process-event",
    request_body = Event,
    responses(
        (status = 202, description = "Event processed or deliberately ignored", body = EventResponse),
        (status = 401, description = "Bad or missing bearer token", body = ErrorResponse),
        (status = 422, description = "Schema validation failed", body = ErrorResponse),
        (status = 429, description = "External system rate limited the call", body = ErrorResponse),
        (status = 500, description = "External service or internal error", body = ErrorResponse),
        (status = 503, description = "External system unavailable", body = ErrorResponse),
    ),
    security(("bearerAuth" = [])),
    tag = "Events"
)]
pub async fn process_event_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let event: Event =
        serde_json::from_slice(&body).map_err(|e| ApiError::Validation(e.to_string()))?;

    match state.processor.process(event).await {
        Outcome::Success { .. } => Ok((
            StatusCode::ACCEPTED,
            Json(EventResponse {
                message: "Event processed successfully".to_string(),
            }),
        )),
        Outcome::Ignored { reason } => Ok((
            StatusCode::ACCEPTED,
            Json(EventResponse {
                message: format!("Event ignored: {reason}"),
            }),
        )),
        Outcome::Failure(err) => Err(err.into()),
    }
}

/// Fallback for unknown paths.
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Fallback for known paths with the wrong method.
pub async fn method_not_allowed_handler() -> ApiError {
    ApiError::MethodNotAllowed
}
