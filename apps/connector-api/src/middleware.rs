//! Request middleware: bearer authentication and request-context logging.
//!
//! The authentication check runs before any body parsing so a bad token
//! never reaches the payload model (fail fast, zero side effects). The
//! request-context middleware carries the upstream trace headers through
//! every log record of the request and echoes them on the response.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::config::Config;
use crate::error::ApiError;

/// Upstream trace id header (B3 propagation).
pub const TRACE_ID_HEADER: &str = "x-b3-traceid";

/// Per-delivery request id header.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Read a header value, or generate a UUID substitute when absent.
fn header_or_generated(request: &Request<Body>, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Middleware that attaches trace/request ids to a per-request span, logs
/// request completion, and echoes the ids on the response.
pub async fn request_context_middleware(request: Request<Body>, next: Next) -> Response {
    let trace_id = header_or_generated(&request, TRACE_ID_HEADER);
    let request_id = header_or_generated(&request, REQUEST_ID_HEADER);

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = info_span!(
        "http_request",
        trace_id = %trace_id,
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            elapsed_ms = elapsed_ms,
            "HTTP request completed"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&trace_id) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// Middleware that requires `Authorization: Bearer <token>` matching the
/// configured static secret.
pub async fn bearer_auth_middleware(
    State(config): State<Arc<Config>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == config.api_token => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Rejected request with invalid access token");
            Err(ApiError::InvalidToken)
        }
        None => {
            tracing::warn!("Rejected request without bearer token");
            Err(ApiError::InvalidToken)
        }
    }
}
