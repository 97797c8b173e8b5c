//! WTL HLR/HSS Connector Microservice
//!
//! Receives enriched PortaBilling ESPF events from the upstream NSPS system
//! and translates them into WTL HLR/HSS provisioning calls. Every event is
//! processed as an independent unit of work; the outcome is acknowledged
//! through the shared response taxonomy so the upstream audit trail never
//! branches on transport-level signals.
//!
//! # Modules
//!
//! - [`config`] - Fail-fast environment configuration
//! - [`logging`] - JSON tracing setup
//! - [`middleware`] - Bearer auth and request-context layers
//! - [`mapping`] - Event-type to action table
//! - [`processor`] - Per-event orchestration
//! - [`handlers`] - HTTP handlers
//! - [`error`] - Shared response taxonomy
//! - [`openapi`] - Generated API documentation

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mapping;
pub mod middleware;
pub mod openapi;
pub mod processor;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{
    health_handler, method_not_allowed_handler, not_found_handler, process_event_handler,
};
use crate::middleware::{bearer_auth_middleware, request_context_middleware};
use crate::openapi::openapi_handler;
use crate::state::AppState;

/// Maximum accepted inbound body size (enriched events are small).
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assemble the application router.
///
/// `/process-event` requires the static bearer token; the auth check runs
/// before the handler parses anything. Wrong methods on a known path answer
/// 405 and unknown paths 404, both in the shared response shape.
pub fn router(state: AppState) -> Router {
    let process_event = post(process_event_handler)
        .fallback(method_not_allowed_handler)
        .route_layer(axum::middleware::from_fn_with_state(
            state.config.clone(),
            bearer_auth_middleware,
        ));

    Router::new()
        .route(
            "/health",
            get(health_handler).fallback(method_not_allowed_handler),
        )
        .route("/openapi.json", get(openapi_handler))
        .route("/process-event", process_event)
        .fallback(not_found_handler)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(request_context_middleware))
        .with_state(state)
}
