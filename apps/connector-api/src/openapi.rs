//! OpenAPI documentation for the connector surface.
//!
//! The document is generated with utoipa and served as plain JSON at
//! `/openapi.json`.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::{ErrorResponse, ErrorType};
use crate::handlers::{EventResponse, HealthResponse};

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation for the connector.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "WTL HLR/HSS Connector",
        version = "0.1.0",
        description = "Processes PortaBilling ESPF events (post-NSPS) and syncs with the WTL HLR/HSS core system"
    ),
    paths(crate::handlers::health_handler, crate::handlers::process_event_handler),
    components(schemas(
        HealthResponse,
        EventResponse,
        ErrorResponse,
        ErrorType,
        espf_events::Event,
        espf_events::EspfEvent,
        espf_events::PbData,
        espf_events::AccountInfo,
        espf_events::BillStatus,
        espf_events::CardInfo,
        espf_events::AccessPolicyInfo,
        espf_events::AccessPolicyAttribute,
        espf_events::AddOnProduct,
        espf_events::ServiceFeature,
        espf_events::ServiceFeatureAttribute,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Events", description = "Enriched event processing"),
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
