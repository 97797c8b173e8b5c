//! End-to-end tests for the connector HTTP surface.
//!
//! The router is exercised in-process with `tower::ServiceExt::oneshot`;
//! the WTL system is a wiremock server. Covers the auth boundary, ignored
//! outcomes, the happy path, failure classification, and idempotence.

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use connector_api::config::Config;
use connector_api::mapping::ActionMap;
use connector_api::router;
use connector_api::state::AppState;
use wtl_client::{WtlConfig, WtlCredentials};

const API_TOKEN: &str = "test-api-token";

fn test_router(wtl_url: &str, imsi_pattern: Option<&str>, wtl_timeout_secs: u64) -> Router {
    let config = Config {
        api_token: API_TOKEN.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        log_filter: "info".to_string(),
        wtl: WtlConfig::new(wtl_url, WtlCredentials::bearer("wtl-token"))
            .with_timeout_secs(wtl_timeout_secs),
        default_cs_profile: "default".to_string(),
        default_eps_profile: "default".to_string(),
        imsi_pattern: imsi_pattern.map(|p| regex::Regex::new(p).unwrap()),
    };
    let state = AppState::new(config, ActionMap::standard()).unwrap();
    router(state)
}

fn post_event(body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/process-event")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json_of(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_event() -> Value {
    json!({
        "event_id": "a3623086-24c2-47fb-a17f-929d9e542ed2",
        "data": { "event_type": "SIM/Updated", "variables": { "i_account": 277147 } },
        "handler_id": "wtl",
        "status": "queued",
        "pb_data": {
            "account_info": {
                "bill_status": "open",
                "blocked": false,
                "id": "380661310764@msisdn"
            },
            "sim_info": { "imsi": "001010000020349", "status": "active" },
            "access_policy_info": {
                "attributes": [
                    { "group_name": "lte.wtl", "name": "cs_profile", "value": "cs-pp-20250319" },
                    { "group_name": "lte.wtl", "name": "eps_profile", "value": "eps-pp-20250319" }
                ]
            }
        }
    })
}

#[tokio::test]
async fn test_health_requires_no_auth() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json_of(response).await;
    assert_eq!(body["status"], "Healthy");
}

#[tokio::test]
async fn test_missing_token_is_exact_401_and_no_processing() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let response = app.oneshot(post_event(&sample_event(), None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json_of(response).await;
    assert_eq!(
        body,
        json!({
            "message": "Invalid access token",
            "error": "Unauthorized",
            "type": "AUTHENTICATION_ERROR"
        })
    );
    // The event never reached the extractor or the outbound client.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_wrong_token_is_401() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let response = app
        .oneshot(post_event(&sample_event(), Some("not-the-token")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_valid_event_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prov"))
        .and(header("Authorization", "Bearer wtl-token"))
        .and(body_json(json!({
            "imsi": "001010000020349",
            "subscriber_status": "serviceGranted",
            "msisdn": ["380661310764"],
            "cs_profile": "cs-pp-20250319",
            "eps_profile": "eps-pp-20250319",
            "action": "update"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": true })))
        .expect(1)
        .mount(&server)
        .await;

    let app = test_router(&server.uri(), None, 30);
    let response = app
        .oneshot(post_event(&sample_event(), Some(API_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json_of(response).await;
    assert_eq!(body, json!({ "message": "Event processed successfully" }));
}

#[tokio::test]
async fn test_unmapped_event_type_is_ignored() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let mut event = sample_event();
    event["data"]["event_type"] = json!("SIM/Created");

    let response = app
        .oneshot(post_event(&event, Some(API_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json_of(response).await;
    assert_eq!(
        body,
        json!({ "message": "Event ignored: No defined action for event type: SIM/Created" })
    );
    // Zero outbound calls.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_imsi_is_ignored_not_failed() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let mut event = sample_event();
    event["pb_data"]["sim_info"] = json!({ "status": "active" });

    let response = app
        .oneshot(post_event(&event, Some(API_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json_of(response).await;
    assert_eq!(
        body,
        json!({ "message": "Event ignored: IMSI is empty or not provided" })
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_imsi_pattern_mismatch_is_ignored() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), Some(r"^90170000005017[0-9]$"), 30);

    let response = app
        .oneshot(post_event(&sample_event(), Some(API_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = body_json_of(response).await;
    assert_eq!(
        body,
        json!({ "message": "Event ignored: IMSI 001010000020349 doesn't follow the regexp provided" })
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_external_timeout_is_503_contract_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prov"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": true }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let app = test_router(&server.uri(), None, 1);
    let response = app
        .oneshot(post_event(&sample_event(), Some(API_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json_of(response).await;
    assert_eq!(
        body,
        json!({
            "message": "Core service is not available",
            "error": "Connection timeout",
            "type": "CONNECTION_ERROR"
        })
    );
}

#[tokio::test]
async fn test_external_business_failure_is_500_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prov"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "result": false, "error": "subscriber not found" })),
        )
        .mount(&server)
        .await;

    let app = test_router(&server.uri(), None, 30);
    let response = app
        .oneshot(post_event(&sample_event(), Some(API_TOKEN)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json_of(response).await;
    assert_eq!(body["type"], "SERVICE_ERROR");
    assert_eq!(body["error"], "subscriber not found");
}

#[tokio::test]
async fn test_idempotent_classification_and_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prov"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": true })))
        .expect(2)
        .mount(&server)
        .await;

    // Same event JSON twice against the same mocked response: byte-identical
    // acknowledgments.
    let mut bodies = Vec::new();
    for _ in 0..2 {
        let app = test_router(&server.uri(), None, 30);
        let response = app
            .oneshot(post_event(&sample_event(), Some(API_TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        bodies.push(bytes);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_malformed_body_is_422() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let request = Request::builder()
        .method("POST")
        .uri("/process-event")
        .header("content-type", "application/json")
        .header("Authorization", format!("Bearer {API_TOKEN}"))
        .body(Body::from(r#"{"data": {"event_type": "SIM/Updated"}}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json_of(response).await;
    assert_eq!(body["type"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Validation failed");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json_of(response).await;
    assert_eq!(body["type"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Resource not found");
}

#[tokio::test]
async fn test_wrong_method_is_405() {
    let server = MockServer::start().await;
    let app = test_router(&server.uri(), None, 30);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json_of(response).await;
    assert_eq!(body["message"], "Method not allowed");
}

#[tokio::test]
async fn test_trace_headers_echoed_on_event_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prov"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": true })))
        .mount(&server)
        .await;

    let app = test_router(&server.uri(), None, 30);
    let mut request = post_event(&sample_event(), Some(API_TOKEN));
    request
        .headers_mut()
        .insert("x-b3-traceid", "80f198ee56343ba8".parse().unwrap());
    request
        .headers_mut()
        .insert("x-request-id", "delivery-7".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(
        response.headers().get("x-b3-traceid").unwrap(),
        "80f198ee56343ba8"
    );
    assert_eq!(response.headers().get("x-request-id").unwrap(), "delivery-7");
}
