//! API integration tests.
//!
//! These tests drive the complete router end-to-end using axum's test utilities.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use dqsegdb_wui_session::api::{create_router, AppState};
use dqsegdb_wui_session::config::Config;
use dqsegdb_wui_session::{HostRecord, StaticHostDirectory};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Helper to create a JSON request.
fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Helper to extract body as string.
async fn response_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8_lossy(&body).to_string()
}

/// Helper to extract JSON from response.
async fn response_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// State matching a single-host deployment: H1 as default host, JSON output,
/// history included and flags combined with AND.
fn h1_state() -> AppState {
    let mut config = Config::default();
    config.defaults.include_history = Some(true);
    config.defaults.choose_flag_option = Some("AND".to_string());
    AppState::new(
        Arc::new(config.defaults),
        Arc::new(StaticHostDirectory::new(
            1,
            "json",
            vec![HostRecord::new(1, "H1")],
        )),
    )
}

async fn create(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/sessions", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response_json(response).await
}

// ============================================================================
// Health & Info Tests
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(h1_state());

    let response = app
        .oneshot(json_request(Method::GET, "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_text(response).await, "OK");
}

#[tokio::test]
async fn test_api_info_endpoint() {
    let app = create_router(h1_state());

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["name"], "dqsegdb-wui-session");
    assert_eq!(json["status"], "running");
}

// ============================================================================
// Session Lifecycle Tests
// ============================================================================

#[tokio::test]
async fn test_list_sessions_empty() {
    let app = create_router(h1_state());

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1/sessions", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert!(json["sessions"].is_array());
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_create_session_seeds_all_defaults() {
    let app = create_router(h1_state());

    let json = create(&app).await;

    assert!(json["session_id"].is_u64());
    assert!(json["session_id_str"].as_str().unwrap().starts_with("wui-"));
    assert_eq!(json["populated"].as_array().unwrap().len(), 10);
    assert_eq!(
        json["values"],
        json!({
            "host_id": 1,
            "ifo": null,
            "deselected_ifo": [],
            "dq_flag_uris": [],
            "flag_filter": null,
            "gps_start": "",
            "gps_stop": "",
            "include_history": true,
            "output_format": "json",
            "choose_flag_option": "AND"
        })
    );
}

#[tokio::test]
async fn test_create_session_missing_default_host() {
    let state = AppState::new(
        Arc::new(Config::default().defaults),
        Arc::new(StaticHostDirectory::new(1, "json", Vec::new())),
    );
    let store = state.store.clone();
    let app = create_router(state);

    let response = app
        .oneshot(json_request(Method::POST, "/api/v1/sessions", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["code"], "MISSING_DEFAULT_HOST");
    assert_eq!(store.count(), 0);
}

#[tokio::test]
async fn test_patch_keeps_user_values() {
    let app = create_router(h1_state());
    let id = create(&app).await["session_id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/v1/sessions/{}", id),
            Some(json!({"gps_start": "1000000000", "ifo": "L1"})),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/sessions/{}", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["values"]["gps_start"], "1000000000");
    assert_eq!(json["values"]["ifo"], "L1");
    assert_eq!(json["values"]["gps_stop"], "");
    assert_eq!(json["values"]["host_id"], 1);
}

#[tokio::test]
async fn test_get_session_by_display_id() {
    let app = create_router(h1_state());
    let created = create(&app).await;
    let display_id = created["session_id_str"].as_str().unwrap().to_string();

    let response = app
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/sessions/{}", display_id),
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["session_id"], created["session_id"]);
}

#[tokio::test]
async fn test_patch_rejects_non_object() {
    let app = create_router(h1_state());
    let id = create(&app).await["session_id"].as_u64().unwrap();

    let response = app
        .oneshot(json_request(
            Method::PATCH,
            &format!("/api/v1/sessions/{}", id),
            Some(json!(["gps_start"])),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_patch_rejects_unknown_key() {
    let app = create_router(h1_state());
    let id = create(&app).await["session_id"].as_u64().unwrap();
    let uri = format!("/api/v1/sessions/{}", id);

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PATCH,
            &uri,
            Some(json!({"ifo": "L1", "hostid": 5})),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].as_str().unwrap().contains("hostid"));

    let response = app
        .oneshot(json_request(Method::GET, &uri, None))
        .await
        .unwrap();
    let values = response_json(response).await["values"].clone();
    assert!(values.get("hostid").is_none());
    assert_eq!(values["host_id"], 1);
    assert_eq!(values["ifo"], Value::Null);
}

#[tokio::test]
async fn test_patch_malformed_json_is_json_error() {
    let app = create_router(h1_state());
    let id = create(&app).await["session_id"].as_u64().unwrap();

    let request = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/v1/sessions/{}", id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn test_patch_without_content_type_is_json_error() {
    let app = create_router(h1_state());
    let id = create(&app).await["session_id"].as_u64().unwrap();

    let request = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/v1/sessions/{}", id))
        .body(Body::from(json!({"gps_start": "1"}).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_delete_session() {
    let app = create_router(h1_state());
    let id = create(&app).await["session_id"].as_u64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::DELETE,
            &format!("/api/v1/sessions/{}", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(json_request(
            Method::GET,
            &format!("/api/v1/sessions/{}", id),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_session_not_found() {
    let app = create_router(h1_state());

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1/sessions/99999", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = response_json(response).await;
    assert_eq!(json["code"], "SESSION_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_session_not_found() {
    let app = create_router(h1_state());

    let response = app
        .oneshot(json_request(Method::DELETE, "/api/v1/sessions/99999", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_after_create() {
    let app = create_router(h1_state());
    create(&app).await;
    create(&app).await;

    let response = app
        .oneshot(json_request(Method::GET, "/api/v1/sessions", None))
        .await
        .unwrap();

    let json = response_json(response).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["sessions"][0]["key_count"], 10);
    let first = &json["sessions"][0];
    assert!(first["age_seconds"].as_f64().unwrap() >= first["idle_seconds"].as_f64().unwrap());
}
