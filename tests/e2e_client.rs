//! End-to-end gateway client tests.
//!
//! These tests run the client against a mock admin API served by axum on a
//! local port, covering pagination shapes, captured bodies and error mapping.

use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{routing::get, Json, Router};
use inspector::config::GatewayConfig;
use inspector::models::{ApiType, RequestLogFilter};
use inspector::{GatewayClient, InspectorError, LogInspection, PayloadFormat};
use serde_json::{json, Value};
use uuid::Uuid;

const TOKEN: &str = "test-session-token";
const KNOWN_ID: &str = "6f1c1f7e-8a55-4c3e-9d51-0c1b2c3d4e5f";

fn summary(request_id: &str, api_type: &str) -> Value {
    json!({
        "request_id": request_id,
        "api_type": api_type,
        "model": "gpt-4o",
        "alias": "fast",
        "provider": "openai",
        "status_code": 200,
        "latency_ms": 640,
        "created_at": "2026-03-01T12:00:00Z"
    })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

async fn list_logs(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
    }

    // Echo the query back through the alias field so tests can see it
    let mut entry = summary(KNOWN_ID, "openai_chat_completions");
    entry["alias"] = json!(format!(
        "limit={};offset={};model={};provider={}",
        params.get("limit").map_or("", String::as_str),
        params.get("offset").map_or("", String::as_str),
        params.get("model").map_or("-", String::as_str),
        params.get("provider").map_or("-", String::as_str),
    ));

    (StatusCode::OK, Json(json!({"data": [entry], "total": 57})))
}

async fn get_log(headers: HeaderMap, Path(id): Path<String>) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"})));
    }
    if id != KNOWN_ID {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Request log not found"})),
        );
    }

    let stream = "data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\
                  data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\
                  data: [DONE]\n";
    let mut entry = summary(KNOWN_ID, "openai_chat_completions");
    entry["request_body"] = json!(br#"{"model":"gpt-4o","stream":true}"#.to_vec());
    entry["response_body"] = json!(stream.as_bytes().to_vec());
    entry["response_content_type"] = json!("text/event-stream");

    (StatusCode::OK, Json(entry))
}

fn mock_gateway() -> Router {
    Router::new()
        .route("/request-logs", get(list_logs))
        .route("/request-logs/:id", get(get_log))
        .route(
            "/bare/request-logs",
            get(|| async {
                Json(json!([
                    summary(KNOWN_ID, "anthropic_messages"),
                    summary("0b7e2f3a-1c4d-4e5f-8a9b-c0d1e2f3a4b5", "some_future_api"),
                ]))
            }),
        )
        .route(
            "/broken/request-logs",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
        )
        .route(
            "/html/request-logs",
            get(|| async { "<html>login</html>" }),
        )
}

/// Serve the mock gateway on an ephemeral port
async fn spawn_gateway() -> (SocketAddr, tokio::task::JoinHandle<()>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, mock_gateway()).await;
    });
    (addr, handle)
}

fn client_for(addr: SocketAddr, prefix: &str) -> GatewayClient {
    let config = GatewayConfig {
        base_url: format!("http://{addr}{prefix}"),
        token: Some(TOKEN.to_string()),
        timeout_secs: 5,
    };
    GatewayClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_list_page_with_filters() {
    let (addr, server) = spawn_gateway().await;
    let client = client_for(addr, "");

    let filter = RequestLogFilter {
        model: Some("gpt-4o".to_string()),
        provider: Some(String::new()),
        ..Default::default()
    };
    let page = client.list_request_logs(20, 40, &filter).await.unwrap();

    assert_eq!(page.total, 57);
    assert_eq!(page.data.len(), 1);
    // Empty filter values are not sent
    assert_eq!(
        page.data[0].alias.as_deref(),
        Some("limit=20;offset=40;model=gpt-4o;provider=-")
    );
    assert_eq!(page.data[0].api_type, Some(ApiType::OpenaiChatCompletions));

    server.abort();
}

#[tokio::test]
async fn test_list_bare_array() {
    let (addr, server) = spawn_gateway().await;
    let client = client_for(addr, "/bare");

    let page = client
        .list_request_logs(20, 0, &RequestLogFilter::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.data[0].api_type, Some(ApiType::AnthropicMessages));
    // Unknown protocols degrade to None instead of failing the page
    assert_eq!(page.data[1].api_type, None);

    server.abort();
}

#[tokio::test]
async fn test_get_log_and_inspect() {
    let (addr, server) = spawn_gateway().await;
    let client = client_for(addr, "");

    let log = client
        .get_request_log(KNOWN_ID.parse().unwrap())
        .await
        .unwrap();
    assert_eq!(log.id().to_string(), KNOWN_ID);
    assert_eq!(
        log.request_body(),
        Some(br#"{"model":"gpt-4o","stream":true}"#.as_slice())
    );

    let inspection = LogInspection::from_log(&log);
    assert_eq!(inspection.assistant_reply.as_deref(), Some("Hello"));
    assert_eq!(inspection.request.format, PayloadFormat::Json);
    assert_eq!(inspection.response.format, PayloadFormat::EventStream);
    assert!(inspection.request.decoded.contains("\"stream\": true"));

    server.abort();
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (addr, server) = spawn_gateway().await;
    let config = GatewayConfig {
        base_url: format!("http://{addr}"),
        token: None,
        timeout_secs: 5,
    };
    let client = GatewayClient::new(&config).unwrap();

    let err = client
        .list_request_logs(20, 0, &RequestLogFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InspectorError::Unauthorized));

    // A wrong token is rejected the same way
    let err = client
        .with_token("stale")
        .get_request_log(KNOWN_ID.parse().unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, InspectorError::Unauthorized));

    server.abort();
}

#[tokio::test]
async fn test_not_found_uses_error_field() {
    let (addr, server) = spawn_gateway().await;
    let client = client_for(addr, "");

    let err = client.get_request_log(Uuid::new_v4()).await.unwrap_err();
    match err {
        InspectorError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Request log not found");
        },
        other => panic!("expected Api error, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn test_server_error_without_json() {
    let (addr, server) = spawn_gateway().await;
    let client = client_for(addr, "/broken");

    let err = client
        .list_request_logs(20, 0, &RequestLogFilter::default())
        .await
        .unwrap_err();
    match err {
        InspectorError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Request failed with status 500");
        },
        other => panic!("expected Api error, got {other:?}"),
    }

    server.abort();
}

#[tokio::test]
async fn test_non_json_success_is_unexpected() {
    let (addr, server) = spawn_gateway().await;
    let client = client_for(addr, "/html");

    let err = client
        .list_request_logs(20, 0, &RequestLogFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InspectorError::UnexpectedResponse(_)));

    server.abort();
}

#[tokio::test]
async fn test_unreachable_gateway_is_network_error() {
    // Bind then drop to get a port nobody listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr, "");
    let err = client
        .list_request_logs(20, 0, &RequestLogFilter::default())
        .await
        .unwrap_err();
    assert!(matches!(err, InspectorError::Network(_)));
}
