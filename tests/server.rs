//! Integration tests for the demo service: envelope shape, status codes,
//! correlation metadata, guards, and graceful shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use envelope::config::model::Config;
use envelope::health::HealthResponse;
use envelope::server::{self, AppState};
use envelope::{Body, Envelope};
use serde_json::{json, Value};

async fn start_test_server(config: Config) -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(AppState::new(config));
    let router = server::build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

fn test_config() -> Config {
    Config {
        source: "items".into(),
        ..Config::default()
    }
}

#[tokio::test]
async fn health_is_wrapped_in_envelope() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["content-type"], "application/json");

    let envelope: Envelope = resp.json().await.unwrap();
    assert_eq!(envelope.meta.source, "items");
    assert_eq!(envelope.meta.language, "en");
    assert!(envelope.meta.transaction_id.is_none());
    assert!(envelope.meta.response_time >= 0.0);

    let Body::Response(payload) = envelope.body else {
        panic!("expected a success body");
    };
    let health: HealthResponse = serde_json::from_value(payload).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn correlation_headers_are_echoed() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let client = reqwest::Client::new();
    let body: Value = client
        .get(format!("http://{addr}/items/1"))
        .header("x-trans-id", "trans-42")
        .header("x-trans-parent-id", "parent-7")
        .header("x-request-or-lang", "pt-BR")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["meta"]["x-trans-id"], json!("trans-42"));
    assert_eq!(body["meta"]["x-trans-parent-id"], json!("parent-7"));
    assert_eq!(body["meta"]["x-request-or-lang"], json!("pt-BR"));
    assert_eq!(body["response"], json!({"id": "1", "name": "widget"}));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn absent_correlation_headers_are_null() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let body: Value = reqwest::get(format!("http://{addr}/items/1"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["meta"]["x-trans-id"], Value::Null);
    assert_eq!(body["meta"]["x-trans-parent-id"], Value::Null);
    assert_eq!(body["meta"]["x-request-or-lang"], json!("en"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn empty_language_header_uses_default() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let body: Value = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .header("x-request-or-lang", "")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["meta"]["x-request-or-lang"], json!("en"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn non_ascii_language_header_is_echoed() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let body: Value = reqwest::Client::new()
        .get(format!("http://{addr}/health"))
        .header(
            "x-request-or-lang",
            reqwest::header::HeaderValue::from_bytes("français".as_bytes()).unwrap(),
        )
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["meta"]["x-request-or-lang"], json!("français"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn configured_default_language_is_used() {
    let config = Config {
        default_language: "fr".into(),
        ..test_config()
    };
    let (addr, shutdown) = start_test_server(config).await;

    let body: Value = reqwest::get(format!("http://{addr}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["meta"]["x-request-or-lang"], json!("fr"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unknown_item_is_not_found() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::get(format!("http://{addr}/items/9")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["exception"], json!(["Item 9 not found"]));
    assert!(body.get("response").is_none());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unmatched_route_returns_404_envelope() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::get(format!("http://{addr}/nonexistent")).await.unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["exception"], json!(["Route not found: /nonexistent"]));
    assert_eq!(body["meta"]["source"], json!("items"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn wrong_method_is_unsupported_action() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .put(format!("http://{addr}/items/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["exception"],
        json!(["Method PUT is not supported on /items/1"])
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn delete_is_forbidden() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .delete(format!("http://{addr}/items/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["exception"], json!(["Item 1 is read-only"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn create_item_passes_guards() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/items/5"))
        .header("x-api-key", "secret")
        .json(&json!({"name": "gadget"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["response"], json!({"id": "5", "name": "gadget"}));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn create_item_accepts_name_from_query() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/items/5?name=gizmo"))
        .header("x-api-key", "secret")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["response"]["name"], json!("gizmo"));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn missing_api_key_is_rejected_before_params() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/items/5"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["exception"],
        json!(["Missing required header parameter: x-api-key"])
    );

    let _ = shutdown.send(());
}

#[tokio::test]
async fn missing_name_is_bad_request() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/items/5"))
        .header("x-api-key", "secret")
        .json(&json!({"size": 3}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["exception"], json!(["Missing required parameter: name"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn blank_name_is_invalid() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/items/5"))
        .header("x-api-key", "secret")
        .json(&json!({"name": "  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 422);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["exception"], json!(["name must be a non-empty string"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn empty_api_key_is_unauthorized() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/items/5"))
        .header("x-api-key", "")
        .json(&json!({"name": "gadget"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["exception"], json!(["API key must not be empty"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn graceful_shutdown_works() {
    let (addr, shutdown) = start_test_server(test_config()).await;

    let url = format!("http://{addr}/health");
    assert!(reqwest::get(&url).await.is_ok());

    let _ = shutdown.send(());

    tokio::time::sleep(std::time::Duration::from_millis(100)).await;

    let result = reqwest::get(&url).await;
    assert!(result.is_err());
}
