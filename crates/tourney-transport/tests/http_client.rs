//! Integration tests for `ApiClient` against a real HTTP server.
//!
//! An axum router is bound to a random local port and echoes back what it
//! saw, so these tests check the bytes that actually went over the wire:
//! the `Authorization` header, the JSON body, and how error responses are
//! turned into `RequestError`s.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tourney_transport::{
    ApiClient, Credential, CredentialStore, MemoryCredentialStore, RequestError,
};

// =========================================================================
// Test server
// =========================================================================

/// Every `Authorization` value the server received on one request.
#[derive(Debug, Deserialize)]
struct AuthEcho {
    authorization: Vec<String>,
}

fn auth_values(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all("authorization")
        .iter()
        .filter_map(|v| v.to_str().ok().map(str::to_string))
        .collect()
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    Json(json!({ "authorization": auth_values(&headers) }))
}

async fn echo_body(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "received": body }))
}

async fn validation_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "Email already taken",
            "errors": { "email": ["The email has already been taken."] }
        })),
    )
}

async fn plain_text_failure() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream exploded")
}

async fn wrong_shape() -> Json<Value> {
    Json(json!({ "unexpected": true }))
}

/// Starts the echo server and returns its base URL (with the `/api/v1`
/// prefix the real API uses).
async fn start_server() -> String {
    let api = Router::new()
        .route("/echo-auth", get(echo_auth))
        .route("/echo-body", post(echo_body).put(echo_body))
        .route("/things/{id}", delete(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/labelled/{id}",
            delete(|| async { Json(json!({ "message": "Deleted" })) }),
        )
        .route("/logout", post(|| async { Json(json!({ "message": "bye" })) }))
        .route("/fail-validation", post(validation_failure))
        .route("/fail-text", get(plain_text_failure))
        .route("/wrong-shape", get(wrong_shape))
        .route("/put-only", put(echo_body));
    let app = Router::new().nest("/api/v1", api);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api/v1")
}

fn client(base_url: &str, store: Arc<MemoryCredentialStore>) -> ApiClient {
    ApiClient::new(base_url, store)
}

// =========================================================================
// Header injection
// =========================================================================

#[tokio::test]
async fn test_get_with_token_sends_single_bearer_header() {
    let base = start_server().await;
    let store = Arc::new(MemoryCredentialStore::with_credential(
        Credential::new("tok1").unwrap(),
    ));

    let echo: AuthEcho = client(&base, store).get("/echo-auth").await.unwrap();

    assert_eq!(echo.authorization, vec!["Bearer tok1".to_string()]);
}

#[tokio::test]
async fn test_get_without_token_sends_no_authorization_header() {
    let base = start_server().await;
    let store = Arc::new(MemoryCredentialStore::new());

    let echo: AuthEcho = client(&base, store).get("echo-auth").await.unwrap();

    assert!(echo.authorization.is_empty());
}

#[tokio::test]
async fn test_token_change_is_seen_by_next_request() {
    let base = start_server().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let api = client(&base, store.clone());

    store.set(&Credential::new("first").unwrap());
    let echo: AuthEcho = api.get("/echo-auth").await.unwrap();
    assert_eq!(echo.authorization, vec!["Bearer first".to_string()]);

    store.set(&Credential::new("second").unwrap());
    let echo: AuthEcho = api.get("/echo-auth").await.unwrap();
    assert_eq!(echo.authorization, vec!["Bearer second".to_string()]);

    store.clear();
    let echo: AuthEcho = api.get("/echo-auth").await.unwrap();
    assert!(echo.authorization.is_empty());
}

// =========================================================================
// Verbs and bodies
// =========================================================================

#[derive(Serialize)]
struct Score {
    player1_score: u32,
    player2_score: u32,
}

#[tokio::test]
async fn test_post_and_put_send_json_body() {
    let base = start_server().await;
    let api = client(&base, Arc::new(MemoryCredentialStore::new()));
    let body = Score {
        player1_score: 3,
        player2_score: 1,
    };

    let posted: Value = api.post("/echo-body", &body).await.unwrap();
    assert_eq!(posted["received"]["player1_score"], 3);

    let put: Value = api.put("/put-only", &body).await.unwrap();
    assert_eq!(put["received"]["player2_score"], 1);
}

#[tokio::test]
async fn test_delete_and_post_empty_ignore_response_body() {
    let base = start_server().await;
    let api = client(&base, Arc::new(MemoryCredentialStore::new()));

    api.delete("/things/7").await.expect("204 is success");
    api.delete("/labelled/7")
        .await
        .expect("a message body on delete is not decoded");
    api.post_empty("/logout").await.expect("200 is success");
}

// =========================================================================
// Errors
// =========================================================================

#[tokio::test]
async fn test_non_2xx_json_body_becomes_status_error_with_message() {
    let base = start_server().await;
    let api = client(&base, Arc::new(MemoryCredentialStore::new()));

    let err = api
        .post::<_, Value>("/fail-validation", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.server_message(), Some("Email already taken"));
    assert!(err.field_errors().unwrap().contains_key("email"));
}

#[tokio::test]
async fn test_non_2xx_text_body_has_status_but_no_message() {
    let base = start_server().await;
    let api = client(&base, Arc::new(MemoryCredentialStore::new()));

    let err = api.get::<Value>("/fail-text").await.unwrap_err();

    assert!(matches!(err, RequestError::Status { status: 502, .. }));
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let base = start_server().await;
    let api = client(&base, Arc::new(MemoryCredentialStore::new()));

    let err = api.get::<Value>("/nope").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_success_with_unexpected_shape_is_decode_error() {
    let base = start_server().await;
    let api = client(&base, Arc::new(MemoryCredentialStore::new()));

    let err = api.get::<AuthEcho>("/wrong-shape").await.unwrap_err();

    assert!(matches!(err, RequestError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop a listener so the port is almost certainly closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(
        &format!("http://{addr}/api/v1"),
        Arc::new(MemoryCredentialStore::new()),
    );
    let err = api.get::<Value>("/echo-auth").await.unwrap_err();

    assert!(matches!(err, RequestError::Network(_)));
    assert_eq!(err.status(), None);
}
