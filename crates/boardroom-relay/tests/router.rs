//! Router tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use boardroom_core::error::Result;
use boardroom_interaction::{ChatRelay, CompletionRequest, CompletionUpstream, UpstreamResponse};
use boardroom_relay::build_router;

struct FixedUpstream {
    status: u16,
    body: Value,
}

#[async_trait]
impl CompletionUpstream for FixedUpstream {
    async fn complete(&self, _api_key: &str, _request: &CompletionRequest) -> Result<UpstreamResponse> {
        Ok(UpstreamResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

fn router(status: u16, body: Value, server_key: Option<&str>) -> axum::Router {
    let relay = ChatRelay::new(Arc::new(FixedUpstream { status, body }))
        .with_server_api_key(server_key.map(str::to_string));
    build_router(Arc::new(relay))
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/claude")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_missing_key_is_400() {
    let app = router(200, json!({}), None);
    let res = app
        .oneshot(post_json(r#"{"messages":[{"role":"user","content":"Hi"}]}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await, json!({ "error": "API key is not configured" }));
}

#[tokio::test]
async fn test_success_returns_upstream_body() {
    let upstream_body = json!({ "content": [{ "type": "text", "text": "Welcome." }] });
    let app = router(200, upstream_body.clone(), Some("sk-server"));
    let res = app
        .oneshot(post_json(r#"{"messages":[{"role":"user","content":"Hi"}]}"#))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, upstream_body);
}

#[tokio::test]
async fn test_upstream_529_passes_through() {
    let overloaded = json!({ "type": "error", "error": { "type": "overloaded_error", "message": "Overloaded" } });
    let app = router(529, overloaded.clone(), None);
    let res = app
        .oneshot(post_json(
            r#"{"messages":[{"role":"user","content":"Hi"}],"apiKey":"sk-client"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 529);
    assert_eq!(json_body(res).await, overloaded);
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let app = router(200, json!({}), Some("sk"));
    let res = app.oneshot(post_json("{not json")).await.unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["error"], "Invalid request body");
}

#[tokio::test]
async fn test_get_is_405() {
    let app = router(200, json!({}), Some("sk"));
    let req = Request::builder()
        .method("GET")
        .uri("/api/claude")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json_body(res).await, json!({ "error": "Method not allowed" }));
}

#[tokio::test]
async fn test_options_is_200_with_cors() {
    let app = router(200, json!({}), None);
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/claude")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_bare_options_is_200() {
    let app = router(200, json!({}), None);
    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/claude")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}
