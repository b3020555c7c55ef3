use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Json;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use boardroom_interaction::{ChatRelay, RelayRequest};

const RELAY_PATH: &str = "/api/claude";

/// Builds the relay router.
pub fn build_router(relay: Arc<ChatRelay>) -> Router {
    Router::new()
        .route(
            RELAY_PATH,
            post(relay_messages)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(relay)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::OPTIONS,
            Method::PATCH,
            Method::DELETE,
            Method::POST,
            Method::PUT,
        ])
        .allow_headers([
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("accept-version"),
            HeaderName::from_static("content-length"),
            HeaderName::from_static("content-md5"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("date"),
            HeaderName::from_static("x-api-version"),
        ])
}

async fn relay_messages(
    State(relay): State<Arc<ChatRelay>>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("[Relay] Rejected request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid request body", "message": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let response = relay.handle(request).await;
    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.body)).into_response()
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}
