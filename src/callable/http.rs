//! HTTP transport — maps HTTP requests to callable dispatch.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /:name` — invoke a callable. Body = JSON payload, gateway
//!   headers → caller identity.
//! - `GET /health` — health check returning `{ "ok": true, "callables": [...] }`.
//!
//! Token verification is owned by whatever sits in front of this server;
//! the transport only reads the identity headers that boundary forwards.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tebooka_backend::{callable, handlers};
//!
//! let service = Arc::new(handlers::service(gateways));
//!
//! // Get the router to compose with other axum routes
//! let app = callable::router(service.clone());
//!
//! // Or serve directly
//! callable::serve(service, "0.0.0.0:8080").await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use super::auth::CallerAuth;
use super::service::Service;

/// Header carrying the gateway-verified caller uid.
const CALLER_UID_HEADER: &str = "x-caller-uid";
/// Prefix for forwarded claim headers (`x-caller-claim-email`, ...).
const CALLER_CLAIM_PREFIX: &str = "x-caller-claim-";

/// Build an axum `Router` that dispatches invocations via the given service.
pub fn router<S: Send + Sync + 'static>(service: Arc<Service<S>>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/:name", post(invoke_handler))
        .with_state(service)
}

/// Serve the service over HTTP at the given address (e.g. `"0.0.0.0:8080"`).
pub async fn serve<S: Send + Sync + 'static>(
    service: Arc<Service<S>>,
    addr: &str,
) -> Result<(), std::io::Error> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health` — returns `{ "ok": true, "callables": [...] }`.
async fn health_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
) -> impl IntoResponse {
    let callables: Vec<&str> = service.callables();
    Json(json!({ "ok": true, "callables": callables }))
}

/// `POST /:name` — invoke a callable with the JSON body as payload.
///
/// Success returns the result object as-is. Failure returns
/// `{ "error": { "code", "message" } }` with the mapped status so clients
/// can branch on the kind.
async fn invoke_handler<S: Send + Sync + 'static>(
    State(service): State<Arc<Service<S>>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> impl IntoResponse {
    let auth = auth_from_headers(&headers);
    match service.dispatch(&name, data, auth).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            let status =
                StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = json!({ "error": { "code": e.code(), "message": e.message() } });
            (status, Json(body)).into_response()
        }
    }
}

/// Extract caller identity from gateway-forwarded headers.
///
/// No uid header means the call is unauthenticated.
fn auth_from_headers(headers: &HeaderMap) -> Option<CallerAuth> {
    let uid = headers.get(CALLER_UID_HEADER)?.to_str().ok()?;

    let mut claims = HashMap::new();
    for (name, value) in headers.iter() {
        if let Some(claim) = name.as_str().strip_prefix(CALLER_CLAIM_PREFIX) {
            if let Ok(v) = value.to_str() {
                claims.insert(claim.to_string(), v.to_string());
            }
        }
    }

    Some(CallerAuth::with_claims(uid, claims))
}
