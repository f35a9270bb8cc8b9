use std::sync::Arc;

use axum::extract::State;
use axum::http::Method;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Json, Router};
use cryptogate_interceptors::prelude::{crypto_middleware, ApiRes, CryptoGate};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use super::state::ServeState;

/// Demo API wrapped in the crypto middleware. Routes are registered before the
/// layer so the middleware sees their `MatchedPath` templates.
pub fn build_router(gate: Arc<CryptoGate>, state: ServeState) -> Router {
    demo_routes()
        .with_state(state)
        .layer(from_fn_with_state(gate, crypto_middleware))
        .layer(cors_layer())
}

pub fn demo_routes() -> Router<ServeState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/echo", post(echo_handler))
        .route("/v1/profile", get(profile_handler))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn health_handler(State(state): State<ServeState>) -> Json<Value> {
    let metrics = state.metrics.snapshot();
    Json(json!({
        "status": "ok",
        "crypto": {
            "encrypt_ok": metrics.encrypt_ok,
            "encrypt_err": metrics.encrypt_err,
            "decrypt_ok": metrics.decrypt_ok,
            "decrypt_err": metrics.decrypt_err,
        }
    }))
}

async fn echo_handler(body: Option<Json<Value>>) -> ApiRes<Value> {
    ApiRes::success(body.map(|Json(value)| value).unwrap_or(Value::Null))
}

async fn profile_handler() -> ApiRes<Value> {
    ApiRes::success(json!({
        "id": 1,
        "name": "demo",
        "roles": ["reader"],
    }))
}
