//! Router HTTP
//!
//! Un router por recurso, anidados bajo su prefijo y envueltos en las capas
//! comunes de tracing, CORS y timeout.

pub mod performance_routes;
pub mod route_routes;
pub mod unit_routes;
pub mod user_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::cors_layer;
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .layer(TimeoutLayer::new(state.config.request_timeout));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/users", user_routes::create_user_router())
        .nest("/units", unit_routes::create_unit_router())
        .nest("/routes", route_routes::create_route_router())
        .nest("/performance", performance_routes::create_performance_router())
        .layer(middleware)
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Fleet Control API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
