pub mod health;
pub mod telemetry;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::state::AppState;
use crate::trace::{handle_panic, trace_request};

/// Full HTTP surface of the service.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route(
            "/api/temperature",
            post(telemetry::post_temperature).get(telemetry::get_temperatures),
        )
        .route("/api/temperature/latest", get(telemetry::get_latest))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), trace_request))
        // Dashboards are served from other origins.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
