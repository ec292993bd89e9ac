use axum::Json;
use axum::extract::State;

use corelib::time::now_iso8601;

use crate::responses::{BannerResponse, HealthResponse};
use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        data_count: state.buffer.len(),
        timestamp: now_iso8601(),
    })
}

pub async fn root() -> Json<BannerResponse> {
    Json(BannerResponse {
        status: "ok",
        message: "Temperature telemetry backend is running",
    })
}
