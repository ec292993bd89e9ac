use axum::Json;
use std::num::IntErrorKind;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use tracing::{debug, info, instrument};

use corelib::models::{TelemetryReading, TelemetryRecord};

use crate::error::ApiError;
use crate::responses::{IngestResponse, LatestResponse, RecentResponse};
use crate::state::AppState;

/// Query pairs in request order. Repeated keys are kept.
pub type QueryPairs = Vec<(String, String)>;

/// First `limit` value in the query, if any.
pub fn first_limit(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(k, _)| k == "limit")
        .map(|(_, v)| v.as_str())
}

/// Resolves `?limit=` into a window size.
///
/// - absent or not an integer: `default`
/// - zero or negative: 0 (empty window)
/// - integers too large to represent saturate
pub fn parse_limit(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse::<i64>() {
        Ok(n) if n <= 0 => 0,
        Ok(n) => usize::try_from(n).unwrap_or(usize::MAX),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => usize::MAX,
            IntErrorKind::NegOverflow => 0,
            _ => default,
        },
    }
}

/// Accepts one sample from a device.
#[instrument(skip_all, target = "api")]
pub async fn post_temperature(
    State(state): State<AppState>,
    payload: Result<Json<TelemetryReading>, JsonRejection>,
) -> Result<Json<IngestResponse>, ApiError> {
    let Json(reading) = payload?;
    let record = TelemetryRecord::receive(reading)?;

    let temperature = record.temperature;
    let device_id = record.device_id.clone();
    let stored_locally = record.stored_locally;

    let data_count = state.buffer.append(record);

    info!(
        temperature,
        device_id = %device_id,
        stored_locally,
        data_count,
        "temperature data received"
    );

    Ok(Json(IngestResponse {
        success: true,
        message: "Temperature data received",
        data_count,
    }))
}

/// Most recent window of samples, oldest first.
#[instrument(skip_all, target = "api", fields(limit = tracing::field::Empty))]
pub async fn get_temperatures(
    State(state): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Json<RecentResponse> {
    // A malformed query string is treated like an absent limit.
    let pairs = query.map(|Query(pairs)| pairs).unwrap_or_default();
    let limit = parse_limit(first_limit(&pairs), state.config.default_recent_limit);
    tracing::Span::current().record("limit", limit);

    let data = state.buffer.recent(limit);
    let total_count = state.buffer.len();

    debug!(returned = data.len(), total_count, "serving recent window");

    Json(RecentResponse {
        success: true,
        data,
        total_count,
    })
}

#[instrument(skip_all, target = "api")]
pub async fn get_latest(State(state): State<AppState>) -> Result<Json<LatestResponse>, ApiError> {
    let data = state.buffer.latest().ok_or(ApiError::NoData)?;

    Ok(Json(LatestResponse {
        success: true,
        data,
    }))
}
