use serde::Serialize;

use corelib::models::TelemetryRecord;

/// Body of a successful `POST /api/temperature`.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub message: &'static str,
    pub data_count: usize,
}

/// Body of `GET /api/temperature`.
#[derive(Debug, Serialize)]
pub struct RecentResponse {
    pub success: bool,
    pub data: Vec<TelemetryRecord>,
    /// Buffer length read right after `data`, under its own lock acquisition.
    /// Concurrent appends may make it newer than the window.
    pub total_count: usize,
}

/// Body of `GET /api/temperature/latest`.
#[derive(Debug, Serialize)]
pub struct LatestResponse {
    pub success: bool,
    pub data: TelemetryRecord,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub data_count: usize,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub status: &'static str,
    pub message: &'static str,
}
