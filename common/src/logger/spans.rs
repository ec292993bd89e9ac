use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for one inbound request. `status` is filled in once the response is known.
pub fn request_span(method: &str, path: &str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "request",
        method = %method,
        path = %path,
        trace_id = %trace_id,
        status = field::Empty
    )
}

/// Awaits `fut` and logs a warning when it takes longer than `max`.
pub async fn warn_if_slow<F, T>(label: &'static str, max: Duration, fut: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = fut.await;
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            kind = "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
