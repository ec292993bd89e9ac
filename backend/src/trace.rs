use std::any::Any;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::Instrument;

use common::logger::{TraceId, request_span, warn_if_slow};

use crate::error::ApiError;
use crate::state::AppState;

/// Response header carrying the request's trace id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Runs every request inside its own root span and tags the response with the trace id.
pub async fn trace_request(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let trace_id = TraceId::new();
    let span = request_span(req.method().as_str(), req.uri().path(), &trace_id);

    let threshold = state.config.slow_request_threshold();
    let mut res = warn_if_slow("http_request", threshold, next.run(req))
        .instrument(span.clone())
        .await;

    span.record("status", res.status().as_u16());

    if let Ok(v) = HeaderValue::from_str(&trace_id.to_string()) {
        res.headers_mut().insert(TRACE_ID_HEADER, v);
    }

    res
}

/// Turns a handler panic into a 500 instead of dropping the connection.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    async fn explode() -> &'static str {
        panic!("sensor exploded")
    }

    #[tokio::test]
    async fn panicking_handler_maps_to_internal_error() {
        let app = Router::new()
            .route("/boom", get(explode))
            .layer(CatchPanicLayer::custom(handle_panic));

        let res = app
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn panic_payload_kinds_are_handled() {
        let res = handle_panic(Box::new(String::from("owned")));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = handle_panic(Box::new(42u8));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
