//! Correlation ids for every request.
//!
//! [`correlation_id`] reuses a valid `X-Correlation-ID` request header or
//! mints a UUID v4, stores it in the request extensions for
//! [`CorrelationId`](crate::CorrelationId), runs the request inside an
//! `http_request` span carrying it, and echoes it on the response.
//!
//! ```ignore
//! let app = build_router(store).layer(axum::middleware::from_fn(correlation_id));
//! ```

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the correlation id.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// The id from `headers`, or a fresh one when absent or not a UUID.
pub(crate) fn correlation_id_from(headers: &HeaderMap) -> Uuid {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
        .unwrap_or_else(Uuid::new_v4)
}

/// Middleware function tagging the request with its correlation id.
pub async fn correlation_id(mut request: Request, next: Next) -> Response {
    let id = correlation_id_from(request.headers());
    request.extensions_mut().insert(id);

    let span = tracing::info_span!(
        "http_request",
        correlation_id = %id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::CorrelationId;
    use axum::{body::Body, routing::post, Router};
    use tower::ServiceExt;

    /// Id seen by the handler and id echoed in the response header.
    async fn seen_and_echoed(header: Option<&str>) -> (String, String) {
        let app = Router::new()
            .route(
                "/reset",
                post(|CorrelationId(id): CorrelationId| async move { id.to_string() }),
            )
            .layer(axum::middleware::from_fn(correlation_id));

        let mut builder = axum::http::Request::post("/reset");
        if let Some(value) = header {
            builder = builder.header(CORRELATION_ID_HEADER, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

        let echoed = response.headers()[CORRELATION_ID_HEADER].to_str().unwrap().to_owned();
        let body = axum::body::to_bytes(response.into_body(), 64).await.unwrap();
        (String::from_utf8(body.to_vec()).unwrap(), echoed)
    }

    #[tokio::test]
    async fn test_request_id_is_kept() {
        let id = Uuid::new_v4().to_string();

        let (seen, echoed) = seen_and_echoed(Some(&id)).await;

        assert_eq!(seen, id);
        assert_eq!(echoed, id);
    }

    #[tokio::test]
    async fn test_missing_or_invalid_id_is_replaced() {
        for header in [None, Some("not-a-uuid")] {
            let (seen, echoed) = seen_and_echoed(header).await;

            assert_ne!(Some(seen.as_str()), header);
            assert!(Uuid::parse_str(&seen).is_ok());
            assert_eq!(seen, echoed);
        }
    }
}
