//! Custom Axum extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::middleware::correlation_id_from;

/// Correlation id of the current request.
///
/// Set by [`crate::correlation_id`]; without that middleware it is read from
/// the `X-Correlation-ID` header or generated.
///
/// ```ignore
/// async fn reset(CorrelationId(correlation_id): CorrelationId) -> impl IntoResponse {
///     tracing::info!(%correlation_id, "Reset requested");
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = match parts.extensions.get::<Uuid>() {
            Some(id) => *id,
            None => correlation_id_from(&parts.headers),
        };
        Ok(Self(id))
    }
}
