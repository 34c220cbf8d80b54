//! Index, reset and the static categories document.

use super::dispatch;
use crate::fixtures::CATEGORIES_JSON;
use crate::reducer::CatalogCommand;
use crate::CatalogStore;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use platform_mocks_web::{AppError, CorrelationId};
use std::sync::Arc;

/// `GET /`
#[allow(clippy::unused_async)]
pub async fn index() -> &'static str {
    "Hello, World!"
}

/// Restore the seeded dataset.
///
/// ```bash
/// curl -X POST http://localhost:30206/reset
/// ```
pub async fn reset(
    State(store): State<Arc<CatalogStore>>,
    CorrelationId(correlation_id): CorrelationId,
) -> Result<(StatusCode, &'static str), AppError> {
    tracing::info!(%correlation_id, "Reset requested");
    dispatch(&store, CatalogCommand::Reset).await?;
    Ok((StatusCode::CREATED, "reset done!"))
}

/// Resource and service categories used by the designer UI.
#[allow(clippy::unused_async)]
pub async fn categories() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "application/json")], CATEGORIES_JSON)
}
