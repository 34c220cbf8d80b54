//! Index and reset.

use super::dispatch;
use crate::reducer::LoopCommand;
use crate::LoopStore;
use axum::{extract::State, http::StatusCode};
use platform_mocks_web::{AppError, CorrelationId};
use std::sync::Arc;

/// `GET /`
#[allow(clippy::unused_async)]
pub async fn index() -> &'static str {
    "Hello, World!"
}

/// Restore the seeded templates, policy models and loops.
///
/// ```bash
/// curl -X POST http://localhost:30258/reset
/// ```
pub async fn reset(
    State(store): State<Arc<LoopStore>>,
    CorrelationId(correlation_id): CorrelationId,
) -> Result<(StatusCode, &'static str), AppError> {
    tracing::info!(%correlation_id, "Reset requested");
    dispatch(&store, LoopCommand::Reset).await?;
    Ok((StatusCode::CREATED, "reset done!"))
}
