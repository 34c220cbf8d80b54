//! Templates and policy models offered to loop designers.

use crate::catalog::{LoopTemplate, PolicyModel};
use crate::LoopStore;
use axum::{extract::State, Json};
use platform_mocks_web::AppError;
use std::sync::Arc;

/// Templates of distributed services.
///
/// ```bash
/// curl http://localhost:30258/restservices/clds/v2/templates/
/// ```
pub async fn list_templates(
    State(store): State<Arc<LoopStore>>,
) -> Result<Json<Vec<LoopTemplate>>, AppError> {
    let templates = store.state(|s| s.distributed_templates()).await?;
    Ok(Json(templates))
}

/// The operational policy model catalog.
pub async fn list_policy_models(
    State(store): State<Arc<LoopStore>>,
) -> Result<Json<Vec<PolicyModel>>, AppError> {
    let models = store
        .state(|s| s.policy_catalog().map(<[PolicyModel]>::to_vec))
        .await?;
    Ok(Json(models))
}
