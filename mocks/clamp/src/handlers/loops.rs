//! Loop instance endpoints, under `/restservices/clds/v2/loop`.

use super::{dispatch, unexpected_reply};
use crate::loops::LoopDetails;
use crate::policy::MicroServicePolicy;
use crate::reducer::{LoopCommand, LoopReply};
use crate::LoopStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use platform_mocks_web::AppError;
use serde::Deserialize;
use std::sync::Arc;

/// Query of `POST loop/create/:loop_id`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateLoopQuery {
    /// Template to instantiate
    pub template_name: String,
}

fn loop_reply(reply: LoopReply) -> Result<Json<LoopDetails>, AppError> {
    match reply {
        LoopReply::Loop(details) => Ok(Json(*details)),
        _ => Err(unexpected_reply()),
    }
}

/// Current state of a loop.
///
/// Also serves `GET loop/getstatus/:loop_id`.
///
/// ```bash
/// curl http://localhost:30258/restservices/clds/v2/loop/intance_template01
/// ```
pub async fn get_loop(
    State(store): State<Arc<LoopStore>>,
    Path(loop_id): Path<String>,
) -> Result<Json<LoopDetails>, AppError> {
    let details = store.state(|s| s.loop_details(&loop_id).cloned()).await?;
    Ok(Json(details))
}

/// Create a loop from a template.
///
/// ```bash
/// curl -X POST "http://localhost:30258/restservices/clds/v2/loop/create/LOOP_1?templateName=template_service01"
/// ```
pub async fn create_loop(
    State(store): State<Arc<LoopStore>>,
    Path(loop_id): Path<String>,
    Query(query): Query<CreateLoopQuery>,
) -> Result<(StatusCode, Json<LoopDetails>), AppError> {
    let reply = dispatch(
        &store,
        LoopCommand::CreateLoop {
            loop_id,
            template_name: query.template_name,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, loop_reply(reply)?))
}

/// Attach an operational policy of a catalog model.
pub async fn add_operational_policy(
    State(store): State<Arc<LoopStore>>,
    Path((loop_id, policy_type, policy_version)): Path<(String, String, String)>,
) -> Result<Json<LoopDetails>, AppError> {
    let reply = dispatch(
        &store,
        LoopCommand::AttachPolicy {
            loop_id,
            policy_type,
            policy_version,
        },
    )
    .await?;

    loop_reply(reply)
}

/// Detach the first operational policy of a model.
pub async fn remove_operational_policy(
    State(store): State<Arc<LoopStore>>,
    Path((loop_id, policy_type, policy_version)): Path<(String, String, String)>,
) -> Result<Json<LoopDetails>, AppError> {
    let reply = dispatch(
        &store,
        LoopCommand::DetachPolicy {
            loop_id,
            policy_type,
            policy_version,
        },
    )
    .await?;

    loop_reply(reply)
}

/// Replace the TCA configuration of every microservice policy.
///
/// ```bash
/// curl -X POST http://localhost:30258/restservices/clds/v2/loop/updateMicroservicePolicy/LOOP_1 \
///   -H "Content-Type: application/json" \
///   -d '{"name": "tca", "configurationsJson": {"tca.policy": {"Domain": "measurementsForVfScaling"}}}'
/// ```
pub async fn update_microservice_policy(
    State(store): State<Arc<LoopStore>>,
    Path(loop_id): Path<String>,
    Json(policy): Json<MicroServicePolicy>,
) -> Result<Json<MicroServicePolicy>, AppError> {
    let reply = dispatch(
        &store,
        LoopCommand::UpdateMicroservicePolicy {
            loop_id,
            policy: Box::new(policy),
        },
    )
    .await?;

    match reply {
        LoopReply::MicroservicePolicy(policy) => Ok(Json(*policy)),
        _ => Err(unexpected_reply()),
    }
}

/// Mark the last operational policy of a loop as configured.
pub async fn update_operational_policies(
    State(store): State<Arc<LoopStore>>,
    Path(loop_id): Path<String>,
) -> Result<Json<LoopDetails>, AppError> {
    let reply = dispatch(&store, LoopCommand::UpdateOperationalPolicies { loop_id }).await?;
    loop_reply(reply)
}

/// Run `submit`, `stop`, `restart`, `deploy`, `undeploy` or `delete`.
///
/// ```bash
/// curl -X PUT http://localhost:30258/restservices/clds/v2/loop/deploy/LOOP_1
/// ```
pub async fn loop_action(
    State(store): State<Arc<LoopStore>>,
    Path((action, loop_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    match dispatch(&store, LoopCommand::Run { loop_id, action }).await? {
        LoopReply::Submitted(state) => Ok(Json(state).into_response()),
        LoopReply::Accepted => Ok(Json("{}").into_response()),
        _ => Err(unexpected_reply()),
    }
}
