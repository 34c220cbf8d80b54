//! Route table of the loop mock.

use crate::environment::LoopEnvironment;
use crate::handlers::{catalog, generic, loops};
use crate::reducer::{LoopAction, LoopReducer, LoopState};
use crate::LoopStore;
use axum::{
    routing::{get, post, put},
    Router,
};
use platform_mocks_web::handlers::{liveness, readiness};
use std::sync::Arc;

/// Loop API, nested under `/restservices/clds/v2`.
///
/// The second segment of `/loop/:name` is the loop for `GET` and the action
/// for `PUT /loop/:name/:loop_id`; both routes share the parameter name.
fn loop_routes() -> Router<Arc<LoopStore>> {
    Router::new()
        .route("/templates/", get(catalog::list_templates))
        .route("/policyToscaModels/", get(catalog::list_policy_models))
        .route("/loop/:name", get(loops::get_loop))
        .route("/loop/:name/:loop_id", put(loops::loop_action))
        .route("/loop/getstatus/:loop_id", get(loops::get_loop))
        .route("/loop/create/:loop_id", post(loops::create_loop))
        .route(
            "/loop/addOperationaPolicy/:loop_id/policyModel/:policy_type/:policy_version",
            put(loops::add_operational_policy),
        )
        .route(
            "/loop/removeOperationaPolicy/:loop_id/policyModel/:policy_type/:policy_version",
            put(loops::remove_operational_policy),
        )
        .route(
            "/loop/updateMicroservicePolicy/:loop_id",
            post(loops::update_microservice_policy),
        )
        .route(
            "/loop/updateOperationalPolicies/:loop_id",
            post(loops::update_operational_policies),
        )
}

/// Build the complete router of the loop mock.
///
/// Middleware (tracing, correlation ids) is layered by the binary.
pub fn build_router(store: Arc<LoopStore>) -> Router {
    Router::new()
        .route("/", get(generic::index))
        .route("/reset", post(generic::reset))
        .route("/health", get(liveness))
        .route(
            "/health/ready",
            get(readiness::<LoopState, LoopAction, LoopEnvironment, LoopReducer>),
        )
        .nest("/restservices/clds/v2", loop_routes())
        .with_state(store)
}
