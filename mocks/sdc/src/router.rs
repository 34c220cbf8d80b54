//! Route table of the catalog mock.

use crate::environment::CatalogEnvironment;
use crate::handlers::{catalog, distribution, generic, onboarding};
use crate::reducer::{CatalogAction, CatalogReducer, CatalogState};
use crate::CatalogStore;
use axum::{
    routing::{get, post, put},
    Router,
};
use platform_mocks_web::handlers::{liveness, readiness};
use std::sync::Arc;

/// Onboarding API, nested under `/sdc1/feProxy/onboarding-api/v1.0`.
fn onboarding_routes() -> Router<Arc<CatalogStore>> {
    Router::new()
        .route("/items/:item_id/versions", get(onboarding::list_item_versions))
        .route(
            "/items/:item_id/versions/:version_id",
            get(onboarding::get_item_version),
        )
        .route(
            "/items/:item_id/versions/:version_id/actions",
            put(onboarding::update_item_version),
        )
        .route(
            "/vendor-license-models",
            get(onboarding::list_vendors).post(onboarding::create_vendor),
        )
        .route(
            "/vendor-license-models/:vendor_id/versions/:version_id/actions",
            put(onboarding::update_vendor_version),
        )
        .route(
            "/vendor-software-products",
            get(onboarding::list_vsps).post(onboarding::create_vsp),
        )
        .route(
            "/vendor-software-products/:vsp_id/versions/:version_id",
            get(onboarding::get_vsp_version),
        )
        .route(
            "/vendor-software-products/:vsp_id/versions/:version_id/actions",
            put(onboarding::update_vsp_version),
        )
        .route(
            "/vendor-software-products/:vsp_id/versions/:version_id/orchestration-template-candidate",
            post(onboarding::upload_package),
        )
        .route(
            "/vendor-software-products/:vsp_id/versions/:version_id/orchestration-template-candidate/process",
            put(onboarding::process_package),
        )
}

/// Designer UI API, nested under `/sdc1/feProxy/rest/v1`.
fn designer_routes() -> Router<Arc<CatalogStore>> {
    Router::new()
        .route("/followed", get(catalog::screen))
        .route("/screen", get(catalog::screen))
        .route("/setup/ui", get(generic::categories))
        // Resources
        .route("/catalog/resources", post(catalog::create_resource))
        .route(
            "/catalog/resources/:id/lifecycleState/:action",
            post(catalog::lifecycle_action),
        )
        .route("/catalog/resources/:id/create/inputs", post(catalog::add_input))
        .route(
            "/catalog/resources/:id/filteredDataByParams",
            get(catalog::filtered_data),
        )
        // Services
        .route("/catalog/services", post(catalog::create_resource))
        .route("/catalog/services/:id", get(catalog::get_service))
        .route(
            "/catalog/services/:id/lifecycleState/:action",
            post(catalog::lifecycle_action),
        )
        .route(
            "/catalog/services/:id/distribution-state/:action",
            post(catalog::lifecycle_action),
        )
        .route(
            "/catalog/services/:id/distribution/PROD/:action",
            post(catalog::lifecycle_action),
        )
        .route(
            "/catalog/services/:id/resourceInstance",
            post(catalog::add_resource_instance),
        )
        .route(
            "/catalog/services/:id/resourceInstance/:instance_id/artifacts",
            post(catalog::upload_artifact),
        )
        .route("/catalog/services/:id/properties", post(catalog::add_properties))
        .route("/catalog/services/:id/create/inputs", post(catalog::add_input))
        .route(
            "/catalog/services/:id/filteredDataByParams",
            get(catalog::filtered_data),
        )
        // Distribution
        .route(
            "/catalog/services/:id/distribution",
            get(distribution::service_distribution),
        )
        .route(
            "/catalog/services/distribution/:distribution_id",
            get(distribution::distribution_events),
        )
}

/// Public distribution client API, under `/sdc/v1`.
fn distribution_routes() -> Router<Arc<CatalogStore>> {
    Router::new()
        .route("/catalog/resources", get(catalog::list_resources))
        .route("/catalog/services", get(catalog::list_services))
        .route("/artifactTypes", get(distribution::artifact_types))
        .route("/distributionKafkaData", get(distribution::kafka_data))
        .route("/registerForDistribution", post(distribution::register))
        .route("/unRegisterForDistribution", post(distribution::unregister))
}

/// Build the complete router of the catalog mock.
///
/// Middleware (tracing, correlation ids) is layered by the binary.
pub fn build_router(store: Arc<CatalogStore>) -> Router {
    Router::new()
        .route("/", get(generic::index))
        .route("/reset", post(generic::reset))
        .route("/health", get(liveness))
        .route(
            "/health/ready",
            get(readiness::<CatalogState, CatalogAction, CatalogEnvironment, CatalogReducer>),
        )
        .nest("/sdc1/feProxy/onboarding-api/v1.0", onboarding_routes())
        .nest("/sdc1/feProxy/rest/v1", designer_routes())
        .nest("/sdc/v1", distribution_routes())
        .with_state(store)
}
