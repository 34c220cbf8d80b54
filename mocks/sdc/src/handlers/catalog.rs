//! Catalog API: resources, services and their lifecycle.

use super::{dispatch, unexpected_reply};
use crate::catalog::{
    Artifact, ArtifactUploaded, CatalogScreen, Input, PropertyDefinition, Resource,
    ResourceInstanceRequest, ResourceLight,
};
use crate::error::SdcError;
use crate::reducer::{CatalogCommand, CatalogReply};
use crate::CatalogStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use platform_mocks_web::AppError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Query of the public resource listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    /// Keep only this resource type
    pub resource_type: Option<String>,
}

/// Query of `filteredDataByParams`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// `inputs` or `properties`
    pub include: Option<String>,
}

fn resource_reply(reply: CatalogReply) -> Result<(StatusCode, Json<Resource>), AppError> {
    match reply {
        CatalogReply::Resource { resource, created } => {
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };
            Ok((status, Json(*resource)))
        },
        _ => Err(unexpected_reply()),
    }
}

/// Everything in the catalog, split into resources and services.
///
/// Serves both `followed` and `screen`.
pub async fn screen(State(store): State<Arc<CatalogStore>>) -> Json<CatalogScreen> {
    Json(store.state(|s| CatalogScreen::of(&s.resources)).await)
}

/// Public listing of non-service resources.
///
/// ```bash
/// curl "http://localhost:30206/sdc/v1/catalog/resources?resourceType=CP"
/// ```
pub async fn list_resources(
    State(store): State<Arc<CatalogStore>>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<ResourceLight>>, AppError> {
    let resources: Vec<ResourceLight> = store
        .state(|s| {
            s.resources
                .iter()
                .filter(|r| !r.is_service())
                .filter(|r| {
                    query
                        .resource_type
                        .as_deref()
                        .is_none_or(|kind| kind.is_empty() || r.resource_type == kind)
                })
                .map(ResourceLight::from)
                .collect()
        })
        .await;

    if resources.is_empty() {
        return Err(SdcError::NoResources.into());
    }
    Ok(Json(resources))
}

/// Public listing of services.
pub async fn list_services(
    State(store): State<Arc<CatalogStore>>,
) -> Result<Json<Vec<ResourceLight>>, AppError> {
    let services: Vec<ResourceLight> = store
        .state(|s| {
            s.resources
                .iter()
                .filter(|r| r.is_service())
                .map(ResourceLight::from)
                .collect()
        })
        .await;

    if services.is_empty() {
        return Err(SdcError::NoResources.into());
    }
    Ok(Json(services))
}

/// Create a resource or service.
///
/// ```bash
/// curl -X POST http://localhost:30206/sdc1/feProxy/rest/v1/catalog/services \
///   -H "Content-Type: application/json" \
///   -d '{"name": "vFW service", "componentType": "SERVICE", "resourceType": ""}'
/// ```
pub async fn create_resource(
    State(store): State<Arc<CatalogStore>>,
    Json(resource): Json<Resource>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    let reply = dispatch(&store, CatalogCommand::CreateResource(Box::new(resource))).await?;
    resource_reply(reply)
}

/// Apply a lifecycle action by `uniqueId`.
///
/// Serves `lifecycleState`, `distribution-state` and `distribution/PROD`.
/// The optional `{userRemarks}` body is ignored.
///
/// ```bash
/// curl -X POST http://localhost:30206/sdc1/feProxy/rest/v1/catalog/services/$ID/lifecycleState/Certify
/// ```
pub async fn lifecycle_action(
    State(store): State<Arc<CatalogStore>>,
    Path((unique_id, action)): Path<(String, String)>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    let reply = dispatch(&store, CatalogCommand::ResourceLifecycle { unique_id, action }).await?;
    resource_reply(reply)
}

/// Place a resource into a service under design.
pub async fn add_resource_instance(
    State(store): State<Arc<CatalogStore>>,
    Path(service_id): Path<String>,
    Json(request): Json<ResourceInstanceRequest>,
) -> Result<(StatusCode, Json<Resource>), AppError> {
    let reply = dispatch(
        &store,
        CatalogCommand::AddResourceInstance {
            service_id,
            request,
        },
    )
    .await?;
    resource_reply(reply)
}

/// Full record of a service by `uniqueId`.
pub async fn get_service(
    State(store): State<Arc<CatalogStore>>,
    Path(unique_id): Path<String>,
) -> Result<Json<Resource>, AppError> {
    let resource = store
        .state(|s| s.resource(&unique_id).cloned())
        .await?;
    Ok(Json(resource))
}

/// Attach an artifact, typically a TCA blueprint, to a component instance.
///
/// ```bash
/// curl -X POST http://localhost:30206/sdc1/feProxy/rest/v1/catalog/services/$ID/resourceInstance/$VF/artifacts \
///   -H "Content-Type: application/json" \
///   -d '{"artifactName": "tca.yaml", "artifactType": "DCAE_INVENTORY_BLUEPRINT"}'
/// ```
pub async fn upload_artifact(
    State(store): State<Arc<CatalogStore>>,
    Path((service_id, instance_id)): Path<(String, String)>,
    Json(artifact): Json<Artifact>,
) -> Result<(StatusCode, Json<ArtifactUploaded>), AppError> {
    let reply = dispatch(
        &store,
        CatalogCommand::AddArtifact {
            service_id,
            instance_id,
            artifact,
        },
    )
    .await?;

    match reply {
        CatalogReply::ArtifactUploaded(uploaded) => Ok((StatusCode::CREATED, Json(uploaded))),
        _ => Err(unexpected_reply()),
    }
}

/// Declare properties; the body maps arbitrary keys to `{name, type}`.
pub async fn add_properties(
    State(store): State<Arc<CatalogStore>>,
    Path(resource_id): Path<String>,
    Json(body): Json<BTreeMap<String, PropertyDefinition>>,
) -> Result<Json<&'static str>, AppError> {
    dispatch(
        &store,
        CatalogCommand::AddProperties {
            resource_id,
            properties: body.into_values().collect(),
        },
    )
    .await?;

    Ok(Json(""))
}

/// Declare an input.
pub async fn add_input(
    State(store): State<Arc<CatalogStore>>,
    Path(resource_id): Path<String>,
    Json(input): Json<Input>,
) -> Result<Json<Vec<Input>>, AppError> {
    match dispatch(&store, CatalogCommand::AddInput { resource_id, input }).await? {
        CatalogReply::Inputs(inputs) => Ok(Json(inputs)),
        _ => Err(unexpected_reply()),
    }
}

/// Inputs or properties of a resource.
///
/// ```bash
/// curl "http://localhost:30206/sdc1/feProxy/rest/v1/catalog/services/$ID/filteredDataByParams?include=inputs"
/// ```
pub async fn filtered_data(
    State(store): State<Arc<CatalogStore>>,
    Path(resource_id): Path<String>,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Value>, AppError> {
    let include = query.include.unwrap_or_default();

    let data = store
        .state(|s| {
            let resource = s.resource(&resource_id)?;
            match include.as_str() {
                "inputs" => Ok(json!({ "inputs": resource.inputs })),
                "properties" => Ok(json!({ "properties": resource.properties })),
                other => Err(SdcError::InvalidFilter(format!(
                    "unsupported include value `{other}`"
                ))),
            }
        })
        .await?;

    Ok(Json(data))
}
