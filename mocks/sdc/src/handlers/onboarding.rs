//! Onboarding API: vendor license models, software products and versions.
//!
//! All paths are under `/sdc1/feProxy/onboarding-api/v1.0`.

use super::{dispatch, unexpected_reply};
use crate::error::SdcError;
use crate::onboarding::{
    split_package_name, ActionRequest, CreatedItem, Listing, NewVendor, NewVsp, Vendor,
    VersionDetails, VersionLight, VspDetails, VspLight,
};
use crate::reducer::{CatalogCommand, CatalogReply};
use crate::CatalogStore;
use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use platform_mocks_web::AppError;
use std::sync::Arc;

/// Multipart field carrying the network package.
const UPLOAD_FIELD: &str = "upload";

/// Version actions answer with a bare `{}` body.
fn accepted() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        "{}",
    )
        .into_response()
}

/// List the versions of a vendor or software product.
///
/// ```bash
/// curl http://localhost:30206/sdc1/feProxy/onboarding-api/v1.0/items/212a52b2630749388a7693086ac1467e/versions
/// ```
pub async fn list_item_versions(
    State(store): State<Arc<CatalogStore>>,
    Path(item_id): Path<String>,
) -> Result<Json<Listing<VersionLight>>, AppError> {
    let versions = store
        .state(|s| {
            s.item_versions(&item_id)
                .map(|versions| versions.iter().map(VersionLight::from).collect())
        })
        .await?;

    Ok(Json(Listing::new(versions)))
}

/// One version of a vendor or software product.
pub async fn get_item_version(
    State(store): State<Arc<CatalogStore>>,
    Path((item_id, version_id)): Path<(String, String)>,
) -> Result<Json<VersionDetails>, AppError> {
    let details = store
        .state(|s| s.item_version(&item_id, &version_id).map(VersionDetails::from))
        .await?;

    Ok(Json(details))
}

/// Commit a software product version.
///
/// ```bash
/// curl -X PUT http://localhost:30206/sdc1/feProxy/onboarding-api/v1.0/items/$VSP/versions/$VERSION/actions \
///   -H "Content-Type: application/json" \
///   -d '{"action": "Commit"}'
/// ```
pub async fn update_item_version(
    State(store): State<Arc<CatalogStore>>,
    Path((item_id, version_id)): Path<(String, String)>,
    Json(request): Json<ActionRequest>,
) -> Result<Response, AppError> {
    dispatch(
        &store,
        CatalogCommand::ItemVersionAction {
            item_id,
            version_id,
            action: request.action,
        },
    )
    .await?;

    Ok(accepted())
}

/// List vendor license models.
pub async fn list_vendors(State(store): State<Arc<CatalogStore>>) -> Json<Listing<Vendor>> {
    let vendors = store.state(|s| s.vendors.clone()).await;
    Json(Listing::new(vendors))
}

/// Create a vendor license model.
///
/// ```bash
/// curl -X POST http://localhost:30206/sdc1/feProxy/onboarding-api/v1.0/vendor-license-models \
///   -H "Content-Type: application/json" \
///   -d '{"iconRef": "icon", "vendorName": "ACME", "description": "vendor"}'
/// ```
pub async fn create_vendor(
    State(store): State<Arc<CatalogStore>>,
    Json(request): Json<NewVendor>,
) -> Result<(StatusCode, Json<CreatedItem>), AppError> {
    match dispatch(&store, CatalogCommand::CreateVendor(request)).await? {
        CatalogReply::ItemCreated(item) => Ok((StatusCode::CREATED, Json(item))),
        _ => Err(unexpected_reply()),
    }
}

/// Submit a vendor version.
pub async fn update_vendor_version(
    State(store): State<Arc<CatalogStore>>,
    Path((vendor_id, version_id)): Path<(String, String)>,
    Json(request): Json<ActionRequest>,
) -> Result<Response, AppError> {
    dispatch(
        &store,
        CatalogCommand::SubmitVendorVersion {
            vendor_id,
            version_id,
            action: request.action,
        },
    )
    .await?;

    Ok(accepted())
}

/// List software products.
pub async fn list_vsps(State(store): State<Arc<CatalogStore>>) -> Json<Listing<VspLight>> {
    let vsps = store
        .state(|s| s.vsps.iter().map(VspLight::from).collect())
        .await;
    Json(Listing::new(vsps))
}

/// Create a software product.
///
/// ```bash
/// curl -X POST http://localhost:30206/sdc1/feProxy/onboarding-api/v1.0/vendor-software-products \
///   -H "Content-Type: application/json" \
///   -d '{"name": "vFW", "vendorName": "wvfw", "vendorId": "212a52b2630749388a7693086ac1467e"}'
/// ```
pub async fn create_vsp(
    State(store): State<Arc<CatalogStore>>,
    Json(request): Json<NewVsp>,
) -> Result<(StatusCode, Json<CreatedItem>), AppError> {
    match dispatch(&store, CatalogCommand::CreateVsp(request)).await? {
        CatalogReply::ItemCreated(item) => Ok((StatusCode::CREATED, Json(item))),
        _ => Err(unexpected_reply()),
    }
}

/// Software product details at one version.
pub async fn get_vsp_version(
    State(store): State<Arc<CatalogStore>>,
    Path((vsp_id, version_id)): Path<(String, String)>,
) -> Result<Json<VspDetails>, AppError> {
    let details = store
        .state(|s| {
            s.vsp_version(&vsp_id, &version_id)
                .map(|(vsp, version)| VspDetails::of(vsp, version))
        })
        .await?;

    Ok(Json(details))
}

/// `Submit` or `Create_Package` a software product version.
///
/// ```bash
/// curl -X PUT http://localhost:30206/sdc1/feProxy/onboarding-api/v1.0/vendor-software-products/$VSP/versions/$VERSION/actions \
///   -H "Content-Type: application/json" \
///   -d '{"action": "Create_Package"}'
/// ```
pub async fn update_vsp_version(
    State(store): State<Arc<CatalogStore>>,
    Path((vsp_id, version_id)): Path<(String, String)>,
    Json(request): Json<ActionRequest>,
) -> Result<Response, AppError> {
    let reply = dispatch(
        &store,
        CatalogCommand::VspVersionAction {
            vsp_id,
            version_id,
            action: request.action,
        },
    )
    .await?;

    match reply {
        CatalogReply::PackageCreated(package) => Ok((StatusCode::OK, Json(package)).into_response()),
        CatalogReply::Accepted => Ok(accepted()),
        _ => Err(unexpected_reply()),
    }
}

/// Upload a network package as the orchestration template candidate.
///
/// ```bash
/// curl -X POST http://localhost:30206/sdc1/feProxy/onboarding-api/v1.0/vendor-software-products/$VSP/versions/$VERSION/orchestration-template-candidate \
///   -F "upload=@ubuntu16.zip"
/// ```
pub async fn upload_package(
    State(store): State<Arc<CatalogStore>>,
    Path((vsp_id, version_id)): Path<(String, String)>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut file_name = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| SdcError::InvalidUpload(err.body_text()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            file_name = field.file_name().map(str::to_string);
            break;
        }
    }

    let file_name = file_name
        .ok_or_else(|| SdcError::InvalidUpload(format!("missing `{UPLOAD_FIELD}` file")))?;
    let (package_name, extension) = split_package_name(&file_name)
        .ok_or_else(|| SdcError::InvalidUpload(format!("{file_name} has no extension")))?;
    tracing::debug!(%vsp_id, %version_id, %file_name, "Network package received");

    let reply = dispatch(
        &store,
        CatalogCommand::UploadPackage {
            vsp_id,
            version_id,
            package_name,
            extension,
        },
    )
    .await?;

    match reply {
        CatalogReply::PackageUploaded(result) => {
            Ok((StatusCode::CREATED, Json(result)).into_response())
        },
        _ => Err(unexpected_reply()),
    }
}

/// Validate the uploaded network package.
pub async fn process_package(
    State(store): State<Arc<CatalogStore>>,
    Path((vsp_id, version_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    match dispatch(&store, CatalogCommand::ProcessPackage { vsp_id, version_id }).await? {
        CatalogReply::PackageProcessed(result) => Ok((StatusCode::OK, Json(result)).into_response()),
        _ => Err(unexpected_reply()),
    }
}
