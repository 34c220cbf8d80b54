//! End-to-end tests of the catalog mock through its router.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use mock_sdc::{build_router, build_store, CatalogEnvironment};
use platform_mocks_testing::{test_clock, SequentialIdGenerator};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const ONBOARDING: &str = "/sdc1/feProxy/onboarding-api/v1.0";
const DESIGNER: &str = "/sdc1/feProxy/rest/v1";
const BOUNDARY: &str = "mock-sdc-boundary";

fn app() -> Router {
    let env = CatalogEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIdGenerator::new()),
    );
    build_router(Arc::new(build_store(env).unwrap()))
}

async fn send_raw(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let (status, bytes) = send_raw(app, request).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn upload_request(uri: &str, file_name: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"upload\"; filename=\"{file_name}\"\r\n\
         Content-Type: application/zip\r\n\r\n\
         PK-not-really-a-zip\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn create_service(app: &Router, name: &str) -> Value {
    let (status, service) = send(
        app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services"),
        Some(json!({"name": name, "componentType": "SERVICE"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    service
}

#[tokio::test]
async fn test_index_and_health() {
    let app = app();

    let (status, body) = send_raw(
        &app,
        Request::builder().uri("/").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Hello, World!");

    let (status, health) = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_create_vendor_appends_to_listing() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        &format!("{ONBOARDING}/vendor-license-models"),
        Some(json!({"iconRef": "icon", "vendorName": "X", "description": "Y"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["version"]["name"], "1.0");
    assert_eq!(created["version"]["status"], "Draft");

    let (status, vendors) =
        send(&app, Method::GET, &format!("{ONBOARDING}/vendor-license-models"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(vendors["listCount"], 3);
    assert_eq!(vendors["results"][2]["name"], "X");
    assert_eq!(vendors["results"][2]["id"], created["itemId"]);

    let item_id = created["itemId"].as_str().unwrap();
    let (status, versions) = send(
        &app,
        Method::GET,
        &format!("{ONBOARDING}/items/{item_id}/versions"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(versions["listCount"], 1);
    assert_eq!(versions["results"][0]["id"], created["version"]["id"]);
}

#[tokio::test]
async fn test_submit_vendor_version() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        &format!("{ONBOARDING}/vendor-license-models"),
        Some(json!({"vendorName": "ACME"})),
    )
    .await;
    let item_id = created["itemId"].as_str().unwrap();
    let version_id = created["version"]["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("{ONBOARDING}/vendor-license-models/{item_id}/versions/{version_id}/actions"),
        Some(json!({"action": "Submit"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (_, version) = send(
        &app,
        Method::GET,
        &format!("{ONBOARDING}/items/{item_id}/versions/{version_id}"),
        None,
    )
    .await;
    assert_eq!(version["status"], "Certified");
}

#[tokio::test]
async fn test_resource_type_filter() {
    let app = app();

    let (status, all) = send(&app, Method::GET, "/sdc/v1/catalog/resources", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 4);

    let (status, cps) =
        send(&app, Method::GET, "/sdc/v1/catalog/resources?resourceType=CP", None).await;
    assert_eq!(status, StatusCode::OK);
    let cps = cps.as_array().unwrap();
    assert_eq!(cps.len(), 1);
    assert_eq!(cps[0]["name"], "contrailV2VLANSubInterfaceV2");
    assert_eq!(cps[0]["lifecycleState"], "CERTIFIED");

    let (status, error) =
        send(&app, Method::GET, "/sdc/v1/catalog/resources?resourceType=PNF", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        error,
        json!({"status": "Not Found", "errorCode": "SVC4642", "message": "No Resources found"})
    );
}

#[tokio::test]
async fn test_no_services_until_created() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/sdc/v1/catalog/services", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    create_service(&app, "svc").await;
    let (status, services) = send(&app, Method::GET, "/sdc/v1/catalog/services", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(services[0]["distributionStatus"], "DISTRIBUTION_NOT_APPROVED");
    assert_eq!(services[0]["version"], "0.1");
}

#[tokio::test]
async fn test_onboarding_pipeline() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        &format!("{ONBOARDING}/vendor-software-products"),
        Some(json!({
            "name": "vFW",
            "vendorName": "wvfw",
            "vendorId": "212a52b2630749388a7693086ac1467e",
            "description": "firewall"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let vsp_id = created["itemId"].as_str().unwrap().to_string();
    let version_id = created["version"]["id"].as_str().unwrap().to_string();
    let base = format!("{ONBOARDING}/vendor-software-products/{vsp_id}/versions/{version_id}");

    let (status, details) = send(&app, Method::GET, &base, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["onboardingMethod"], "NetworkPackage");
    assert!(details.get("networkPackageName").is_none());

    let (status, bytes) = send_raw(
        &app,
        upload_request(
            &format!("{base}/orchestration-template-candidate"),
            "ubuntu16.zip",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uploaded: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(uploaded["onboardingOrigin"], "zip");
    assert_eq!(uploaded["networkPackageName"], "ubuntu16");

    let (_, details) = send(&app, Method::GET, &base, None).await;
    assert_eq!(details["candidateOnboardingOrigin"], "zip");

    let (status, processed) = send(
        &app,
        Method::PUT,
        &format!("{base}/orchestration-template-candidate/process"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        processed["fileNames"],
        json!(["base_ubuntu16.env", "base_ubuntu16.yaml"])
    );

    let (_, version) = send(
        &app,
        Method::GET,
        &format!("{ONBOARDING}/items/{vsp_id}/versions/{version_id}"),
        None,
    )
    .await;
    assert_eq!(version["status"], "Draft");
    assert_eq!(version["state"]["dirty"], true);

    let (status, committed) = send(
        &app,
        Method::PUT,
        &format!("{ONBOARDING}/items/{vsp_id}/versions/{version_id}/actions"),
        Some(json!({"action": "Commit"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(committed, json!({}));

    let (status, submitted) = send(
        &app,
        Method::PUT,
        &format!("{base}/actions"),
        Some(json!({"action": "Submit"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted, json!({}));

    let (status, package) = send(
        &app,
        Method::PUT,
        &format!("{base}/actions"),
        Some(json!({"action": "Create_Package"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(package["vspName"], "vFW");
    assert_eq!(package["packageType"], "CSAR");
    assert_eq!(package["resourceType"], "VF");

    let (_, details) = send(&app, Method::GET, &base, None).await;
    assert_eq!(details["onboardingOrigin"], "zip");
    assert_eq!(details["validationData"]["importStructure"]["heat"], "Yes");
}

#[tokio::test]
async fn test_version_action_out_of_order_is_conflict() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        &format!("{ONBOARDING}/vendor-software-products"),
        Some(json!({"name": "vLB"})),
    )
    .await;
    let vsp_id = created["itemId"].as_str().unwrap();
    let version_id = created["version"]["id"].as_str().unwrap();

    let (status, error) = send(
        &app,
        Method::PUT,
        &format!("{ONBOARDING}/vendor-software-products/{vsp_id}/versions/{version_id}/actions"),
        Some(json!({"action": "Submit"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["errorCode"], "SVC4122");
}

#[tokio::test]
async fn test_upload_without_extension_is_rejected() {
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        &format!("{ONBOARDING}/vendor-software-products"),
        Some(json!({"name": "vDNS"})),
    )
    .await;
    let vsp_id = created["itemId"].as_str().unwrap();
    let version_id = created["version"]["id"].as_str().unwrap();

    let (status, bytes) = send_raw(
        &app,
        upload_request(
            &format!(
                "{ONBOARDING}/vendor-software-products/{vsp_id}/versions/{version_id}/orchestration-template-candidate"
            ),
            "package",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(error["errorCode"], "SVC4000");
}

#[tokio::test]
async fn test_create_resource_with_null_objects() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/resources"),
        Some(json!({
            "name": "vLB",
            "resourceType": "VF",
            "artifacts": null,
            "deploymentArtifacts": null,
            "toscaArtifacts": null
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "vLB");
    assert_eq!(created["deploymentArtifacts"], json!({}));
}

#[tokio::test]
async fn test_service_lifecycle_and_distribution() {
    let app = app();
    let service = create_service(&app, "vFW service").await;
    let unique_id = service["uniqueId"].as_str().unwrap();
    let uuid = service["uuid"].as_str().unwrap();
    let lifecycle = |action: &str| format!("{DESIGNER}/catalog/services/{unique_id}/lifecycleState/{action}");

    let (status, error) = send(&app, Method::POST, &lifecycle("activate"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["status"], "Bad Action");

    let (status, checked_in) = send(
        &app,
        Method::POST,
        &lifecycle("checkin"),
        Some(json!({"userRemarks": "done"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(checked_in["lifecycleState"], "NOT_CERTIFIED_CHECKIN");

    let (status, certified) = send(&app, Method::POST, &lifecycle("Certify"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(certified["lifecycleState"], "CERTIFIED");
    assert_eq!(certified["version"], "1.0");
    assert_eq!(certified["distributionStatus"], "DISTRIBUTION_APPROVED");

    let (status, distributed) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services/{unique_id}/distribution/PROD/activate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(distributed["distributionStatus"], "DISTRIBUTED");

    let (status, summary) = send(
        &app,
        Method::GET,
        &format!("{DESIGNER}/catalog/services/{uuid}/distribution"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entry = &summary["distributionStatusOfServiceList"][0];
    assert_eq!(entry["deployementStatus"], "Distributed");
    let distribution_id = entry["distributionID"].as_str().unwrap();
    assert!(!distribution_id.is_empty());

    let (status, events) = send(
        &app,
        Method::GET,
        &format!("{DESIGNER}/catalog/services/distribution/{distribution_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events["distributionStatusList"].as_array().unwrap().len(), 107);
}

#[tokio::test]
async fn test_certify_from_checkout_is_created() {
    let app = app();
    let service = create_service(&app, "quick").await;
    let unique_id = service["uniqueId"].as_str().unwrap();

    let (status, certified) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services/{unique_id}/lifecycleState/Certify"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(certified["lifecycleState"], "CERTIFIED");
}

#[tokio::test]
async fn test_duplicate_resource_is_rejected() {
    let app = app();

    let (status, error) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/resources"),
        Some(json!({"name": "VDU Compute", "resourceType": "VFC"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        error,
        json!({
            "status": "Exists",
            "errorCode": "SVC3642",
            "message": "Resource of same Name and ResourceType exists"
        })
    );
}

#[tokio::test]
async fn test_instance_artifact_inputs_and_properties() {
    let app = app();
    let service = create_service(&app, "svc").await;
    let service_id = service["uniqueId"].as_str().unwrap();

    let (_, vf) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/resources"),
        Some(json!({"name": "vFW", "resourceType": "VF"})),
    )
    .await;
    let (status, updated) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services/{service_id}/resourceInstance"),
        Some(json!({
            "name": vf["name"],
            "componentVersion": vf["version"],
            "posX": 10,
            "posY": 20,
            "uniqueId": vf["uniqueId"],
            "componentUid": vf["uniqueId"],
            "originType": "VF",
            "icon": "defaulticon"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let instance_id = updated["componentInstances"][0]["uniqueId"].as_str().unwrap();

    let (status, uploaded) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services/{service_id}/resourceInstance/{instance_id}/artifacts"),
        Some(json!({
            "artifactName": "tca.yaml",
            "artifactLabel": "tca",
            "artifactType": "DCAE_INVENTORY_BLUEPRINT",
            "description": "blueprint"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(uploaded["artifactType"], "DCAE_INVENTORY_BLUEPRINT");

    let (_, stored) = send(
        &app,
        Method::GET,
        &format!("{DESIGNER}/catalog/services/{service_id}"),
        None,
    )
    .await;
    assert_eq!(
        stored["componentInstances"][0]["deploymentArtifacts"][0]["artifactName"],
        "tca.yaml"
    );

    let (status, inputs) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services/{service_id}/create/inputs"),
        Some(json!({"name": "vnf_name", "type": "string"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inputs.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("{DESIGNER}/catalog/services/{service_id}/properties"),
        Some(json!({
            "b": {"name": "policy_id", "type": "string"},
            "a": {"name": "controller_actor", "type": "string"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(""));

    let (status, properties) = send(
        &app,
        Method::GET,
        &format!("{DESIGNER}/catalog/services/{service_id}/filteredDataByParams?include=properties"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(properties["properties"][0]["name"], "controller_actor");
    assert_eq!(properties["properties"][1]["name"], "policy_id");

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("{DESIGNER}/catalog/services/{service_id}/filteredDataByParams?include=everything"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_records_are_not_found() {
    let app = app();

    let (status, error) = send(&app, Method::GET, &format!("{ONBOARDING}/items/nope/versions"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["errorCode"], "SVC4642");

    let (status, _) = send(&app, Method::GET, &format!("{DESIGNER}/catalog/services/nope"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("{DESIGNER}/catalog/services/distribution/nope"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_distribution_client_endpoints() {
    let app = app();

    let (_, types) = send(&app, Method::GET, "/sdc/v1/artifactTypes", None).await;
    assert_eq!(types, json!(["HEAT"]));

    let (_, kafka) = send(&app, Method::GET, "/sdc/v1/distributionKafkaData", None).await;
    assert_eq!(kafka["kafkaBootStrapServer"], "localhost:43219");

    let (_, topics) = send(&app, Method::POST, "/sdc/v1/registerForDistribution", None).await;
    assert_eq!(
        topics,
        json!({"distrNotificationTopicName": "testName", "distrStatusTopicName": "testTopic"})
    );

    let (status, empty) = send(&app, Method::POST, "/sdc/v1/unRegisterForDistribution", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!({}));

    let (status, categories) = send(&app, Method::GET, &format!("{DESIGNER}/setup/ui"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(categories["version"], "1.6.7");
}
