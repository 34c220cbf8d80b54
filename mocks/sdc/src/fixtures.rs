//! Seed data of the catalog.
//!
//! Vendors, software products and resources are rebuilt on every reset.
//! Distribution events and categories are reference data compiled into the
//! binary.

use crate::catalog::{DistributionEvent, Resource};
use crate::lifecycle::{LifecycleState, VersionStatus};
use crate::onboarding::{AdditionalInfo, DEFAULT_OWNER, Empty, SyncState, Vendor, Version, Vsp};

/// Category document served by `GET /sdc1/feProxy/rest/v1/setup/ui`.
pub const CATEGORIES_JSON: &str = include_str!("../fixtures/categories.json");

const DISTRIBUTION_EVENTS_JSON: &str = include_str!("../fixtures/distribution_status.json");

/// Recorded distribution notifications returned for every distributed service.
///
/// # Errors
///
/// Fails only if the embedded fixture is not valid JSON.
pub fn distribution_events() -> Result<Vec<DistributionEvent>, serde_json::Error> {
    serde_json::from_str(DISTRIBUTION_EVENTS_JSON)
}

fn certified_version(id: &str, creation_time: i64, modification_time: i64) -> Version {
    Version {
        id: id.to_string(),
        name: "1.0".to_string(),
        description: "Initial version".to_string(),
        base_id: String::new(),
        status: VersionStatus::Certified,
        real_status: VersionStatus::Certified,
        creation_time,
        modification_time,
        additional_info: AdditionalInfo {
            optional_creation_methods: vec!["major".to_string()],
        },
        state: SyncState::default(),
    }
}

fn vendor(id: &str, name: &str, description: &str, version: Version) -> Vendor {
    Vendor {
        id: id.to_string(),
        kind: "vlm".to_string(),
        name: name.to_string(),
        description: description.to_string(),
        owner: DEFAULT_OWNER.to_string(),
        status: "ACTIVE".to_string(),
        properties: Empty {},
        versions: vec![version],
    }
}

/// The two certified vendor license models.
#[must_use]
pub fn vendors() -> Vec<Vendor> {
    vec![
        vendor(
            "212a52b2630749388a7693086ac1467e",
            "wvfw",
            "wvfw",
            certified_version(
                "61c134e128f54119934b3960c77a3f33",
                1_559_565_688_604,
                1_559_565_787_436,
            ),
        ),
        vendor(
            "e78eb0b1c73e43138f705cd92c0e4ace",
            "vfw_test",
            "test vfw",
            certified_version(
                "2e3ba48c748d47e3bd4afdd8348bdfb9",
                1_559_562_354_868,
                1_559_562_421_476,
            ),
        ),
    ]
}

/// No software product exists until one is onboarded.
#[must_use]
pub const fn vsps() -> Vec<Vsp> {
    Vec::new()
}

/// Unique id shared by every seeded resource.
const SEED_UNIQUE_ID: &str = "1e6e90ec-632a-492f-9511-f2787a2befaf";

fn certified_resource(
    id: &str,
    invariant_id: &str,
    resource_type: &str,
    name: &str,
    category: &str,
    sub_category: &str,
) -> Resource {
    Resource {
        id: id.to_string(),
        invariant_id: invariant_id.to_string(),
        unique_id: SEED_UNIQUE_ID.to_string(),
        resource_type: resource_type.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        sub_category: sub_category.to_string(),
        last_updater_user_id: "jh0003".to_string(),
        lifecycle_state: LifecycleState::Certified,
        version: "1.0".to_string(),
        tosca_model_url: format!("/sdc/v1/catalog/resources/{id}/toscaModel"),
        ..Resource::default()
    }
}

/// The four certified base resources.
#[must_use]
pub fn resources() -> Vec<Resource> {
    vec![
        certified_resource(
            "6c4952d2-0ecc-4697-a039-d9766565feae",
            "803cbaf5-deea-4022-a731-709d285435d6",
            "Configuration",
            "VLAN Network Receptor Configuration",
            "Configuration",
            "Configuration",
        ),
        certified_resource(
            "85a9a912-b0ca-4cc9-9dc4-a480546ef93b",
            "2df7615c-38f5-45e2-ac40-f9a8f97baec2",
            "CP",
            "contrailV2VLANSubInterfaceV2",
            "Generic",
            "Network Elements",
        ),
        certified_resource(
            "7c6b6644-590d-4e60-84d7-0dfba3ad4694",
            "1e6e90ec-632a-492f-9511-f2787a2bef9f",
            "VFC",
            "VDU Compute",
            "Generic",
            "Infrastructure",
        ),
        certified_resource(
            "9391354f-8f25-462d-b331-841e6cc5c851",
            "85cd3f14-cb9c-4a28-811b-d076e9a48303",
            "VFC",
            "Cp",
            "Generic",
            "Infrastructure",
        ),
    ]
}
