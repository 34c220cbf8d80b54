//! Catalog records: resources, services and what hangs off them.
//!
//! Resources and services share one record type and one list; a record is a
//! service when its `componentType` is `SERVICE`.

use crate::lifecycle::{DistributionStatus, LifecycleState};
use crate::onboarding::Empty;
use serde::{Deserialize, Serialize};

/// `componentType` marking a service.
pub const SERVICE_COMPONENT_TYPE: &str = "SERVICE";

/// Subcategory of a resource category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubCategory {
    /// Display name
    pub name: String,
    /// Lowercase name
    pub normalized_name: String,
    /// Category path identifier
    pub unique_id: String,
    /// Icon names
    pub icons: Option<Vec<String>>,
    /// Groupings
    pub groupings: Option<String>,
    /// Owner
    pub owner_id: Option<String>,
    /// Emptiness flag
    pub empty: bool,
    /// Version
    pub version: Option<String>,
    /// Type
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Category attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Category {
    /// Display name
    pub name: String,
    /// Lowercase name
    pub normalized_name: String,
    /// Category path identifier
    pub unique_id: String,
    /// Icon names
    pub icons: Option<Vec<String>>,
    /// Subcategories
    pub subcategories: Option<Vec<SubCategory>>,
    /// Owner
    pub owner_id: Option<String>,
    /// Emptiness flag
    pub empty: bool,
    /// Type
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Version
    pub version: Option<String>,
}

/// Deployment artifact of a component instance, also the upload body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artifact {
    /// File name
    pub artifact_name: String,
    /// Label
    pub artifact_label: String,
    /// Artifact type, `DCAE_INVENTORY_BLUEPRINT` for TCA blueprints
    pub artifact_type: String,
    /// Free text
    pub description: String,
}

/// A resource placed into a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentInstance {
    /// Instance identifier
    pub unique_id: String,
    /// Instance name
    pub name: String,
    /// Name of the instantiated resource
    pub component_name: String,
    /// Resource type of the instantiated resource
    pub origin_type: String,
    /// Version of the instantiated resource
    pub component_version: String,
    /// Uploaded artifacts
    pub deployment_artifacts: Vec<Artifact>,
}

/// Property of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Property {
    /// Property name
    pub name: String,
    /// Value
    pub value: String,
    /// Data type
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier
    pub unique_id: String,
    /// Owner identifier
    pub parent_unique_id: String,
}

/// One entry of the `properties` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDefinition {
    /// Property name
    pub name: String,
    /// Data type
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<PropertyDefinition> for Property {
    fn from(def: PropertyDefinition) -> Self {
        Self {
            name: def.name,
            kind: def.kind,
            ..Self::default()
        }
    }
}

/// Input of a resource, also the `create/inputs` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Input {
    /// Input name
    pub name: String,
    /// Value
    pub value: String,
    /// Data type
    #[serde(rename = "type")]
    pub kind: String,
    /// Identifier
    pub unique_id: String,
}

/// A catalog resource or service.
///
/// Also the body of the creation endpoints; the server assigns identifiers,
/// version and lifecycle fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Resource {
    /// Version-specific identifier
    #[serde(rename = "uuid")]
    pub id: String,
    /// Identifier shared by all versions
    #[serde(rename = "invariantUUID")]
    pub invariant_id: String,
    /// Identifier used by the designer UI endpoints
    pub unique_id: String,
    /// `VF`, `VFC`, `CP`, `Configuration`, ...
    pub resource_type: String,
    /// Resource name
    pub name: String,
    /// Category name
    pub category: String,
    /// Subcategory name
    pub sub_category: String,
    /// Last updater
    pub last_updater_user_id: String,
    /// Certification state
    #[serde(skip_deserializing)]
    pub lifecycle_state: LifecycleState,
    /// Version string
    pub version: String,
    /// TOSCA model location
    #[serde(rename = "toscaModelURL")]
    pub tosca_model_url: String,
    /// Artifacts
    pub artifacts: Empty,
    /// Attributes
    pub attributes: Vec<String>,
    /// Capabilities
    pub capabilities: Empty,
    /// Categories
    pub categories: Vec<Category>,
    /// Resources placed into this service
    pub component_instances: Vec<ComponentInstance>,
    /// Instance attributes
    pub component_instances_attributes: Empty,
    /// Instance properties
    pub component_instances_properties: Empty,
    /// `SERVICE` for services
    pub component_type: String,
    /// Designer contact
    pub contact_id: String,
    /// Source CSAR identifier
    #[serde(rename = "csarUUID")]
    pub csar_uuid: String,
    /// Source CSAR version
    pub csar_version: String,
    /// Deployment artifacts
    pub deployment_artifacts: Empty,
    /// Free text
    pub description: String,
    /// Icon
    pub icon: String,
    /// Properties
    pub properties: Vec<Property>,
    /// Requirements
    pub requirements: Empty,
    /// Tags
    pub tags: Vec<String>,
    /// TOSCA artifacts
    pub tosca_artifacts: Empty,
    /// Vendor name
    pub vendor_name: String,
    /// Vendor release
    pub vendor_release: String,
    /// Distribution state
    #[serde(skip_deserializing)]
    pub distribution_status: DistributionStatus,
    /// Assigned on the first distribution query after activation
    #[serde(rename = "distributionID")]
    pub distribution_id: String,
    /// Inputs
    #[serde(rename = "Inputs", alias = "inputs")]
    pub inputs: Vec<Input>,
}

impl Resource {
    /// Whether this record is a service.
    #[must_use]
    pub fn is_service(&self) -> bool {
        self.component_type == SERVICE_COMPONENT_TYPE
    }

    /// Resources and services share a natural key of name and resource type.
    #[must_use]
    pub fn same_natural_key(&self, other: &Self) -> bool {
        self.name == other.name && self.resource_type == other.resource_type
    }

    /// Whether `request` designates this resource.
    #[must_use]
    pub fn matches_instance_request(&self, request: &ResourceInstanceRequest) -> bool {
        self.unique_id == request.unique_id
            && self.unique_id == request.component_uid
            && self.name == request.name
            && self.version == request.component_version
            && self.resource_type == request.origin_type
    }
}

/// Resource or service in catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLight {
    /// Version-specific identifier
    #[serde(rename = "uuid")]
    pub id: String,
    /// Identifier shared by all versions
    #[serde(rename = "invariantUUID")]
    pub invariant_id: String,
    /// Resource type
    pub resource_type: String,
    /// Name
    pub name: String,
    /// Category
    pub category: String,
    /// Subcategory
    pub sub_category: String,
    /// Last updater
    pub last_updater_user_id: String,
    /// Certification state
    pub lifecycle_state: LifecycleState,
    /// Version string
    pub version: String,
    /// TOSCA model location
    #[serde(rename = "toscaModelURL")]
    pub tosca_model_url: String,
    /// Distribution state
    pub distribution_status: DistributionStatus,
}

impl From<&Resource> for ResourceLight {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id.clone(),
            invariant_id: r.invariant_id.clone(),
            resource_type: r.resource_type.clone(),
            name: r.name.clone(),
            category: r.category.clone(),
            sub_category: r.sub_category.clone(),
            last_updater_user_id: r.last_updater_user_id.clone(),
            lifecycle_state: r.lifecycle_state,
            version: r.version.clone(),
            tosca_model_url: r.tosca_model_url.clone(),
            distribution_status: r.distribution_status,
        }
    }
}

/// Answer of the designer UI screens: everything, split by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogScreen {
    /// Non-service records
    pub resources: Vec<Resource>,
    /// Services
    pub services: Vec<Resource>,
}

impl CatalogScreen {
    /// Partition `records` into resources and services.
    #[must_use]
    pub fn of(records: &[Resource]) -> Self {
        let (services, resources) = records.iter().cloned().partition(Resource::is_service);
        Self {
            resources,
            services,
        }
    }
}

/// Body of `POST catalog/services/:id/resourceInstance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceInstanceRequest {
    /// Resource name
    pub name: String,
    /// Resource version
    pub component_version: String,
    /// Canvas position
    pub pos_y: i64,
    /// Canvas position
    pub pos_x: i64,
    /// Resource unique id
    pub unique_id: String,
    /// Resource type
    pub origin_type: String,
    /// Resource unique id, again
    pub component_uid: String,
    /// Icon
    pub icon: String,
}

/// Optional body of the lifecycle endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LifecycleRequest {
    /// Free text, ignored
    pub user_remarks: String,
}

/// Distribution summary of a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSummary {
    /// Empty until distributed
    #[serde(rename = "distributionID")]
    pub distribution_id: String,
    /// Operator who distributed
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Spelled as the upstream spells it
    #[serde(rename = "deployementStatus")]
    pub deployment_status: String,
}

impl DistributionSummary {
    /// Summary of a distributed service.
    #[must_use]
    pub fn distributed(distribution_id: String) -> Self {
        Self {
            distribution_id,
            user_id: "Oper P(op0001)".to_string(),
            deployment_status: "Distributed".to_string(),
        }
    }
}

/// Answer of `GET catalog/services/:id/distribution`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDistributions {
    /// Always exactly one entry
    pub distribution_status_of_service_list: Vec<DistributionSummary>,
}

/// One recorded distribution notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEvent {
    /// Reporting component
    #[serde(rename = "omfComponentID")]
    pub omf_component_id: String,
    /// Epoch milliseconds, as a string
    pub timestamp: String,
    /// Artifact location
    pub url: String,
    /// `NOTIFIED`, `DOWNLOAD_OK`, `DEPLOY_OK`, ...
    pub status: String,
    /// The literal string `null` when there is none
    pub error_reason: String,
}

/// Answer of `GET catalog/services/distribution/:distribution_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionEvents {
    /// Every recorded event
    pub distribution_status_list: Vec<DistributionEvent>,
}

/// Answer of an artifact upload on a component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactUploaded {
    /// Free text
    pub description: String,
    /// Artifact type
    pub artifact_type: String,
    /// File name
    pub artifact_name: String,
}

impl From<&Artifact> for ArtifactUploaded {
    fn from(a: &Artifact) -> Self {
        Self {
            description: a.description.clone(),
            artifact_type: a.artifact_type.clone(),
            artifact_name: a.artifact_name.clone(),
        }
    }
}
