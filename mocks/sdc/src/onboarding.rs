//! Onboarding records: vendor license models, software products and their
//! versions, plus the request and response bodies of the onboarding API.

use crate::lifecycle::VersionStatus;
use serde::{Deserialize, Deserializer, Serialize};

/// Owner reported on every onboarded item.
pub const DEFAULT_OWNER: &str = "cs0008";

/// An always-empty JSON object (`{}`).
///
/// Reads `null` or any object, discarding its members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<serde_json::Map<String, serde_json::Value>>::deserialize(deserializer)
            .map(|_| Self {})
    }
}

/// `additionalInfo` of a version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    /// Always `["major"]` for versions created here
    #[serde(rename = "OptionalCreationMethods")]
    pub optional_creation_methods: Vec<String>,
}

/// `state` of a version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// `UpToDate` for versions created here, empty for seeds
    pub synchronization_state: String,
    /// Set by validation, cleared by commit
    pub dirty: bool,
}

/// A version of a vendor or software product.
///
/// `status` is what clients see; `real_status` drives the pipeline and
/// only catches up with `status` on certification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    /// Version identifier
    pub id: String,
    /// Version name, `1.0`
    pub name: String,
    /// Free text
    pub description: String,
    /// Base version identifier, always empty
    pub base_id: String,
    /// Public status
    pub status: VersionStatus,
    /// Internal workflow status
    pub real_status: VersionStatus,
    /// Epoch milliseconds
    pub creation_time: i64,
    /// Epoch milliseconds
    pub modification_time: i64,
    /// Creation methods
    pub additional_info: AdditionalInfo,
    /// Synchronization state
    pub state: SyncState,
}

impl Version {
    /// A fresh `Draft` version named `1.0`.
    #[must_use]
    pub fn initial(id: String, now_millis: i64) -> Self {
        Self {
            id,
            name: "1.0".to_string(),
            description: "Initial version".to_string(),
            base_id: String::new(),
            status: VersionStatus::Draft,
            real_status: VersionStatus::Draft,
            creation_time: now_millis,
            modification_time: now_millis,
            additional_info: AdditionalInfo {
                optional_creation_methods: vec!["major".to_string()],
            },
            state: SyncState {
                synchronization_state: "UpToDate".to_string(),
                dirty: false,
            },
        }
    }

    /// Move both status fields to `Certified`.
    pub fn certify(&mut self) {
        self.status = VersionStatus::Certified;
        self.real_status = VersionStatus::Certified;
    }
}

/// Version as it appears in a version listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionLight {
    /// Version identifier
    pub id: String,
    /// Version name
    pub name: String,
    /// Free text
    pub description: String,
    /// Base version identifier
    pub base_id: String,
    /// Public status
    pub status: VersionStatus,
    /// Epoch milliseconds
    pub creation_time: i64,
    /// Epoch milliseconds
    pub modification_time: i64,
    /// Creation methods
    pub additional_info: AdditionalInfo,
}

impl From<&Version> for VersionLight {
    fn from(v: &Version) -> Self {
        Self {
            id: v.id.clone(),
            name: v.name.clone(),
            description: v.description.clone(),
            base_id: v.base_id.clone(),
            status: v.status,
            creation_time: v.creation_time,
            modification_time: v.modification_time,
            additional_info: v.additional_info.clone(),
        }
    }
}

/// Version as returned by the single-version endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDetails {
    /// Version identifier
    pub id: String,
    /// Version name
    pub name: String,
    /// Free text
    pub description: String,
    /// Public status
    pub status: VersionStatus,
    /// Epoch milliseconds
    pub creation_time: i64,
    /// Epoch milliseconds
    pub modification_time: i64,
    /// Synchronization state
    pub state: SyncState,
}

impl From<&Version> for VersionDetails {
    fn from(v: &Version) -> Self {
        Self {
            id: v.id.clone(),
            name: v.name.clone(),
            description: v.description.clone(),
            status: v.status,
            creation_time: v.creation_time,
            modification_time: v.modification_time,
            state: v.state.clone(),
        }
    }
}

/// `{listCount, results}` wrapper of every onboarding listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    /// Number of results
    pub list_count: usize,
    /// The results
    pub results: Vec<T>,
}

impl<T> Listing<T> {
    /// Wrap `results`, counting them.
    #[must_use]
    pub fn new(results: Vec<T>) -> Self {
        Self {
            list_count: results.len(),
            results,
        }
    }
}

/// A vendor license model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    /// Item identifier
    pub id: String,
    /// Always `vlm`
    #[serde(rename = "type")]
    pub kind: String,
    /// Vendor name
    pub name: String,
    /// Free text
    pub description: String,
    /// Owner user id
    pub owner: String,
    /// Always `ACTIVE`
    pub status: String,
    /// Always empty
    pub properties: Empty,
    /// Versions, not part of the wire shape
    #[serde(skip)]
    pub versions: Vec<Version>,
}

/// Body of `POST vendor-license-models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewVendor {
    /// Icon reference, ignored
    pub icon_ref: String,
    /// Name of the new vendor
    pub vendor_name: String,
    /// Free text
    pub description: String,
}

/// `validationData` of a validated software product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationData {
    /// Detected import structure
    pub import_structure: ImportStructure,
}

/// `importStructure` of [`ValidationData`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStructure {
    /// `Yes` once validated
    pub heat: String,
}

/// A vendor software product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vsp {
    /// Item identifier
    pub id: String,
    /// Always `icon`
    pub icon: String,
    /// Always `NetworkPackage`
    pub onboarding_method: String,
    /// Product name
    pub name: String,
    /// Free text
    pub description: String,
    /// Owner user id
    pub owner: String,
    /// Always `ACTIVE`
    pub status: String,
    /// Vendor name as given at creation
    pub vendor_name: String,
    /// Vendor id as given at creation
    pub vendor_id: String,
    /// Resource category
    pub category: String,
    /// Resource subcategory
    pub sub_category: String,
    /// Extension of the uploaded package
    pub candidate_onboarding_origin: String,
    /// Extension of the validated package
    pub onboarding_origin: String,
    /// Base name of the uploaded package
    pub network_package_name: String,
    /// Validation result
    pub validation_data: ValidationData,
    /// Versions
    pub versions: Vec<Version>,
}

/// Software product as it appears in the product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VspLight {
    /// Item identifier
    pub id: String,
    /// Onboarding method
    pub onboarding_method: String,
    /// Product name
    pub name: String,
    /// Free text
    pub description: String,
    /// Owner user id
    pub owner: String,
    /// Item status
    pub status: String,
    /// Vendor name
    pub vendor_name: String,
    /// Vendor id
    pub vendor_id: String,
}

impl From<&Vsp> for VspLight {
    fn from(v: &Vsp) -> Self {
        Self {
            id: v.id.clone(),
            onboarding_method: v.onboarding_method.clone(),
            name: v.name.clone(),
            description: v.description.clone(),
            owner: v.owner.clone(),
            status: v.status.clone(),
            vendor_name: v.vendor_name.clone(),
            vendor_id: v.vendor_id.clone(),
        }
    }
}

/// Software product version details.
///
/// The shape grows with the version's real status: uploaded versions report
/// the package candidate, validated and later versions the validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VspDetails {
    /// Item identifier
    pub id: String,
    /// Icon
    pub icon: String,
    /// Onboarding method
    pub onboarding_method: String,
    /// Product name
    pub name: String,
    /// Free text
    pub description: String,
    /// Vendor name
    pub vendor_name: String,
    /// Vendor id
    pub vendor_id: String,
    /// Version identifier
    pub version: String,
    /// Resource category
    pub category: String,
    /// Resource subcategory
    pub sub_category: String,
    /// Present once uploaded, until validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_onboarding_origin: Option<String>,
    /// Present once validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onboarding_origin: Option<String>,
    /// Present once uploaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_package_name: Option<String>,
    /// Present once validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_data: Option<ValidationData>,
}

impl VspDetails {
    /// Details of `vsp` at `version`.
    #[must_use]
    pub fn of(vsp: &Vsp, version: &Version) -> Self {
        let mut details = Self {
            id: vsp.id.clone(),
            icon: vsp.icon.clone(),
            onboarding_method: vsp.onboarding_method.clone(),
            name: vsp.name.clone(),
            description: vsp.description.clone(),
            vendor_name: vsp.vendor_name.clone(),
            vendor_id: vsp.vendor_id.clone(),
            version: version.id.clone(),
            category: vsp.category.clone(),
            sub_category: vsp.sub_category.clone(),
            candidate_onboarding_origin: None,
            onboarding_origin: None,
            network_package_name: None,
            validation_data: None,
        };
        match version.real_status {
            VersionStatus::Draft => {},
            VersionStatus::Uploaded => {
                details.candidate_onboarding_origin = Some(vsp.candidate_onboarding_origin.clone());
                details.network_package_name = Some(vsp.network_package_name.clone());
            },
            VersionStatus::Validated | VersionStatus::Commited | VersionStatus::Certified => {
                details.onboarding_origin = Some(vsp.onboarding_origin.clone());
                details.network_package_name = Some(vsp.network_package_name.clone());
                details.validation_data = Some(vsp.validation_data.clone());
            },
        }
        details
    }
}

/// Body of `POST vendor-software-products`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NewVsp {
    /// Icon reference, ignored
    pub icon_ref: String,
    /// Product name
    pub name: String,
    /// Vendor name
    pub vendor_name: String,
    /// Vendor id
    pub vendor_id: String,
    /// Free text
    pub description: String,
    /// Requested category, ignored
    pub category: String,
    /// Requested subcategory, ignored
    pub sub_category: String,
    /// Licensing data, ignored
    pub licensing_data: Empty,
    /// Requested onboarding method, ignored
    pub onboarding_method: String,
}

/// Version summary inside a [`CreatedItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedVersion {
    /// Version identifier
    pub id: String,
    /// Version name
    pub name: String,
    /// Free text
    pub description: String,
    /// Public status
    pub status: VersionStatus,
}

/// Answer to a vendor or software product creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedItem {
    /// New item identifier
    pub item_id: String,
    /// Its initial version
    pub version: CreatedVersion,
}

impl CreatedItem {
    /// Describe item `item_id` created at `version`.
    #[must_use]
    pub fn new(item_id: String, version: &Version) -> Self {
        Self {
            item_id,
            version: CreatedVersion {
                id: version.id.clone(),
                name: version.name.clone(),
                description: version.description.clone(),
                status: version.status,
            },
        }
    }
}

/// Body of the version actions endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRequest {
    /// `Commit`, `Submit` or `Create_Package`
    pub action: String,
}

/// Answer to an orchestration template upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactUploadResult {
    /// Always empty
    pub errors: Empty,
    /// `Success`
    pub status: String,
    /// Extension of the uploaded file
    pub onboarding_origin: String,
    /// Base name of the uploaded file
    pub network_package_name: String,
}

/// Answer to an orchestration template validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactValidationResult {
    /// Always empty
    pub errors: Empty,
    /// `Success`
    pub status: String,
    /// Files found in the package
    pub file_names: Vec<String>,
}

/// Answer to `Create_Package`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsarCreateResult {
    /// Product description
    pub description: String,
    /// Product name
    pub vsp_name: String,
    /// Version name
    pub version: String,
    /// Product identifier
    pub package_id: String,
    /// Resource category
    pub category: String,
    /// Resource subcategory
    pub sub_category: String,
    /// Vendor name
    pub vendor_name: String,
    /// Always `1.0`
    pub vendor_release: String,
    /// Always `CSAR`
    pub package_type: String,
    /// Always `VF`
    pub resource_type: String,
}

impl CsarCreateResult {
    /// Package descriptor of `vsp` at `version`.
    #[must_use]
    pub fn of(vsp: &Vsp, version: &Version) -> Self {
        Self {
            description: vsp.description.clone(),
            vsp_name: vsp.name.clone(),
            version: version.name.clone(),
            package_id: vsp.id.clone(),
            category: vsp.category.clone(),
            sub_category: vsp.sub_category.clone(),
            vendor_name: vsp.vendor_name.clone(),
            vendor_release: "1.0".to_string(),
            package_type: "CSAR".to_string(),
            resource_type: "VF".to_string(),
        }
    }
}

/// Split an uploaded file name into `(name, extension)`.
///
/// Only the first two dot-separated parts count: `pkg.tar.gz` yields
/// `("pkg", "tar")`. Returns `None` without an extension.
#[must_use]
pub fn split_package_name(file_name: &str) -> Option<(String, String)> {
    let mut parts = file_name.split('.');
    let name = parts.next()?;
    let extension = parts.next()?;
    Some((name.to_string(), extension.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn vsp_at(real_status: VersionStatus) -> (Vsp, Version) {
        let mut version = Version::initial("v1".to_string(), 1);
        version.real_status = real_status;
        let vsp = Vsp {
            id: "p1".to_string(),
            icon: "icon".to_string(),
            onboarding_method: "NetworkPackage".to_string(),
            name: "product".to_string(),
            description: "desc".to_string(),
            owner: DEFAULT_OWNER.to_string(),
            status: "ACTIVE".to_string(),
            vendor_name: "vendor".to_string(),
            vendor_id: "vendor-id".to_string(),
            category: "cat".to_string(),
            sub_category: "sub".to_string(),
            candidate_onboarding_origin: "zip".to_string(),
            onboarding_origin: "zip".to_string(),
            network_package_name: "pkg".to_string(),
            validation_data: ValidationData::default(),
            versions: vec![],
        };
        (vsp, version)
    }

    #[test]
    fn test_split_package_name() {
        assert_eq!(
            split_package_name("ubuntu16.zip"),
            Some(("ubuntu16".to_string(), "zip".to_string()))
        );
        assert_eq!(
            split_package_name("pkg.tar.gz"),
            Some(("pkg".to_string(), "tar".to_string()))
        );
        assert_eq!(split_package_name("noextension"), None);
    }

    #[test]
    fn test_draft_details_omit_package_fields() {
        let (vsp, version) = vsp_at(VersionStatus::Draft);
        let json = serde_json::to_value(VspDetails::of(&vsp, &version)).unwrap();

        assert_eq!(json["version"], "v1");
        assert!(json.get("networkPackageName").is_none());
        assert!(json.get("validationData").is_none());
    }

    #[test]
    fn test_uploaded_details_report_candidate() {
        let (vsp, version) = vsp_at(VersionStatus::Uploaded);
        let json = serde_json::to_value(VspDetails::of(&vsp, &version)).unwrap();

        assert_eq!(json["candidateOnboardingOrigin"], "zip");
        assert_eq!(json["networkPackageName"], "pkg");
        assert!(json.get("onboardingOrigin").is_none());
    }

    #[test]
    fn test_validated_details_report_validation() {
        let (vsp, version) = vsp_at(VersionStatus::Commited);
        let json = serde_json::to_value(VspDetails::of(&vsp, &version)).unwrap();

        assert_eq!(json["onboardingOrigin"], "zip");
        assert_eq!(json["validationData"]["importStructure"]["heat"], "");
        assert!(json.get("candidateOnboardingOrigin").is_none());
    }

    #[test]
    fn test_version_light_wire_shape() {
        let version = Version::initial("v1".to_string(), 1_559_565_688_604);
        let json = serde_json::to_value(VersionLight::from(&version)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "v1",
                "name": "1.0",
                "description": "Initial version",
                "baseId": "",
                "status": "Draft",
                "creationTime": 1_559_565_688_604_i64,
                "modificationTime": 1_559_565_688_604_i64,
                "additionalInfo": {"OptionalCreationMethods": ["major"]}
            })
        );
    }

    #[test]
    fn test_vendor_hides_versions() {
        let vendor = Vendor {
            id: "x".to_string(),
            kind: "vlm".to_string(),
            name: "n".to_string(),
            description: "d".to_string(),
            owner: DEFAULT_OWNER.to_string(),
            status: "ACTIVE".to_string(),
            properties: Empty {},
            versions: vec![Version::initial("v".to_string(), 0)],
        };
        let json = serde_json::to_value(&vendor).unwrap();

        assert_eq!(json["type"], "vlm");
        assert_eq!(json["properties"], serde_json::json!({}));
        assert!(json.get("versions").is_none());
    }
}
