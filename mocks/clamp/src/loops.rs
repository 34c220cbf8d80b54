//! Loop instance record.

use crate::catalog::LoopTemplate;
use crate::lifecycle::Components;
use crate::policy::{MicroServicePolicy, OperationalPolicy};
use serde::{Deserialize, Serialize};

/// A control loop instance as reported by the loop endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopDetails {
    /// Loop name, unique per template
    pub name: String,
    /// Template the loop was created from
    pub loop_template: LoopTemplate,
    /// Blueprint deployment parameters
    pub global_properties_json: GlobalProperties,
    /// Microservice models of the blueprint
    pub loop_element_models_used: Vec<String>,
    /// Component states
    pub components: Components,
    /// Resource the loop acts on
    pub model_service: LoopService,
    /// Attached operational policies
    pub operational_policies: Vec<OperationalPolicy>,
    /// Microservice policies, one per element model
    pub micro_service_policies: Vec<MicroServicePolicy>,
}

impl LoopDetails {
    /// Whether every attached policy carries a configuration.
    #[must_use]
    pub fn policies_configured(&self) -> bool {
        self.micro_service_policies
            .iter()
            .all(MicroServicePolicy::is_configured)
            && self
                .operational_policies
                .iter()
                .all(OperationalPolicy::is_configured)
    }
}

/// `{"dcaeDeployParameters": {"uniqueBlueprintParameters": {"policy_id": ..}}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalProperties {
    /// Deployment parameters
    pub dcae_deploy_parameters: DeployParameters,
}

/// Deployment parameters of the blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployParameters {
    /// Parameters unique to the blueprint
    pub unique_blueprint_parameters: BlueprintParameters,
}

/// Parameters unique to the blueprint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintParameters {
    /// Policy pushed with the microservice
    pub policy_id: String,
}

impl GlobalProperties {
    /// Properties carrying `policy_id`.
    #[must_use]
    pub fn with_policy_id(policy_id: String) -> Self {
        Self {
            dcae_deploy_parameters: DeployParameters {
                unique_blueprint_parameters: BlueprintParameters { policy_id },
            },
        }
    }
}

/// `{"resourceDetails": {"VFModule": {"resourceID": ..}}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopService {
    /// Resource details
    pub resource_details: ResourceDetails,
}

/// Resource details of the loop's service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDetails {
    /// VF module the loop acts on
    #[serde(rename = "VFModule")]
    pub vf_module: VfModule,
}

/// VF module wrapper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VfModule {
    /// Model identifiers
    #[serde(rename = "resourceID")]
    pub resource_id: VfModuleId,
}

/// Model identifiers of a VF module, as known by the design catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VfModuleId {
    /// Model name
    pub vf_module_model_name: String,
    /// Invariant UUID
    #[serde(rename = "vfModuleModelInvariantUUID")]
    pub vf_module_model_invariant_uuid: String,
    /// Model UUID
    #[serde(rename = "vfModuleModelUUID")]
    pub vf_module_model_uuid: String,
    /// Model version
    pub vf_module_model_version: String,
    /// Customization UUID
    #[serde(rename = "vfModuleModelCustomizationUUID")]
    pub vf_module_model_customization_uuid: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::policy::FrequencyLimit;

    #[test]
    fn test_loop_wire_keys() {
        let details = LoopDetails {
            name: "loop".to_string(),
            global_properties_json: GlobalProperties::with_policy_id("Microservice1".to_string()),
            ..LoopDetails::default()
        };

        let json = serde_json::to_value(&details).unwrap();

        assert_eq!(
            json["globalPropertiesJson"]["dcaeDeployParameters"]["uniqueBlueprintParameters"]
                ["policy_id"],
            "Microservice1"
        );
        let resource_id = &json["modelService"]["resourceDetails"]["VFModule"]["resourceID"];
        assert!(resource_id.get("vfModuleModelInvariantUUID").is_some());
        assert!(resource_id.get("vfModuleModelCustomizationUUID").is_some());
        assert!(json["operationalPolicies"].as_array().unwrap().is_empty());
        assert!(json["microServicePolicies"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_loop_without_policies_is_configured() {
        assert!(LoopDetails::default().policies_configured());
    }

    #[test]
    fn test_one_unconfigured_policy_fails_the_loop() {
        let mut details = LoopDetails::default();
        details
            .micro_service_policies
            .push(MicroServicePolicy::named("m".to_string()));
        assert!(!details.policies_configured());

        details.micro_service_policies[0]
            .configurations_json
            .tca_policy
            .domain = "measurementsForVfScaling".to_string();
        assert!(details.policies_configured());

        details.operational_policies.push(OperationalPolicy::default());
        assert!(!details.policies_configured());

        details.operational_policies[0].configurations_json = FrequencyLimit {
            actor: "Test".to_string(),
            ..FrequencyLimit::default()
        };
        assert!(details.policies_configured());
    }
}
