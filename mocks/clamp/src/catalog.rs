//! Loop templates and the policy model catalog.

use serde::{Deserialize, Serialize};

/// A loop template distributed from the design catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoopTemplate {
    /// Template name, part of a loop's natural key
    pub name: String,
    /// Empty until the service is distributed
    pub dcae_blueprint_id: String,
    /// Service the template was generated from
    pub model_service: TemplateService,
}

impl LoopTemplate {
    /// Whether the template can be offered to clients.
    #[must_use]
    pub fn is_distributed(&self) -> bool {
        !self.dcae_blueprint_id.is_empty()
    }
}

/// `{"serviceDetails": {"name": ..}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateService {
    /// Service details
    pub service_details: ServiceDetails,
}

/// Name of the service behind a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDetails {
    /// Service name
    pub name: String,
}

/// Entry of the policy model catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyModel {
    /// Fully qualified model type
    pub policy_model_type: String,
    /// Model version
    pub version: String,
    /// Short display name
    pub policy_acronym: String,
    /// Creation timestamp
    pub created_date: String,
    /// Last update timestamp
    pub updated_date: String,
    /// Last author
    pub updated_by: String,
    /// Creator
    pub created_by: String,
}

impl PolicyModel {
    /// Whether this entry is the model `policy_type` at `version`.
    #[must_use]
    pub fn matches(&self, policy_type: &str, version: &str) -> bool {
        self.policy_model_type == policy_type && self.version == version
    }
}
