//! Policies attached to a loop instance.
//!
//! Operational policies come from the policy model catalog and carry a
//! frequency-limiter configuration. Microservice policies carry a TCA
//! threshold configuration supplied by the client.

use crate::catalog::PolicyModel;
use serde::{Deserialize, Serialize};

/// Operational policy of a loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperationalPolicy {
    /// `OPERATIONAL<uuid>`
    pub name: String,
    /// Editor schema, opaque to the mock
    pub json_representation: serde_json::Value,
    /// Frequency-limiter configuration
    pub configurations_json: FrequencyLimit,
    /// Model the policy was instantiated from
    pub policy_model: AttachedModel,
    /// Attachment time
    pub created_date: String,
    /// Last update time
    pub updated_date: String,
    /// Last author
    pub updated_by: String,
    /// Creator
    pub created_by: String,
    /// PDP group
    pub pdp_group: String,
    /// PDP subgroup
    pub pdp_subgroup: String,
}

impl OperationalPolicy {
    /// A fresh, unconfigured policy instantiated from `model`.
    #[must_use]
    pub fn from_model(name: String, model: &PolicyModel, now: String) -> Self {
        Self {
            name,
            json_representation: serde_json::Value::Object(serde_json::Map::new()),
            policy_model: AttachedModel::from(model),
            created_date: now.clone(),
            updated_date: now,
            ..Self::default()
        }
    }

    /// Whether the policy was configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.configurations_json != FrequencyLimit::default()
    }

    /// Whether the policy was instantiated from `policy_type` at `version`.
    #[must_use]
    pub fn matches(&self, policy_type: &str, version: &str) -> bool {
        self.policy_model.policy_model_type == policy_type && self.policy_model.version == version
    }
}

/// Frequency-limiter configuration of an operational policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FrequencyLimit {
    /// Actor the limit applies to
    pub actor: String,
    /// Operation the limit applies to
    pub operation: String,
    /// Allowed operations per window
    pub limit: i64,
    /// Window length
    pub time_window: i64,
    /// Window unit
    pub time_units: String,
}

/// Policy model as embedded in an attached operational policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachedModel {
    /// Fully qualified model type
    pub policy_model_type: String,
    /// Model version
    pub version: String,
    /// Short display name
    pub policy_acronym: String,
    /// Supported PDP groups
    pub policy_pdp_group: PdpGroups,
    /// Creation timestamp of the model
    pub created_date: String,
    /// Update timestamp of the model
    pub updated_date: String,
    /// Last author of the model
    pub updated_by: String,
    /// Creator of the model
    pub created_by: String,
}

impl From<&PolicyModel> for AttachedModel {
    fn from(model: &PolicyModel) -> Self {
        Self {
            policy_model_type: model.policy_model_type.clone(),
            version: model.version.clone(),
            policy_acronym: model.policy_acronym.clone(),
            policy_pdp_group: PdpGroups::default(),
            created_date: model.created_date.clone(),
            updated_date: model.updated_date.clone(),
            updated_by: model.updated_by.clone(),
            created_by: model.created_by.clone(),
        }
    }
}

/// `{"supportedPdpGroups": [{"defaultGroup": [..]}]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PdpGroups {
    /// Supported groups
    pub supported_pdp_groups: Vec<DefaultGroup>,
}

/// One supported PDP group entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultGroup {
    /// Subgroups of the default group
    pub default_group: Vec<String>,
}

/// Microservice policy of a loop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MicroServicePolicy {
    /// `Microservice<uuid>` when generated
    pub name: String,
    /// TCA configuration
    pub configurations_json: TcaConfiguration,
    /// PDP group
    pub pdp_group: String,
    /// PDP subgroup
    pub pdp_subgroup: String,
}

impl MicroServicePolicy {
    /// An unconfigured policy named `name`.
    #[must_use]
    pub fn named(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// Whether the TCA domain was filled in.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.configurations_json.tca_policy.domain.is_empty()
    }
}

/// `{"tca.policy": ..}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcaConfiguration {
    /// Threshold crossing analytics policy
    #[serde(rename = "tca.policy")]
    pub tca_policy: TcaPolicy,
}

/// Threshold crossing analytics policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TcaPolicy {
    /// Event domain, empty until configured
    #[serde(rename = "Domain")]
    pub domain: String,
    /// Per-event thresholds
    pub metrics_per_event_name: Vec<EventMetrics>,
}

/// Thresholds of one event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventMetrics {
    /// Policy scope
    pub policy_scope: String,
    /// Threshold rules
    pub thresholds: Vec<Threshold>,
    /// Event the thresholds apply to
    pub event_name: String,
    /// Policy version
    pub policy_version: String,
    /// Schema type, `VM` or `VNF`
    pub control_loop_schema_type: String,
    /// Policy name
    pub policy_name: String,
}

/// A single threshold rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Threshold {
    /// Event format version
    pub version: String,
    /// Alarm severity
    pub severity: String,
    /// Value crossing the threshold
    pub threshold_value: i64,
    /// `ONSET` or `ABATED`
    pub closed_loop_event_status: String,
    /// Loop raising the event
    pub closed_loop_control_name: String,
    /// Comparison operator
    pub direction: String,
    /// Path of the measured field
    pub field_path: String,
}
