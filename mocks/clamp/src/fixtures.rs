//! Seed data of the loop mock, rebuilt on every reset.

use crate::catalog::{LoopTemplate, PolicyModel, ServiceDetails, TemplateService};
use crate::loops::LoopDetails;

/// Blueprint of `template_service01`.
pub const SERVICE01_BLUEPRINT_ID: &str = "5c1d6b9e-0a53-4c6b-9d8a-3a1f0f6c2e01";

/// Blueprint of `template_service02`.
pub const SERVICE02_BLUEPRINT_ID: &str = "8e4f2a7d-61b0-4f3e-a2c5-7d9b1e4c3f02";

const MODEL_DATE: &str = "2020-04-30T09:03:30.362897Z";
const MODEL_AUTHOR: &str = "Not found";

fn template(name: &str, blueprint_id: &str, service: &str) -> LoopTemplate {
    LoopTemplate {
        name: name.to_string(),
        dcae_blueprint_id: blueprint_id.to_string(),
        model_service: TemplateService {
            service_details: ServiceDetails {
                name: service.to_string(),
            },
        },
    }
}

/// Templates of the two distributed services.
#[must_use]
pub fn templates() -> Vec<LoopTemplate> {
    vec![
        template("template_service01", SERVICE01_BLUEPRINT_ID, "service01"),
        template("template_service02", SERVICE02_BLUEPRINT_ID, "service02"),
    ]
}

fn policy_model(policy_type: &str, acronym: &str) -> PolicyModel {
    PolicyModel {
        policy_model_type: policy_type.to_string(),
        version: "1.0.0".to_string(),
        policy_acronym: acronym.to_string(),
        created_date: MODEL_DATE.to_string(),
        updated_date: MODEL_DATE.to_string(),
        updated_by: MODEL_AUTHOR.to_string(),
        created_by: MODEL_AUTHOR.to_string(),
    }
}

/// Operational policy models offered for attachment.
#[must_use]
pub fn policy_models() -> Vec<PolicyModel> {
    vec![
        policy_model("onap.policies.controlloop.MinMax", "MinMax"),
        policy_model("onap.policies.controlloop.Guard", "Guard"),
        policy_model(
            "onap.policies.controlloop.guard.common.FrequencyLimiter",
            "FrequencyLimiter",
        ),
    ]
}

/// One loop per seeded template, with unset component states.
#[must_use]
pub fn loops(templates: &[LoopTemplate]) -> Vec<LoopDetails> {
    ["intance_template01", "intance_template02"]
        .into_iter()
        .zip(templates)
        .map(|(name, template)| LoopDetails {
            name: name.to_string(),
            loop_template: template.clone(),
            ..LoopDetails::default()
        })
        .collect()
}
