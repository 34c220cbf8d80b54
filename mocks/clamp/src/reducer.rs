//! Loop dataset, actions and reducer.
//!
//! Mutating requests become a [`LoopCommand`] tagged with a request id. The
//! reducer applies it under the store's write lock and answers with a
//! [`LoopAction::Completed`] carrying the same id.

use crate::catalog::{LoopTemplate, PolicyModel};
use crate::environment::LoopEnvironment;
use crate::error::ClampError;
use crate::fixtures;
use crate::lifecycle::{
    transition_loop, Component, ComponentState, Components, LoopAction as Action, LoopTransition,
    PolicyState,
};
use crate::loops::{GlobalProperties, LoopDetails, VfModuleId};
use crate::policy::{MicroServicePolicy, OperationalPolicy};
use platform_mocks_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use uuid::Uuid;

/// Element model every created loop is bound to.
const ELEMENT_MODEL: &str = "microservice01";

/// The whole dataset of the loop mock.
#[derive(Debug, Clone)]
pub struct LoopState {
    /// Loop templates
    pub templates: Vec<LoopTemplate>,
    /// Operational policy model catalog
    pub policy_models: Vec<PolicyModel>,
    /// Loop instances
    pub loops: Vec<LoopDetails>,
}

impl LoopState {
    /// Seeded dataset.
    #[must_use]
    pub fn seeded() -> Self {
        let templates = fixtures::templates();
        let loops = fixtures::loops(&templates);
        Self {
            templates,
            policy_models: fixtures::policy_models(),
            loops,
        }
    }

    /// Restore templates, policy models and loops to their seed.
    pub fn reseed(&mut self) {
        *self = Self::seeded();
    }

    /// Templates that can be offered to clients.
    ///
    /// # Errors
    ///
    /// [`ClampError::NoTemplates`] when none is distributed.
    pub fn distributed_templates(&self) -> Result<Vec<LoopTemplate>, ClampError> {
        let templates: Vec<_> = self
            .templates
            .iter()
            .filter(|t| t.is_distributed())
            .cloned()
            .collect();
        if templates.is_empty() {
            return Err(ClampError::NoTemplates);
        }
        Ok(templates)
    }

    /// The policy model catalog.
    ///
    /// # Errors
    ///
    /// [`ClampError::NoPolicies`] when the catalog is empty.
    pub fn policy_catalog(&self) -> Result<&[PolicyModel], ClampError> {
        if self.policy_models.is_empty() {
            return Err(ClampError::NoPolicies);
        }
        Ok(&self.policy_models)
    }

    /// Loop named `loop_id`, as seen by the read endpoints.
    ///
    /// # Errors
    ///
    /// [`ClampError::NoClosedLoop`] when absent.
    pub fn loop_details(&self, loop_id: &str) -> Result<&LoopDetails, ClampError> {
        self.loops
            .iter()
            .find(|l| l.name == loop_id)
            .ok_or(ClampError::NoClosedLoop)
    }

    fn loop_position(&self, loop_id: &str) -> Result<usize, ClampError> {
        self.loops
            .iter()
            .position(|l| l.name == loop_id)
            .ok_or(ClampError::LoopNotFound)
    }

    fn loop_mut(&mut self, loop_id: &str) -> Result<&mut LoopDetails, ClampError> {
        let index = self.loop_position(loop_id)?;
        Ok(&mut self.loops[index])
    }
}

/// Mutations of the loop dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    /// Re-seed the dataset
    Reset,
    /// Create a loop for a template
    CreateLoop {
        /// Name of the new loop
        loop_id: String,
        /// Template it is created from
        template_name: String,
    },
    /// Attach an operational policy instantiated from the catalog
    AttachPolicy {
        /// Target loop
        loop_id: String,
        /// Catalog model type
        policy_type: String,
        /// Catalog model version
        policy_version: String,
    },
    /// Detach the first operational policy of a model
    DetachPolicy {
        /// Target loop
        loop_id: String,
        /// Model type
        policy_type: String,
        /// Model version
        policy_version: String,
    },
    /// Replace every microservice policy of a loop
    UpdateMicroservicePolicy {
        /// Target loop
        loop_id: String,
        /// New configuration
        policy: Box<MicroServicePolicy>,
    },
    /// Configure the last attached operational policy
    UpdateOperationalPolicies {
        /// Target loop
        loop_id: String,
    },
    /// Run a component action on a loop
    Run {
        /// Target loop
        loop_id: String,
        /// Raw action path segment
        action: String,
    },
}

/// Successful outcome of a [`LoopCommand`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoopReply {
    /// Dataset re-seeded
    Reset,
    /// Action applied, nothing to report
    Accepted,
    /// The loop after the command
    Loop(Box<LoopDetails>),
    /// The updated microservice policy
    MicroservicePolicy(Box<MicroServicePolicy>),
    /// New policy state after a submit
    Submitted(ComponentState<PolicyState>),
}

/// Actions of the loop store.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopAction {
    /// A request to mutate the dataset
    Command {
        /// Correlates the completion with the waiting request
        request_id: Uuid,
        /// What to do
        command: LoopCommand,
    },
    /// Outcome of a command, routed to the waiting request
    Completed {
        /// Id of the originating command
        request_id: Uuid,
        /// Reply or rejection
        outcome: Result<LoopReply, ClampError>,
    },
}

/// Applies loop commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoopReducer;

impl Reducer for LoopReducer {
    type State = LoopState;
    type Action = LoopAction;
    type Environment = LoopEnvironment;

    fn reduce(
        &self,
        state: &mut LoopState,
        action: LoopAction,
        env: &LoopEnvironment,
    ) -> SmallVec<[Effect<LoopAction>; 4]> {
        match action {
            LoopAction::Command {
                request_id,
                command,
            } => {
                let outcome = apply(state, command, env);
                if let Err(err) = &outcome {
                    tracing::debug!(%request_id, error = %err, "Command rejected");
                }
                smallvec![Effect::reply(LoopAction::Completed {
                    request_id,
                    outcome
                })]
            },
            LoopAction::Completed { .. } => SmallVec::new(),
        }
    }
}

fn apply(
    state: &mut LoopState,
    command: LoopCommand,
    env: &LoopEnvironment,
) -> Result<LoopReply, ClampError> {
    match command {
        LoopCommand::Reset => {
            state.reseed();
            tracing::info!("Loop dataset reset");
            Ok(LoopReply::Reset)
        },
        LoopCommand::CreateLoop {
            loop_id,
            template_name,
        } => create_loop(state, loop_id, &template_name, env),
        LoopCommand::AttachPolicy {
            loop_id,
            policy_type,
            policy_version,
        } => attach_policy(state, &loop_id, &policy_type, &policy_version, env),
        LoopCommand::DetachPolicy {
            loop_id,
            policy_type,
            policy_version,
        } => detach_policy(state, &loop_id, &policy_type, &policy_version),
        LoopCommand::UpdateMicroservicePolicy { loop_id, policy } => {
            update_microservice_policy(state, &loop_id, *policy)
        },
        LoopCommand::UpdateOperationalPolicies { loop_id } => {
            update_operational_policies(state, &loop_id)
        },
        LoopCommand::Run { loop_id, action } => run_action(state, &loop_id, &action),
    }
}

fn create_loop(
    state: &mut LoopState,
    loop_id: String,
    template_name: &str,
    env: &LoopEnvironment,
) -> Result<LoopReply, ClampError> {
    if state
        .loops
        .iter()
        .any(|l| l.name == loop_id && l.loop_template.name == template_name)
    {
        return Err(ClampError::LoopExists);
    }

    // Unknown templates are accepted and recorded by name only.
    let loop_template = state
        .templates
        .iter()
        .find(|t| t.name == template_name)
        .cloned()
        .unwrap_or_else(|| LoopTemplate {
            name: template_name.to_string(),
            ..LoopTemplate::default()
        });

    let mut details = LoopDetails {
        name: loop_id,
        loop_template,
        loop_element_models_used: vec![ELEMENT_MODEL.to_string()],
        components: Components::created(),
        ..LoopDetails::default()
    };
    details.model_service.resource_details.vf_module.resource_id = VfModuleId {
        vf_module_model_uuid: env.next_id(),
        vf_module_model_name: env.next_id(),
        vf_module_model_invariant_uuid: env.next_id(),
        vf_module_model_version: env.next_id(),
        vf_module_model_customization_uuid: env.next_id(),
    };
    details.micro_service_policies = details
        .loop_element_models_used
        .iter()
        .map(|_| MicroServicePolicy::named(format!("Microservice{}", env.next_id())))
        .collect();
    details.global_properties_json =
        GlobalProperties::with_policy_id(format!("Microservice{}", env.next_id()));

    tracing::info!(loop_id = %details.name, template = %template_name, "Loop created");
    state.loops.push(details.clone());
    Ok(LoopReply::Loop(Box::new(details)))
}

fn attach_policy(
    state: &mut LoopState,
    loop_id: &str,
    policy_type: &str,
    policy_version: &str,
    env: &LoopEnvironment,
) -> Result<LoopReply, ClampError> {
    let model = state
        .policy_models
        .iter()
        .find(|m| m.matches(policy_type, policy_version))
        .cloned()
        .ok_or(ClampError::PolicyNotFound)?;
    let details = state.loop_mut(loop_id)?;

    let policy = OperationalPolicy::from_model(
        format!("OPERATIONAL{}", env.next_id()),
        &model,
        env.now_rfc3339(),
    );
    tracing::debug!(%loop_id, policy = %policy.name, "Operational policy attached");
    details.operational_policies.push(policy);
    Ok(LoopReply::Loop(Box::new(details.clone())))
}

fn detach_policy(
    state: &mut LoopState,
    loop_id: &str,
    policy_type: &str,
    policy_version: &str,
) -> Result<LoopReply, ClampError> {
    let details = state.loop_mut(loop_id)?;
    let index = details
        .operational_policies
        .iter()
        .position(|p| p.matches(policy_type, policy_version))
        .ok_or(ClampError::PolicyNotFound)?;

    let removed = details.operational_policies.remove(index);
    tracing::debug!(%loop_id, policy = %removed.name, "Operational policy detached");
    Ok(LoopReply::Loop(Box::new(details.clone())))
}

fn update_microservice_policy(
    state: &mut LoopState,
    loop_id: &str,
    policy: MicroServicePolicy,
) -> Result<LoopReply, ClampError> {
    let details = state.loop_mut(loop_id)?;
    if details.micro_service_policies.is_empty() {
        return Err(ClampError::MicroservicePolicyNotFound);
    }

    for existing in &mut details.micro_service_policies {
        existing.clone_from(&policy);
    }
    Ok(LoopReply::MicroservicePolicy(Box::new(policy)))
}

fn update_operational_policies(
    state: &mut LoopState,
    loop_id: &str,
) -> Result<LoopReply, ClampError> {
    let details = state.loop_mut(loop_id)?;
    let last = details
        .operational_policies
        .last_mut()
        .ok_or(ClampError::OperationalPolicyNotFound)?;

    last.configurations_json.actor = "Test".to_string();
    Ok(LoopReply::Loop(Box::new(details.clone())))
}

fn run_action(state: &mut LoopState, loop_id: &str, action: &str) -> Result<LoopReply, ClampError> {
    let index = state.loop_position(loop_id)?;
    let action: Action = action.parse()?;
    let details = &mut state.loops[index];

    let transition = transition_loop(&details.components, action, details.policies_configured())?;
    tracing::debug!(%loop_id, ?action, ?transition, "Loop action applied");

    match transition {
        LoopTransition::Policy(policy_state) => {
            details.components.policy = Component::new(policy_state);
            if action == Action::Submit {
                return Ok(LoopReply::Submitted(ComponentState {
                    state_name: policy_state,
                }));
            }
        },
        LoopTransition::Dcae(dcae_state) => {
            details.components.dcae = Component::new(dcae_state);
        },
        LoopTransition::Delete => {
            state.loops.remove(index);
            tracing::info!(%loop_id, "Loop deleted");
        },
    }
    Ok(LoopReply::Accepted)
}
