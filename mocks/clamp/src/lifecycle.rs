//! Component state machine of a loop instance.
//!
//! A loop tracks the policy engine and the data-collection engine
//! separately. Each action of `PUT loop/:action/:loop_id` moves exactly one
//! of them, or deletes the loop.

use crate::error::ClampError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// State of the policy engine component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyState {
    /// Seeded loops have never reported a state
    #[default]
    #[serde(rename = "")]
    Unknown,
    /// Created, policies not pushed yet
    NotSent,
    /// Pushed, then stopped
    Sent,
    /// Pushed and deployed
    SentAndDeployed,
}

/// State of the data-collection engine component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DcaeState {
    /// Seeded loops have never reported a state
    #[default]
    #[serde(rename = "")]
    Unknown,
    /// Blueprint available, nothing installed
    BlueprintDeployed,
    /// Microservice running
    MicroserviceInstalledSuccessfully,
    /// Microservice removed
    MicroserviceUninstalledSuccessfully,
}

/// `{"componentState": {"stateName": ..}}`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component<S> {
    /// Current state
    pub component_state: ComponentState<S>,
}

impl<S> Component<S> {
    /// Component in `state`.
    pub const fn new(state: S) -> Self {
        Self {
            component_state: ComponentState { state_name: state },
        }
    }
}

/// `{"stateName": ..}`, also the answer of a successful submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentState<S> {
    /// State name
    pub state_name: S,
}

/// Both components of a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Components {
    /// Policy engine
    #[serde(rename = "POLICY")]
    pub policy: Component<PolicyState>,
    /// Data-collection engine
    #[serde(rename = "DCAE")]
    pub dcae: Component<DcaeState>,
}

impl Components {
    /// Components of a freshly created loop.
    #[must_use]
    pub const fn created() -> Self {
        Self {
            policy: Component::new(PolicyState::NotSent),
            dcae: Component::new(DcaeState::BlueprintDeployed),
        }
    }

    /// Current policy engine state.
    #[must_use]
    pub const fn policy_state(&self) -> PolicyState {
        self.policy.component_state.state_name
    }

    /// Current data-collection engine state.
    #[must_use]
    pub const fn dcae_state(&self) -> DcaeState {
        self.dcae.component_state.state_name
    }
}

/// Action path segment of `PUT loop/:action/:loop_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopAction {
    /// Push policies
    Submit,
    /// Stop policies
    Stop,
    /// Push policies again
    Restart,
    /// Install the microservice
    Deploy,
    /// Remove the microservice
    Undeploy,
    /// Remove the loop
    Delete,
}

impl FromStr for LoopAction {
    type Err = ClampError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "submit" => Ok(Self::Submit),
            "stop" => Ok(Self::Stop),
            "restart" => Ok(Self::Restart),
            "deploy" => Ok(Self::Deploy),
            "undeploy" => Ok(Self::Undeploy),
            "delete" => Ok(Self::Delete),
            _ => Err(ClampError::BadAction),
        }
    }
}

/// Effect of a legal loop action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopTransition {
    /// Move the policy engine component
    Policy(PolicyState),
    /// Move the data-collection engine component
    Dcae(DcaeState),
    /// Remove the loop from the dataset
    Delete,
}

/// Apply `action` to a loop whose components are `components`.
///
/// `configured` tells whether every attached policy carries a configuration;
/// only `submit` looks at it. `restart`, `deploy` and `undeploy` are accepted
/// from any state.
///
/// # Errors
///
/// [`ClampError::NotConfigured`] when submitting unconfigured policies,
/// [`ClampError::BadAction`] when stopping policies never sent.
pub fn transition_loop(
    components: &Components,
    action: LoopAction,
    configured: bool,
) -> Result<LoopTransition, ClampError> {
    match action {
        LoopAction::Submit if configured => Ok(LoopTransition::Policy(PolicyState::SentAndDeployed)),
        LoopAction::Submit => Err(ClampError::NotConfigured),
        LoopAction::Stop if components.policy_state() == PolicyState::NotSent => {
            Err(ClampError::BadAction)
        },
        LoopAction::Stop => Ok(LoopTransition::Policy(PolicyState::Sent)),
        LoopAction::Restart => Ok(LoopTransition::Policy(PolicyState::SentAndDeployed)),
        LoopAction::Deploy => Ok(LoopTransition::Dcae(
            DcaeState::MicroserviceInstalledSuccessfully,
        )),
        LoopAction::Undeploy => Ok(LoopTransition::Dcae(
            DcaeState::MicroserviceUninstalledSuccessfully,
        )),
        LoopAction::Delete => Ok(LoopTransition::Delete),
    }
}
