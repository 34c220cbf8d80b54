//! State machines of the catalog.
//!
//! Two independent machines live here:
//!
//! - **Resource lifecycle**: certification and distribution of catalog
//!   resources and services, driven by the action path segment.
//! - **Version lifecycle**: the onboarding pipeline of a software product
//!   version, `Draft → Uploaded → Validated → Commited → Certified`.
//!
//! Both are total functions over closed enums, so an illegal transition is
//! a value of the error type rather than a fallthrough string comparison.

use crate::error::SdcError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Certification state of a catalog resource or service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecycleState {
    /// Being edited by its designer
    #[default]
    NotCertifiedCheckout,
    /// Checked in, waiting for certification
    NotCertifiedCheckin,
    /// Certified, version 1.0
    Certified,
}

/// Distribution state of a catalog resource or service.
///
/// Seeded resources have never been through distribution and report an
/// empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionStatus {
    /// No distribution status reported
    #[default]
    #[serde(rename = "")]
    Unset,
    /// Created, not yet approved
    DistributionNotApproved,
    /// Certified and approved for distribution
    DistributionApproved,
    /// Pushed to the runtime components
    Distributed,
}

/// Action path segment of the lifecycle endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAction {
    /// `Certify`
    Certify,
    /// `checkin`
    Checkin,
    /// `activate`
    Activate,
}

impl FromStr for ResourceAction {
    type Err = SdcError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "Certify" => Ok(Self::Certify),
            "checkin" => Ok(Self::Checkin),
            "activate" => Ok(Self::Activate),
            _ => Err(SdcError::BadAction),
        }
    }
}

/// Outcome of a legal resource transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceTransition {
    /// New lifecycle state
    pub lifecycle: LifecycleState,
    /// New distribution status
    pub distribution: DistributionStatus,
    /// Whether the resource version becomes `1.0`
    pub certifies_version: bool,
    /// Whether the endpoint answers `201 Created` instead of `200 OK`
    pub created: bool,
}

/// Apply `action` to a resource in (`lifecycle`, `distribution`).
///
/// # Errors
///
/// [`SdcError::BadAction`] for every pair outside the transition table.
pub fn transition_resource(
    lifecycle: LifecycleState,
    distribution: DistributionStatus,
    action: ResourceAction,
) -> Result<ResourceTransition, SdcError> {
    use LifecycleState::{Certified, NotCertifiedCheckin, NotCertifiedCheckout};

    match (lifecycle, distribution, action) {
        (NotCertifiedCheckout, _, ResourceAction::Certify) => Ok(ResourceTransition {
            lifecycle: Certified,
            distribution,
            certifies_version: true,
            created: true,
        }),
        (NotCertifiedCheckout, _, ResourceAction::Checkin) => Ok(ResourceTransition {
            lifecycle: NotCertifiedCheckin,
            distribution,
            certifies_version: false,
            created: false,
        }),
        (NotCertifiedCheckin, _, ResourceAction::Certify) => Ok(ResourceTransition {
            lifecycle: Certified,
            distribution: DistributionStatus::DistributionApproved,
            certifies_version: true,
            created: false,
        }),
        (Certified, DistributionStatus::DistributionApproved, ResourceAction::Activate) => {
            Ok(ResourceTransition {
                lifecycle: Certified,
                distribution: DistributionStatus::Distributed,
                certifies_version: false,
                created: false,
            })
        },
        _ => Err(SdcError::BadAction),
    }
}

/// Workflow status of a vendor or software product version.
///
/// The spelling `Commited` is the one the upstream API uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VersionStatus {
    /// Created, nothing uploaded
    #[default]
    Draft,
    /// Network package uploaded
    Uploaded,
    /// Network package validated
    Validated,
    /// Validated content committed
    Commited,
    /// Submitted and certified
    Certified,
}

/// Steps of the onboarding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionAction {
    /// Upload an orchestration template candidate
    Upload,
    /// Process (validate) the uploaded candidate
    Validate,
    /// `Commit`
    Commit,
    /// `Submit`
    Submit,
    /// `Create_Package`, read-only
    CreatePackage,
}

impl VersionAction {
    /// Parse the `action` field of an actions request body.
    ///
    /// Upload and validation have their own endpoints and no token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Commit" => Some(Self::Commit),
            "Submit" => Some(Self::Submit),
            "Create_Package" => Some(Self::CreatePackage),
            _ => None,
        }
    }

    /// The only status the action may be applied to.
    #[must_use]
    pub const fn precondition(self) -> VersionStatus {
        match self {
            Self::Upload => VersionStatus::Draft,
            Self::Validate => VersionStatus::Uploaded,
            Self::Commit => VersionStatus::Validated,
            Self::Submit => VersionStatus::Commited,
            Self::CreatePackage => VersionStatus::Certified,
        }
    }
}

impl VersionStatus {
    /// Real status after applying `action`.
    ///
    /// # Errors
    ///
    /// [`SdcError::NotInGoodState`] when the current status is not the
    /// action's precondition.
    pub fn advance(self, action: VersionAction) -> Result<Self, SdcError> {
        if self != action.precondition() {
            return Err(SdcError::NotInGoodState);
        }
        Ok(match action {
            VersionAction::Upload => Self::Uploaded,
            VersionAction::Validate => Self::Validated,
            VersionAction::Commit => Self::Commited,
            VersionAction::Submit | VersionAction::CreatePackage => Self::Certified,
        })
    }
}
