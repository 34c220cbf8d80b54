//! Loop management errors and their upstream JSON envelope.

use axum::http::StatusCode;
use platform_mocks_web::AppError;
use serde::Serialize;
use thiserror::Error;

/// Every way a loop management request can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClampError {
    /// Loop lookup from the read endpoints failed
    #[error("No ClosedLoop found")]
    NoClosedLoop,

    /// Loop lookup from a mutating endpoint failed
    #[error("Loop not found")]
    LoopNotFound,

    /// No policy model with the requested type and version
    #[error("Policy not found")]
    PolicyNotFound,

    /// The loop carries no microservice policy to update
    #[error("Microservice policy not found")]
    MicroservicePolicyNotFound,

    /// The loop carries no operational policy to configure
    #[error("Operational Policy not found")]
    OperationalPolicyNotFound,

    /// No template has a blueprint
    #[error("No Templates found")]
    NoTemplates,

    /// The policy catalog is empty
    #[error("No Policies found")]
    NoPolicies,

    /// A loop with the same name already exists for the template
    #[error("loop of same Name and for same template exists")]
    LoopExists,

    /// Submit found a policy without configuration
    #[error("Policies are not well Configured")]
    NotConfigured,

    /// The action is unknown or not allowed in the current state
    #[error("Cannot perform this action")]
    BadAction,
}

impl ClampError {
    /// HTTP status of the response, also reported in the body.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NoClosedLoop
            | Self::LoopNotFound
            | Self::PolicyNotFound
            | Self::MicroservicePolicyNotFound
            | Self::OperationalPolicyNotFound
            | Self::NoTemplates
            | Self::NoPolicies => StatusCode::NOT_FOUND,
            Self::LoopExists => StatusCode::CONFLICT,
            Self::NotConfigured | Self::BadAction => StatusCode::BAD_REQUEST,
        }
    }

    /// The `error` category string of the envelope.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::NoClosedLoop
            | Self::LoopNotFound
            | Self::PolicyNotFound
            | Self::MicroservicePolicyNotFound
            | Self::OperationalPolicyNotFound
            | Self::NoTemplates
            | Self::NoPolicies => "Not Found",
            Self::LoopExists => "Exists",
            Self::NotConfigured | Self::BadAction => "Bad Action",
        }
    }
}

/// `{"message", "error", "status"}` with the status code as a string.
#[derive(Debug, Serialize)]
struct ClampErrorBody<'a> {
    message: String,
    error: &'a str,
    status: String,
}

impl From<ClampError> for AppError {
    fn from(err: ClampError) -> Self {
        let status = err.status_code();
        let body = ClampErrorBody {
            message: err.to_string(),
            error: err.category(),
            status: status.as_u16().to_string(),
        };
        Self::new(status, err.to_string(), err.category().to_string()).with_body(&body)
    }
}
