//! Catalog errors and their upstream JSON envelope.

use axum::http::StatusCode;
use platform_mocks_web::AppError;
use serde::Serialize;
use thiserror::Error;

/// Every way a catalog request can be rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SdcError {
    /// No catalog resource or service carries the identifier
    #[error("Resource not found")]
    ResourceNotFound,

    /// A catalog listing came back empty
    #[error("No Resources found")]
    NoResources,

    /// The lifecycle does not allow the requested action in the current state
    #[error("Cannot perform this action")]
    BadAction,

    /// A resource with the same name and resource type already exists
    #[error("Resource of same Name and ResourceType exists")]
    ResourceExists,

    /// No vendor or software product carries the item identifier
    #[error("Item Not Found")]
    ItemNotFound,

    /// No vendor license model carries the identifier
    #[error("Vendor Not Found")]
    VendorNotFound,

    /// The item has no version with the identifier
    #[error("Version Not Found")]
    VersionNotFound,

    /// The version's real status does not satisfy the action's precondition
    #[error("Item not in good state")]
    NotInGoodState,

    /// The action token is not recognised by the endpoint
    #[error("Unknown Action")]
    UnknownAction,

    /// The artifact upload form is unusable
    #[error("{0}")]
    InvalidUpload(String),

    /// The `include` query parameter names nothing we can filter on
    #[error("{0}")]
    InvalidFilter(String),
}

impl SdcError {
    /// HTTP status of the response.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound
            | Self::NoResources
            | Self::ItemNotFound
            | Self::VendorNotFound
            | Self::VersionNotFound => StatusCode::NOT_FOUND,
            Self::NotInGoodState => StatusCode::CONFLICT,
            Self::BadAction
            | Self::ResourceExists
            | Self::UnknownAction
            | Self::InvalidUpload(_)
            | Self::InvalidFilter(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The `status` category string of the envelope.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::ResourceNotFound
            | Self::NoResources
            | Self::ItemNotFound
            | Self::VendorNotFound
            | Self::VersionNotFound => "Not Found",
            Self::BadAction | Self::UnknownAction => "Bad Action",
            Self::ResourceExists => "Exists",
            Self::NotInGoodState => "Conflict",
            Self::InvalidUpload(_) | Self::InvalidFilter(_) => "Bad Request",
        }
    }

    /// Upstream service error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ResourceNotFound
            | Self::NoResources
            | Self::ItemNotFound
            | Self::VendorNotFound
            | Self::VersionNotFound => "SVC4642",
            Self::BadAction | Self::ResourceExists => "SVC3642",
            Self::NotInGoodState => "SVC4122",
            Self::UnknownAction => "SVC4123",
            Self::InvalidUpload(_) | Self::InvalidFilter(_) => "SVC4000",
        }
    }
}

/// `{"status", "errorCode", "message"}` as the catalog UI expects it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SdcErrorBody<'a> {
    status: &'a str,
    error_code: &'a str,
    message: String,
}

impl From<SdcError> for AppError {
    fn from(err: SdcError) -> Self {
        let body = SdcErrorBody {
            status: err.category(),
            error_code: err.error_code(),
            message: err.to_string(),
        };
        Self::new(err.status_code(), err.to_string(), err.error_code().to_string())
            .with_body(&body)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::response::IntoResponse;

    async fn body_of(err: SdcError) -> (StatusCode, serde_json::Value) {
        let response = AppError::from(err).into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_resource_not_found_envelope() {
        let (status, json) = body_of(SdcError::ResourceNotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            json,
            serde_json::json!({
                "status": "Not Found",
                "errorCode": "SVC4642",
                "message": "Resource not found"
            })
        );
    }

    #[tokio::test]
    async fn test_exists_is_a_bad_request() {
        let (status, json) = body_of(SdcError::ResourceExists).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "Exists");
        assert_eq!(json["errorCode"], "SVC3642");
    }

    #[tokio::test]
    async fn test_state_conflict_is_409() {
        let (status, json) = body_of(SdcError::NotInGoodState).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Item not in good state");
    }

    #[test]
    fn test_invalid_filter_carries_its_description() {
        let err = SdcError::InvalidFilter("Invalid query param".to_string());
        assert_eq!(err.to_string(), "Invalid query param");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
