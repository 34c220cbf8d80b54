//! Error type of the web handlers.
//!
//! The mocked upstream systems each use their own JSON error envelope, so an
//! [`AppError`] usually carries a pre-rendered body built by the domain
//! error's `From` impl. Errors raised by the framework itself fall back to a
//! `{code, message}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use platform_mocks_runtime::StoreError;
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// impl From<ClampError> for AppError {
///     fn from(err: ClampError) -> Self {
///         AppError::new(err.status(), err.to_string(), err.category().to_string())
///             .with_body(&envelope(&err))
///     }
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    code: String,
    /// Upstream-specific response body, replaces the default envelope
    body: Option<serde_json::Value>,
    /// Store failure behind an internal error, logged and never exposed
    source: Option<StoreError>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            body: None,
            source: None,
        }
    }

    /// Replace the default `{code, message}` envelope with a custom body.
    ///
    /// Serialization failures keep the default envelope.
    #[must_use]
    pub fn with_body(mut self, body: &impl Serialize) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(err) => tracing::warn!(error = %err, "Failed to serialize error body"),
        }
        self
    }

    /// 500, for replies the handler cannot interpret.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                status = %self.status,
                code = %self.code,
                message = %self.message,
                source = ?self.source,
                "Request failed"
            );
        } else {
            tracing::debug!(status = %self.status, code = %self.code, "Request rejected");
        }

        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => {
                let body = ErrorResponse {
                    code: self.code,
                    message: self.message,
                };
                (self.status, Json(body)).into_response()
            },
        }
    }
}

/// Map Store failures seen while waiting for a reply.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let (status, code, message) = match err {
            StoreError::Timeout => (StatusCode::REQUEST_TIMEOUT, "TIMEOUT", "Request timed out"),
            StoreError::ShutdownInProgress => (
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Server is shutting down",
            ),
            StoreError::ShutdownTimeout(_) | StoreError::ChannelClosed => {
                let mut error = Self::internal("Store failure");
                error.source = Some(err);
                return error;
            },
        };
        Self::new(status, message.to_string(), code.to_string())
    }
}
