//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pulse_auth::AuthError;
use pulse_billing::BillingError;
use pulse_core::PulseError;
use serde_json::json;
use tracing::error;

/// Wrapper turning domain errors into JSON error responses.
pub struct ApiError(PulseError);

impl From<PulseError> for ApiError {
    fn from(err: PulseError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            PulseError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            PulseError::AuthorizationDenied { .. } => StatusCode::FORBIDDEN,
            PulseError::Validation { .. } => StatusCode::BAD_REQUEST,
            PulseError::NotFound { .. } => StatusCode::NOT_FOUND,
            PulseError::AlreadyExists { .. } => StatusCode::CONFLICT,
            PulseError::Database(_) | PulseError::Payment(_) | PulseError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self.0, "Request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
