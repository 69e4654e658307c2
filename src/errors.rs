use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::dashboard::model::metric_sample::ParseError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Organization not found: {0}")]
    TenantNotFound(String),

    /// The organization has no usable primary cluster.
    #[error("No primary stack configured: {0}")]
    Configuration(String),

    /// The metrics endpoint of the primary cluster cannot be determined.
    #[error("Invalid primary stack: {0}")]
    Resolution(String),

    #[error("Metrics backend unreachable: {0}")]
    Transport(String),

    /// Dashboard code degrades bad metric values to empty cells and never
    /// returns this; it lets callers of `parse_metric_value` propagate with `?`.
    #[allow(dead_code)]
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Helper for mapping any unknown error into internal error
pub fn internal_error<E: ToString>(err: E) -> DashboardError {
    DashboardError::Internal(err.to_string())
}

impl DashboardError {
    /// Stable machine-readable code returned next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            DashboardError::TenantNotFound(_) => "D_ORGANIZATION_NOT_FOUND",
            DashboardError::Configuration(_) | DashboardError::Resolution(_) => {
                "D_INVALID_PRIMARY_STACK"
            }
            DashboardError::Transport(_) => "D_BACKEND_UNREACHABLE",
            DashboardError::Parse(_) => "D_INVALID_METRIC_VALUE",
            DashboardError::InvalidRange(_) => "D_INVALID_RANGE",
            DashboardError::NoData(_) => "D_NO_DATA",
            DashboardError::Validation(_) => "D_INVALID_REQUEST",
            DashboardError::Internal(_) => "D_INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DashboardError::TenantNotFound(_) | DashboardError::NoData(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidRange(_) | DashboardError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::Transport(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Configuration(_)
            | DashboardError::Resolution(_)
            | DashboardError::Parse(_)
            | DashboardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for DashboardError {
    fn from(err: ValidationErrors) -> Self {
        DashboardError::Validation(err.to_string())
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        let body = Json(json!({
            "code": self.code(),
            "message": self.to_string()
        }));

        (status, body).into_response()
    }
}
