use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Workflow service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowServiceError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error("package not found")]
    PackageNotFound,
    #[error("invalid session count")]
    InvalidSessionCount,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WorkflowServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::PackageNotFound => "PACKAGE_NOT_FOUND",
            Self::InvalidSessionCount => "INVALID_SESSION_COUNT",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WorkflowServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::CustomerNotFound | Self::PackageNotFound => StatusCode::NOT_FOUND,
            Self::InvalidSessionCount | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
