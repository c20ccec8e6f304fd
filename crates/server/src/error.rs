// crates/server/src/error.rs
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::error::Error as _;

use options_audit_core::AuditError;
use thiserror::Error;

use crate::render::failure_page;

/// Errors surfaced by route handlers. Each renders as an HTML notice page.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Audit(AuditError::PermissionDenied) => {
                tracing::warn!("Options audit requested without admin privilege");
                (
                    StatusCode::FORBIDDEN,
                    failure_page(
                        "Sorry, you are not allowed to access this page.",
                        Some("Administrative privilege is required to run the options audit."),
                    ),
                )
            }
            ApiError::Audit(AuditError::StoreUnavailable { query, source }) => {
                tracing::error!(
                    query = %query,
                    error = %source,
                    cause = ?source.source(),
                    "Options audit failed"
                );
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    failure_page(
                        "Could not complete the options audit.",
                        Some("The option store did not answer. No partial results are shown; try again later."),
                    ),
                )
            }
        };

        (status, Html(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
