use std::sync::OnceLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

static EXPOSE_DETAILS: OnceLock<bool> = OnceLock::new();

/// Enables the `error` detail field on 500 responses. Set once at startup.
pub fn expose_error_details(enabled: bool) {
    let _ = EXPOSE_DETAILS.set(enabled);
}

fn details_exposed() -> bool {
    EXPOSE_DETAILS.get().copied().unwrap_or(false)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Db(StoreError),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidAmount(String),
    #[error("Only active investments can be cancelled")]
    InvalidState,
    #[error("Investment can only be cancelled within 24 hours of creation")]
    WindowExpired,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error message attached to error responses for the audit middleware.
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidAmount(_)
            | AppError::InvalidState
            | AppError::WindowExpired => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Db(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        let body = match &self {
            AppError::Db(_) | AppError::Internal(_) => {
                if details_exposed() {
                    json!({ "message": "Server error", "error": detail })
                } else {
                    json!({ "message": "Server error" })
                }
            }
            _ => json!({ "message": detail }),
        };
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorMessage(detail));
        response
    }
}

impl From<StoreError> for AppError {
    fn from(value: StoreError) -> Self {
        AppError::Db(value)
    }
}
