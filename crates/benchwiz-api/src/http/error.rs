//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use benchwiz_types::error::{ConnectionStoreError, WizardError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Wizard engine errors.
    Wizard(WizardError),
    /// Validation error raised by the transport itself.
    Validation(String),
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        AppError::Wizard(e)
    }
}

impl AppError {
    /// Status code and machine-readable error code.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Wizard(WizardError::ProviderNotFound(_))
            | AppError::Wizard(WizardError::AdapterNotRegistered(_)) => {
                (StatusCode::BAD_REQUEST, "PROVIDER_NOT_SUPPORTED")
            }
            AppError::Wizard(WizardError::UnknownStep(_)) => {
                (StatusCode::BAD_REQUEST, "UNKNOWN_STEP")
            }
            AppError::Wizard(WizardError::MissingPrerequisite(_)) => {
                (StatusCode::BAD_REQUEST, "MISSING_PREREQUISITE")
            }
            AppError::Wizard(WizardError::ConnectionStore(ConnectionStoreError::NotFound(_))) => {
                (StatusCode::NOT_FOUND, "CONNECTION_NOT_FOUND")
            }
            AppError::Wizard(WizardError::ConnectionStore(_)) => {
                (StatusCode::BAD_GATEWAY, "CONNECTION_STORE_ERROR")
            }
            AppError::Wizard(_) | AppError::Validation(_) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Wizard(e) => e.to_string(),
            AppError::Validation(msg) => msg.clone(),
        };

        if status.is_server_error() {
            tracing::error!(code, %message, "Wizard request failed");
        } else {
            tracing::debug!(code, %message, "Wizard request rejected");
        }

        let request_id = uuid::Uuid::now_v7().to_string();
        let body = ApiResponse::error(code, &message, request_id, 0);

        (status, axum::Json(body)).into_response()
    }
}
