//! Error handling for the Stockcast server
//!
//! Maps engine and service failures onto consistent JSON error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::EngineError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External data errors
    #[error("Forecast data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation { field, message } => AppError::Validation { field, message },
            EngineError::DataUnavailable(message) => AppError::DataUnavailable(message),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Configuration(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_detail = match &self {
            AppError::Validation { field, message } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!("{} not found", resource),
                field: None,
            },
            AppError::DataUnavailable(_) => ErrorDetail {
                code: "DATA_UNAVAILABLE".to_string(),
                message: "Forecast data is temporarily unavailable".to_string(),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message: format!("Configuration error: {}", msg),
                field: None,
            },
            AppError::InternalError(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred".to_string(),
                field: None,
            },
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (self.status_code(), Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
