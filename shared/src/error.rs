//! Engine error taxonomy
//!
//! Only two failure kinds exist. Empty catalogs and empty forecasts are not
//! errors; they produce empty results.

use thiserror::Error;

/// Errors produced by the recommendation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A caller-supplied argument was rejected before any scoring happened
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    /// Forecast data could not be obtained or parsed
    #[error("Forecast data unavailable: {0}")]
    DataUnavailable(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        EngineError::DataUnavailable(message.into())
    }
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
