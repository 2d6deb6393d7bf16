//! Error types for the weather cache services.

use thiserror::Error;

/// Result type alias using WeatherError.
pub type WeatherResult<T> = Result<T, WeatherError>;

/// Primary error type for weather lookups.
#[derive(Debug, Error)]
pub enum WeatherError {
    // === Request Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Provider Errors ===
    #[error("External weather provider unavailable: {0}")]
    ExternalUnavailable(String),

    #[error("Malformed provider payload: {0}")]
    MalformedPayload(String),

    // === Storage Errors ===
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WeatherError {
    /// Short machine-friendly name, used as a log field and metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            WeatherError::MissingParameter(_) => "missing_parameter",
            WeatherError::InvalidParameter { .. } => "invalid_parameter",
            WeatherError::ExternalUnavailable(_) => "external_unavailable",
            WeatherError::MalformedPayload(_) => "malformed_payload",
            WeatherError::Storage(_) => "storage",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WeatherError::MissingParameter(_) | WeatherError::InvalidParameter { .. } => 400,

            WeatherError::ExternalUnavailable(_) => 503,

            WeatherError::MalformedPayload(_) | WeatherError::Storage(_) => 500,
        }
    }

    /// Message safe to show to API clients.
    ///
    /// Request errors echo their details; provider and internal faults get a
    /// fixed message.
    pub fn public_message(&self) -> String {
        match self {
            WeatherError::MissingParameter(param) => format!("{} is required", param),
            WeatherError::InvalidParameter { message, .. } => message.clone(),
            WeatherError::ExternalUnavailable(_) => {
                "Error fetching data from external weather service.".to_string()
            }
            WeatherError::MalformedPayload(_) | WeatherError::Storage(_) => {
                "Internal server error".to_string()
            }
        }
    }
}
