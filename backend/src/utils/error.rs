use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API Error with automatic error trait implementations
///
/// Design: Uses thiserror for ergonomic error handling. The taxonomy follows
/// the request lifecycle: configuration, validation, then upstream failures.
/// Every variant renders as a JSON body `{ "error": <message> }`; the method
/// rejection (405) is handled before routing reaches a handler and is the
/// only plain-text response the API produces.
#[derive(Error, Debug)]
pub enum ApiError {
    // Configuration errors
    #[error("API key is not configured.")]
    ApiKeyMissing,

    // Validation errors
    #[error("Prompt is required.")]
    PromptRequired,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // Upstream errors: the message carries whatever the generation API
    // reported, surfaced to the caller as-is
    #[error("{0}")]
    Upstream(String),

    #[error("Malformed structured output: {0}")]
    MalformedOutput(String),

    // Generic wrapper for other errors - auto-convert from anyhow::Error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Helper to create upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Helper to create malformed output error
    pub fn malformed_output(message: impl Into<String>) -> Self {
        Self::MalformedOutput(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::PromptRequired | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::ApiKeyMissing | Self::Upstream(_) | Self::MalformedOutput(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // Single top-level boundary: every failure is logged here exactly once
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        } else {
            tracing::debug!("Request rejected: {}", message);
        }

        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}

/// Upstream transport failures carry the reqwest message to the caller
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

/// JSON parse failures are always malformed structured output: hard-fail,
/// never fall back to the raw text
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedOutput(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
