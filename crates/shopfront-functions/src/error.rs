//! Function error types.

use http::StatusCode;
use shopfront_data::FetchError;
use thiserror::Error;

/// Errors a function handler can return. Each maps to one HTTP status and is
/// rendered as `{"error": message}`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    /// The request body is missing a required field or is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// A downstream provider failed.
    #[error("{0}")]
    Upstream(String),

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The function does not accept this HTTP method.
    #[error("Method {0} not allowed")]
    MethodNotAllowed(String),
}

impl FunctionError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        FunctionError::BadRequest(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            FunctionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            FunctionError::Upstream(_) | FunctionError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            FunctionError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<FetchError> for FunctionError {
    fn from(e: FetchError) -> Self {
        match e {
            // Provider error bodies already carry a readable message.
            FetchError::Status { message, .. } => FunctionError::Upstream(message),
            other => FunctionError::Upstream(other.to_string()),
        }
    }
}
