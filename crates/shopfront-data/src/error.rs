//! Outbound HTTP errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The transport could not deliver the request or read the reply.
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Non-2xx reply, with the most specific message found in its body.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The reply body was not the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request timed out")]
    Timeout,

    /// A request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("No HTTP transport available on this target")]
    NoTransport,
}

impl FetchError {
    /// HTTP status of an error response, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Encode(e.to_string())
    }
}
