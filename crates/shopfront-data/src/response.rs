//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers, in received order.
    pub headers: Vec<(String, String)>,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// A JSON response with the given status.
    pub fn json_body<T: Serialize + ?Sized>(status: u16, value: &T) -> Result<Self, FetchError> {
        Ok(Self::new(
            status,
            vec![("Content-Type".to_string(), "application/json".to_string())],
            serde_json::to_vec(value)?,
        ))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Decode(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the body's `error.message` or `error` field when
    /// the body is JSON, otherwise the raw body text.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::Status {
            status: self.status,
            message: self.error_message(),
        })
    }

    fn error_message(&self) -> String {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&self.body) {
            let error = &value["error"];
            if let Some(message) = error["message"].as_str().or_else(|| error.as_str()) {
                return message.to_string();
            }
            if let Some(message) = value["message"].as_str() {
                return message.to_string();
            }
        }
        match self.text() {
            Ok(text) if !text.trim().is_empty() => text,
            _ => format!("status {}", self.status),
        }
    }
}
