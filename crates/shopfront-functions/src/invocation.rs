//! Host-independent request and response types for the functions.
//!
//! Spin components convert their incoming request into a [`FunctionRequest`],
//! call a handler, and write the [`FunctionResponse`] back out. Keeping the
//! handlers on these types lets them run under plain `#[tokio::test]`.

use std::future::Future;

use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use shopfront_data::Method;
use tracing::{error, warn};

use crate::error::FunctionError;

/// CORS headers sent on every response, including preflight.
pub const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Headers",
        "authorization, x-client-info, apikey, content-type",
    ),
];

/// An incoming function invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionRequest {
    pub method: Method,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FunctionRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// A POST with a JSON body.
    pub fn post_json<T: Serialize + ?Sized>(path: impl Into<String>, body: &T) -> Self {
        Self::new(Method::Post, path)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_vec(body).unwrap_or_default())
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON. An empty or malformed body is a bad request.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FunctionError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Err(FunctionError::bad_request("Request body is required"));
        }
        serde_json::from_slice(&self.body)
            .map_err(|e| FunctionError::bad_request(format!("Invalid request body: {e}")))
    }
}

/// Turn the host's body read into a request body.
///
/// A failed read is the host's fault, not the caller's, so it is a 500 rather
/// than falling through to "Request body is required".
pub fn request_body<E: std::fmt::Debug>(read: Result<Vec<u8>, E>) -> Result<Vec<u8>, FunctionError> {
    read.map_err(|e| {
        error!(error = ?e, "Failed to read request body");
        FunctionError::Upstream("Failed to read request body".to_string())
    })
}

/// A function's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl FunctionResponse {
    fn with_cors(status: StatusCode) -> Self {
        Self {
            status,
            headers: CORS_HEADERS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: Vec::new(),
        }
    }

    /// Answer to an `OPTIONS` preflight.
    pub fn preflight() -> Self {
        let mut response = Self::with_cors(StatusCode::OK);
        response.body = b"ok".to_vec();
        response
    }

    /// A JSON response with CORS headers.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => {
                let mut response = Self::with_cors(status);
                response
                    .headers
                    .push(("Content-Type".to_string(), "application/json".to_string()));
                response.body = body;
                response
            }
            Err(e) => {
                Self::from_error(&FunctionError::Upstream(format!("Failed to encode response: {e}")))
            }
        }
    }

    /// `{"error": message}` with the error's status.
    pub fn from_error(e: &FunctionError) -> Self {
        let mut response = Self::with_cors(e.status());
        response
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        response.body = json!({ "error": e.to_string() }).to_string().into_bytes();
        response
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body as JSON.
    pub fn body_json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }
}

/// Common request handling for a POST-only JSON function.
///
/// `OPTIONS` is answered with the CORS preflight, other non-POST methods get
/// `405`, and handler errors are rendered as `{"error": message}`.
pub async fn serve<F, Fut, T>(name: &str, request: FunctionRequest, handler: F) -> FunctionResponse
where
    F: FnOnce(FunctionRequest) -> Fut,
    Fut: Future<Output = Result<T, FunctionError>>,
    T: Serialize,
{
    match request.method {
        Method::Options => return FunctionResponse::preflight(),
        Method::Post => {}
        other => {
            let e = FunctionError::MethodNotAllowed(other.as_str().to_string());
            warn!(function = name, method = other.as_str(), "Method not allowed");
            return FunctionResponse::from_error(&e);
        }
    }

    match handler(request).await {
        Ok(body) => FunctionResponse::json(StatusCode::OK, &body),
        Err(e) => {
            match &e {
                FunctionError::BadRequest(_) => warn!(function = name, error = %e, "Rejected request"),
                _ => error!(function = name, error = %e, "Function failed"),
            }
            FunctionResponse::from_error(&e)
        }
    }
}
