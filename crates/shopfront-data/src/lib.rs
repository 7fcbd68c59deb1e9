//! HTTP client utilities for Shopfront.
//!
//! A small builder API over a pluggable [`Transport`]: Spin outbound HTTP
//! inside components, reqwest on native hosts (feature `reqwest`), and an
//! in-memory mock for tests (feature `mock`).
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Created {
//!     #[serde(rename = "clientSecret")]
//!     client_secret: String,
//! }
//!
//! let client = FetchClient::new().with_base_url("https://project.supabase.co/functions/v1");
//!
//! let created: Created = client
//!     .post("/create-payment-intent")
//!     .bearer_auth(anon_key)
//!     .json(&serde_json::json!({"amount": 29.99, "currency": "usd"}))?
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod request;
mod response;
mod transport;

use std::sync::Arc;

use tracing::{debug, warn};

pub use error::FetchError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTransport;
pub use request::{Method, Request};
pub use response::Response;
#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest"))]
pub use transport::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use transport::SpinTransport;
pub use transport::{default_transport, Transport, Unavailable};

/// HTTP client for making outbound requests.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn Transport>,
    base_url: Option<String>,
    default_headers: Vec<(String, String)>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers.len())
            .finish()
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a client on the target's default transport.
    pub fn new() -> Self {
        Self::with_transport(default_transport())
    }

    /// Create a client on a specific transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url: None,
            default_headers: Vec::new(),
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        };

        let request = self
            .default_headers
            .iter()
            .fold(Request::new(method, full_url), |request, (key, value)| {
                request.header(key.clone(), value.clone())
            });

        ClientRequestBuilder {
            client: self,
            request,
        }
    }

    /// Send a fully built request.
    pub async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        request.validate()?;
        let method = request.method();
        let url = request.url().to_string();

        debug!(method = method.as_str(), url = %url, "Outbound request");
        match self.transport.send(request).await {
            Ok(response) => {
                debug!(method = method.as_str(), url = %url, status = response.status, "Outbound response");
                Ok(response)
            }
            Err(e) => {
                warn!(method = method.as_str(), url = %url, error = %e, "Outbound request failed");
                Err(e)
            }
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    request: Request,
}

impl ClientRequestBuilder<'_> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.header(key, value);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(mut self, value: &T) -> Result<Self, FetchError> {
        self.request = self.request.json(value)?;
        Ok(self)
    }

    /// Set a form-encoded body.
    pub fn form<K: AsRef<str>, V: AsRef<str>>(mut self, pairs: &[(K, V)]) -> Self {
        self.request = self.request.form(pairs);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.request = self.request.bearer_auth(token);
        self
    }

    /// The request as built so far.
    pub fn build(self) -> Request {
        self.request
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.execute(self.request).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Request, Response, Transport};
}
