//! Transports that actually put requests on the wire.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{FetchError, Request, Response};

/// Sends a [`Request`] and returns the raw [`Response`].
///
/// Non-2xx statuses are returned as responses, not errors.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, FetchError>;
}

/// The transport for the current target: Spin outbound HTTP on `wasm32`.
#[cfg(target_arch = "wasm32")]
pub fn default_transport() -> Arc<dyn Transport> {
    Arc::new(SpinTransport)
}

/// The transport for the current target: reqwest on native hosts.
#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest"))]
pub fn default_transport() -> Arc<dyn Transport> {
    Arc::new(ReqwestTransport::new())
}

/// The transport for the current target. Without the `reqwest` feature a
/// native build has none, and every request fails.
#[cfg(all(not(target_arch = "wasm32"), not(feature = "reqwest")))]
pub fn default_transport() -> Arc<dyn Transport> {
    Arc::new(Unavailable)
}

/// Fails every request with [`FetchError::NoTransport`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for Unavailable {
    async fn send(&self, _request: Request) -> Result<Response, FetchError> {
        Err(FetchError::NoTransport)
    }
}

/// Spin outbound HTTP. Hosts must be listed in the component's
/// `allowed_outbound_hosts`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        use crate::Method;
        use spin_sdk::http::Method as SpinMethod;

        let method = match request.method() {
            Method::Get => SpinMethod::Get,
            Method::Post => SpinMethod::Post,
            Method::Put => SpinMethod::Put,
            Method::Patch => SpinMethod::Patch,
            Method::Delete => SpinMethod::Delete,
            Method::Head => SpinMethod::Head,
            Method::Options => SpinMethod::Options,
        };

        let mut builder = spin_sdk::http::Request::builder();
        builder.method(method).uri(request.url());
        for (key, value) in request.headers() {
            builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder.body(body.to_vec());
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(builder.build())
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(k, v)| (k.to_string(), v.as_str().unwrap_or_default().to_string()))
            .collect();
        Ok(Response::new(status, headers, response.into_body()))
    }
}

/// Native transport backed by a shared `reqwest::Client`.
#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest"))]
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest"))]
impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "reqwest"))]
#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let method = reqwest::Method::from_bytes(request.method().as_str().as_bytes())
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let mut builder = self.client.request(method, request.url());
        for (key, value) in request.headers() {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.into_body() {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    v.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Response::new(status, headers, body.to_vec()))
    }
}
