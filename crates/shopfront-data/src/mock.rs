//! In-memory transport for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::{FetchError, Method, Request, Response, Transport};

#[derive(Debug, Clone)]
enum Reply {
    Response(Response),
    Failure(String),
}

/// Replays canned responses keyed by method and exact URL, and records every
/// request it receives.
///
/// Unmatched requests get a `404` response.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Vec<(Method, String, Reply)>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `method url` with `response`.
    pub fn on(mut self, method: Method, url: impl Into<String>, response: Response) -> Self {
        self.routes
            .push((method, url.into(), Reply::Response(response)));
        self
    }

    /// Reply to `method url` with a JSON body.
    pub fn on_json<T: Serialize + ?Sized>(
        self,
        method: Method,
        url: impl Into<String>,
        status: u16,
        body: &T,
    ) -> Self {
        let response = match Response::json_body(status, body) {
            Ok(response) => response,
            Err(e) => Response::new(500, Vec::new(), e.to_string().into_bytes()),
        };
        self.on(method, url, response)
    }

    /// Fail `method url` at the transport level.
    pub fn fail(mut self, method: Method, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.routes
            .push((method, url.into(), Reply::Failure(message.into())));
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// The last request sent to `url`.
    pub fn last_request_to(&self, url: &str) -> Option<Request> {
        self.requests().into_iter().rev().find(|r| r.url() == url)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        let reply = self
            .routes
            .iter()
            .find(|(method, url, _)| *method == request.method() && url == request.url())
            .map(|(_, _, reply)| reply.clone());

        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(FetchError::Transport(message)),
            None => Ok(Response::new(
                404,
                Vec::new(),
                format!("no mock for {} {}", request.method().as_str(), request.url()).into_bytes(),
            )),
        }
    }
}
