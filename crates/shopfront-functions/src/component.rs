//! Spin wire conversion shared by the function components.

use futures::SinkExt;
use shopfront_data::Method;
use spin_sdk::http::{self as spin_http, Fields, IncomingRequest, OutgoingResponse, ResponseOutparam};
use tracing::error;

use crate::error::FunctionError;
use crate::invocation::{request_body, FunctionRequest, FunctionResponse};

fn method_of(method: &spin_http::Method) -> Option<Method> {
    match method {
        spin_http::Method::Get => Some(Method::Get),
        spin_http::Method::Post => Some(Method::Post),
        spin_http::Method::Put => Some(Method::Put),
        spin_http::Method::Patch => Some(Method::Patch),
        spin_http::Method::Delete => Some(Method::Delete),
        spin_http::Method::Head => Some(Method::Head),
        spin_http::Method::Options => Some(Method::Options),
        spin_http::Method::Other(other) => Method::from_str(other),
        _ => None,
    }
}

/// Read an incoming Spin request. Methods the functions never accept come
/// through as `GET` so they are answered with `405`.
pub async fn read_request(req: IncomingRequest) -> Result<FunctionRequest, FunctionError> {
    let method = method_of(&req.method()).unwrap_or(Method::Get);
    let path = req.path_with_query().unwrap_or_default();
    let headers = req
        .headers()
        .entries()
        .into_iter()
        .map(|(k, v)| (k, String::from_utf8_lossy(&v).into_owned()))
        .collect();

    let body = request_body(req.into_body().await)?;

    Ok(FunctionRequest {
        method,
        path,
        headers,
        body,
    })
}

/// Write `response` to the outparam.
pub async fn write_response(response: FunctionResponse, response_out: ResponseOutparam) {
    let header_list: Vec<(String, Vec<u8>)> = response
        .headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.clone().into_bytes()))
        .collect();

    let headers = match Fields::from_list(&header_list) {
        Ok(headers) => headers,
        Err(e) => {
            error!(error = ?e, "Invalid response headers");
            Fields::new()
        }
    };

    let outgoing = OutgoingResponse::new(headers);
    if outgoing.set_status_code(response.status.as_u16()).is_err() {
        error!(status = response.status.as_u16(), "Rejected status code");
    }

    let mut body = outgoing.take_body();
    response_out.set(outgoing);
    if let Err(e) = body.send(response.body).await {
        error!(error = ?e, "Failed to write response body");
    }
}
