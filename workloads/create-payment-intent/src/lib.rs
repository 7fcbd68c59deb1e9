//! `create-payment-intent` component.
//!
//! Reads `stripe_secret_key` (and optionally `stripe_api_base`) from the
//! component's Spin variables.

// Built for wasm32 only.
#![cfg(target_arch = "wasm32")]

use spin_sdk::http::{IncomingRequest, ResponseOutparam};
use spin_sdk::http_component;
use tracing::info;

use shopfront_data::FetchClient;
use shopfront_functions::component::{read_request, write_response};
use shopfront_functions::payment_intent::{self, FUNCTION_NAME};
use shopfront_functions::{init_tracing, FunctionConfig, FunctionRequest, FunctionResponse, StripeClient};

#[http_component]
async fn handle(req: IncomingRequest, response_out: ResponseOutparam) {
    init_tracing("info");
    let response = match read_request(req).await {
        Ok(request) => respond(request).await,
        Err(e) => FunctionResponse::from_error(&e),
    };

    info!(function = FUNCTION_NAME, status = response.status.as_u16(), "Request complete");
    write_response(response, response_out).await;
}

async fn respond(request: FunctionRequest) -> FunctionResponse {
    info!(function = FUNCTION_NAME, method = request.method.as_str(), "Request started");
    match stripe_client() {
        Ok(stripe) => payment_intent::handle(request, &stripe).await,
        Err(e) => FunctionResponse::from_error(&e),
    }
}

fn stripe_client() -> Result<StripeClient, shopfront_functions::FunctionError> {
    let config = FunctionConfig::from_spin_variables()?;
    Ok(StripeClient::new(
        FetchClient::new(),
        config.stripe_api_base.clone(),
        config.stripe_secret_key()?,
    ))
}
