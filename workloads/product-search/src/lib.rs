//! `search` component: embeds the query and returns the closest products.

// Built for wasm32 only.
#![cfg(target_arch = "wasm32")]

use spin_sdk::http::{IncomingRequest, ResponseOutparam};
use spin_sdk::http_component;
use tracing::info;

use shopfront_data::FetchClient;
use shopfront_functions::component::{read_request, write_response};
use shopfront_functions::search::{self, FUNCTION_NAME};
use shopfront_functions::{
    init_tracing, FunctionConfig, FunctionError, FunctionRequest, FunctionResponse, MatchOptions,
    SupabaseClient,
};

#[http_component]
async fn handle_search(req: IncomingRequest, response_out: ResponseOutparam) {
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
    match search_backend() {
        Ok((supabase, options)) => search::handle(request, &supabase, options).await,
        Err(e) => FunctionResponse::from_error(&e),
    }
}

fn search_backend() -> Result<(SupabaseClient, MatchOptions), FunctionError> {
    let config = FunctionConfig::from_spin_variables()?;
    let supabase = SupabaseClient::new(
        FetchClient::new(),
        config.supabase_url()?,
        config.supabase_anon_key()?,
    );
    let options = MatchOptions {
        threshold: config.match_threshold,
        count: config.match_count,
    };
    Ok((supabase, options))
}
