//! The product search function.
//!
//! `POST {query}`: embeds the query text, then asks the `match_products` RPC
//! for the closest products and returns them best match first.

use serde::{Deserialize, Serialize};
use shopfront_commerce::catalog::Product;
use tracing::info;

use crate::error::FunctionError;
use crate::invocation::{serve, FunctionRequest, FunctionResponse};
use crate::supabase::SupabaseClient;

pub const FUNCTION_NAME: &str = "search";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

/// Similarity cut-off and result cap for `match_products`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub threshold: f32,
    pub count: u32,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: crate::config::DEFAULT_MATCH_THRESHOLD,
            count: crate::config::DEFAULT_MATCH_COUNT,
        }
    }
}

/// Validate the request and run the embedding + similarity search.
pub async fn search_products(
    request: &SearchRequest,
    supabase: &SupabaseClient,
    options: MatchOptions,
) -> Result<Vec<Product>, FunctionError> {
    // Only a missing or empty query is rejected; the text is embedded as sent.
    let query = request
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| FunctionError::bad_request("Query is required"))?;

    let embedding = supabase.generate_embedding(query).await?;
    let products = supabase
        .match_products(&embedding, options.threshold, options.count)
        .await?;

    info!(query, results = products.len(), "Search complete");
    Ok(products)
}

/// Full HTTP handling: preflight, method check, body parsing, errors.
pub async fn handle(
    request: FunctionRequest,
    supabase: &SupabaseClient,
    options: MatchOptions,
) -> FunctionResponse {
    serve(FUNCTION_NAME, request, |request| async move {
        let body: SearchRequest = request.json()?;
        search_products(&body, supabase, options).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde_json::{json, Value};
    use shopfront_data::{FetchClient, Method, MockTransport};
    use std::sync::Arc;

    const EMBED: &str = "https://p.supabase.co/functions/v1/generate-embedding";
    const RPC: &str = "https://p.supabase.co/rest/v1/rpc/match_products";

    fn supabase_with(mock: MockTransport) -> (Arc<MockTransport>, SupabaseClient) {
        let mock = Arc::new(mock);
        let client = SupabaseClient::new(
            FetchClient::with_transport(mock.clone()),
            "https://p.supabase.co/",
            "anon",
        );
        (mock, client)
    }

    fn matches() -> Value {
        json!([
            {"id": "8", "name": "Wireless Earbuds", "price": 159.99, "category": "Audio",
             "featured": true, "rating": 4.7, "stock": 18, "similarity": 0.91},
            {"id": "1", "name": "Premium Wireless Headphones", "price": 299.99,
             "category": "Audio", "similarity": 0.82}
        ])
    }

    #[tokio::test]
    async fn test_search_returns_ranked_products() {
        let (mock, supabase) = supabase_with(
            MockTransport::new()
                .on_json(Method::Post, EMBED, 200, &json!({"embedding": [0.1, 0.2, 0.3]}))
                .on_json(Method::Post, RPC, 200, &matches()),
        );

        let response = handle(
            FunctionRequest::post_json("/", &json!({"query": "  earbuds "})),
            &supabase,
            MatchOptions::default(),
        )
        .await;

        assert_eq!(response.status, StatusCode::OK);
        let products: Vec<Product> = response.body_json().unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["8", "1"]);
        assert_eq!(products[0].price.minor_units, 15999);

        let embed = mock.last_request_to(EMBED).unwrap();
        assert_eq!(embed.header_value("authorization"), Some("Bearer anon"));
        let embed_body: Value = serde_json::from_slice(embed.body().unwrap()).unwrap();
        assert_eq!(embed_body, json!({"text": "  earbuds "}));

        let rpc = mock.last_request_to(RPC).unwrap();
        assert_eq!(rpc.header_value("apikey"), Some("anon"));
        let params: Value = serde_json::from_slice(rpc.body().unwrap()).unwrap();
        assert_eq!(params["match_threshold"], 0.5);
        assert_eq!(params["match_count"], 10);
        assert_eq!(params["query_embedding"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_null_columns_in_matches() {
        let (_, supabase) = supabase_with(
            MockTransport::new()
                .on_json(Method::Post, EMBED, 200, &json!({"embedding": [0.4]}))
                .on_json(
                    Method::Post,
                    RPC,
                    200,
                    &json!([{"id": "8", "name": "Wireless Earbuds", "description": null,
                             "price": 159.99, "image": null, "category": null,
                             "featured": null, "stock": null, "similarity": 0.9}]),
                ),
        );

        let response = handle(
            FunctionRequest::post_json("/", &json!({"query": "earbuds"})),
            &supabase,
            MatchOptions::default(),
        )
        .await;

        assert_eq!(response.status, StatusCode::OK);
        let products: Vec<Product> = response.body_json().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Wireless Earbuds");
        assert!(products[0].description.is_empty());
    }

    #[tokio::test]
    async fn test_configured_match_options() {
        let (mock, supabase) = supabase_with(
            MockTransport::new()
                .on_json(Method::Post, EMBED, 200, &json!({"embedding": [1.0]}))
                .on_json(Method::Post, RPC, 200, &json!([])),
        );

        let options = MatchOptions {
            threshold: 0.25,
            count: 3,
        };
        let response = handle(
            FunctionRequest::post_json("/", &json!({"query": "hub"})),
            &supabase,
            options,
        )
        .await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body_json::<Value>().unwrap(), json!([]));
        let params: Value =
            serde_json::from_slice(mock.last_request_to(RPC).unwrap().body().unwrap()).unwrap();
        assert_eq!(params["match_threshold"], 0.25);
        assert_eq!(params["match_count"], 3);
    }

    #[tokio::test]
    async fn test_missing_query_is_400() {
        let (mock, supabase) = supabase_with(MockTransport::new());

        for body in [json!({}), json!({"query": ""}), json!({"query": null})] {
            let response = handle(
                FunctionRequest::post_json("/", &body),
                &supabase,
                MatchOptions::default(),
            )
            .await;
            assert_eq!(response.status, StatusCode::BAD_REQUEST);
            assert_eq!(
                response.body_json::<Value>().unwrap(),
                json!({"error": "Query is required"})
            );
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_query_is_searched() {
        let (mock, supabase) = supabase_with(
            MockTransport::new()
                .on_json(Method::Post, EMBED, 200, &json!({"embedding": [0.0]}))
                .on_json(Method::Post, RPC, 200, &json!([])),
        );

        let response = handle(
            FunctionRequest::post_json("/", &json!({"query": "   "})),
            &supabase,
            MatchOptions::default(),
        )
        .await;

        assert_eq!(response.status, StatusCode::OK);
        let embed: Value =
            serde_json::from_slice(mock.last_request_to(EMBED).unwrap().body().unwrap()).unwrap();
        assert_eq!(embed, json!({"text": "   "}));
    }

    #[tokio::test]
    async fn test_embedding_failure_is_500() {
        let (mock, supabase) = supabase_with(MockTransport::new().on_json(
            Method::Post,
            EMBED,
            500,
            &json!({"error": "model unavailable"}),
        ));

        let response = handle(
            FunctionRequest::post_json("/", &json!({"query": "speaker"})),
            &supabase,
            MatchOptions::default(),
        )
        .await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body_json::<Value>().unwrap(),
            json!({"error": "model unavailable"})
        );
        assert!(mock.last_request_to(RPC).is_none());
    }

    #[tokio::test]
    async fn test_rpc_failure_is_500() {
        let (_, supabase) = supabase_with(
            MockTransport::new()
                .on_json(Method::Post, EMBED, 200, &json!({"embedding": [0.5]}))
                .fail(Method::Post, RPC, "connection reset"),
        );

        let response = handle(
            FunctionRequest::post_json("/", &json!({"query": "speaker"})),
            &supabase,
            MatchOptions::default(),
        )
        .await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_preflight() {
        let (_, supabase) = supabase_with(MockTransport::new());
        let response = handle(
            FunctionRequest::new(Method::Options, "/"),
            &supabase,
            MatchOptions::default(),
        )
        .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.header("access-control-allow-origin"), Some("*"));
    }
}
