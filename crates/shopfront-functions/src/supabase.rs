//! Supabase calls used by product search: the embedding function and the
//! `match_products` similarity RPC.

use serde::{Deserialize, Serialize};
use shopfront_commerce::catalog::{Product, ProductRecord};
use shopfront_data::FetchClient;
use tracing::debug;

use crate::error::FunctionError;

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct MatchProductsParams<'a> {
    query_embedding: &'a [f32],
    match_threshold: f32,
    match_count: u32,
}

/// Supabase project client authenticated with the anon key.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    fetch: FetchClient,
    url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(fetch: FetchClient, url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            fetch,
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Embed `text` with the `generate-embedding` function.
    pub async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, FunctionError> {
        let response: EmbeddingResponse = self
            .fetch
            .post(format!("{}/functions/v1/generate-embedding", self.url))
            .bearer_auth(&self.anon_key)
            .json(&EmbeddingRequest { text })?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        if response.embedding.is_empty() {
            return Err(FunctionError::Upstream(
                "Embedding service returned an empty vector".to_string(),
            ));
        }
        debug!(dimensions = response.embedding.len(), "Generated embedding");
        Ok(response.embedding)
    }

    /// Products most similar to `embedding`, best match first.
    pub async fn match_products(
        &self,
        embedding: &[f32],
        match_threshold: f32,
        match_count: u32,
    ) -> Result<Vec<Product>, FunctionError> {
        let rows: Vec<ProductRecord> = self
            .fetch
            .post(format!("{}/rest/v1/rpc/match_products", self.url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&MatchProductsParams {
                query_embedding: embedding,
                match_threshold,
                match_count,
            })?
            .send()
            .await?
            .error_for_status()?
            .json()?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FunctionError::Upstream(format!("Invalid product from search: {e}")))?;
        debug!(matches = products.len(), "Matched products");
        Ok(products)
    }
}
