//! Storefront-side client for the two functions.
//!
//! [`FunctionsClient`] is the remote [`SearchService`] and [`PaymentGateway`]:
//! search and intent creation go through the deployed functions, and payment
//! confirmation goes straight to Stripe with the publishable key.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;
use shopfront_commerce::catalog::Product;
use shopfront_commerce::checkout::{PaymentGateway, PaymentIntent, PaymentMethod, PaymentReceipt};
use shopfront_commerce::search::SearchService;
use shopfront_commerce::{CommerceError, Money};
use shopfront_data::FetchClient;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::FunctionError;
use crate::payment_intent::{self, CreatePaymentIntentResponse};
use crate::search;
use crate::stripe::StripeClient;

#[derive(Debug, Clone)]
pub struct FunctionsClient {
    fetch: FetchClient,
    config: ClientConfig,
}

impl FunctionsClient {
    pub fn new(fetch: FetchClient, config: ClientConfig) -> Self {
        Self { fetch, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/{}", self.config.functions_url.trim_end_matches('/'), name)
    }

    async fn invoke<B, T>(&self, name: &str, body: &B) -> Result<T, FunctionError>
    where
        B: Serialize + ?Sized + Sync,
        T: serde::de::DeserializeOwned,
    {
        let value = self
            .fetch
            .post(self.function_url(name))
            .bearer_auth(&self.config.anon_key)
            .json(body)?
            .send()
            .await?
            .error_for_status()?
            .json()?;
        Ok(value)
    }
}

#[async_trait]
impl SearchService for FunctionsClient {
    async fn search(&self, query: &str) -> Result<Vec<Product>, CommerceError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let products: Vec<Product> = self
            .invoke(search::FUNCTION_NAME, &json!({ "query": query }))
            .await
            .map_err(|e| {
                warn!(query, error = %e, "Search request failed");
                CommerceError::SearchUnavailable(e.to_string())
            })?;

        debug!(query, results = products.len(), "Search results received");
        Ok(products)
    }
}

#[async_trait]
impl PaymentGateway for FunctionsClient {
    async fn create_intent(&self, amount: Money) -> Result<PaymentIntent, CommerceError> {
        let body = json!({
            "amount": amount.to_decimal(),
            "currency": amount.currency.code().to_ascii_lowercase(),
        });

        let created: CreatePaymentIntentResponse = self
            .invoke(payment_intent::FUNCTION_NAME, &body)
            .await
            .map_err(|e| CommerceError::PaymentFailed(e.to_string()))?;

        Ok(PaymentIntent::new(created.client_secret, amount))
    }

    async fn confirm(
        &self,
        intent: &PaymentIntent,
        method: &PaymentMethod,
    ) -> Result<PaymentReceipt, CommerceError> {
        let stripe = StripeClient::new(
            self.fetch.clone(),
            &self.config.stripe_api_base,
            &self.config.stripe_publishable_key,
        );

        let confirmed = stripe
            .confirm_payment_intent(intent.intent_id(), &intent.client_secret, &method.id)
            .await
            .map_err(|e| CommerceError::PaymentFailed(e.to_string()))?;

        if !confirmed.is_succeeded() {
            return Err(CommerceError::PaymentFailed(format!(
                "Payment not completed: {}",
                confirmed.status
            )));
        }

        Ok(PaymentReceipt {
            payment_id: confirmed.id,
            amount: intent.amount,
        })
    }
}
