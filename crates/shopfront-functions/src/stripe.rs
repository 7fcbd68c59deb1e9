//! Minimal Stripe REST client: create and confirm payment intents.

use serde::Deserialize;
use shopfront_commerce::Money;
use shopfront_data::FetchClient;
use tracing::info;

use crate::error::FunctionError;

/// The parts of a Stripe PaymentIntent object the storefront uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    pub status: String,
    pub amount: i64,
    pub currency: String,
}

impl StripePaymentIntent {
    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }
}

/// Stripe API client authenticated with one key.
///
/// The secret key creates intents; the publishable key can only confirm an
/// intent whose client secret it is given.
#[derive(Debug, Clone)]
pub struct StripeClient {
    fetch: FetchClient,
    api_base: String,
    key: String,
}

impl StripeClient {
    pub fn new(fetch: FetchClient, api_base: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            fetch,
            api_base: api_base.into(),
            key: key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }

    /// Create a payment intent for `amount`, with automatic payment methods.
    pub async fn create_payment_intent(
        &self,
        amount: Money,
    ) -> Result<StripePaymentIntent, FunctionError> {
        let form = [
            ("amount", amount.minor_units.to_string()),
            ("currency", amount.currency.code().to_ascii_lowercase()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
        ];

        let intent: StripePaymentIntent = self
            .fetch
            .post(self.url("/v1/payment_intents"))
            .bearer_auth(&self.key)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()?;

        info!(intent_id = %intent.id, amount = intent.amount, currency = %intent.currency, "Created payment intent");
        Ok(intent)
    }

    /// Confirm an intent with a payment method.
    pub async fn confirm_payment_intent(
        &self,
        intent_id: &str,
        client_secret: &str,
        payment_method: &str,
    ) -> Result<StripePaymentIntent, FunctionError> {
        let form = [
            ("client_secret", client_secret),
            ("payment_method", payment_method),
        ];

        let intent: StripePaymentIntent = self
            .fetch
            .post(self.url(&format!("/v1/payment_intents/{intent_id}/confirm")))
            .bearer_auth(&self.key)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .json()?;

        info!(intent_id = %intent.id, status = %intent.status, "Confirmed payment intent");
        Ok(intent)
    }
}
