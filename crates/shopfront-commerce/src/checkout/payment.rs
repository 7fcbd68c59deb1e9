//! Payment gateway seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// A payment intent created by the provider for a fixed amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Secret handed to the client to confirm the intent.
    pub client_secret: String,
    /// Amount the intent was created for.
    pub amount: Money,
}

impl PaymentIntent {
    pub fn new(client_secret: impl Into<String>, amount: Money) -> Self {
        Self {
            client_secret: client_secret.into(),
            amount,
        }
    }

    /// The intent id embedded in the client secret (`pi_..._secret_...`).
    pub fn intent_id(&self) -> &str {
        self.client_secret
            .split_once("_secret_")
            .map(|(id, _)| id)
            .unwrap_or(&self.client_secret)
    }
}

/// A tokenized payment method, e.g. a card collected by the provider's UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
}

impl PaymentMethod {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Proof of a successful payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub amount: Money,
}

/// Creates and confirms payments. Failures are
/// [`CommerceError::PaymentFailed`]; nothing is retried.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an intent to charge `amount`.
    async fn create_intent(&self, amount: Money) -> Result<PaymentIntent, CommerceError>;

    /// Confirm an intent with a payment method.
    async fn confirm(
        &self,
        intent: &PaymentIntent,
        method: &PaymentMethod,
    ) -> Result<PaymentReceipt, CommerceError>;
}
