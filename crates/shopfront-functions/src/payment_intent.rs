//! The create-payment-intent function.
//!
//! `POST {amount, currency?}` with a decimal amount in display units. The
//! amount is converted to integer minor units and submitted to Stripe; the
//! reply is `{clientSecret}`.

use serde::{Deserialize, Serialize};
use shopfront_commerce::{Currency, Money};
use tracing::info;

use crate::error::FunctionError;
use crate::invocation::{serve, FunctionRequest, FunctionResponse};
use crate::stripe::StripeClient;

pub const FUNCTION_NAME: &str = "create-payment-intent";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Convert a display amount to minor units of `currency_code`.
///
/// Missing or zero amounts are "Amount is required"; negative or non-finite
/// amounts and unknown currencies are rejected.
pub fn to_minor_units(amount: Option<f64>, currency_code: &str) -> Result<Money, FunctionError> {
    let amount = match amount {
        Some(a) if a != 0.0 => a,
        _ => return Err(FunctionError::bad_request("Amount is required")),
    };
    if !amount.is_finite() || amount < 0.0 {
        return Err(FunctionError::bad_request(format!(
            "Amount must be a positive number, got {amount}"
        )));
    }
    let currency = Currency::from_code(currency_code).ok_or_else(|| {
        FunctionError::bad_request(format!("Unsupported currency: {currency_code}"))
    })?;

    let money = Money::from_decimal(amount, currency)
        .ok_or_else(|| FunctionError::bad_request(format!("Amount out of range: {amount}")))?;
    if money.is_zero() {
        return Err(FunctionError::bad_request(format!(
            "Amount is below the smallest {} unit",
            currency.code()
        )));
    }
    Ok(money)
}

/// Validate the request and create the intent.
pub async fn create_payment_intent(
    request: &CreatePaymentIntentRequest,
    stripe: &StripeClient,
) -> Result<CreatePaymentIntentResponse, FunctionError> {
    let currency = request.currency.as_deref().unwrap_or("usd");
    let amount = to_minor_units(request.amount, currency)?;

    let intent = stripe.create_payment_intent(amount).await?;
    let client_secret = intent.client_secret.ok_or_else(|| {
        FunctionError::Upstream("Stripe returned no client secret".to_string())
    })?;

    info!(amount = %amount, "Payment intent ready");
    Ok(CreatePaymentIntentResponse { client_secret })
}

/// Full HTTP handling: preflight, method check, body parsing, errors.
pub async fn handle(request: FunctionRequest, stripe: &StripeClient) -> FunctionResponse {
    serve(FUNCTION_NAME, request, |request| async move {
        let body: CreatePaymentIntentRequest = request.json()?;
        create_payment_intent(&body, stripe).await
    })
    .await
}
