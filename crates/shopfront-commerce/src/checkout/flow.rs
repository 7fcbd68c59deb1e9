//! Checkout flow state machine.

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::cart::{CartLine, CartStore};
use crate::checkout::{PaymentGateway, PaymentIntent, PaymentMethod};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;

/// Steps in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Cart review, nothing requested from the provider yet.
    Review,
    /// Intent created, waiting for a payment method.
    AwaitingPayment,
    /// Payment confirmed and cart cleared.
    Complete,
    /// Intent creation or payment failed. The cart is untouched.
    Failed,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "review",
            CheckoutStep::AwaitingPayment => "awaiting_payment",
            CheckoutStep::Complete => "complete",
            CheckoutStep::Failed => "failed",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "Review",
            CheckoutStep::AwaitingPayment => "Payment",
            CheckoutStep::Complete => "Complete",
            CheckoutStep::Failed => "Failed",
        }
    }
}

/// Summary of a paid order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    /// Provider payment id.
    pub payment_id: String,
    /// Lines as they were when payment was confirmed.
    pub lines: Vec<CartLine>,
    pub total: Money,
}

/// Drives one checkout against a cart store and a payment gateway.
///
/// `begin` creates an intent for the current cart total. `pay` confirms it and,
/// only on success, removes the paid lines from the cart (a clear, unless the
/// cart was changed while the payment was in flight). After a failure `begin` may be called
/// again.
pub struct Checkout<'a, G: PaymentGateway + ?Sized> {
    store: &'a CartStore,
    gateway: &'a G,
    step: CheckoutStep,
    intent: Option<PaymentIntent>,
    order: Option<Order>,
}

impl<'a, G: PaymentGateway + ?Sized> Checkout<'a, G> {
    pub fn new(store: &'a CartStore, gateway: &'a G) -> Self {
        Self {
            store,
            gateway,
            step: CheckoutStep::Review,
            intent: None,
            order: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn intent(&self) -> Option<&PaymentIntent> {
        self.intent.as_ref()
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// Create a payment intent for the current cart total.
    pub async fn begin(&mut self) -> Result<&PaymentIntent, CommerceError> {
        if !matches!(self.step, CheckoutStep::Review | CheckoutStep::Failed) {
            return Err(self.transition_error(CheckoutStep::AwaitingPayment));
        }

        let cart = self.store.snapshot();
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        match self.gateway.create_intent(cart.total()).await {
            Ok(intent) => {
                info!(amount = %intent.amount, "Payment intent created");
                self.step = CheckoutStep::AwaitingPayment;
                Ok(&*self.intent.insert(intent))
            }
            Err(e) => {
                error!(error = %e, "Failed to create payment intent");
                self.step = CheckoutStep::Failed;
                self.intent = None;
                Err(e)
            }
        }
    }

    /// Confirm the intent with `method`. Clears the cart on success.
    pub async fn pay(&mut self, method: &PaymentMethod) -> Result<&Order, CommerceError> {
        let intent = match (&self.step, &self.intent) {
            (CheckoutStep::AwaitingPayment, Some(intent)) => intent.clone(),
            _ => return Err(self.transition_error(CheckoutStep::Complete)),
        };

        let cart = self.store.snapshot();
        if cart.total() != intent.amount {
            self.step = CheckoutStep::Failed;
            return Err(CommerceError::CartChanged {
                intent: intent.amount.to_string(),
                cart: cart.total().to_string(),
            });
        }

        let receipt = match self.gateway.confirm(&intent, method).await {
            Ok(receipt) => receipt,
            Err(e) => {
                error!(error = %e, intent = intent.intent_id(), "Payment failed");
                self.step = CheckoutStep::Failed;
                return Err(e);
            }
        };

        if self.store.settle(&cart) {
            warn!(intent = intent.intent_id(), "Cart changed during payment; kept unpaid lines");
        }
        self.step = CheckoutStep::Complete;
        let order = Order {
            id: OrderId::generate(),
            payment_id: receipt.payment_id,
            lines: cart.into_items(),
            total: intent.amount,
        };
        info!(order_id = %order.id, total = %order.total, "Order paid");
        Ok(&*self.order.insert(order))
    }

    fn transition_error(&self, to: CheckoutStep) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}
