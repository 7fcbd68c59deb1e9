//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Quantity must be a positive integer.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Product priced in a different currency than the cart.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Two catalog entries share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),

    /// Product record failed validation.
    #[error("Invalid product {id}: {reason}")]
    InvalidProduct { id: String, reason: String },

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart total moved after the payment intent was created.
    #[error("Cart changed since payment was started: intent for {intent}, cart now {cart}")]
    CartChanged { intent: String, cart: String },

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Search backend failed.
    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    /// Payment provider failed or rejected the payment.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
