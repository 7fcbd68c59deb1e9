//! Checkout module.
//!
//! Contains the payment gateway seam and the checkout flow that drives it
//! against the cart store.

mod flow;
mod payment;

pub use flow::{Checkout, CheckoutStep, Order};
pub use payment::{PaymentGateway, PaymentIntent, PaymentMethod, PaymentReceipt};
