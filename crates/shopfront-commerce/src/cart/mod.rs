//! Shopping cart module.
//!
//! A [`Cart`] is an immutable value; [`reduce`] turns a cart and a
//! [`CartAction`] into the next cart, and [`CartStore`] holds the current
//! cart for a session.

mod action;
#[allow(clippy::module_inception)]
mod cart;
mod pricing;
mod store;

pub use action::{reduce, CartAction};
pub use cart::{Cart, CartLine};
pub use pricing::{OrderSummary, PricingRules, DEFAULT_TAX_RATE_BPS};
pub use store::CartStore;
