//! Serverless functions for the Shopfront storefront.
//!
//! - **create-payment-intent**: converts a display amount to minor units and
//!   creates a Stripe payment intent ([`payment_intent`])
//! - **search**: embeds the query and runs the `match_products` similarity
//!   RPC ([`search`])
//!
//! Handlers work on host-independent [`FunctionRequest`] /
//! [`FunctionResponse`] values; the Spin components under `workloads/` only
//! convert to and from the wire. [`FunctionsClient`] is the storefront side:
//! it implements the commerce crate's search and payment traits against the
//! deployed functions.

pub mod config;
pub mod error;
pub mod invocation;
pub mod payment_intent;
pub mod search;
pub mod stripe;
pub mod supabase;
pub mod telemetry;

#[cfg(not(target_arch = "wasm32"))]
mod client;
#[cfg(target_arch = "wasm32")]
pub mod component;

#[cfg(not(target_arch = "wasm32"))]
pub use client::FunctionsClient;
pub use config::{ClientConfig, FunctionConfig, ShopfrontConfig};
pub use error::FunctionError;
pub use invocation::{FunctionRequest, FunctionResponse, CORS_HEADERS};
pub use search::MatchOptions;
pub use stripe::StripeClient;
pub use supabase::SupabaseClient;
pub use telemetry::init_tracing;
