//! E-commerce domain types and logic for the Shopfront storefront.
//!
//! - **Catalog**: products and read-only catalog lookups
//! - **Cart**: immutable cart values, the action reducer and the shared store
//! - **Search**: catalog browse queries and the ranked search seam
//! - **Checkout**: payment gateway seam and the checkout flow
//!
//! # Example
//!
//! ```rust
//! use shopfront_commerce::prelude::*;
//!
//! let catalog = InMemoryCatalog::storefront();
//! let store = CartStore::new();
//!
//! let headphones = catalog.get_by_id("1").unwrap();
//! store.add_to_cart(headphones, 2, Some("Black"), None).unwrap();
//!
//! let cart = store.snapshot();
//! assert_eq!(cart.total().display(), "$599.98");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Catalog, InMemoryCatalog, Product, ProductRecord};

    // Cart
    pub use crate::cart::{
        reduce, Cart, CartAction, CartLine, CartStore, OrderSummary, PricingRules,
    };

    // Checkout
    pub use crate::checkout::{
        Checkout, CheckoutStep, Order, PaymentGateway, PaymentIntent, PaymentMethod,
        PaymentReceipt,
    };

    // Search
    pub use crate::search::{
        BrowseQuery, CatalogSearch, Filter, SearchService, SortOption, SEARCH_DEBOUNCE,
    };
}
