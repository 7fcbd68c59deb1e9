//! Product catalog module.
//!
//! Contains the product type, the read-only catalog provider, and the
//! storefront's built-in product list.

mod product;
mod provider;
mod seed;

pub use product::{Product, ProductRecord};
pub use provider::{Catalog, InMemoryCatalog};
pub use seed::storefront_products;
