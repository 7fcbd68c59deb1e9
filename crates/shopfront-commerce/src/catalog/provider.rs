//! Read-only catalog lookups.

use std::collections::{BTreeSet, HashMap};

use crate::catalog::{storefront_products, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Read-only access to the purchasable products.
///
/// Implementors only need [`Catalog::products`]; the lookups have linear
/// default implementations.
pub trait Catalog {
    /// All products in catalog order.
    fn products(&self) -> &[Product];

    /// Look up a product by id.
    fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products().iter().find(|p| p.id == *id)
    }

    /// Products flagged as featured, in catalog order.
    fn featured(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.featured).collect()
    }

    /// Products in the given category, in catalog order.
    fn by_category(&self, category: &str) -> Vec<&Product> {
        self.products()
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Distinct category names.
    fn categories(&self) -> BTreeSet<String> {
        self.products().iter().map(|p| p.category.clone()).collect()
    }
}

/// A catalog held in memory for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl InMemoryCatalog {
    /// Build a catalog, rejecting invalid products and duplicate ids.
    pub fn new(products: Vec<Product>) -> Result<Self, CommerceError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CommerceError::DuplicateProduct(product.id.to_string()));
            }
        }
        Ok(Self { products, index })
    }

    /// Load a catalog from a JSON array of product records.
    pub fn from_json(json: &str) -> Result<Self, CommerceError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// The storefront's built-in catalog.
    pub fn storefront() -> Self {
        let products = storefront_products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, p)| (p.id.clone(), position))
            .collect();
        Self { products, index }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product or fail with [`CommerceError::ProductNotFound`].
    pub fn require(&self, id: &str) -> Result<&Product, CommerceError> {
        self.get_by_id(id)
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }
}

impl Catalog for InMemoryCatalog {
    fn products(&self) -> &[Product] {
        &self.products
    }

    fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.index
            .get(&ProductId::new(id))
            .and_then(|&position| self.products.get(position))
    }
}
