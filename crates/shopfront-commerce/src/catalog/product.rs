//! Product type and its wire record.

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Serializes through [`ProductRecord`], the flat shape used by the catalog
/// JSON and the search function (`price` as a decimal number plus a currency
/// code).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord", into = "ProductRecord")]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Image URL.
    pub image: String,
    /// Category name.
    pub category: String,
    /// Shown in the featured section.
    pub featured: bool,
    /// Average customer rating.
    pub rating: f64,
    /// Maximum purchasable quantity.
    pub stock: u32,
    /// Color variants (empty when the product has none).
    pub colors: Vec<String>,
    /// Size variants (empty when the product has none).
    pub sizes: Vec<String>,
}

impl Product {
    /// Create a product with the required fields; the rest start empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            featured: false,
            rating: 0.0,
            stock: 0,
            colors: Vec::new(),
            sizes: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    /// Check if the product offers the given color variant.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Check if the product offers the given size variant.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Check the catalog invariants: non-empty id, non-negative price.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.id.as_str().is_empty() {
            return Err(invalid(&self.id, "empty id"));
        }
        if self.price.is_negative() {
            return Err(invalid(&self.id, "negative price"));
        }
        Ok(())
    }
}

fn invalid(id: &ProductId, reason: impl Into<String>) -> CommerceError {
    CommerceError::InvalidProduct {
        id: id.to_string(),
        reason: reason.into(),
    }
}

/// Flat wire representation of a [`Product`].
///
/// Everything but `id`, `name` and `price` may be missing or `null`; rows
/// from the `match_products` RPC carry SQL `NULL`s in nullable columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<Vec<String>>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = CommerceError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = ProductId::new(record.id);

        let currency = match record.currency.as_deref() {
            None => Currency::USD,
            Some(code) => Currency::from_code(code)
                .ok_or_else(|| invalid(&id, format!("unknown currency {code}")))?,
        };
        if record.price.is_nan() || record.price < 0.0 {
            return Err(invalid(&id, format!("invalid price {}", record.price)));
        }
        let price = Money::from_decimal(record.price, currency)
            .ok_or_else(|| invalid(&id, format!("price out of range {}", record.price)))?;
        let stock = record.stock.unwrap_or_default();
        let stock =
            u32::try_from(stock).map_err(|_| invalid(&id, format!("invalid stock {stock}")))?;

        let product = Product {
            id,
            name: record.name,
            description: record.description.unwrap_or_default(),
            price,
            image: record.image.unwrap_or_default(),
            category: record.category.unwrap_or_default(),
            featured: record.featured.unwrap_or_default(),
            rating: record.rating.unwrap_or_default(),
            stock,
            colors: record.colors.unwrap_or_default(),
            sizes: record.sizes.unwrap_or_default(),
        };
        product.validate()?;
        Ok(product)
    }
}

impl From<Product> for ProductRecord {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into_inner(),
            name: product.name,
            description: Some(product.description),
            price: product.price.to_decimal(),
            currency: Some(product.price.currency.code().to_string()),
            image: Some(product.image),
            category: Some(product.category),
            featured: Some(product.featured),
            rating: Some(product.rating),
            stock: Some(i64::from(product.stock)),
            colors: Some(product.colors),
            sizes: Some(product.sizes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_builder() {
        let product = Product::new("1", "Headphones", Money::new(29999, Currency::USD))
            .with_category("Audio")
            .with_stock(10)
            .with_colors(["Black", "White"]);

        assert_eq!(product.category, "Audio");
        assert_eq!(product.stock, 10);
        assert!(product.has_color("White"));
        assert!(!product.has_size("M"));
    }

    #[test]
    fn test_product_from_record_json() {
        let json = r#"{
            "id": "5",
            "name": "Bluetooth Speaker",
            "description": "Portable speaker",
            "price": 79.99,
            "currency": "USD",
            "category": "Audio",
            "featured": true,
            "rating": 4.3,
            "stock": 25,
            "colors": ["Black", "Blue"],
            "similarity": 0.82
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("5"));
        assert_eq!(product.price, Money::new(7999, Currency::USD));
        assert_eq!(product.stock, 25);
        assert_eq!(product.colors.len(), 2);
        assert!(product.sizes.is_empty());
    }

    #[test]
    fn test_product_from_record_with_null_columns() {
        let json = r#"{
            "id": "8",
            "name": "Wireless Earbuds",
            "description": null,
            "price": 159.99,
            "currency": null,
            "image": null,
            "category": null,
            "featured": null,
            "rating": null,
            "stock": null,
            "colors": null
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Money::new(15999, Currency::USD));
        assert!(product.description.is_empty());
        assert!(product.image.is_empty());
        assert!(product.category.is_empty());
        assert!(!product.featured);
        assert_eq!(product.stock, 0);
        assert!(product.colors.is_empty());
    }

    #[test]
    fn test_product_record_rejects_negative_price() {
        let json = r#"{"id": "x", "name": "Broken", "price": -1.0}"#;
        let err = serde_json::from_str::<Product>(json).unwrap_err();
        assert!(err.to_string().contains("invalid price"));
    }

    #[test]
    fn test_product_record_rejects_negative_stock() {
        let json = r#"{"id": "x", "name": "Broken", "price": 1.0, "stock": -3}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_product_record_rejects_unknown_currency() {
        let json = r#"{"id": "x", "name": "Broken", "price": 1.0, "currency": "DOGE"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_product_serializes_flat() {
        let product = Product::new("3", "Laptop", Money::new(129999, Currency::USD));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], serde_json::json!(1299.99));
        assert_eq!(value["currency"], "USD");
        assert_eq!(value["id"], "3");
    }
}
