//! Product filters.

use crate::catalog::Product;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A predicate over catalog products.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Case-insensitive substring of the name or the description.
    Text(String),
    /// Exact category name.
    Category(String),
    /// Inclusive price range. Products in another currency never match.
    PriceRange { min: Money, max: Money },
}

impl Filter {
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    pub fn category(name: impl Into<String>) -> Self {
        Filter::Category(name.into())
    }

    pub fn price_range(min: Money, max: Money) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Check whether a product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Text(query) => {
                let needle = query.to_lowercase();
                product.name.to_lowercase().contains(&needle)
                    || product.description.to_lowercase().contains(&needle)
            }
            Filter::Category(category) => product.category == *category,
            Filter::PriceRange { min, max } => {
                product.price.currency == min.currency
                    && product.price.currency == max.currency
                    && (min.minor_units..=max.minor_units).contains(&product.price.minor_units)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn speaker() -> Product {
        Product::new("5", "Bluetooth Speaker", Money::new(7999, Currency::USD))
            .with_description("Water-resistant and perfect for outdoor adventures.")
            .with_category("Audio")
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let product = speaker();
        assert!(Filter::text("bluetooth").matches(&product));
        assert!(Filter::text("OUTDOOR").matches(&product));
        assert!(!Filter::text("laptop").matches(&product));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let product = speaker();
        let usd = |m| Money::new(m, Currency::USD);
        assert!(Filter::price_range(usd(7999), usd(7999)).matches(&product));
        assert!(!Filter::price_range(usd(8000), usd(9000)).matches(&product));
        assert!(!Filter::price_range(
            Money::new(0, Currency::EUR),
            Money::new(100000, Currency::EUR)
        )
        .matches(&product));
    }

    #[test]
    fn test_category_is_exact() {
        let product = speaker();
        assert!(Filter::category("Audio").matches(&product));
        assert!(!Filter::category("audio").matches(&product));
    }
}
