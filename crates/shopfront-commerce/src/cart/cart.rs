//! Cart and cart line types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::Serialize;

/// One entry in the cart: a product variant and its quantity.
///
/// Two lines are the same line when product id, color and size all match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
    /// The product being purchased.
    pub product: Product,
    /// Quantity, always positive inside a [`Cart`].
    pub quantity: i64,
    /// Selected color variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Selected size variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    pub fn new(
        product: Product,
        quantity: i64,
        color: Option<String>,
        size: Option<String>,
    ) -> Self {
        Self {
            product,
            quantity,
            color,
            size,
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Check whether this line has the given (product id, color, size) identity.
    pub fn is_variant(&self, product_id: &ProductId, color: Option<&str>, size: Option<&str>) -> bool {
        self.product.id == *product_id
            && self.color.as_deref() == color
            && self.size.as_deref() == size
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.product
            .price
            .checked_mul(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A shopping cart: lines in insertion order plus their derived total.
///
/// The total is never stored independently; every constructor recomputes it
/// from the lines, so `total == Σ price × quantity` holds for every `Cart`
/// value that exists. Quantities are positive and their sum fits in `i64`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cart {
    items: Vec<CartLine>,
    total: Money,
}

impl Cart {
    /// Create an empty USD cart.
    pub fn new() -> Self {
        Self::empty(Currency::USD)
    }

    /// Create an empty cart in the given currency.
    pub fn empty(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(currency),
        }
    }

    /// Build a cart from lines, computing the total.
    ///
    /// Fails on a non-positive quantity, and with `Overflow` when either the
    /// total or the unit count leaves `i64`. Free products only hit the latter.
    pub fn from_lines(items: Vec<CartLine>, currency: Currency) -> Result<Self, CommerceError> {
        let mut total = Money::zero(currency);
        let mut units: i64 = 0;
        for line in &items {
            if line.quantity <= 0 {
                return Err(CommerceError::InvalidQuantity(line.quantity));
            }
            units = units
                .checked_add(line.quantity)
                .ok_or(CommerceError::Overflow)?;
            let line_total = line.line_total()?;
            total = total.checked_add(&line_total).ok_or_else(|| {
                if line_total.currency != currency {
                    CommerceError::CurrencyMismatch {
                        expected: currency.code().to_string(),
                        got: line_total.currency.code().to_string(),
                    }
                } else {
                    CommerceError::Overflow
                }
            })?;
        }
        Ok(Self { items, total })
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    pub fn currency(&self) -> Currency {
        self.total.currency
    }

    /// Total number of units (sum of quantities). Never overflows, see
    /// [`Cart::from_lines`].
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line with the given identity.
    pub fn line(&self, product_id: &ProductId, color: Option<&str>, size: Option<&str>) -> Option<&CartLine> {
        self.items
            .iter()
            .find(|l| l.is_variant(product_id, color, size))
    }

    /// Units of a product across all of its variant lines.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.items
            .iter()
            .filter(|l| l.product_id() == product_id)
            .map(|l| l.quantity)
            .sum()
    }

    /// Units of `product` that can still be added before reaching its stock.
    ///
    /// The cart itself never clamps; this is for callers that enforce stock.
    pub fn remaining_stock(&self, product: &Product) -> u32 {
        let in_cart = self.quantity_of(&product.id).max(0);
        let remaining = i64::from(product.stock) - in_cart;
        u32::try_from(remaining.max(0)).unwrap_or(0)
    }

    /// This cart minus the units of `paid`, matched line by line on identity.
    ///
    /// Lines that drop to zero go away; anything not in `paid` stays.
    pub fn without(&self, paid: &Cart) -> Result<Cart, CommerceError> {
        let items = self
            .items
            .iter()
            .filter_map(|line| {
                let paid_units = paid
                    .line(line.product_id(), line.color.as_deref(), line.size.as_deref())
                    .map_or(0, |p| p.quantity);
                let left = line.quantity - paid_units.min(line.quantity);
                (left > 0).then(|| CartLine {
                    quantity: left,
                    ..line.clone()
                })
            })
            .collect();
        Cart::from_lines(items, self.currency())
    }

    pub fn into_items(self) -> Vec<CartLine> {
        self.items
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, minor_units: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::new(minor_units, Currency::USD))
            .with_stock(10)
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
        assert_eq!(cart.currency(), Currency::USD);
    }

    #[test]
    fn test_from_lines_computes_total() {
        let cart = Cart::from_lines(
            vec![
                CartLine::new(product("a", 1000), 2, None, None),
                CartLine::new(product("b", 2000), 1, Some("Black".into()), None),
            ],
            Currency::USD,
        )
        .unwrap();

        assert_eq!(cart.total().minor_units, 4000);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_from_lines_rejects_foreign_currency() {
        let euro = Product::new("e", "Euro thing", Money::new(500, Currency::EUR));
        let result = Cart::from_lines(vec![CartLine::new(euro, 1, None, None)], Currency::USD);
        assert!(matches!(result, Err(CommerceError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_from_lines_overflow() {
        let pricey = product("p", i64::MAX / 2 + 1);
        let result = Cart::from_lines(vec![CartLine::new(pricey, 2, None, None)], Currency::USD);
        assert_eq!(result.unwrap_err(), CommerceError::Overflow);
    }

    #[test]
    fn test_from_lines_rejects_unit_overflow_for_free_products() {
        let free = product("f", 0);
        let result = Cart::from_lines(
            vec![
                CartLine::new(free.clone(), i64::MAX, None, None),
                CartLine::new(free, 1, Some("Black".into()), None),
            ],
            Currency::USD,
        );
        assert_eq!(result.unwrap_err(), CommerceError::Overflow);
    }

    #[test]
    fn test_from_lines_rejects_non_positive_quantity() {
        let result = Cart::from_lines(vec![CartLine::new(product("a", 100), 0, None, None)], Currency::USD);
        assert_eq!(result.unwrap_err(), CommerceError::InvalidQuantity(0));
    }

    #[test]
    fn test_line_lookup_by_identity() {
        let a = product("a", 1000);
        let cart = Cart::from_lines(
            vec![
                CartLine::new(a.clone(), 1, None, None),
                CartLine::new(a.clone(), 3, Some("Black".into()), Some("L".into())),
            ],
            Currency::USD,
        )
        .unwrap();

        let id = ProductId::new("a");
        assert_eq!(cart.line(&id, None, None).unwrap().quantity, 1);
        assert_eq!(cart.line(&id, Some("Black"), Some("L")).unwrap().quantity, 3);
        assert!(cart.line(&id, Some("Black"), None).is_none());
        assert_eq!(cart.quantity_of(&id), 4);
        assert_eq!(cart.remaining_stock(&a), 6);
    }

    #[test]
    fn test_without_subtracts_paid_units() {
        let a = product("a", 1000);
        let b = product("b", 500);
        let paid = Cart::from_lines(vec![CartLine::new(a.clone(), 2, None, None)], Currency::USD).unwrap();
        let now = Cart::from_lines(
            vec![
                CartLine::new(a.clone(), 3, None, None),
                CartLine::new(a.clone(), 1, Some("Black".into()), None),
                CartLine::new(b, 1, None, None),
            ],
            Currency::USD,
        )
        .unwrap();

        let left = now.without(&paid).unwrap();
        assert_eq!(left.line_count(), 3);
        assert_eq!(left.items()[0].quantity, 1);
        assert_eq!(left.total().minor_units, 1000 + 1000 + 500);

        assert!(paid.without(&paid).unwrap().is_empty());
    }

    #[test]
    fn test_serializes_items_and_total() {
        let value = serde_json::to_value(Cart::new()).unwrap();
        assert_eq!(value["items"], serde_json::json!([]));
        assert_eq!(value["total"]["minor_units"], 0);
    }
}
