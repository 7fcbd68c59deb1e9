//! Order summary: subtotal, shipping, tax and grand total for a cart.

use crate::cart::Cart;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// 10%, in basis points.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1_000;

/// Rates applied on top of the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Tax as basis points of the subtotal (1000 = 10%).
    pub tax_rate_bps: u32,
    /// Flat shipping in minor units of the cart currency.
    pub shipping_minor_units: i64,
}

impl Default for PricingRules {
    /// 10% tax, free shipping.
    fn default() -> Self {
        Self {
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            shipping_minor_units: 0,
        }
    }
}

impl PricingRules {
    /// The tax rate as a percentage, for display.
    pub fn tax_rate_percent(&self) -> f64 {
        f64::from(self.tax_rate_bps) / 100.0
    }
}

/// Pricing breakdown shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderSummary {
    /// Cart total, before shipping and tax.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping_total: Money,
    /// Tax on the subtotal, rounded half up to the nearest minor unit.
    pub tax_total: Money,
    /// subtotal + shipping + tax.
    pub grand_total: Money,
}

impl OrderSummary {
    /// Price `cart` under `rules`. Fails with `Overflow` if a figure leaves `i64`.
    pub fn calculate(cart: &Cart, rules: &PricingRules) -> Result<Self, CommerceError> {
        let subtotal = cart.total();
        let currency = subtotal.currency;
        let shipping_total = Money::new(rules.shipping_minor_units, currency);

        let scaled = i128::from(subtotal.minor_units) * i128::from(rules.tax_rate_bps);
        let tax = (scaled + 5_000).div_euclid(10_000);
        let tax_total = Money::new(
            i64::try_from(tax).map_err(|_| CommerceError::Overflow)?,
            currency,
        );

        let grand_total = Money::checked_sum([subtotal, shipping_total, tax_total].iter(), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            shipping_total,
            tax_total,
            grand_total,
        })
    }
}

impl Cart {
    /// Order summary under the default rules.
    pub fn summary(&self) -> Result<OrderSummary, CommerceError> {
        OrderSummary::calculate(self, &PricingRules::default())
    }
}
