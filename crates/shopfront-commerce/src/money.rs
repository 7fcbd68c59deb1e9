//! Money type for representing monetary values.
//!
//! Amounts are integer minor units (cents for USD) so cart totals are exact
//! sums. Decimal display amounts only appear at the edges: catalog records,
//! browse price bounds and the payment-intent request body.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    MXN,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::CHF => "CHF",
            Currency::MXN => "MXN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::CHF => "CHF",
            Currency::MXN => "MX$",
        }
    }

    /// Number of decimal places in the minor unit.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "CHF" => Some(Currency::CHF),
            "MXN" => Some(Currency::MXN),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the currency's minor unit.
    pub minor_units: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(minor_units: i64, currency: Currency) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Convert a decimal display amount to minor units, rounding half away
    /// from zero.
    ///
    /// Returns `None` for NaN, infinities, and amounts outside the `i64` range.
    ///
    /// ```
    /// use shopfront_commerce::money::{Currency, Money};
    /// let price = Money::from_decimal(29.99, Currency::USD).unwrap();
    /// assert_eq!(price.minor_units, 2999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Option<Self> {
        let scale = 10_f64.powi(currency.decimal_places() as i32);
        let scaled = (amount * scale).round();
        // 2^63 is exactly representable; anything at or past it does not fit.
        if !scaled.is_finite() || scaled.abs() >= 9_223_372_036_854_775_808.0 {
            return None;
        }
        Some(Self::new(scaled as i64, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.minor_units == 0
    }

    pub fn is_negative(&self) -> bool {
        self.minor_units < 0
    }

    /// Convert to a decimal display value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.minor_units as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        format!("{}{}", self.currency.symbol(), self.display_amount())
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", self.to_decimal())
    }

    /// Add another amount; `None` on currency mismatch or overflow.
    pub fn checked_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.minor_units
            .checked_add(other.minor_units)
            .map(|minor| Money::new(minor, self.currency))
    }

    /// Multiply by an integer factor; `None` on overflow.
    pub fn checked_mul(&self, factor: i64) -> Option<Money> {
        self.minor_units
            .checked_mul(factor)
            .map(|minor| Money::new(minor, self.currency))
    }

    /// Sum amounts in one currency; `None` on mismatch or overflow.
    pub fn checked_sum<'a>(
        mut iter: impl Iterator<Item = &'a Money>,
        currency: Currency,
    ) -> Option<Money> {
        iter.try_fold(Money::zero(currency), |acc, m| acc.checked_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(
            Money::from_decimal(299.99, Currency::USD).unwrap().minor_units,
            29999
        );
        assert_eq!(
            Money::from_decimal(1299.99, Currency::USD).unwrap().minor_units,
            129999
        );
        // JPY has no minor unit
        assert_eq!(
            Money::from_decimal(500.0, Currency::JPY).unwrap().minor_units,
            500
        );
    }

    #[test]
    fn test_money_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN, Currency::USD).is_none());
        assert!(Money::from_decimal(f64::INFINITY, Currency::USD).is_none());
        assert!(Money::from_decimal(1e30, Currency::USD).is_none());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
        assert_eq!(Money::zero(Currency::USD).display_amount(), "0.00");
    }

    #[test]
    fn test_checked_arithmetic() {
        let a = Money::new(1000, Currency::USD);
        let b = Money::new(500, Currency::USD);
        assert_eq!(a.checked_add(&b).unwrap().minor_units, 1500);
        assert_eq!(a.checked_mul(3).unwrap().minor_units, 3000);
        assert!(Money::new(i64::MAX, Currency::USD).checked_mul(2).is_none());
    }

    #[test]
    fn test_currency_mismatch_is_none() {
        let usd = Money::new(1000, Currency::USD);
        let eur = Money::new(1000, Currency::EUR);
        assert!(usd.checked_add(&eur).is_none());
    }

    #[test]
    fn test_checked_sum() {
        let amounts = [
            Money::new(2000, Currency::USD),
            Money::new(1000, Currency::USD),
        ];
        let total = Money::checked_sum(amounts.iter(), Currency::USD).unwrap();
        assert_eq!(total.minor_units, 3000);

        let empty: [Money; 0] = [];
        assert!(Money::checked_sum(empty.iter(), Currency::USD)
            .unwrap()
            .is_zero());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::USD));
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
