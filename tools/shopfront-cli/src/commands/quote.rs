//! Cart pricing.

use anyhow::{bail, Context as _, Result};
use serde::Serialize;
use shopfront_commerce::catalog::{Catalog, InMemoryCatalog};
use shopfront_commerce::cart::{Cart, CartLine, CartStore, OrderSummary, PricingRules};
use shopfront_commerce::Money;

use super::QuoteArgs;
use crate::context::Context;

/// One `id[:qty[:color[:size]]]` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    pub id: String,
    pub quantity: i64,
    pub color: Option<String>,
    pub size: Option<String>,
}

impl LineSpec {
    /// Parse a line argument. Quantity defaults to 1; empty color or size
    /// segments mean no variant.
    pub fn parse(line_spec: &str) -> Result<Self> {
        let mut parts = line_spec.split(':');
        let id = parts.next().unwrap_or_default().trim();
        if id.is_empty() {
            bail!("Missing product id in '{line_spec}'");
        }

        let quantity = match parts.next().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid quantity '{raw}' in '{line_spec}'"))?,
        };
        let variant = |part: Option<&str>| {
            part.map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let color = variant(parts.next());
        let size = variant(parts.next());
        if parts.next().is_some() {
            bail!("Too many ':' segments in '{line_spec}'");
        }

        Ok(Self {
            id: id.to_string(),
            quantity,
            color,
            size,
        })
    }
}

#[derive(Serialize)]
struct Quote<'a> {
    lines: &'a [CartLine],
    item_count: i64,
    total: Money,
    total_minor_units: i64,
    summary: OrderSummary,
}

/// Pricing rules from the quote flags, in the cart's currency.
pub fn pricing_rules(tax_bps: u32, shipping: f64, cart: &Cart) -> Result<PricingRules> {
    if !shipping.is_finite() || shipping < 0.0 {
        bail!("Shipping must be a non-negative amount, got {shipping}");
    }
    let shipping = Money::from_decimal(shipping, cart.currency())
        .with_context(|| format!("Shipping out of range: {shipping}"))?;
    Ok(PricingRules {
        tax_rate_bps: tax_bps,
        shipping_minor_units: shipping.minor_units,
    })
}

/// Add every line to a fresh store and return the resulting cart.
///
/// Variant and stock problems are returned as warnings; the cart itself
/// accepts them.
pub fn build_cart(catalog: &InMemoryCatalog, line_specs: &[LineSpec]) -> Result<(Cart, Vec<String>)> {
    let store = CartStore::new();
    let mut warnings = Vec::new();

    for line_spec in line_specs {
        let product = catalog.require(&line_spec.id)?;
        if let Some(color) = &line_spec.color {
            if !product.has_color(color) {
                warnings.push(format!("{} has no color '{}'", product.name, color));
            }
        }
        if let Some(size) = &line_spec.size {
            if !product.has_size(size) {
                warnings.push(format!("{} has no size '{}'", product.name, size));
            }
        }

        store
            .add_to_cart(product, line_spec.quantity, line_spec.color.as_deref(), line_spec.size.as_deref())
            .with_context(|| format!("Cannot add '{}'", line_spec.id))?;
    }

    let cart = store.snapshot();
    for product in catalog.products() {
        let wanted = cart.quantity_of(&product.id);
        if wanted > i64::from(product.stock) {
            warnings.push(format!(
                "{}: {} requested, {} in stock",
                product.name, wanted, product.stock
            ));
        }
    }
    Ok((cart, warnings))
}

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let line_specs = args
        .lines
        .iter()
        .map(|line| LineSpec::parse(line))
        .collect::<Result<Vec<_>>>()?;
    let (cart, warnings) = build_cart(&ctx.catalog, &line_specs)?;

    for warning in &warnings {
        ctx.output.warn(warning);
    }

    let rules = pricing_rules(args.tax_bps, args.shipping, &cart)?;
    let summary = OrderSummary::calculate(&cart, &rules).context("Cannot price the cart")?;
    let total = cart.total();
    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            lines: cart.items(),
            item_count: cart.item_count(),
            total,
            total_minor_units: total.minor_units,
            summary,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    for line in cart.items() {
        let variant: Vec<&str> = [line.color.as_deref(), line.size.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let label = if variant.is_empty() {
            line.product.name.clone()
        } else {
            format!("{} ({})", line.product.name, variant.join(", "))
        };
        let line_total = line.line_total()?;
        ctx.output.list_item(&format!(
            "{} × {} @ {} = {}",
            line.quantity,
            label,
            line.product.price.display(),
            line_total.display()
        ));
    }
    ctx.output.kv("items", &cart.item_count().to_string());
    ctx.output.kv("subtotal", &summary.subtotal.display());
    ctx.output.kv("minor units", &total.minor_units.to_string());

    ctx.output.header("Order summary");
    ctx.output.kv("shipping", &summary.shipping_total.display());
    ctx.output.kv(
        &format!("tax ({}%)", rules.tax_rate_percent()),
        &summary.tax_total.display(),
    );
    ctx.output.kv("total", &summary.grand_total.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_spec(s: &str) -> LineSpec {
        LineSpec::parse(s).unwrap()
    }

    #[test]
    fn test_parse_line_specs() {
        assert_eq!(
            line_spec("1"),
            LineSpec {
                id: "1".into(),
                quantity: 1,
                color: None,
                size: None
            }
        );
        assert_eq!(line_spec("1:2:Black").color.as_deref(), Some("Black"));
        assert_eq!(line_spec("1:2:Black").quantity, 2);

        let size_only = line_spec("3:1::L");
        assert_eq!(size_only.color, None);
        assert_eq!(size_only.size.as_deref(), Some("L"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(LineSpec::parse("").is_err());
        assert!(LineSpec::parse(":2").is_err());
        assert!(LineSpec::parse("1:two").is_err());
        assert!(LineSpec::parse("1:1:Black:M:extra").is_err());
    }

    #[test]
    fn test_build_cart_merges_and_totals() {
        let catalog = InMemoryCatalog::storefront();
        let line_specs = [line_spec("1:2:Black"), line_spec("1:1:Black"), line_spec("5")];

        let (cart, warnings) = build_cart(&catalog, &line_specs).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total().minor_units, 3 * 29999 + 7999);
    }

    #[test]
    fn test_build_cart_warnings() {
        let catalog = InMemoryCatalog::storefront();
        let (cart, warnings) = build_cart(&catalog, &[line_spec("1:11:Purple")]).unwrap();

        assert_eq!(cart.item_count(), 11);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("no color 'Purple'"));
        assert!(warnings[1].contains("11 requested, 10 in stock"));
    }

    #[test]
    fn test_quote_summary_with_flags() {
        let catalog = InMemoryCatalog::storefront();
        let (cart, _) = build_cart(&catalog, &[line_spec("5:2")]).unwrap();

        let default_rules = pricing_rules(1000, 0.0, &cart).unwrap();
        let summary = OrderSummary::calculate(&cart, &default_rules).unwrap();
        assert_eq!(summary.subtotal.minor_units, 15998);
        assert_eq!(summary.tax_total.minor_units, 1600);
        assert_eq!(summary.grand_total.minor_units, 17598);

        let shipped = pricing_rules(0, 4.99, &cart).unwrap();
        let summary = OrderSummary::calculate(&cart, &shipped).unwrap();
        assert_eq!(summary.grand_total.minor_units, 15998 + 499);

        assert!(pricing_rules(1000, -1.0, &cart).is_err());
        assert!(pricing_rules(1000, f64::NAN, &cart).is_err());
    }

    #[test]
    fn test_build_cart_errors() {
        let catalog = InMemoryCatalog::storefront();
        assert!(build_cart(&catalog, &[line_spec("99")]).is_err());
        assert!(build_cart(&catalog, &[line_spec("1:0")]).is_err());
    }
}
