//! Shop listing query.

use anyhow::{bail, Context as _, Result};
use shopfront_commerce::search::BrowseQuery;
use shopfront_commerce::search::SortOption;
use shopfront_commerce::{Currency, Money};

use super::BrowseArgs;
use crate::context::Context;

/// Run the browse command.
pub fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args)?;
    let results = query.run(&ctx.catalog);

    ctx.output.header(&format!(
        "{} result(s), {}",
        results.len(),
        query.sort.display_name()
    ));
    ctx.output.products(&results);
    Ok(())
}

fn build_query(args: &BrowseArgs) -> Result<BrowseQuery> {
    let mut query = BrowseQuery::new();

    if let Some(q) = &args.q {
        query = query.with_query(q.as_str());
    }
    if let Some(category) = &args.category {
        query = query.with_category(category.as_str());
    }

    let min = match args.min_price {
        Some(amount) => dollars(amount).context("Invalid --min-price")?,
        None => query.min_price,
    };
    let max = match args.max_price {
        Some(amount) => dollars(amount).context("Invalid --max-price")?,
        None => query.max_price,
    };
    if min.minor_units > max.minor_units {
        bail!("--min-price {} is above --max-price {}", min, max);
    }
    query = query.with_price_range(min, max);

    let Some(sort) = SortOption::from_str(&args.sort) else {
        bail!(
            "Unknown sort '{}' (expected featured, price-low, price-high, name or catalog)",
            args.sort
        );
    };
    Ok(query.with_sort(sort))
}

fn dollars(amount: f64) -> Result<Money> {
    if amount.is_nan() || amount < 0.0 {
        bail!("price must be a non-negative number, got {amount}");
    }
    Money::from_decimal(amount, Currency::USD).context("price out of range")
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_commerce::catalog::InMemoryCatalog;

    fn args() -> BrowseArgs {
        BrowseArgs {
            q: None,
            category: None,
            min_price: None,
            max_price: None,
            sort: "featured".to_string(),
        }
    }

    fn ids(query: &BrowseQuery) -> Vec<String> {
        let catalog = InMemoryCatalog::storefront();
        query.run(&catalog).iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_defaults_match_browse_query() {
        assert_eq!(build_query(&args()).unwrap(), BrowseQuery::new());
    }

    #[test]
    fn test_price_range_and_sort() {
        let query = build_query(&BrowseArgs {
            min_price: Some(100.0),
            max_price: Some(200.0),
            sort: "price-high".to_string(),
            ..args()
        })
        .unwrap();
        assert_eq!(ids(&query), ["8", "6", "7"]);
    }

    #[test]
    fn test_category_and_text() {
        let query = build_query(&BrowseArgs {
            q: Some("wireless".to_string()),
            category: Some("Audio".to_string()),
            ..args()
        })
        .unwrap();
        assert_eq!(ids(&query), ["1", "8"]);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(build_query(&BrowseArgs {
            sort: "cheapest".to_string(),
            ..args()
        })
        .is_err());
        assert!(build_query(&BrowseArgs {
            min_price: Some(-1.0),
            ..args()
        })
        .is_err());
        assert!(build_query(&BrowseArgs {
            min_price: Some(300.0),
            max_price: Some(100.0),
            ..args()
        })
        .is_err());
    }
}
